//! Shared test support for the synthops workspace.
//!
//! [`ScriptedChain`] stands in for a live node: reads answer from a scripted
//! table keyed by exact calldata, sends are recorded and minable, failable,
//! or revertable. Fixture helpers write consistent deployment directories
//! for integration tests.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use alloy::primitives::{keccak256, Address, B256, U256};
use async_trait::async_trait;
use parking_lot::Mutex;
use synthops_chain::registry::{OWNER_SIG, SYNTHS_SIG, TOTAL_SUPPLY_SIG};
use synthops_chain::{abi, ChainClient, ChainError, CurrencyKey, SendOptions, TxReceipt};
use synthops_manifest::{SynthRecord, TargetEntry, REGISTRY_FILE, SYNTHS_FILE};

/// A send the scripted chain received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentTx {
    pub target: Address,
    pub method: &'static str,
    pub data: Vec<u8>,
    pub options: SendOptions,
}

#[derive(Debug, Clone)]
enum SendMode {
    Mine,
    Fail(String),
    Revert,
}

/// In-memory [`ChainClient`] answering scripted calldata.
#[derive(Debug)]
pub struct ScriptedChain {
    responses: Mutex<HashMap<(Address, Vec<u8>), Vec<u8>>>,
    reads: Mutex<Vec<(Address, &'static str)>>,
    sends: Mutex<Vec<SentTx>>,
    send_mode: Mutex<SendMode>,
}

impl Default for ScriptedChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedChain {
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            reads: Mutex::new(Vec::new()),
            sends: Mutex::new(Vec::new()),
            send_mode: Mutex::new(SendMode::Mine),
        }
    }

    /// Scripts a raw response for exact calldata at a target.
    pub fn stub(&self, target: Address, data: Vec<u8>, response: Vec<u8>) {
        self.responses.lock().insert((target, data), response);
    }

    /// Scripts `synths(key)` on the registry to answer `synth`.
    pub fn stub_synth_address(&self, registry: Address, key: &CurrencyKey, synth: Address) {
        let data = abi::encode_call(SYNTHS_SIG, &[key.to_bytes32()]);
        self.stub(registry, data, address_word(synth));
    }

    /// Scripts `owner()` on the registry.
    pub fn stub_owner(&self, registry: Address, owner: Address) {
        let data = abi::encode_call(OWNER_SIG, &[]);
        self.stub(registry, data, address_word(owner));
    }

    /// Scripts `totalSupply()` on a token.
    pub fn stub_total_supply(&self, token: Address, supply: U256) {
        let data = abi::encode_call(TOTAL_SUPPLY_SIG, &[]);
        self.stub(token, data, supply.to_be_bytes::<32>().to_vec());
    }

    /// Every send fails at submission with `reason`.
    pub fn fail_sends(&self, reason: impl Into<String>) {
        *self.send_mode.lock() = SendMode::Fail(reason.into());
    }

    /// Every send mines but reverts.
    pub fn revert_sends(&self) {
        *self.send_mode.lock() = SendMode::Revert;
    }

    /// All sends received so far, in order.
    #[must_use]
    pub fn sends(&self) -> Vec<SentTx> {
        self.sends.lock().clone()
    }

    /// Number of read calls served or rejected so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.lock().len()
    }
}

fn address_word(address: Address) -> Vec<u8> {
    let mut word = vec![0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

#[async_trait]
impl ChainClient for ScriptedChain {
    async fn call(
        &self,
        target: Address,
        method: &'static str,
        data: Vec<u8>,
    ) -> Result<Vec<u8>, ChainError> {
        self.reads.lock().push((target, method));
        self.responses
            .lock()
            .get(&(target, data))
            .cloned()
            .ok_or_else(|| ChainError::CallFailed {
                target,
                method,
                reason: "unscripted call".to_string(),
            })
    }

    async fn send(
        &self,
        target: Address,
        method: &'static str,
        data: Vec<u8>,
        options: &SendOptions,
    ) -> Result<TxReceipt, ChainError> {
        let tx_hash: B256 = keccak256(&data);
        self.sends.lock().push(SentTx {
            target,
            method,
            data,
            options: *options,
        });
        match &*self.send_mode.lock() {
            SendMode::Mine => Ok(TxReceipt {
                tx_hash,
                block_number: Some(1),
                success: true,
            }),
            SendMode::Fail(reason) => Err(ChainError::SendFailed {
                target,
                method,
                reason: reason.clone(),
            }),
            SendMode::Revert => Ok(TxReceipt {
                tx_hash,
                block_number: Some(1),
                success: false,
            }),
        }
    }
}

/// One synth's addresses for a fixture deployment.
#[derive(Debug, Clone)]
pub struct FixtureSynth {
    pub key: CurrencyKey,
    pub proxy: Address,
    pub token_state: Address,
    pub synth: Address,
}

/// Builds a fixture synth with addresses derived from one byte.
#[must_use]
pub fn fixture_synth(key: &str, base: u8) -> FixtureSynth {
    FixtureSynth {
        key: CurrencyKey::new(key).expect("fixture key is valid"),
        proxy: Address::repeat_byte(base),
        token_state: Address::repeat_byte(base.wrapping_add(1)),
        synth: Address::repeat_byte(base.wrapping_add(2)),
    }
}

/// Writes `deployment.json` and `synths.json` into `dir`: the registry
/// contract entry plus the three role rows and one list record per synth.
pub fn write_deployment(
    dir: &Path,
    registry_contract: &str,
    registry_address: Address,
    synths: &[FixtureSynth],
) {
    let mut targets = std::collections::BTreeMap::new();
    targets.insert(
        registry_contract.to_string(),
        TargetEntry {
            address: registry_address,
            source: registry_contract.to_string(),
        },
    );
    let mut records = Vec::new();
    for synth in synths {
        let key = &synth.key;
        targets.insert(
            format!("Proxy{key}"),
            TargetEntry {
                address: synth.proxy,
                source: "ProxyERC20".to_string(),
            },
        );
        targets.insert(
            format!("TokenState{key}"),
            TargetEntry {
                address: synth.token_state,
                source: "TokenState".to_string(),
            },
        );
        targets.insert(
            format!("Synth{key}"),
            TargetEntry {
                address: synth.synth,
                source: "Synth".to_string(),
            },
        );
        records.push(SynthRecord {
            name: key.clone(),
            asset: key.as_str().trim_start_matches('s').to_string(),
            category: "crypto".to_string(),
            decimals: 18,
            address: synth.synth,
            description: None,
        });
    }
    write_pretty(&dir.join(REGISTRY_FILE), &targets);
    write_pretty(&dir.join(SYNTHS_FILE), &records);
}

fn write_pretty<T: serde::Serialize>(path: &Path, value: &T) {
    let mut text = serde_json::to_string_pretty(value).expect("fixture serializes");
    text.push('\n');
    fs::write(path, text).expect("fixture writes");
}
