//! Typed wrappers over the raw [`ChainClient`].
//!
//! [`SynthRegistry`] speaks to the registry contract that maps currency keys
//! to synth token addresses and carries the ownable surface. [`SynthToken`]
//! covers the one ERC-20 read the removal flow needs.

use alloy::primitives::{Address, U256};
use tracing::debug;

use crate::abi;
use crate::client::{ChainClient, SendOptions, TxReceipt};
use crate::error::ChainError;
use crate::key::CurrencyKey;

/// `synths(bytes32) -> address` registry lookup.
pub const SYNTHS_SIG: &str = "synths(bytes32)";
/// `owner() -> address` from the ownable surface.
pub const OWNER_SIG: &str = "owner()";
/// `removeSynth(bytes32)` owner-only mutation.
pub const REMOVE_SYNTH_SIG: &str = "removeSynth(bytes32)";
/// `totalSupply() -> uint256` ERC-20 read.
pub const TOTAL_SUPPLY_SIG: &str = "totalSupply()";

/// The registry contract, viewed through a client.
#[derive(Debug)]
pub struct SynthRegistry<'a, C: ChainClient> {
    chain: &'a C,
    address: Address,
}

impl<'a, C: ChainClient> SynthRegistry<'a, C> {
    #[inline]
    #[must_use]
    pub fn new(chain: &'a C, address: Address) -> Self {
        Self { chain, address }
    }

    /// The registry contract address.
    #[inline]
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Resolves a currency key to the synth address the registry holds.
    /// Returns the zero address for unregistered keys.
    pub async fn synth_for(&self, key: &CurrencyKey) -> Result<Address, ChainError> {
        let data = abi::encode_call(SYNTHS_SIG, &[key.to_bytes32()]);
        let returned = self.chain.call(self.address, SYNTHS_SIG, data).await?;
        let synth = abi::decode_address(SYNTHS_SIG, &returned)?;
        debug!(%key, %synth, "resolved registry entry");
        Ok(synth)
    }

    /// The registry's current owner.
    pub async fn owner(&self) -> Result<Address, ChainError> {
        let data = abi::encode_call(OWNER_SIG, &[]);
        let returned = self.chain.call(self.address, OWNER_SIG, data).await?;
        abi::decode_address(OWNER_SIG, &returned)
    }

    /// Submits `removeSynth(key)` and waits for the receipt.
    ///
    /// A mined-but-reverted transaction is an error here; callers never see
    /// a failed receipt as success.
    pub async fn remove_synth(
        &self,
        key: &CurrencyKey,
        options: &SendOptions,
    ) -> Result<TxReceipt, ChainError> {
        let data = abi::encode_call(REMOVE_SYNTH_SIG, &[key.to_bytes32()]);
        let receipt = self
            .chain
            .send(self.address, REMOVE_SYNTH_SIG, data, options)
            .await?;
        if !receipt.success {
            return Err(ChainError::Reverted {
                tx_hash: receipt.tx_hash,
            });
        }
        debug!(%key, tx_hash = %receipt.tx_hash, "removeSynth mined");
        Ok(receipt)
    }
}

/// One synth token contract, for supply checks.
#[derive(Debug)]
pub struct SynthToken<'a, C: ChainClient> {
    chain: &'a C,
    address: Address,
}

impl<'a, C: ChainClient> SynthToken<'a, C> {
    #[inline]
    #[must_use]
    pub fn new(chain: &'a C, address: Address) -> Self {
        Self { chain, address }
    }

    /// The token's total supply.
    pub async fn total_supply(&self) -> Result<U256, ChainError> {
        let data = abi::encode_call(TOTAL_SUPPLY_SIG, &[]);
        let returned = self.chain.call(self.address, TOTAL_SUPPLY_SIG, data).await?;
        abi::decode_u256(TOTAL_SUPPLY_SIG, &returned)
    }
}
