//! Run configuration.

use std::collections::BTreeSet;

use alloy::primitives::Address;
use synthops_chain::{CurrencyKey, SendOptions};

/// Registry-file name of the top-level registry contract.
pub const DEFAULT_REGISTRY_CONTRACT: &str = "SynthRegistry";

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Gas parameters, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPolicy {
    pub gas_price_gwei: u64,
    pub gas_limit: u64,
}

impl Default for GasPolicy {
    fn default() -> Self {
        Self {
            gas_price_gwei: 1,
            gas_limit: 500_000,
        }
    }
}

impl GasPolicy {
    /// Submission options for a transaction from `from`.
    #[must_use]
    pub fn send_options(&self, from: Address) -> SendOptions {
        SendOptions {
            from,
            gas_limit: self.gas_limit,
            gas_price_wei: u128::from(self.gas_price_gwei) * WEI_PER_GWEI,
        }
    }
}

/// Configuration for one removal run.
#[derive(Debug, Clone)]
pub struct RemovalConfig {
    /// Address of the key signing this run's transactions.
    pub signer: Address,
    /// Registry-file name of the registry contract.
    pub registry_contract: String,
    /// Keys that may never be removed.
    pub protected: BTreeSet<CurrencyKey>,
    pub gas: GasPolicy,
}

impl RemovalConfig {
    /// Defaults: `SynthRegistry` registry name, `sUSD` protected, default
    /// gas policy.
    #[must_use]
    pub fn new(signer: Address) -> Self {
        let susd = CurrencyKey::new("sUSD").expect("static key is valid");
        Self {
            signer,
            registry_contract: DEFAULT_REGISTRY_CONTRACT.to_string(),
            protected: BTreeSet::from([susd]),
            gas: GasPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_registry_contract(mut self, name: impl Into<String>) -> Self {
        self.registry_contract = name.into();
        self
    }

    #[must_use]
    pub fn with_protected(mut self, protected: BTreeSet<CurrencyKey>) -> Self {
        self.protected = protected;
        self
    }

    #[must_use]
    pub fn with_gas(mut self, gas: GasPolicy) -> Self {
        self.gas = gas;
        self
    }

    /// Whether a key is in the protected set.
    #[must_use]
    pub fn is_protected(&self, key: &CurrencyKey) -> bool {
        self.protected.contains(key)
    }
}
