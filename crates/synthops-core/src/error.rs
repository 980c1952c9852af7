//! The removal error taxonomy.

use alloy::primitives::{Address, U256};
use synthops_chain::{ChainError, CurrencyKey};
use synthops_manifest::ManifestError;
use thiserror::Error;

/// Everything that can stop a removal run.
#[derive(Error, Debug)]
pub enum RemovalError {
    /// Requested key is not in the synth list.
    #[error("synth {0} is not listed in this deployment")]
    UnknownSynth(CurrencyKey),

    /// Requested key is in the protected set.
    #[error("synth {0} is protected and cannot be removed")]
    ProtectedSynth(CurrencyKey),

    /// The same key appears more than once in one batch.
    #[error("synth {0} appears more than once in the batch")]
    DuplicateSynth(CurrencyKey),

    /// A related target row is missing from the registry file.
    #[error("synth {key}: registry file has no {name} entry")]
    AddressResolution { key: CurrencyKey, name: String },

    /// The registry contract itself has no registry-file entry.
    #[error("registry contract {name} has no entry in the registry file")]
    MissingRegistryContract { name: String },

    /// Local and on-chain addresses disagree; manifests are stale.
    #[error("synth {key}: on-chain address {on_chain} does not match local {local}")]
    StateDivergence {
        key: CurrencyKey,
        on_chain: Address,
        local: Address,
    },

    /// The synth still has circulating supply.
    #[error("synth {key}: total supply is {supply}, must be zero")]
    NonZeroBalance { key: CurrencyKey, supply: U256 },

    /// A chain read or transaction failed.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// A manifest file could not be loaded or rewritten. After a failed
    /// write, local files may lag what already happened on chain.
    #[error(transparent)]
    Persistence(#[from] ManifestError),
}

impl RemovalError {
    /// True for errors raised by input validation, before any chain
    /// interaction.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownSynth(_) | Self::ProtectedSynth(_) | Self::DuplicateSynth(_)
        )
    }

    /// Process exit status for this error. Persistence failures get their
    /// own code so operators know to inspect the manifest files.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Persistence(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> CurrencyKey {
        CurrencyKey::new(s).unwrap()
    }

    #[test]
    fn input_classification() {
        assert!(RemovalError::UnknownSynth(key("sXYZ")).is_input());
        assert!(RemovalError::ProtectedSynth(key("sUSD")).is_input());
        assert!(RemovalError::DuplicateSynth(key("sBTC")).is_input());
        assert!(!RemovalError::NonZeroBalance {
            key: key("sBTC"),
            supply: U256::from(1u64),
        }
        .is_input());
    }

    #[test]
    fn exit_codes() {
        let persistence = RemovalError::Persistence(ManifestError::Write {
            path: "deployment.json".into(),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(persistence.exit_code(), 2);
        assert_eq!(RemovalError::UnknownSynth(key("sXYZ")).exit_code(), 1);
    }
}
