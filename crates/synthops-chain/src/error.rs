//! Chain access errors.

use alloy::primitives::{Address, B256};
use thiserror::Error;

/// Errors surfaced by the chain access layer.
#[derive(Error, Debug)]
pub enum ChainError {
    /// A read-only call failed at the transport or was rejected by the node.
    #[error("call {method} on {target} failed: {reason}")]
    CallFailed {
        target: Address,
        method: &'static str,
        reason: String,
    },

    /// The node answered but the return payload did not match the expected shape.
    #[error("bad return data from {method}: {reason}")]
    BadReturnData {
        method: &'static str,
        reason: String,
    },

    /// A state-changing transaction could not be submitted or mined.
    #[error("transaction {method} to {target} failed: {reason}")]
    SendFailed {
        target: Address,
        method: &'static str,
        reason: String,
    },

    /// A transaction was mined but reverted.
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: B256 },

    /// The RPC endpoint could not be used.
    #[error("invalid RPC endpoint {url}: {reason}")]
    Endpoint { url: String, reason: String },
}

impl ChainError {
    /// True when the error came from submitting or mining a transaction,
    /// as opposed to a read or a malformed endpoint.
    #[must_use]
    pub fn is_transaction(&self) -> bool {
        matches!(self, Self::SendFailed { .. } | Self::Reverted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_classification() {
        let revert = ChainError::Reverted {
            tx_hash: B256::ZERO,
        };
        assert!(revert.is_transaction());

        let call = ChainError::CallFailed {
            target: Address::ZERO,
            method: "owner()",
            reason: "timeout".into(),
        };
        assert!(!call.is_transaction());
    }
}
