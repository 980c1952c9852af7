//! The transport seam.
//!
//! Protocol code talks to the chain through [`ChainClient`] only. The alloy
//! HTTP client implements it for real runs; tests script it in memory.

use alloy::primitives::{Address, B256};
use async_trait::async_trait;

use crate::error::ChainError;

/// Submission parameters for a state-changing transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    /// Sender account. Must be the signer's address.
    pub from: Address,
    /// Gas limit in units.
    pub gas_limit: u64,
    /// Gas price in wei.
    pub gas_price_wei: u128,
}

/// What came back from a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    /// False means the transaction was mined but reverted.
    pub success: bool,
}

/// Raw calldata access to a chain.
///
/// `method` carries the canonical signature of the function behind the
/// calldata. It is there for error reporting and logging; implementations
/// must not dispatch on it.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Executes a read-only call and returns the raw return data.
    async fn call(
        &self,
        target: Address,
        method: &'static str,
        data: Vec<u8>,
    ) -> Result<Vec<u8>, ChainError>;

    /// Submits a transaction and waits for its receipt.
    async fn send(
        &self,
        target: Address,
        method: &'static str,
        data: Vec<u8>,
        options: &SendOptions,
    ) -> Result<TxReceipt, ChainError>;
}
