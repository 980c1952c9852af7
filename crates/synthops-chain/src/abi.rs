//! Minimal ABI word codec.
//!
//! The registry protocol only ever exchanges 32-byte words: a `bytes32`
//! argument going in, an `address` or `uint256` coming back. This module
//! covers exactly those shapes instead of pulling in a full ABI stack.

use alloy::primitives::{keccak256, Address, B256, U256};

use crate::error::ChainError;

/// First four bytes of the keccak-256 hash of a canonical signature.
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encodes a call: selector followed by each argument as a 32-byte word.
#[must_use]
pub fn encode_call(signature: &str, args: &[B256]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32 * args.len());
    data.extend_from_slice(&selector(signature));
    for arg in args {
        data.extend_from_slice(arg.as_slice());
    }
    data
}

/// Decodes a single returned `address` word.
pub fn decode_address(method: &'static str, data: &[u8]) -> Result<Address, ChainError> {
    let word = single_word(method, data)?;
    if word[..12].iter().any(|&b| b != 0) {
        return Err(ChainError::BadReturnData {
            method,
            reason: "address word has non-zero padding".into(),
        });
    }
    Ok(Address::from_slice(&word[12..]))
}

/// Decodes a single returned `uint256` word.
pub fn decode_u256(method: &'static str, data: &[u8]) -> Result<U256, ChainError> {
    let word = single_word(method, data)?;
    Ok(U256::from_be_slice(word))
}

fn single_word<'a>(method: &'static str, data: &'a [u8]) -> Result<&'a [u8], ChainError> {
    if data.len() != 32 {
        return Err(ChainError::BadReturnData {
            method,
            reason: format!("expected 32 bytes, got {}", data.len()),
        });
    }
    Ok(data)
}
