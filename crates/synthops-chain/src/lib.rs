//! Chain access layer for synth deployment tooling.
//!
//! Provides:
//! - [`CurrencyKey`]: validated synth identifiers with a fixed on-chain encoding
//! - A minimal ABI word codec for the handful of call shapes this tool uses
//! - The [`ChainClient`] seam separating protocol logic from transports
//! - Typed wrappers ([`SynthRegistry`], [`SynthToken`]) over the raw client
//! - An alloy-backed HTTP client implementing the seam
//!
//! # Example
//!
//! ```rust,ignore
//! use synthops_chain::{connect, CurrencyKey, SynthRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let signer = std::env::var("SYNTHOPS_PRIVATE_KEY")?.parse()?;
//! let client = connect("https://rpc.example.org", signer)?;
//! let registry = SynthRegistry::new(&client, registry_address);
//!
//! let key = CurrencyKey::new("sBTC")?;
//! let synth = registry.synth_for(&key).await?;
//! println!("{key} resolves to {synth}");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod abi;
pub mod client;
pub mod error;
pub mod key;
pub mod registry;
pub mod rpc;

pub use client::{ChainClient, SendOptions, TxReceipt};
pub use error::ChainError;
pub use key::{CurrencyKey, InvalidCurrencyKey};
pub use registry::{SynthRegistry, SynthToken};
pub use rpc::{connect, HttpChainClient};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
