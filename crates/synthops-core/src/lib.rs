//! Synth removal engine.
//!
//! The [`RemovalCoordinator`] drives the whole flow:
//! - batch input gates (unknown, protected, duplicate keys)
//! - one confirmation per batch through the [`Confirmation`] seam
//! - per synth: resolve local targets, compare against chain state, check
//!   circulating supply, then either submit `removeSynth` (signer owns the
//!   registry) or record a pending action (it does not)
//! - commit each removal to both manifest files before the next key
//!
//! # Example
//!
//! ```rust,ignore
//! use synthops_core::{AutoApprove, RemovalConfig, RemovalCoordinator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RemovalConfig::new(signer_address);
//! let mut coordinator = RemovalCoordinator::new(&client, deployment, pending, config);
//!
//! let report = coordinator.remove_synths(&keys, &AutoApprove).await?;
//! println!("removed {} synths", report.outcomes.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod phase;
pub mod types;

pub use config::{GasPolicy, RemovalConfig, DEFAULT_REGISTRY_CONTRACT};
pub use coordinator::RemovalCoordinator;
pub use error::RemovalError;
pub use phase::RemovalPhase;
pub use types::{AutoApprove, Confirmation, Outcome, RemovalReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
