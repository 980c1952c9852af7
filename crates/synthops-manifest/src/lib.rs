//! Deployment manifest persistence.
//!
//! A deployment directory holds two coupled JSON files describing one
//! network's state, plus a log of actions waiting on a privileged signer:
//!
//! - `deployment.json`: contract name to address/source targets
//! - `synths.json`: the synth listing with per-synth metadata
//! - `pending-actions.json`: transactions someone else has to submit
//!
//! [`Deployment`] presents the two coupled files as one unit so callers can
//! never persist them out of step. [`PendingActionLog`] is keyed and
//! idempotent; recording the same action twice overwrites in place.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod deployment;
pub mod error;
pub mod pending;

pub use deployment::{
    related_target_names, Deployment, SynthRecord, TargetEntry, REGISTRY_FILE, SYNTHS_FILE,
};
pub use error::ManifestError;
pub use pending::{PendingAction, PendingActionLog, PENDING_ACTIONS_FILE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
