//! Coordinator inputs and outputs.

use alloy::primitives::{Address, B256};
use synthops_chain::CurrencyKey;

/// How one synth left the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The signer owned the registry; `removeSynth` was mined.
    Executed { key: CurrencyKey, tx_hash: B256 },
    /// The signer did not own the registry; the action was queued for the
    /// owner instead.
    Deferred {
        key: CurrencyKey,
        owner: Address,
        pending_key: String,
    },
}

impl Outcome {
    /// The synth this outcome is about.
    #[must_use]
    pub fn key(&self) -> &CurrencyKey {
        match self {
            Self::Executed { key, .. } | Self::Deferred { key, .. } => key,
        }
    }
}

/// What a removal run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalReport {
    /// Per-key outcomes in processing order. Every entry here is committed
    /// to both manifest files.
    pub outcomes: Vec<Outcome>,
    /// The operator declined the confirmation prompt; nothing happened.
    pub cancelled: bool,
}

impl RemovalReport {
    /// A report for a declined confirmation.
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            outcomes: Vec::new(),
            cancelled: true,
        }
    }

    /// How many removals were executed on chain.
    #[must_use]
    pub fn executed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Outcome::Executed { .. }))
            .count()
    }

    /// How many removals were deferred to the registry owner.
    #[must_use]
    pub fn deferred(&self) -> usize {
        self.outcomes.len() - self.executed()
    }
}

/// The one question the coordinator asks before touching anything.
pub trait Confirmation {
    /// Whether to proceed with removing `keys`. Asked once per batch, after
    /// input validation and before any chain interaction.
    fn confirm_removal(&self, keys: &[CurrencyKey]) -> bool;
}

/// Always proceeds. For non-interactive runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl Confirmation for AutoApprove {
    fn confirm_removal(&self, _keys: &[CurrencyKey]) -> bool {
        true
    }
}
