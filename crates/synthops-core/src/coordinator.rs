//! The removal pipeline.

use std::collections::BTreeSet;

use alloy::primitives::Address;
use synthops_chain::{ChainClient, CurrencyKey, SynthRegistry, SynthToken};
use synthops_manifest::{related_target_names, Deployment, PendingAction, PendingActionLog};
use tracing::{debug, info, warn};

use crate::config::RemovalConfig;
use crate::error::RemovalError;
use crate::phase::RemovalPhase;
use crate::types::{Confirmation, Outcome, RemovalReport};

/// Drives synth removal end to end: input gates, one confirmation, then a
/// strictly sequential validate / execute-or-defer / commit pass per key.
#[derive(Debug)]
pub struct RemovalCoordinator<'a, C: ChainClient> {
    chain: &'a C,
    deployment: Deployment,
    pending: PendingActionLog,
    config: RemovalConfig,
}

impl<'a, C: ChainClient> RemovalCoordinator<'a, C> {
    #[must_use]
    pub fn new(
        chain: &'a C,
        deployment: Deployment,
        pending: PendingActionLog,
        config: RemovalConfig,
    ) -> Self {
        Self {
            chain,
            deployment,
            pending,
            config,
        }
    }

    /// The deployment state as this coordinator currently sees it.
    #[must_use]
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Removes a batch of synths in caller order.
    ///
    /// Input gates run over the whole batch before anything touches the
    /// chain: unknown, protected, and repeated keys reject the run with no
    /// side effects. Confirmation is asked once; declining returns a
    /// cancelled report. After that each key is validated, executed or
    /// deferred, and committed to both manifest files before the next key
    /// starts. A failure mid-batch leaves earlier keys committed.
    pub async fn remove_synths(
        &mut self,
        keys: &[CurrencyKey],
        confirmation: &dyn Confirmation,
    ) -> Result<RemovalReport, RemovalError> {
        if keys.is_empty() {
            debug!("empty batch, nothing to remove");
            return Ok(RemovalReport::default());
        }

        self.check_batch(keys)?;

        if !confirmation.confirm_removal(keys) {
            info!("operator declined, batch cancelled");
            return Ok(RemovalReport::cancelled());
        }

        let mut report = RemovalReport::default();
        for key in keys {
            let outcome = self.remove_one(key).await?;
            report.outcomes.push(outcome);
        }
        info!(
            executed = report.executed(),
            deferred = report.deferred(),
            "batch complete"
        );
        Ok(report)
    }

    fn check_batch(&self, keys: &[CurrencyKey]) -> Result<(), RemovalError> {
        let mut seen = BTreeSet::new();
        for key in keys {
            if !seen.insert(key) {
                return Err(RemovalError::DuplicateSynth(key.clone()));
            }
            if !self.deployment.contains(key) {
                return Err(RemovalError::UnknownSynth(key.clone()));
            }
            if self.config.is_protected(key) {
                return Err(RemovalError::ProtectedSynth(key.clone()));
            }
        }
        Ok(())
    }

    async fn remove_one(&mut self, key: &CurrencyKey) -> Result<Outcome, RemovalError> {
        let mut phase = RemovalPhase::Pending;
        debug!(%key, "removal started");

        let local_synth = self.resolve_local_synth(key)?;
        let registry_address = self.registry_address()?;
        let registry = SynthRegistry::new(self.chain, registry_address);

        let on_chain = registry.synth_for(key).await?;
        if on_chain != local_synth {
            warn!(%key, %on_chain, local = %local_synth, "on-chain address diverges from manifest");
            return Err(RemovalError::StateDivergence {
                key: key.clone(),
                on_chain,
                local: local_synth,
            });
        }

        let supply = SynthToken::new(self.chain, local_synth).total_supply().await?;
        if !supply.is_zero() {
            return Err(RemovalError::NonZeroBalance {
                key: key.clone(),
                supply,
            });
        }
        phase.advance(RemovalPhase::Validated);

        let owner = registry.owner().await?;
        let outcome = if owner == self.config.signer {
            let options = self.config.gas.send_options(self.config.signer);
            let receipt = registry.remove_synth(key, &options).await?;
            phase.advance(RemovalPhase::Executed);
            info!(%key, tx_hash = %receipt.tx_hash, "synth removed on chain");
            Outcome::Executed {
                key: key.clone(),
                tx_hash: receipt.tx_hash,
            }
        } else {
            let pending_key = format!("{}.removeSynth({key})", self.config.registry_contract);
            self.pending.record(
                pending_key.clone(),
                PendingAction {
                    target: registry_address,
                    action: format!("removeSynth({key})"),
                },
            )?;
            phase.advance(RemovalPhase::Deferred);
            info!(%key, %owner, "signer does not own the registry, removal deferred");
            Outcome::Deferred {
                key: key.clone(),
                owner,
                pending_key,
            }
        };

        self.deployment.commit_removal(key)?;
        phase.advance(RemovalPhase::Committed);
        Ok(outcome)
    }

    /// The locally recorded primary address. All three related rows must be
    /// present; a missing one means the registry file is inconsistent.
    fn resolve_local_synth(&self, key: &CurrencyKey) -> Result<Address, RemovalError> {
        let [proxy, token_state, synth] = related_target_names(key);
        for name in [proxy, token_state] {
            if self.deployment.target(&name).is_none() {
                return Err(RemovalError::AddressResolution {
                    key: key.clone(),
                    name,
                });
            }
        }
        match self.deployment.target(&synth) {
            Some(entry) => Ok(entry.address),
            None => Err(RemovalError::AddressResolution {
                key: key.clone(),
                name: synth,
            }),
        }
    }

    fn registry_address(&self) -> Result<Address, RemovalError> {
        let name = &self.config.registry_contract;
        match self.deployment.target(name) {
            Some(entry) => Ok(entry.address),
            None => Err(RemovalError::MissingRegistryContract { name: name.clone() }),
        }
    }
}
