//! The pending action log.
//!
//! When the configured signer cannot submit a privileged transaction itself,
//! the action is written here for whoever holds the owner key. Entries are
//! keyed so that re-running the tool upserts instead of duplicating.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::deployment::write_json;
use crate::error::ManifestError;

/// Pending action log file.
pub const PENDING_ACTIONS_FILE: &str = "pending-actions.json";

/// One transaction waiting on a privileged signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    /// Contract the transaction must be sent to.
    pub target: Address,
    /// Human-readable call, e.g. `removeSynth(sBTC)`.
    pub action: String,
}

/// File-backed, keyed log of pending actions.
#[derive(Debug)]
pub struct PendingActionLog {
    path: PathBuf,
    actions: BTreeMap<String, PendingAction>,
}

impl PendingActionLog {
    /// Opens the log at `path`. A missing file is an empty log; any other
    /// read problem is fatal.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let path = path.into();
        let actions = match fs::read_to_string(&path) {
            Ok(text) => {
                serde_json::from_str(&text).map_err(|source| ManifestError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(ManifestError::Read { path, source }),
        };
        Ok(Self { path, actions })
    }

    /// Number of recorded actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Looks up an action by its key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PendingAction> {
        self.actions.get(key)
    }

    /// Upserts an action and rewrites the file immediately.
    pub fn record(
        &mut self,
        key: impl Into<String>,
        action: PendingAction,
    ) -> Result<(), ManifestError> {
        let key = key.into();
        let replaced = self.actions.insert(key.clone(), action).is_some();
        write_json(&self.path, &self.actions)?;
        info!(key, replaced, "pending action recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = PendingActionLog::load(dir.path().join(PENDING_ACTIONS_FILE)).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn record_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PENDING_ACTIONS_FILE);

        let mut log = PendingActionLog::load(&path).unwrap();
        log.record(
            "SynthRegistry.removeSynth(sBTC)",
            PendingAction {
                target: Address::repeat_byte(0x01),
                action: "removeSynth(sBTC)".to_string(),
            },
        )
        .unwrap();

        let reloaded = PendingActionLog::load(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(
            reloaded.get("SynthRegistry.removeSynth(sBTC)").unwrap().action,
            "removeSynth(sBTC)"
        );
    }

    #[test]
    fn record_same_key_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PENDING_ACTIONS_FILE);

        let mut log = PendingActionLog::load(&path).unwrap();
        for byte in [0x01u8, 0x02] {
            log.record(
                "SynthRegistry.removeSynth(sBTC)",
                PendingAction {
                    target: Address::repeat_byte(byte),
                    action: "removeSynth(sBTC)".to_string(),
                },
            )
            .unwrap();
        }

        let reloaded = PendingActionLog::load(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(
            reloaded.get("SynthRegistry.removeSynth(sBTC)").unwrap().target,
            Address::repeat_byte(0x02)
        );
    }

    #[test]
    fn malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PENDING_ACTIONS_FILE);
        fs::write(&path, "not json").unwrap();

        let err = PendingActionLog::load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }
}
