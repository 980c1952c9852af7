//! The two coupled deployment files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use synthops_chain::CurrencyKey;
use tracing::info;

use crate::error::ManifestError;

/// Registry file: contract name to deployed target.
pub const REGISTRY_FILE: &str = "deployment.json";
/// Synth list file.
pub const SYNTHS_FILE: &str = "synths.json";

/// One deployed contract target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub address: Address,
    /// Source artifact name the target was deployed from.
    pub source: String,
}

/// One row of the synth list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthRecord {
    pub name: CurrencyKey,
    pub asset: String,
    pub category: String,
    pub decimals: u8,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The contract names a synth occupies in the registry file.
///
/// Order is fixed: proxy, token state, primary.
#[must_use]
pub fn related_target_names(key: &CurrencyKey) -> [String; 3] {
    [
        format!("Proxy{key}"),
        format!("TokenState{key}"),
        format!("Synth{key}"),
    ]
}

/// One network's deployment state: the registry map and the synth list,
/// loaded together and always persisted together.
#[derive(Debug)]
pub struct Deployment {
    dir: PathBuf,
    registry: BTreeMap<String, TargetEntry>,
    synths: Vec<SynthRecord>,
}

impl Deployment {
    /// Loads both files from a deployment directory. Either file missing or
    /// malformed is fatal.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let dir = dir.as_ref().to_path_buf();
        let registry = read_json(&dir.join(REGISTRY_FILE))?;
        let synths = read_json(&dir.join(SYNTHS_FILE))?;
        Ok(Self {
            dir,
            registry,
            synths,
        })
    }

    /// The deployment directory this was loaded from.
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Looks up a contract by its registry name.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&TargetEntry> {
        self.registry.get(name)
    }

    /// The synth record for a key, if listed.
    #[must_use]
    pub fn synth(&self, key: &CurrencyKey) -> Option<&SynthRecord> {
        self.synths.iter().find(|record| &record.name == key)
    }

    /// Whether the synth list carries this key.
    #[must_use]
    pub fn contains(&self, key: &CurrencyKey) -> bool {
        self.synth(key).is_some()
    }

    /// All listed synth records, in file order.
    #[must_use]
    pub fn synths(&self) -> &[SynthRecord] {
        &self.synths
    }

    /// Drops the synth's registry rows and its list record, then rewrites
    /// both files. State is only mutated if both writes can be attempted;
    /// a failed write leaves disk state behind memory, which the caller
    /// must treat as fatal.
    pub fn commit_removal(&mut self, key: &CurrencyKey) -> Result<(), ManifestError> {
        for name in related_target_names(key) {
            self.registry.remove(&name);
        }
        self.synths.retain(|record| &record.name != key);

        write_json(&self.dir.join(REGISTRY_FILE), &self.registry)?;
        write_json(&self.dir.join(SYNTHS_FILE), &self.synths)?;
        info!(%key, dir = %self.dir.display(), "deployment manifests rewritten");
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ManifestError> {
    let text = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ManifestError> {
    let mut text =
        serde_json::to_string_pretty(value).map_err(|source| ManifestError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    text.push('\n');
    fs::write(path, text).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> CurrencyKey {
        CurrencyKey::new(s).unwrap()
    }

    fn write_fixture(dir: &Path) {
        let mut registry = BTreeMap::new();
        registry.insert(
            "SynthRegistry".to_string(),
            TargetEntry {
                address: Address::repeat_byte(0x01),
                source: "SynthRegistry".to_string(),
            },
        );
        for (name, byte) in [("ProxysBTC", 0x02), ("TokenStatesBTC", 0x03), ("SynthsBTC", 0x04)] {
            registry.insert(
                name.to_string(),
                TargetEntry {
                    address: Address::repeat_byte(byte),
                    source: name.trim_end_matches("sBTC").to_string(),
                },
            );
        }
        let synths = vec![SynthRecord {
            name: key("sBTC"),
            asset: "BTC".to_string(),
            category: "crypto".to_string(),
            decimals: 18,
            address: Address::repeat_byte(0x04),
            description: None,
        }];
        write_json(&dir.join(REGISTRY_FILE), &registry).unwrap();
        write_json(&dir.join(SYNTHS_FILE), &synths).unwrap();
    }

    #[test]
    fn load_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Deployment::load(dir.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
        assert!(!err.is_write());
    }

    #[test]
    fn load_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let deployment = Deployment::load(dir.path()).unwrap();
        assert!(deployment.contains(&key("sBTC")));
        assert!(!deployment.contains(&key("sETH")));
        assert_eq!(
            deployment.target("SynthsBTC").unwrap().address,
            Address::repeat_byte(0x04)
        );
    }

    #[test]
    fn related_names_cover_three_roles() {
        assert_eq!(
            related_target_names(&key("sBTC")),
            ["ProxysBTC", "TokenStatesBTC", "SynthsBTC"]
        );
    }

    #[test]
    fn commit_removal_persists_both_files() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let mut deployment = Deployment::load(dir.path()).unwrap();
        deployment.commit_removal(&key("sBTC")).unwrap();
        assert!(!deployment.contains(&key("sBTC")));
        assert!(deployment.target("ProxysBTC").is_none());
        assert!(deployment.target("SynthRegistry").is_some());

        // Reload from disk and check the rewrite landed.
        let reloaded = Deployment::load(dir.path()).unwrap();
        assert!(!reloaded.contains(&key("sBTC")));
        assert!(reloaded.target("SynthsBTC").is_none());
        assert!(reloaded.target("SynthRegistry").is_some());
    }

    #[test]
    fn written_files_end_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let text = fs::read_to_string(dir.path().join(SYNTHS_FILE)).unwrap();
        assert!(text.ends_with('\n'));
    }
}
