//! Manifest persistence errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or writing manifest files.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON of the expected shape.
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// In-memory state could not be serialized.
    #[error("cannot encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The serialized bytes could not be written out.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// True when local state may be stale on disk, which is the one case an
    /// operator has to repair by hand.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Encode { .. } | Self::Write { .. })
    }
}
