//! Error types for pbxpatch-edit.
//!
//! Unmatched sections are not errors; they are reported as skipped steps.
//! Only failures that leave nothing to patch end up here.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    /// The manifest does not exist. Nothing has been written.
    #[error("manifest not found: {path}")]
    ManifestMissing { path: Utf8PathBuf },

    /// Reading or writing the manifest failed.
    #[error("io error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A section pattern failed to compile.
    #[error("invalid section pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type PatchResult<T> = Result<T, PatchError>;
