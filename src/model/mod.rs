//! Pre-trained regressor artifacts and their adapters.
//!
//! The two underlying models are fixed, read-only artifacts loaded once at
//! process start. The pipeline treats them as opaque regressors: the only
//! contract is `predict(FeatureVector) -> ordered TargetVector`, and nothing
//! downstream depends on the algorithm that produced an artifact.

mod adapter;
mod regressor;

pub use adapter::*;
pub use regressor::*;

use std::path::PathBuf;
use thiserror::Error;

/// A fatal model artifact problem. Surfaced at startup; there is no
/// recovery path other than restarting with a fixed artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {path}: invalid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact {path}: unsupported format version {found} (this build reads version {expected})")]
    Version {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("model artifact {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("model artifact {path}: schema mismatch: {reason}")]
    SchemaMismatch { path: PathBuf, reason: String },
}
