//! Error types for passes and the pipeline runner.
//!
//! Data-quality problems are never errors: passes report them as issue
//! strings. [`PassError`] covers what a pass cannot recover from locally,
//! and [`PipelineError`] tags such a failure with the pass and network it
//! happened in.

use std::path::PathBuf;

use pidnorm_core::CoreError;
use thiserror::Error;

/// Failures raised while constructing or running a pass.
#[derive(Debug, Error)]
pub enum PassError {
    /// A graph mutation failed; fatal for the graph being processed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A lookup table or other construction-time input could not be loaded.
    #[error("configuration error in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PassError {
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PassError::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A pass failed fatally while the pipeline was processing a network.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pass '{pass}' failed on network '{network}': {source}")]
    PassFailed {
        /// Description of the failing pass.
        pass: String,
        /// Name of the network being processed.
        network: String,
        source: PassError,
    },
}
