//! # Run Error Types

use thiserror::Error;

use catacomb_graph::GraphError;

/// Errors that can end an exploration run.
#[derive(Error, Debug)]
pub enum RunError {
    /// The level graph rejected an operation.
    #[error("level graph error: {0}")]
    Graph(#[from] GraphError),

    /// Reading or writing run files failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The run summary could not be serialised.
    #[error("summary serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for exploration runs.
pub type RunResult<T> = Result<T, RunError>;
