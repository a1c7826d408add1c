//! Error types
//!
//! The simulation has no failure modes of its own: collisions, game over and
//! clamped movement are gameplay, not faults. Errors only exist at the edges,
//! where balance data is loaded from outside the crate.

use std::io;

/// Failure to load or accept a [`crate::Tuning`] document.
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TuningError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
