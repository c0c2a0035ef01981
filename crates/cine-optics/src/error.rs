//! Error types for rig assembly and evaluation.

use cine_models::ModelError;
use thiserror::Error;

/// Result type for rig operations.
pub type RigResult<T> = Result<T, RigError>;

/// Errors that can occur while looking up providers or evaluating a rig.
///
/// The optics formulas themselves never fail; errors come from lookups,
/// model construction and calibration files.
#[derive(Debug, Error)]
pub enum RigError {
    #[error("Lens '{id}' not registered. Available: {available:?}")]
    UnknownLens { id: String, available: Vec<String> },

    #[error("Body '{id}' not registered. Available: {available:?}")]
    UnknownBody { id: String, available: Vec<String> },

    #[error("Unknown format '{name}'. Available: {available:?}")]
    UnknownFormat { name: String, available: Vec<String> },

    #[error("Invalid calibration: {0}")]
    Calibration(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl RigError {
    /// Create a calibration error.
    pub fn calibration(message: impl Into<String>) -> Self {
        Self::Calibration(message.into())
    }

    /// Whether the error comes from an unregistered id or format name.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::UnknownLens { .. } | Self::UnknownBody { .. } | Self::UnknownFormat { .. }
        )
    }
}
