//! CLI error types.
//!
//! Usage errors never reach this type: clap reports them and exits with
//! status 2 before a command runs.

use thiserror::Error;

use cine_models::ModelError;
use cine_optics::RigError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Rig(#[from] RigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
