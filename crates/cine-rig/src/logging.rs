//! Tracing subscriber setup for the binary.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{CliError, CliResult};

/// Directives applied on top of `RUST_LOG`.
pub const DEFAULT_DIRECTIVES: [&str; 3] = ["cine_rig=info", "cine_optics=info", "cine_models=warn"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Colored text for terminals
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// `LOG_FORMAT=json` selects JSON, anything else text.
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Environment filter with the crate defaults added.
pub fn env_filter() -> CliResult<EnvFilter> {
    DEFAULT_DIRECTIVES
        .iter()
        .try_fold(EnvFilter::from_default_env(), |filter, directive| {
            let directive = directive
                .parse::<Directive>()
                .map_err(|e| CliError::config(format!("log directive '{}': {}", directive, e)))?;
            Ok(filter.add_directive(directive))
        })
}

/// Install the global subscriber. Logs go to stderr so reports on stdout stay clean.
pub fn init_tracing(format: LogFormat) -> CliResult<()> {
    let env_filter = env_filter()?;

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .try_init(),
    }
    .map_err(|e| CliError::config(format!("tracing subscriber: {}", e)))
}
