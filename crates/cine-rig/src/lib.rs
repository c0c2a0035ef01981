//! CineRig command line support.
//!
//! Environment configuration, tracing setup, the clap command definition and
//! JSON report assembly for the `cine-rig` binary.

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;

pub use args::{Cli, Commands, PullArgs, ReportArgs};
pub use config::RigConfig;
pub use error::{CliError, CliResult};
pub use logging::{init_tracing, LogFormat};
pub use report::{build_report, RigReport};

#[cfg(test)]
pub(crate) fn sample_descriptor() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/lenses/cooke_ana_i_s35_50mm.json")
}
