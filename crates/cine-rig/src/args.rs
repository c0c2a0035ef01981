//! Command line definition.
//!
//! ```text
//! cine-rig report --lens cooke_50.json 2.8 2.0
//! cine-rig report --lens cooke_50.json 2.8 10 0.85 48
//! cine-rig schema
//! cine-rig list
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// CineRig camera optics and rig biomechanics
#[derive(Debug, Parser)]
#[command(name = "cine-rig")]
#[command(version, about = "Camera optics and rig biomechanics reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Evaluate a rig at one frame, optionally followed by a focus pull
    Report(ReportArgs),

    /// Print the lens descriptor JSON schema
    Schema,

    /// List registered lens and body providers
    List,
}

/// Arguments of a report run.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct ReportArgs {
    /// Lens descriptor JSON file
    #[arg(short, long = "lens", value_name = "DESCRIPTOR", env = "CINERIG_LENS_PATH")]
    pub descriptor: PathBuf,

    /// T-stop
    #[arg(value_parser = parse_t_stop)]
    pub t_stop: f64,

    /// Focus distance in meters, or `infinity`
    #[arg(value_parser = parse_distance)]
    pub focus_m: f64,

    /// Pull focus to this distance after the report frame
    #[arg(value_parser = parse_distance, requires = "frames")]
    pub pull_to_m: Option<f64>,

    /// Length of the focus pull in frames
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: Option<u32>,
}

/// Focus pull requested after the report frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullArgs {
    pub to_m: f64,
    pub frames: u32,
}

impl ReportArgs {
    pub fn pull(&self) -> Option<PullArgs> {
        match (self.pull_to_m, self.frames) {
            (Some(to_m), Some(frames)) => Some(PullArgs { to_m, frames }),
            _ => None,
        }
    }
}

fn parse_t_stop(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{}' is not a finite number", value))
}

/// Distances also accept `inf`/`infinity`.
fn parse_distance(value: &str) -> Result<f64, String> {
    if value.eq_ignore_ascii_case("inf") || value.eq_ignore_ascii_case("infinity") {
        return Ok(cine_models::INFINITY_FOCUS_M);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{}' is not a distance in meters or 'infinity'", value))
}
