//! CineRig command line.

use std::process::ExitCode;

use clap::Parser;
use cine_models::LensDescriptor;
use cine_optics::RigRegistry;
use cine_rig::{build_report, init_tracing, Cli, Commands, LogFormat, RigConfig};
use tracing::{debug, error};

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Usage errors exit with status 2 here
    let cli = Cli::parse();

    if let Err(e) = init_tracing(LogFormat::from_env()) {
        eprintln!("cine-rig: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("cine-rig: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = RigRegistry::with_builtin();

    match cli.command {
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&LensDescriptor::json_schema())?);
        }
        Commands::List => {
            let listing = serde_json::json!({
                "lenses": registry.list_lenses(),
                "bodies": registry.list_bodies(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Commands::Report(args) => {
            let config = RigConfig::from_env();
            debug!(?config, "Rig config");
            let report = build_report(&registry, &config, &args)?;
            println!("{}", report.to_json_pretty()?);
        }
    }

    Ok(())
}
