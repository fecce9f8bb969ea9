// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Elite Finder AI service.
//!
//! Binary entry point: the main HTTP service, the status aggregator and a
//! configuration check.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;
mod status_api;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use elite_config::{EliteConfig, Profile};

/// Elite Finder AI service.
#[derive(Parser, Debug)]
#[command(name = "elite", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the AI service (analysis, reports, webhooks, admin).
    Serve,
    /// Start the dependency status service.
    StatusApi,
    /// Validate configuration and print a summary.
    CheckConfig,
}

impl Commands {
    /// The status aggregator never opens storage, so it skips that check.
    fn profile(&self) -> Profile {
        match self {
            Commands::StatusApi => Profile::Status,
            Commands::Serve | Commands::CheckConfig => Profile::Service,
        }
    }
}

fn load_config(path: Option<&PathBuf>, profile: Profile) -> EliteConfig {
    match elite_config::load_and_validate_for(path.map(PathBuf::as_path), profile) {
        Ok(config) => config,
        Err(errors) => {
            elite_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let profile = cli.command.as_ref().map_or(Profile::Service, Commands::profile);
    let config = load_config(cli.config.as_ref(), profile);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::StatusApi) => status_api::run_status_api(config).await,
        Some(Commands::CheckConfig) => {
            print!("{}", serve::config_summary(&config));
            Ok(())
        }
        None => {
            println!("elite: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
