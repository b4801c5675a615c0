// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! uihub - registry service for observability UI plugins.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uihub_config::{ConfigError, UiHubConfig};

/// uihub - registry service for observability UI plugins.
#[derive(Parser, Debug)]
#[command(name = "uihub", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP plugin registry.
    Serve,
    /// Print the effective plugin catalog as JSON.
    Catalog,
    /// Validate configuration and exit.
    Check,
}

fn load_config(path: Option<&PathBuf>) -> Result<UiHubConfig, Vec<ConfigError>> {
    match path {
        Some(path) => uihub_config::load_and_validate_path(path),
        None => uihub_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("uihub: use --help for available commands");
        return;
    };

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            uihub_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match command {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                tracing::error!(error = %e, "server failed");
                eprintln!("uihub: {e}");
                std::process::exit(1);
            }
        }
        Commands::Catalog => {
            let output = serve::build_catalog(&config)
                .and_then(|catalog| {
                    serde_json::to_string_pretty(catalog.all())
                        .map_err(|e| uihub_core::HubError::Internal(e.to_string()))
                });
            match output {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("uihub: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Check => match serve::build_catalog(&config) {
            Ok(catalog) => println!(
                "uihub: configuration OK (server={}:{}, store={:?}, plugins={})",
                config.server.host,
                config.server.port,
                config.store.backend,
                catalog.len()
            ),
            Err(e) => {
                eprintln!("uihub: {e}");
                std::process::exit(1);
            }
        },
    }
}
