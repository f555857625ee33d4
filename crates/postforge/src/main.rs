// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Postforge - platform-tailored social post generation.
//!
//! This is the binary entry point for the Postforge CLI.

mod console;
mod doctor;
mod generate;
mod library;
mod offline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use postforge_config::PostforgeConfig;
use postforge_core::PostforgeError;

use crate::generate::{FallbackArgs, GenerateArgs, PromptArgs};
use crate::library::LibraryCommand;

/// Postforge - platform-tailored social post generation.
#[derive(Parser, Debug)]
#[command(name = "postforge", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a post, falling back to local templates when the remote call fails.
    Generate(GenerateArgs),
    /// Print the prompt that would be sent, without calling anything.
    Prompt(PromptArgs),
    /// Print the local fallback post for a topic.
    Fallback(FallbackArgs),
    /// List supported platforms and their limits.
    Platforms,
    /// Browse the saved content library.
    #[command(subcommand)]
    Library(LibraryCommand),
    /// Print the effective configuration as TOML.
    Config,
    /// Check the health of the configured generator and content library.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => postforge_config::load_and_validate_path(path),
        None => postforge_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            postforge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &PostforgeConfig) -> Result<(), PostforgeError> {
    match command {
        Commands::Generate(args) => generate::run_generate(config, args).await,
        Commands::Prompt(args) => generate::run_prompt(config, args),
        Commands::Fallback(args) => {
            generate::run_fallback(config, args);
            Ok(())
        }
        Commands::Platforms => {
            generate::print_platforms();
            Ok(())
        }
        Commands::Library(command) => library::run_library(config, command).await,
        Commands::Config => print_config(config),
        Commands::Doctor => doctor::run_doctor(config).await,
    }
}

fn print_config(config: &PostforgeConfig) -> Result<(), PostforgeError> {
    print!("{}", render_config(config)?);
    Ok(())
}

/// Effective configuration as TOML, with the API key masked.
fn render_config(config: &PostforgeConfig) -> Result<String, PostforgeError> {
    let mut shown = config.clone();
    if shown.remote.api_key.is_some() {
        shown.remote.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| PostforgeError::Internal(format!("failed to render config: {e}")))
}

/// Logs go to stderr so that stdout carries only command output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("postforge={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
