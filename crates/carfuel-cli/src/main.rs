//! carfuel - track fuel purchases and fuel economy from the terminal.

mod cli;
mod commands;
mod config;
mod format;

use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use carfuel_store::Store;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::format::FormatOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "carfuel", &mut io::stdout());
        return Ok(());
    }

    // Initialize tracing
    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load();
    let opts = FormatOptions::new(cli.no_color);

    let store = match cli.db {
        Some(ref path) => Store::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?,
        None => Store::open_default().context("Failed to open database")?,
    };

    match cli.command {
        Commands::Vehicle { action } => commands::cmd_vehicle(&store, action, opts),
        Commands::Add(args) => commands::cmd_add(&store, args, &config),
        Commands::List(args) => commands::cmd_list(&store, args, &config, opts),
        Commands::Stats(args) => commands::cmd_stats(&store, args, &config, opts),
        Commands::Export { output } => commands::cmd_export(&store, output),
        Commands::Import { input, yes, force } => commands::cmd_import(&store, &input, yes, force),
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
