// ABOUTME: nsexport CLI - export Nightscout data to LibreView
// ABOUTME: Subcommands for export, listing, treatments, charting, config, and sensor registration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors
//!
//! Usage:
//! ```bash
//! # Seed a config, then fill in credentials
//! nsexport config default
//! nsexport config set nightscout.url https://my.nightscout.example
//!
//! # Export the last 24 hours to LibreView, keeping a watermark
//! nsexport libreview --date-offset 24h --last-ts-file ./last.ts
//!
//! # Dry-run with a narrower measurement selection
//! nsexport libreview --dry-run --measurements scheduledContinuousGlucose,insulin
//!
//! # Render a glucose chart
//! nsexport graph --date-offset 12h --filename glucose.png
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use commands::config::ConfigCommand;
use commands::create::CreateCommand;
use commands::delete::DeleteCommand;
use commands::graph::GraphArgs;
use commands::libreview::ExportArgs;
use commands::list::ListCommand;
use commands::sensor::SensorArgs;
use helpers::flags::parse_timezone;

#[derive(Parser)]
#[command(
    name = "nsexport",
    about = "Nightscout exporter",
    long_about = "Exports glucose and treatment data from a Nightscout server to the LibreView cloud service.",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to config
    #[arg(long, short = 'c', global = true, default_value = "config.yaml")]
    config: PathBuf,

    /// Toggle debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Override timezone (IANA name, e.g. Europe/Moscow)
    #[arg(long, global = true)]
    timezone: Option<String>,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Export data to LibreView
    Libreview(ExportArgs),

    /// List raw Nightscout records
    #[command(subcommand, hide = true)]
    List(ListCommand),

    /// Create Nightscout records
    #[command(subcommand, hide = true)]
    Create(CreateCommand),

    /// Delete Nightscout records
    #[command(subcommand)]
    Delete(DeleteCommand),

    /// Render a glucose chart
    Graph(GraphArgs),

    /// Config file management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Check LibreView authentication
    #[command(hide = true)]
    Libreauth,

    /// Register a new sensor serial with LibreView
    #[command(name = "libre-new-sensor", hide = true)]
    LibreNewSensor(SensorArgs),
}

async fn dispatch(cli: Cli) -> Result<()> {
    let tz = parse_timezone(cli.timezone.as_deref())?;
    let config_path = cli.config;

    match cli.command {
        Command::Libreview(args) => commands::libreview::run(&config_path, tz, args).await,
        Command::List(command) => commands::list::run(&config_path, command).await,
        Command::Create(command) => commands::create::run(&config_path, command).await,
        Command::Delete(command) => commands::delete::run(&config_path, command).await,
        Command::Graph(args) => commands::graph::run(&config_path, args).await,
        Command::Config(command) => commands::config::run(&config_path, command),
        Command::Libreauth => commands::auth::run(&config_path).await,
        Command::LibreNewSensor(args) => commands::sensor::run(&config_path, args).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = nsexport::logging::init(cli.debug) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    info!("app started. nsexport {}", env!("CARGO_PKG_VERSION"));

    // The signal handler only allows graceful process exit; it does not
    // cancel in-flight HTTP calls mid-operation.
    let result = tokio::select! {
        result = dispatch(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
            Ok(())
        }
    };

    match result {
        Ok(()) => {
            info!("app done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "an error has occurred");
            ExitCode::FAILURE
        }
    }
}
