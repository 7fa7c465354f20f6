// ABOUTME: The config subcommand - print, seed, and edit the YAML config file
// ABOUTME: Seeding generates a fresh device unique identifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use nsexport::core::config::{set_value, Settings};

/// Subcommands of `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print config
    Print,

    /// Generate default config
    Default,

    /// Set config key
    Set(SetArgs),
}

/// Flags of `config set`.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Dotted key, e.g. libreview.importConfig.uom
    key: String,

    /// New value
    value: String,
}

/// Run a config command.
pub fn run(config_path: &Path, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Print => {
            let doc = load_document(config_path)?;
            println!("{}", serde_yaml::to_string(&doc)?);
            Ok(())
        }
        ConfigCommand::Default => {
            let settings = Settings::seed_default();
            settings.save(config_path)?;
            println!("wrote default config to {}", config_path.display());
            Ok(())
        }
        ConfigCommand::Set(args) => {
            let mut doc = load_document(config_path)?;
            set_value(&mut doc, &args.key, &args.value)?;
            fs::write(config_path, serde_yaml::to_string(&doc)?)
                .with_context(|| format!("couldn't write {}", config_path.display()))?;
            println!("key: {}\nvalue: {}\nOK", args.key, args.value);
            Ok(())
        }
    }
}

fn load_document(config_path: &Path) -> Result<serde_yaml::Value> {
    let raw = fs::read_to_string(config_path)
        .with_context(|| format!("couldn't load config file ({})", config_path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("bad yaml: {}", config_path.display()))
}
