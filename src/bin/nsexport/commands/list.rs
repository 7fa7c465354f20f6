// ABOUTME: The list subcommand - print raw Nightscout records as YAML
// ABOUTME: Covers glucose entries, treatments, and device statuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use nsexport::providers::{ListOptions, TreatmentKind};

use crate::helpers::client::{load_settings, nightscout_client};
use crate::helpers::flags::DateRangeArgs;

/// Subcommands of `list`.
#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List glucose entries
    Glucose(GlucoseArgs),

    /// List treatments
    Treatments(TreatmentsArgs),

    /// List device statuses
    Devices(DevicesArgs),
}

/// Flags of `list glucose`.
#[derive(Args, Debug)]
pub struct GlucoseArgs {
    #[command(flatten)]
    dates: DateRangeArgs,

    /// Type of entries
    #[arg(long, default_value = "sgv")]
    kind: String,
}

/// Flags of `list treatments`.
#[derive(Args, Debug)]
pub struct TreatmentsArgs {
    #[command(flatten)]
    dates: DateRangeArgs,

    /// Kind of treatments (insulin or carbs)
    #[arg(long, default_value = "insulin")]
    kind: String,
}

/// Flags of `list devices`.
#[derive(Args, Debug)]
pub struct DevicesArgs {
    #[command(flatten)]
    dates: DateRangeArgs,

    /// Device type (e.g. BRIDGE or PHONE)
    #[arg(long = "device-type")]
    device_type: Option<String>,
}

/// Run a list command.
pub async fn run(config_path: &Path, command: ListCommand) -> Result<()> {
    let settings = load_settings(config_path)?;
    let nightscout = nightscout_client(&settings).await?;

    match command {
        ListCommand::Glucose(args) => {
            let opts = list_options(&args.dates)?;
            let entries = nightscout.glucose_entries(&args.kind, opts).await?;
            print_yaml(&entries)
        }
        ListCommand::Treatments(args) => {
            let kind = match args.kind.as_str() {
                "carbs" => TreatmentKind::Carbs,
                _ => TreatmentKind::Insulin,
            };
            let opts = list_options(&args.dates)?;
            let treatments = nightscout.treatments(kind, opts).await?;
            print_yaml(&treatments)
        }
        ListCommand::Devices(args) => {
            let opts = list_options(&args.dates)?;
            let statuses = nightscout
                .device_statuses(args.device_type.as_deref(), opts)
                .await?;
            print_yaml(&statuses)
        }
    }
}

fn list_options(dates: &DateRangeArgs) -> Result<ListOptions> {
    let (date_from, date_to) = dates.resolve()?;
    Ok(ListOptions {
        date_from,
        date_to,
        count: dates.max_count,
    })
}

fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_yaml::to_string(value)?);
    Ok(())
}
