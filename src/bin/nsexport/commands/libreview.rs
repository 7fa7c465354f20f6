// ABOUTME: The libreview subcommand - one full export run
// ABOUTME: Resolves flags into ExportParams and hands off to the orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use nsexport::core::models::libre::MeasurementKind;
use nsexport::core::transform::Timezone;
use nsexport::export::{self, ExportParams};

use crate::helpers::client::load_settings;
use crate::helpers::flags::{parse_duration, DateRangeArgs};

/// Flags of the `libreview` export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    dates: DateRangeArgs,

    /// Filter: minimum sample interval (duration, e.g. 10m10s)
    #[arg(long = "min-interval", default_value = "10m10s")]
    min_interval: String,

    /// Average scan frequency (minutes). Scan interval is drawn from
    /// min=avg-30%, max=avg+30%
    #[arg(long = "scan-frequency", default_value_t = 90)]
    scan_frequency: i64,

    /// Do not post measurements to LibreView
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Set this app as main user device. Necessary if the main device was
    /// set by another application (e.g. Librelink)
    #[arg(long = "set-device", default_value_t = true, action = clap::ArgAction::Set)]
    set_device: bool,

    /// Path to last timestamp file (for example ./last.ts)
    #[arg(long = "last-ts-file")]
    last_ts_file: Option<PathBuf>,

    /// Measurements to upload
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "scheduledContinuousGlucose,unscheduledContinuousGlucose,insulin,food,generic"
    )]
    measurements: Vec<MeasurementKind>,

    /// Use existing token instead of password authentication
    #[arg(long)]
    token: Option<String>,

    /// Register this sensor serial number after a successful export
    #[arg(long = "new-sensor")]
    new_sensor: Option<String>,
}

/// Run the export.
pub async fn run(config_path: &Path, tz: Timezone, args: ExportArgs) -> Result<()> {
    let settings = load_settings(config_path)?;

    let (date_from, date_to) = args.dates.resolve()?;
    let min_interval = parse_duration(&args.min_interval)?;

    let params = ExportParams {
        date_from,
        date_to,
        min_interval,
        scan_frequency_minutes: args.scan_frequency,
        dry_run: args.dry_run,
        set_device: args.set_device,
        token: args.token,
        measurements: args.measurements,
        watermark_file: args.last_ts_file,
        new_sensor: args.new_sensor,
        tz,
    };

    export::run(&settings, &params).await?;

    Ok(())
}
