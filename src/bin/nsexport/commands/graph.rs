// ABOUTME: The graph subcommand - render a glucose chart to a PNG file
// ABOUTME: Target band comes from the Nightscout profile with mmol/L fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tracing::info;

use nsexport::chart::draw_chart;
use nsexport::providers::ListOptions;

use crate::helpers::client::{load_settings, nightscout_client};
use crate::helpers::flags::DateRangeArgs;

/// Default target band in mmol/L, used when the profile has no bands.
const DEFAULT_TARGET_LOW: f64 = 3.9;
const DEFAULT_TARGET_HIGH: f64 = 12.6;

/// Flags of the `graph` command.
#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(flatten)]
    dates: DateRangeArgs,

    /// Path to file
    #[arg(long, default_value = "svg.png")]
    filename: PathBuf,
}

/// Run the graph command.
pub async fn run(config_path: &Path, args: GraphArgs) -> Result<()> {
    let settings = load_settings(config_path)?;
    let nightscout = nightscout_client(&settings).await?;

    let profile = nightscout.profile().await?;
    let store = profile.default_store();

    let target_low = store
        .and_then(|s| s.target_low.first())
        .map_or(DEFAULT_TARGET_LOW, |t| t.value);
    let target_high = store
        .and_then(|s| s.target_high.first())
        .map_or(DEFAULT_TARGET_HIGH, |t| t.value);

    let (date_from, date_to) = args.dates.resolve()?;
    let entries = nightscout
        .glucose_entries(
            "sgv",
            ListOptions {
                date_from,
                date_to,
                count: args.dates.max_count,
            },
        )
        .await?;

    draw_chart(&entries, &args.filename, target_low, target_high)?;
    info!(file = %args.filename.display(), count = entries.len(), "chart rendered");

    Ok(())
}
