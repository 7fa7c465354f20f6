// ABOUTME: The libre-new-sensor subcommand - register a sensor serial with LibreView
// ABOUTME: Authenticates first, then PUTs the serial to the registration endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::helpers::client::{libreview_client, load_settings};

/// Flags of `libre-new-sensor`.
#[derive(Args, Debug)]
pub struct SensorArgs {
    /// Sensor serial number
    #[arg(required = true)]
    serial: String,

    /// Set this app as main user device. Necessary if the main device was
    /// set by another application (e.g. Librelink)
    #[arg(long = "set-device", default_value_t = true, action = clap::ArgAction::Set)]
    set_device: bool,
}

/// Run the libre-new-sensor command.
pub async fn run(config_path: &Path, args: SensorArgs) -> Result<()> {
    let settings = load_settings(config_path)?;

    let mut libreview = libreview_client(&settings)?;
    libreview.auth(args.set_device).await?;
    libreview.new_sensor(&args.serial).await?;

    info!(serial = %args.serial, "sensor registered");

    Ok(())
}
