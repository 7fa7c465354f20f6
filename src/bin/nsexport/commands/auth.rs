// ABOUTME: The libreauth subcommand - LibreView authentication smoke test
// ABOUTME: Logs in with the configured credentials and reports the outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::helpers::client::{libreview_client, load_settings};

/// Run the libreauth command.
pub async fn run(config_path: &Path) -> Result<()> {
    let settings = load_settings(config_path)?;

    let mut libreview = libreview_client(&settings)?;
    libreview.auth(false).await?;

    debug!(token = ?libreview.token(), "received token");
    info!("libreview authentication ok");

    Ok(())
}
