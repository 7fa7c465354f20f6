// ABOUTME: Client construction shared by CLI commands
// ABOUTME: Loads the config, exchanges the Nightscout token for a JWT, builds clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::path::Path;

use anyhow::{Context, Result};

use nsexport::core::config::Settings;
use nsexport::providers::{LibreviewClient, NightscoutClient};

/// Load the configuration file.
pub fn load_settings(config_path: &Path) -> Result<Settings> {
    Settings::load(config_path).context("cant load config")
}

/// Build an authenticated Nightscout client: exchange the configured URL
/// token for a JWT and attach it as a bearer token.
pub async fn nightscout_client(settings: &Settings) -> Result<NightscoutClient> {
    let jwt = NightscoutClient::request_jwt(
        &settings.nightscout.url,
        &settings.nightscout.api_token,
    )
    .await?;
    Ok(NightscoutClient::with_jwt(&settings.nightscout.url, jwt)?)
}

/// Build a LibreView client from the config's target section.
pub fn libreview_client(settings: &Settings) -> Result<LibreviewClient> {
    Ok(LibreviewClient::new(settings.libreview.clone())?)
}
