// ABOUTME: The delete subcommand - delete Nightscout treatments by id
// ABOUTME: Deletes sequentially and stops on the first failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use crate::helpers::client::{load_settings, nightscout_client};

/// Subcommands of `delete`.
#[derive(Subcommand, Debug)]
pub enum DeleteCommand {
    /// Delete treatments by id
    Treatment(TreatmentArgs),
}

/// Flags of `delete treatment`.
#[derive(Args, Debug)]
pub struct TreatmentArgs {
    /// Treatment ids to delete
    #[arg(required = true)]
    ids: Vec<String>,
}

/// Run a delete command.
pub async fn run(config_path: &Path, command: DeleteCommand) -> Result<()> {
    let DeleteCommand::Treatment(args) = command;

    let settings = load_settings(config_path)?;
    let nightscout = nightscout_client(&settings).await?;

    for id in &args.ids {
        nightscout.delete_treatment(id).await?;
        info!(id = %id, "deleted treatment");
    }

    Ok(())
}
