// ABOUTME: The create subcommand - create Nightscout treatments
// ABOUTME: Builds a treatment from flags and posts it via the client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::path::Path;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use nsexport::core::models::{InsulinInjections, InsulinType, Treatment};

use crate::helpers::client::{load_settings, nightscout_client};

/// Subcommands of `create`.
#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Create a treatment
    Treatment(TreatmentArgs),
}

/// Flags of `create treatment`.
#[derive(Args, Debug)]
pub struct TreatmentArgs {
    /// Insulin type
    #[arg(long = "insulin-type", default_value = "Fiasp")]
    insulin_type: String,

    /// Entered by
    #[arg(long = "entered-by", default_value = "nsexport")]
    entered_by: String,

    /// Treatment type
    #[arg(long = "treatment-type", default_value = "")]
    treatment_type: String,

    /// Insulin units
    #[arg(long, default_value_t = 0.0)]
    insulin: f64,

    /// Carbs units
    #[arg(long, default_value_t = 0.0)]
    carbs: f64,

    /// Entry create timestamp, RFC3339 (default - current time)
    #[arg(long = "ts")]
    ts: Option<String>,
}

/// Run a create command.
pub async fn run(config_path: &Path, command: CreateCommand) -> Result<()> {
    let CreateCommand::Treatment(args) = command;

    if args.insulin == 0.0 && args.carbs == 0.0 {
        bail!("nothing to create");
    }

    let insulin_type: InsulinType = args.insulin_type.parse()?;

    let created_at = match &args.ts {
        Some(raw) => DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut treatment = Treatment {
        id: String::new(),
        event_type: args.treatment_type,
        entered_by: args.entered_by,
        created_at,
        insulin: args.insulin,
        carbs: args.carbs,
        insulin_injections: InsulinInjections::default(),
    };

    if insulin_type.is_long_acting() {
        treatment.insulin_injections = InsulinInjections::new(args.insulin, insulin_type);
    }

    let settings = load_settings(config_path)?;
    let nightscout = nightscout_client(&settings).await?;

    let created = nightscout.create_treatment(&treatment).await?;

    for t in created {
        println!(
            "Created.\n\nID: {}\nCreatedAt: {}\nEventType: {}\nEnteredBy: {}\nInsulin: {:.1}\nInsulinInjections: {}\nCarbs: {:.1}",
            t.id,
            t.created_at.with_timezone(&chrono::Local),
            t.event_type,
            t.entered_by,
            t.insulin,
            t.insulin_injections,
            t.carbs,
        );
    }

    Ok(())
}
