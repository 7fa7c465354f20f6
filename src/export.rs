// ABOUTME: One-run export orchestration: fetch, filter, downsample, transform, submit
// ABOUTME: Tracks the last exported timestamp so repeated runs stay incremental
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! # Export Orchestration
//!
//! One run walks a fixed sequence, terminal on the first fatal error:
//!
//! 1. load the watermark (optional) and pad it by one minute;
//! 2. fetch insulin treatments, carb treatments, and glucose entries for
//!    the date range — any fetch error aborts the run;
//! 3. filter every sequence to entries after the padded watermark;
//! 4. downsample the glucose sequence twice from the same filtered input:
//!    a fixed gap yields the scheduled bucket, a randomized gap yields the
//!    unscheduled bucket (independent passes, each with its own state);
//! 5. transform each bucket and select the user-requested kinds;
//! 6. short-circuit on dry-run, an empty glucose bucket, or an empty
//!    selection — a no-op success that leaves the watermark untouched;
//! 7. authenticate (or reuse a pre-supplied token) and submit;
//! 8. optionally register a new sensor — failure here is logged and does
//!    not fail the run;
//! 9. persist the watermark: the latest submitted scheduled timestamp.

use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use nsexport_core::config::Settings;
use nsexport_core::constants::{limits, sampling};
use nsexport_core::downsample::{downsample, only_after, FixedGap, RandomizedGap};
use nsexport_core::errors::ExportResult;
use nsexport_core::models::libre::{
    FoodEntry, GenericEntry, InsulinEntry, MeasurementKind, MeasurementLog,
    ScheduledGlucoseEntry, UnscheduledGlucoseEntry,
};
use nsexport_core::transform::{Timezone, Transformer};
use nsexport_providers::{LibreviewClient, ListOptions, NightscoutClient, TreatmentKind};

use crate::watermark;

/// Everything one export run needs beyond the configuration file.
/// Resolved from CLI flags before any network activity.
#[derive(Debug, Clone)]
pub struct ExportParams {
    /// Start of the sampling period
    pub date_from: DateTime<Utc>,

    /// End of the sampling period
    pub date_to: DateTime<Utc>,

    /// Minimum interval between kept scheduled samples
    pub min_interval: TimeDelta,

    /// Average synthetic scan frequency in minutes
    pub scan_frequency_minutes: i64,

    /// Skip submission and watermark writes
    pub dry_run: bool,

    /// Claim this app as the account's main device during auth
    pub set_device: bool,

    /// Pre-supplied LibreView session token; bypasses the password login
    pub token: Option<String>,

    /// Measurement kinds to include in the submission
    pub measurements: Vec<MeasurementKind>,

    /// Watermark file path; `None` disables incremental runs
    pub watermark_file: Option<PathBuf>,

    /// Sensor serial to register after a successful submission
    pub new_sensor: Option<String>,

    /// Timezone the target entries are rendered in
    pub tz: Timezone,
}

/// Run one export.
///
/// # Errors
///
/// Returns the first fatal [`nsexport_core::ExportError`]: config
/// validation, watermark parse, any fetch, auth, or submission failure.
/// Sensor registration failures are logged and swallowed.
pub async fn run(settings: &Settings, params: &ExportParams) -> ExportResult<()> {
    settings.validate()?;

    let cutoff = match &params.watermark_file {
        Some(path) => watermark::load(path)?.map(|ts| ts + TimeDelta::minutes(1)),
        None => None,
    };

    let jwt = NightscoutClient::request_jwt(
        &settings.nightscout.url,
        &settings.nightscout.api_token,
    )
    .await?;
    let nightscout = NightscoutClient::with_jwt(&settings.nightscout.url, jwt)?;

    let opts = ListOptions {
        date_from: params.date_from,
        date_to: params.date_to,
        count: limits::MAX_ENTRIES,
    };

    let mut insulin = nightscout.treatments(TreatmentKind::Insulin, opts).await?;
    if let Some(cutoff) = cutoff {
        insulin = only_after(insulin, cutoff);
    }
    info!(
        count = insulin.len(),
        from = %params.date_from,
        to = %params.date_to,
        "fetched insulin treatments"
    );

    let mut carbs = nightscout.treatments(TreatmentKind::Carbs, opts).await?;
    if let Some(cutoff) = cutoff {
        carbs = only_after(carbs, cutoff);
    }
    info!(
        count = carbs.len(),
        from = %params.date_from,
        to = %params.date_to,
        "fetched carb treatments"
    );

    let mut glucose = nightscout.glucose_entries("sgv", opts).await?;
    if let Some(cutoff) = cutoff {
        glucose = only_after(glucose, cutoff);
    }
    info!(
        count = glucose.len(),
        from = %params.date_from,
        to = %params.date_to,
        "fetched glucose entries"
    );

    // Two independent passes over the same filtered input; each starts its
    // own last-kept state.
    let mut fixed = FixedGap::new(params.min_interval);
    let scheduled_samples = downsample(&glucose, &mut fixed);

    let mut randomized = RandomizedGap::new(
        params.scan_frequency_minutes,
        sampling::FREQUENCY_DEFLECTION_PERCENT,
    );
    let unscheduled_samples = downsample(&glucose, &mut randomized);

    let mut transformer = Transformer::new(params.tz);

    let scheduled: Vec<ScheduledGlucoseEntry> = scheduled_samples
        .iter()
        .map(|entry| {
            debug!(ts = %entry.date_string, sgv = entry.sgv.0, direction = %entry.direction, "scheduled glucose entry");
            transformer.scheduled_glucose(entry)
        })
        .collect();
    info!(count = scheduled.len(), "prepared scheduled glucose entries");

    let unscheduled: Vec<UnscheduledGlucoseEntry> = unscheduled_samples
        .iter()
        .map(|entry| transformer.unscheduled_glucose(entry))
        .collect();
    for entry in &unscheduled {
        debug!(
            ts = %entry.timestamp,
            value = entry.value_in_mg_per_dl,
            arrow = %entry.extended_properties.trend_arrow,
            "unscheduled glucose entry"
        );
    }
    info!(count = unscheduled.len(), "prepared unscheduled glucose entries");

    let insulin_entries: Vec<InsulinEntry> =
        insulin.iter().map(|t| transformer.insulin(t)).collect();
    let food_entries: Vec<FoodEntry> = carbs.iter().map(|t| transformer.food(t)).collect();
    let sensor_start = unscheduled.last().map(|last| transformer.sensor_start(last));

    let kinds: Vec<String> = params.measurements.iter().map(ToString::to_string).collect();
    info!(measurements = ?kinds, "measurements to export");

    if params.dry_run
        || scheduled.is_empty()
        || unscheduled.is_empty()
        || params.measurements.is_empty()
    {
        info!(dry_run = params.dry_run, "nothing to post");
        return Ok(());
    }

    // The watermark value: the latest source timestamp among the scheduled
    // entries we are about to submit. Samples are in ascending order.
    let latest_scheduled = scheduled_samples.last().map(|entry| entry.date_string);

    let log = build_measurement_log(
        &params.measurements,
        scheduled,
        unscheduled,
        insulin_entries,
        food_entries,
        sensor_start.clone(),
    );

    let mut libreview = LibreviewClient::new(settings.libreview.clone())?;
    match &params.token {
        Some(token) => libreview.set_token(token.clone()),
        None => libreview.auth(params.set_device).await?,
    }
    debug!(token = ?libreview.token(), "use token");

    let response = libreview.import_measurements(log).await?;
    info!(
        scheduled = response.result.measurement_counts.scheduled_glucose,
        unscheduled = response.result.measurement_counts.unscheduled_glucose,
        insulin = response.result.measurement_counts.insulin,
        food = response.result.measurement_counts.food,
        generic = response.result.measurement_counts.generic,
        "export measurements success"
    );

    if let Some(serial) = &params.new_sensor {
        if sensor_start.is_some() {
            match libreview.new_sensor(serial).await {
                Ok(()) => info!(serial = %serial, "registered new sensor"),
                Err(err) => warn!(error = %err, serial = %serial, "sensor registration failed"),
            }
        } else {
            warn!(serial = %serial, "no sensor start entry produced; skipping registration");
        }
    }

    if let Some(path) = &params.watermark_file {
        if let Some(ts) = latest_scheduled {
            watermark::store(path, ts)?;
            info!(ts = %ts, file = %path.display(), "stored watermark");
        }
    }

    Ok(())
}

/// Assemble the measurement log from the transformed buckets, including
/// only the requested kinds. Unrequested kinds stay empty in the document.
#[must_use]
pub fn build_measurement_log(
    kinds: &[MeasurementKind],
    scheduled: Vec<ScheduledGlucoseEntry>,
    unscheduled: Vec<UnscheduledGlucoseEntry>,
    insulin: Vec<InsulinEntry>,
    food: Vec<FoodEntry>,
    sensor_start: Option<GenericEntry>,
) -> MeasurementLog {
    let mut log = MeasurementLog::default();

    if kinds.contains(&MeasurementKind::ScheduledGlucose) {
        log.scheduled_continuous_glucose_entries = scheduled;
    }
    if kinds.contains(&MeasurementKind::UnscheduledGlucose) {
        log.unscheduled_continuous_glucose_entries = unscheduled;
    }
    if kinds.contains(&MeasurementKind::Insulin) {
        log.insulin_entries = insulin;
    }
    if kinds.contains(&MeasurementKind::Food) {
        log.food_entries = food;
    }
    if kinds.contains(&MeasurementKind::Generic) {
        log.generic_entries = sensor_start.into_iter().collect();
    }

    log
}
