// ABOUTME: Tests for export bucket assembly and measurement kind selection
// ABOUTME: Validates that unrequested kinds are omitted and the wire document stays complete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use nsexport::core::models::libre::MeasurementKind;
use nsexport::core::models::{GlucoseEntry, InsulinInjections, Sgv, Treatment};
use nsexport::core::transform::{Timezone, Transformer};
use nsexport::export::build_measurement_log;

fn glucose_entry() -> GlucoseEntry {
    let ts = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    GlucoseEntry {
        id: "e1".to_owned(),
        device: "xDrip".to_owned(),
        date: ts.timestamp_millis(),
        date_string: ts,
        sgv: Sgv(110),
        delta: 0.0,
        direction: "Flat".to_owned(),
        entry_type: "sgv".to_owned(),
        filtered: 0.0,
        unfiltered: 0.0,
        rssi: 0,
        noise: 0,
        sys_time: ts,
        utc_offset: 0,
        mills: ts.timestamp_millis(),
    }
}

fn treatment() -> Treatment {
    Treatment {
        id: "t1".to_owned(),
        event_type: String::new(),
        entered_by: "nsexport".to_owned(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 0).unwrap(),
        insulin: 4.0,
        carbs: 30.0,
        insulin_injections: InsulinInjections::default(),
    }
}

struct Buckets {
    scheduled: Vec<nsexport::core::models::libre::ScheduledGlucoseEntry>,
    unscheduled: Vec<nsexport::core::models::libre::UnscheduledGlucoseEntry>,
    insulin: Vec<nsexport::core::models::libre::InsulinEntry>,
    food: Vec<nsexport::core::models::libre::FoodEntry>,
    sensor_start: Option<nsexport::core::models::libre::GenericEntry>,
}

fn buckets() -> Buckets {
    let mut transformer = Transformer::with_seed(Timezone::Local, 5);
    let entry = glucose_entry();
    let t = treatment();

    let scheduled = vec![transformer.scheduled_glucose(&entry)];
    let unscheduled = vec![transformer.unscheduled_glucose(&entry)];
    let sensor_start = unscheduled.last().map(|last| transformer.sensor_start(last));

    Buckets {
        scheduled,
        insulin: vec![transformer.insulin(&t)],
        food: vec![transformer.food(&t)],
        sensor_start,
        unscheduled,
    }
}

#[test]
fn test_all_kinds_selected_fills_every_bucket() {
    let b = buckets();
    let log = build_measurement_log(
        &MeasurementKind::all(),
        b.scheduled,
        b.unscheduled,
        b.insulin,
        b.food,
        b.sensor_start,
    );

    assert_eq!(log.scheduled_continuous_glucose_entries.len(), 1);
    assert_eq!(log.unscheduled_continuous_glucose_entries.len(), 1);
    assert_eq!(log.insulin_entries.len(), 1);
    assert_eq!(log.food_entries.len(), 1);
    assert_eq!(log.generic_entries.len(), 1);
    assert!(!log.is_empty());
}

#[test]
fn test_unrequested_kinds_are_omitted() {
    let b = buckets();
    let log = build_measurement_log(
        &[MeasurementKind::ScheduledGlucose, MeasurementKind::Insulin],
        b.scheduled,
        b.unscheduled,
        b.insulin,
        b.food,
        b.sensor_start,
    );

    assert_eq!(log.scheduled_continuous_glucose_entries.len(), 1);
    assert_eq!(log.insulin_entries.len(), 1);
    assert!(log.unscheduled_continuous_glucose_entries.is_empty());
    assert!(log.food_entries.is_empty());
    assert!(log.generic_entries.is_empty());
}

#[test]
fn test_empty_selection_yields_empty_log() {
    let b = buckets();
    let log = build_measurement_log(
        &[],
        b.scheduled,
        b.unscheduled,
        b.insulin,
        b.food,
        b.sensor_start,
    );

    assert!(log.is_empty());
}

#[test]
fn test_generic_kind_without_sensor_start_stays_empty() {
    let b = buckets();
    let log = build_measurement_log(
        &[MeasurementKind::Generic],
        b.scheduled,
        b.unscheduled,
        b.insulin,
        b.food,
        None,
    );

    assert!(log.generic_entries.is_empty());
}

#[test]
fn test_default_log_keeps_placeholder_buckets_in_document() {
    let b = buckets();
    let log = build_measurement_log(
        &MeasurementKind::all(),
        b.scheduled,
        b.unscheduled,
        b.insulin,
        b.food,
        b.sensor_start,
    );

    let json = serde_json::to_value(&log).unwrap();

    // Kinds this tool never produces must still be present (and empty).
    assert!(json["bloodGlucoseEntries"].as_array().unwrap().is_empty());
    assert!(json["ketoneEntries"].as_array().unwrap().is_empty());
    assert_eq!(
        json["capabilities"].as_array().unwrap().len(),
        nsexport::core::constants::DEVICE_CAPABILITIES.len()
    );
}

#[test]
fn test_measurement_kind_parses_wire_names() {
    assert_eq!(
        "scheduledContinuousGlucose".parse::<MeasurementKind>().unwrap(),
        MeasurementKind::ScheduledGlucose
    );
    assert_eq!(
        "unscheduledContinuousGlucose".parse::<MeasurementKind>().unwrap(),
        MeasurementKind::UnscheduledGlucose
    );
    assert_eq!("insulin".parse::<MeasurementKind>().unwrap(), MeasurementKind::Insulin);
    assert_eq!("food".parse::<MeasurementKind>().unwrap(), MeasurementKind::Food);
    assert_eq!("generic".parse::<MeasurementKind>().unwrap(), MeasurementKind::Generic);
    assert!("bogus".parse::<MeasurementKind>().is_err());
}

#[test]
fn test_measurement_kind_display_round_trips() {
    for kind in MeasurementKind::all() {
        assert_eq!(kind.to_string().parse::<MeasurementKind>().unwrap(), kind);
    }
}
