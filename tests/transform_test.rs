// ABOUTME: Tests for the Nightscout to LibreView transformation layer
// ABOUTME: Record-number bands, out-of-range flags, trend arrows, jitter bounds, wire shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use nsexport::core::constants::record_band;
use nsexport::core::models::libre::{InsulinDoseType, TrendArrow};
use nsexport::core::models::{GlucoseEntry, InsulinInjections, Sgv, Treatment};
use nsexport::core::transform::{Timezone, Transformer};

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 45).unwrap()
}

fn glucose_entry(sgv: i32, direction: &str) -> GlucoseEntry {
    GlucoseEntry {
        id: "abc123".to_owned(),
        device: "xDrip".to_owned(),
        date: ts().timestamp_millis(),
        date_string: ts(),
        sgv: Sgv(sgv),
        delta: 1.5,
        direction: direction.to_owned(),
        entry_type: "sgv".to_owned(),
        filtered: 0.0,
        unfiltered: 0.0,
        rssi: 0,
        noise: 1,
        sys_time: ts(),
        utc_offset: 0,
        mills: ts().timestamp_millis(),
    }
}

fn treatment(insulin: f64, carbs: f64, injections: &str) -> Treatment {
    Treatment {
        id: "tr1".to_owned(),
        event_type: "Meal Bolus".to_owned(),
        entered_by: "nsexport".to_owned(),
        created_at: ts(),
        insulin,
        carbs,
        insulin_injections: InsulinInjections(injections.to_owned()),
    }
}

fn transformer() -> Transformer {
    Transformer::with_seed(Timezone::Local, 99)
}

#[test]
fn test_record_number_bands_never_collide_for_equal_timestamps() {
    let mut t = transformer();
    let entry = glucose_entry(120, "Flat");
    let dose = treatment(4.0, 0.0, "");
    let food = treatment(0.0, 25.0, "");

    let scheduled = t.scheduled_glucose(&entry).record_number;
    let unscheduled = t.unscheduled_glucose(&entry).record_number;
    let insulin = t.insulin(&dose).record_number;
    let food = t.food(&food).record_number;

    let mut records = [scheduled, unscheduled, insulin, food];
    records.sort_unstable();
    for pair in records.windows(2) {
        assert!(pair[1] - pair[0] >= 100_000_000_000);
    }
}

#[test]
fn test_scheduled_record_number_is_band_plus_unix_seconds() {
    let t = transformer();
    let entry = glucose_entry(120, "Flat");

    let mapped = t.scheduled_glucose(&entry);

    assert_eq!(
        mapped.record_number,
        record_band::SCHEDULED_GLUCOSE + ts().timestamp()
    );
}

#[test]
fn test_scheduled_mapper_is_idempotent() {
    let t = transformer();
    let entry = glucose_entry(250, "SingleUp");

    let first = t.scheduled_glucose(&entry);
    let second = t.scheduled_glucose(&entry);

    assert_eq!(first.record_number, second.record_number);
    assert_eq!(first.timestamp, second.timestamp);
    assert_eq!(
        first.extended_properties.low_out_of_range,
        second.extended_properties.low_out_of_range
    );
    assert_eq!(
        first.extended_properties.high_out_of_range,
        second.extended_properties.high_out_of_range
    );
}

#[test]
fn test_out_of_range_flags_at_thresholds() {
    let t = transformer();

    let low = t.scheduled_glucose(&glucose_entry(40, "Flat"));
    assert_eq!(low.extended_properties.low_out_of_range, "true");
    assert_eq!(low.extended_properties.high_out_of_range, "false");

    let high = t.scheduled_glucose(&glucose_entry(400, "Flat"));
    assert_eq!(high.extended_properties.low_out_of_range, "false");
    assert_eq!(high.extended_properties.high_out_of_range, "true");

    let normal = t.scheduled_glucose(&glucose_entry(120, "Flat"));
    assert_eq!(normal.extended_properties.low_out_of_range, "false");
    assert_eq!(normal.extended_properties.high_out_of_range, "false");
}

#[test]
fn test_scheduled_entry_carries_value_and_merge_flags() {
    let t = transformer();
    let mapped = t.scheduled_glucose(&glucose_entry(137, "Flat"));

    assert!((mapped.value_in_mg_per_dl - 137.0).abs() < f64::EPSILON);
    assert_eq!(mapped.extended_properties.can_merge, "true");
    assert!(!mapped.extended_properties.is_first_after_time_change);
    assert_eq!(mapped.extended_properties.factory_timestamp, ts());
}

#[test]
fn test_trend_arrow_mapping() {
    for direction in ["SingleUp", "DoubleUp", "FortyFiveUp"] {
        assert_eq!(TrendArrow::from_direction(direction), TrendArrow::Rising);
    }
    for direction in ["SingleDown", "DoubleDown", "FortyFiveDown"] {
        assert_eq!(TrendArrow::from_direction(direction), TrendArrow::Falling);
    }
    for direction in ["Flat", "", "NOT COMPUTABLE", "nonsense"] {
        assert_eq!(TrendArrow::from_direction(direction), TrendArrow::Stable);
    }
}

#[test]
fn test_unscheduled_jitter_stays_within_two_minutes() {
    let mut t = transformer();

    for _ in 0..200 {
        let mapped = t.unscheduled_glucose(&glucose_entry(120, "Flat"));
        let jitter = mapped.timestamp.with_timezone(&Utc) - ts();
        assert!(jitter >= TimeDelta::zero());
        assert!(jitter <= TimeDelta::minutes(2));
    }
}

#[test]
fn test_unscheduled_record_number_ignores_jitter() {
    let mut t = transformer();
    let entry = glucose_entry(120, "Flat");

    let first = t.unscheduled_glucose(&entry).record_number;
    let second = t.unscheduled_glucose(&entry).record_number;

    assert_eq!(first, second);
    assert_eq!(first, record_band::UNSCHEDULED_GLUCOSE + ts().timestamp());
}

#[test]
fn test_unscheduled_entry_is_actionable_with_arrow() {
    let mut t = transformer();
    let mapped = t.unscheduled_glucose(&glucose_entry(95, "DoubleDown"));

    assert!(mapped.extended_properties.is_actionable);
    assert_eq!(mapped.extended_properties.trend_arrow, TrendArrow::Falling);
}

#[test]
fn test_insulin_lantus_maps_to_long_acting() {
    let t = transformer();
    let dose = treatment(12.0, 0.0, "[{\"insulin\":\"Lantus\",\"units\":12.0}]");

    let mapped = t.insulin(&dose);

    assert_eq!(mapped.insulin_type, InsulinDoseType::LongActing);
    assert!((mapped.units - 12.0).abs() < f64::EPSILON);
}

#[test]
fn test_insulin_classification_is_case_insensitive() {
    let t = transformer();
    let dose = treatment(8.0, 0.0, "[{\"insulin\":\"TRESIBA\",\"units\":8.0}]");

    assert_eq!(t.insulin(&dose).insulin_type, InsulinDoseType::LongActing);
}

#[test]
fn test_insulin_unmatched_maps_to_rapid_acting() {
    let t = transformer();
    let dose = treatment(5.0, 0.0, "[{\"insulin\":\"Fiasp\",\"units\":5.0}]");

    assert_eq!(t.insulin(&dose).insulin_type, InsulinDoseType::RapidActing);

    let bare = treatment(5.0, 0.0, "");
    assert_eq!(t.insulin(&bare).insulin_type, InsulinDoseType::RapidActing);
}

#[test]
fn test_food_carbs_truncated_to_integer_grams() {
    let t = transformer();
    let meal = treatment(0.0, 42.9, "");

    let mapped = t.food(&meal);

    assert_eq!(mapped.grams_carbs, 42);
    assert_eq!(mapped.food_type, "Unknown");
    assert_eq!(mapped.record_number, record_band::FOOD + ts().timestamp());
}

#[test]
fn test_sensor_start_derives_from_last_unscheduled_entry() {
    let mut t = transformer();
    let last = t.unscheduled_glucose(&glucose_entry(110, "Flat"));

    let event = t.sensor_start(&last);

    assert!(event.is_sensor_start());
    assert_eq!(event.timestamp, last.timestamp);
    assert_eq!(
        event.record_number,
        record_band::GENERIC + last.timestamp.timestamp()
    );
    assert_eq!(event.extended_properties.gmin, "40");
    assert_eq!(event.extended_properties.gmax, "400");
    assert_eq!(event.extended_properties.wear_duration, "20160");
    assert_eq!(event.extended_properties.warmup_time, "60");
}

#[test]
fn test_named_timezone_localizes_target_timestamps() {
    let t = Transformer::with_seed("Europe/Moscow".parse::<Timezone>().unwrap(), 1);

    let mapped = t.scheduled_glucose(&glucose_entry(120, "Flat"));

    // Same instant, rendered at +03:00.
    assert_eq!(mapped.timestamp.with_timezone(&Utc), ts());
    assert_eq!(mapped.timestamp.offset().local_minus_utc(), 3 * 3600);
}

#[test]
fn test_scheduled_entry_wire_shape() {
    let t = Transformer::with_seed("Europe/Moscow".parse::<Timezone>().unwrap(), 1);
    let mapped = t.scheduled_glucose(&glucose_entry(120, "Flat"));

    let json = serde_json::to_value(&mapped).unwrap();

    assert!((json["valueInMgPerDl"].as_f64().unwrap() - 120.0).abs() < f64::EPSILON);
    assert_eq!(json["extendedProperties"]["lowOutOfRange"], "false");
    assert_eq!(json["extendedProperties"]["canMerge"], "true");
    assert!(json["recordNumber"].as_i64().is_some());
    assert!(json["timestamp"].as_str().unwrap().contains("+03:00"));
}

#[test]
fn test_unscheduled_entry_wire_shape() {
    let mut t = transformer();
    let mapped = t.unscheduled_glucose(&glucose_entry(120, "SingleUp"));

    let json = serde_json::to_value(&mapped).unwrap();

    assert_eq!(json["extendedProperties"]["trendArrow"], "Rising");
    assert_eq!(json["extendedProperties"]["isActionable"], true);
}
