// ABOUTME: Application-wide constants for record numbering, glucose thresholds, and device metadata
// ABOUTME: Named constants avoid magic numbers in the transformation and provider code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! Application constants organized by domain.

/// Record-number bands, one per LibreView entry kind.
///
/// A target record number is `band + source timestamp as Unix seconds`.
/// Bands are spaced 10^11 apart so record numbers never collide across
/// kinds even when two entries share a timestamp.
pub mod record_band {
    /// Scheduled (fixed-interval) continuous glucose entries
    pub const SCHEDULED_GLUCOSE: i64 = 160_000_000_000;

    /// Unscheduled (manual-scan-like) continuous glucose entries
    pub const UNSCHEDULED_GLUCOSE: i64 = 260_000_000_000;

    /// Insulin dose entries
    pub const INSULIN: i64 = 360_000_000_000;

    /// Food (carbohydrate) entries
    pub const FOOD: i64 = 460_000_000_000;

    /// Generic entries (sensor start events)
    pub const GENERIC: i64 = 560_000_000_000;
}

/// Glucose value thresholds in mg/dL-scale units.
pub mod glucose {
    /// Values at or below this bound carry `lowOutOfRange = "true"`
    pub const DEFAULT_MIN_SGV: i32 = 40;

    /// Values at or above this bound carry `highOutOfRange = "true"`
    pub const DEFAULT_MAX_SGV: i32 = 400;
}

/// Nightscout fetch limits.
pub mod limits {
    /// Upper bound passed as `count` on every date-range query
    pub const MAX_ENTRIES: usize = 131_072;
}

/// Downsampling defaults for the export run.
pub mod sampling {
    /// Spread applied around the average scan frequency, in percent
    pub const FREQUENCY_DEFLECTION_PERCENT: u32 = 30;

    /// Default average scan frequency in minutes
    pub const DEFAULT_SCAN_FREQUENCY_MINUTES: i64 = 90;

    /// Upper bound of the random jitter applied to unscheduled timestamps,
    /// in seconds (two minutes)
    pub const UNSCHEDULED_JITTER_MAX_SECONDS: i64 = 120;
}

/// Fixed sensor capability metadata reported on sensor-start events.
pub mod sensor {
    /// Sensor wear duration in minutes (14 days)
    pub const WEAR_DURATION_MINUTES: i64 = 20_160;

    /// Sensor warm-up time in minutes
    pub const WARMUP_MINUTES: i64 = 60;

    /// Lowest glucose value the sensor reports, mg/dL
    pub const GLUCOSE_MIN: i32 = 40;

    /// Highest glucose value the sensor reports, mg/dL
    pub const GLUCOSE_MAX: i32 = 400;

    /// LibreView generic entry type for a sensor start event
    pub const START_EVENT_TYPE: &str = "com.abbottdiabetescare.informatics.sensorstart";
}

/// Insulin brand names whose injections count as long-acting doses.
/// Matched case-insensitively as substrings of the injection metadata.
pub const LONG_ACTING_INSULIN_BRANDS: &[&str] = &["lantus", "toujeo", "tresiba"];

/// Capability strings advertised in every measurement submission.
pub const DEVICE_CAPABILITIES: &[&str] = &[
    "scheduledContinuousGlucose",
    "unscheduledContinuousGlucose",
    "bloodGlucose",
    "insulin",
    "food",
    "generic-com.abbottdiabetescare.informatics.exercise",
    "generic-com.abbottdiabetescare.informatics.customnote",
    "generic-com.abbottdiabetescare.informatics.ondemandalarm.low",
    "generic-com.abbottdiabetescare.informatics.ondemandalarm.high",
    "generic-com.abbottdiabetescare.informatics.ondemandalarm.projectedlow",
    "generic-com.abbottdiabetescare.informatics.ondemandalarm.projectedhigh",
    "generic-com.abbottdiabetescare.informatics.sensorstart",
    "generic-com.abbottdiabetescare.informatics.error",
    "generic-com.abbottdiabetescare.informatics.isfGlucoseAlarm",
    "generic-com.abbottdiabetescare.informatics.alarmSetting",
];
