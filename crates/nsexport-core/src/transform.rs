// ABOUTME: Transformation layer mapping Nightscout entries to LibreView entries
// ABOUTME: Record-number synthesis, out-of-range flagging, trend-arrow mapping, timestamp localization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! # Transformation Layer
//!
//! One mapping function per target entry kind. Each takes one source entry
//! and produces one target entry; there is no batching state and the
//! functions are total — malformed input is rejected earlier, at decode
//! time in the fetch step.
//!
//! Common rules:
//!
//! - record number = kind-specific band + source timestamp as Unix seconds
//!   (bands in [`crate::constants::record_band`]);
//! - out-of-range flags compare the glucose value against the configured
//!   low/high thresholds and render as `"true"`/`"false"` strings;
//! - target timestamps are the source instant rendered in the account's
//!   timezone; the device system time passes through unchanged as the
//!   factory timestamp.
//!
//! The unscheduled mapper is deliberately non-deterministic: it jitters the
//! timestamp by up to two minutes so synthesised scans never collide exactly
//! with the scheduled bucket. The jitter RNG is seedable for tests.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, TimeDelta, Utc};
use chrono_tz::Tz;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{glucose, record_band, sampling, sensor};
use crate::errors::ExportError;
use crate::models::libre::{
    FactoryTimestampProperties, FoodEntry, GenericEntry, InsulinDoseType, InsulinEntry,
    ScheduledGlucoseEntry, ScheduledProperties, SensorStartProperties, TrendArrow,
    UnscheduledGlucoseEntry, UnscheduledProperties,
};
use crate::models::{GlucoseEntry, Treatment};

/// Timezone the target representation is rendered in: the system's local
/// zone by default, or a named IANA zone when overridden with `--timezone`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timezone {
    /// The system local timezone
    #[default]
    Local,
    /// A named IANA timezone
    Named(Tz),
}

impl Timezone {
    /// Render an instant in this timezone. The offset is resolved per
    /// instant, so DST transitions inside a date range stay correct.
    #[must_use]
    pub fn localize(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::Local => instant.with_timezone(&Local).fixed_offset(),
            Self::Named(tz) => instant.with_timezone(&tz).fixed_offset(),
        }
    }
}

impl FromStr for Timezone {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let tz = value
            .parse::<Tz>()
            .map_err(|err| ExportError::parse("timezone", err))?;
        Ok(Self::Named(tz))
    }
}

/// Per-kind mappers sharing the timezone, the out-of-range thresholds, and
/// the jitter RNG.
#[derive(Debug)]
pub struct Transformer {
    tz: Timezone,
    min_sgv: i32,
    max_sgv: i32,
    rng: StdRng,
}

impl Transformer {
    /// Create a transformer with the default thresholds and an
    /// entropy-seeded jitter RNG.
    #[must_use]
    pub fn new(tz: Timezone) -> Self {
        Self::with_rng(tz, StdRng::from_entropy())
    }

    /// Create a transformer with a deterministic jitter RNG, for tests.
    #[must_use]
    pub fn with_seed(tz: Timezone, seed: u64) -> Self {
        Self::with_rng(tz, StdRng::seed_from_u64(seed))
    }

    fn with_rng(tz: Timezone, rng: StdRng) -> Self {
        Self {
            tz,
            min_sgv: glucose::DEFAULT_MIN_SGV,
            max_sgv: glucose::DEFAULT_MAX_SGV,
            rng,
        }
    }

    /// Map a glucose sample onto the scheduled (fixed-interval) bucket.
    #[must_use]
    pub fn scheduled_glucose(&self, entry: &GlucoseEntry) -> ScheduledGlucoseEntry {
        ScheduledGlucoseEntry {
            value_in_mg_per_dl: entry.sgv.as_mg_per_dl(),
            extended_properties: ScheduledProperties {
                factory_timestamp: entry.sys_time,
                low_out_of_range: entry.sgv.low_out_of_range(self.min_sgv).to_owned(),
                high_out_of_range: entry.sgv.high_out_of_range(self.max_sgv).to_owned(),
                is_first_after_time_change: false,
                can_merge: "true".to_owned(),
            },
            record_number: record_number(record_band::SCHEDULED_GLUCOSE, entry.date_string),
            timestamp: self.tz.localize(entry.date_string),
        }
    }

    /// Map a glucose sample onto the unscheduled (manual-scan-like) bucket.
    /// The timestamp gains a fresh random jitter of up to two minutes.
    #[must_use]
    pub fn unscheduled_glucose(&mut self, entry: &GlucoseEntry) -> UnscheduledGlucoseEntry {
        let jitter = TimeDelta::seconds(
            self.rng
                .gen_range(0..=sampling::UNSCHEDULED_JITTER_MAX_SECONDS),
        );
        UnscheduledGlucoseEntry {
            value_in_mg_per_dl: entry.sgv.as_mg_per_dl(),
            extended_properties: UnscheduledProperties {
                factory_timestamp: entry.sys_time,
                low_out_of_range: entry.sgv.low_out_of_range(self.min_sgv).to_owned(),
                high_out_of_range: entry.sgv.high_out_of_range(self.max_sgv).to_owned(),
                trend_arrow: TrendArrow::from_direction(&entry.direction),
                is_actionable: true,
            },
            record_number: record_number(record_band::UNSCHEDULED_GLUCOSE, entry.date_string),
            timestamp: self.tz.localize(entry.date_string + jitter),
        }
    }

    /// Map an insulin treatment onto an insulin dose entry.
    #[must_use]
    pub fn insulin(&self, treatment: &Treatment) -> InsulinEntry {
        let insulin_type = if treatment.insulin_injections.is_long_acting() {
            InsulinDoseType::LongActing
        } else {
            InsulinDoseType::RapidActing
        };
        InsulinEntry {
            extended_properties: FactoryTimestampProperties {
                factory_timestamp: treatment.created_at,
            },
            record_number: record_number(record_band::INSULIN, treatment.created_at),
            timestamp: self.tz.localize(treatment.created_at),
            units: treatment.insulin,
            insulin_type,
        }
    }

    /// Map a carb treatment onto a food entry. Grams are truncated to an
    /// integer; the food type is a fixed `Unknown` placeholder.
    #[must_use]
    pub fn food(&self, treatment: &Treatment) -> FoodEntry {
        FoodEntry {
            extended_properties: FactoryTimestampProperties {
                factory_timestamp: treatment.created_at,
            },
            record_number: record_number(record_band::FOOD, treatment.created_at),
            timestamp: self.tz.localize(treatment.created_at),
            grams_carbs: treatment.carbs.trunc() as i64,
            food_type: "Unknown".to_owned(),
        }
    }

    /// Build the sensor start event from the last unscheduled entry of a
    /// run, carrying the fixed sensor capability metadata.
    #[must_use]
    pub fn sensor_start(&self, last: &UnscheduledGlucoseEntry) -> GenericEntry {
        GenericEntry {
            entry_type: sensor::START_EVENT_TYPE.to_owned(),
            extended_properties: SensorStartProperties {
                factory_timestamp: last.extended_properties.factory_timestamp,
                gmin: sensor::GLUCOSE_MIN.to_string(),
                gmax: sensor::GLUCOSE_MAX.to_string(),
                wear_duration: sensor::WEAR_DURATION_MINUTES.to_string(),
                warmup_time: sensor::WARMUP_MINUTES.to_string(),
            },
            record_number: record_band::GENERIC + last.timestamp.timestamp(),
            timestamp: last.timestamp,
        }
    }
}

fn record_number(band: i64, instant: DateTime<Utc>) -> i64 {
    band + instant.timestamp()
}
