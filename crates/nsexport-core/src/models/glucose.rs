// ABOUTME: Nightscout glucose entry model with the Sgv mg/dL newtype
// ABOUTME: Mirrors the JSON shape of the Nightscout entries API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::downsample::Timestamped;

/// Sensor glucose value in mg/dL-scale integer units.
///
/// Out-of-range checks return `"true"`/`"false"` strings because that is
/// what the LibreView extended-properties schema expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sgv(pub i32);

impl Sgv {
    /// `"true"` when the value is at or below `min`.
    #[must_use]
    pub fn low_out_of_range(self, min: i32) -> &'static str {
        if self.0 <= min {
            "true"
        } else {
            "false"
        }
    }

    /// `"true"` when the value is at or above `max`.
    #[must_use]
    pub fn high_out_of_range(self, max: i32) -> &'static str {
        if self.0 >= max {
            "true"
        } else {
            "false"
        }
    }

    /// The value as an `f64`, the unit LibreView entries carry.
    #[must_use]
    pub fn as_mg_per_dl(self) -> f64 {
        f64::from(self.0)
    }

    /// The value converted to mmol/L, used for chart presentation only.
    #[must_use]
    pub fn as_mmol(self) -> f64 {
        f64::from(self.0) / 18.0
    }
}

/// One continuous glucose monitor sample as returned by the Nightscout
/// entries API. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlucoseEntry {
    /// Server-side object id
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Uploading device name
    #[serde(default)]
    pub device: String,

    /// Sample instant as epoch milliseconds
    #[serde(default)]
    pub date: i64,

    /// Sample instant. This is the timestamp the downsample engine and the
    /// transformation layer key on.
    #[serde(rename = "dateString")]
    pub date_string: DateTime<Utc>,

    /// Sensor glucose value
    #[serde(default)]
    pub sgv: Sgv,

    /// Change since the previous sample
    #[serde(default)]
    pub delta: f64,

    /// Trend direction string (`Flat`, `SingleUp`, `DoubleDown`, ...)
    #[serde(default)]
    pub direction: String,

    /// Entry type discriminator (`sgv` for glucose samples)
    #[serde(rename = "type", default)]
    pub entry_type: String,

    /// Filtered raw sensor value
    #[serde(default)]
    pub filtered: f64,

    /// Unfiltered raw sensor value
    #[serde(default)]
    pub unfiltered: f64,

    /// Receiver signal strength
    #[serde(default)]
    pub rssi: i32,

    /// Sensor noise level
    #[serde(default)]
    pub noise: i32,

    /// Device system time for the sample; carried through to the target
    /// schema unchanged as the factory timestamp
    #[serde(rename = "sysTime", default = "default_sys_time")]
    pub sys_time: DateTime<Utc>,

    /// Minutes offset from UTC reported by the uploader
    #[serde(rename = "utcOffset", default)]
    pub utc_offset: i32,

    /// Sample instant as epoch milliseconds (legacy duplicate of `date`)
    #[serde(default)]
    pub mills: i64,
}

fn default_sys_time() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Timestamped for GlucoseEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.date_string
    }
}
