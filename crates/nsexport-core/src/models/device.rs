// ABOUTME: Nightscout device status model for the list devices command
// ABOUTME: Mirrors the JSON shape of the devicestatus API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploader block of a device status record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uploader {
    /// Uploader kind (e.g. `BRIDGE` or `PHONE`)
    #[serde(rename = "type", default)]
    pub uploader_type: String,

    /// Battery percentage
    #[serde(default)]
    pub battery: i32,
}

/// One device status record as returned by the Nightscout devicestatus API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Server-side object id
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Reporting device name
    #[serde(default)]
    pub device: String,

    /// Record instant
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,

    /// Minutes offset from UTC
    #[serde(rename = "utcOffset", default)]
    pub utc_offset: i32,

    /// Uploader details, absent for some device kinds
    #[serde(default)]
    pub uploader: Option<Uploader>,
}

impl DeviceStatus {
    /// Whether this record was uploaded by the given device kind
    /// (case-insensitive).
    #[must_use]
    pub fn is_device_type(&self, device_type: &str) -> bool {
        self.uploader
            .as_ref()
            .is_some_and(|u| u.uploader_type.eq_ignore_ascii_case(device_type))
    }
}
