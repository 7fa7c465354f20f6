// ABOUTME: Nightscout profile model providing glucose target bands for the chart
// ABOUTME: Mirrors the JSON shape of the profile API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One time-banded value inside a profile store (target bounds, basal rates).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetEntry {
    /// Band start as `HH:MM`
    #[serde(default)]
    pub time: String,

    /// Band value in the profile's units
    #[serde(default)]
    pub value: f64,

    /// Band start in seconds since midnight
    #[serde(rename = "timeAsSeconds", default)]
    pub time_as_seconds: i64,
}

/// One named profile inside the profile document. Only the target bands are
/// consumed here; the dosing fields are ignored on decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileStore {
    /// Profile timezone name
    #[serde(default)]
    pub timezone: String,

    /// Lower glucose target band
    #[serde(rename = "target_low", default)]
    pub target_low: Vec<TargetEntry>,

    /// Upper glucose target band
    #[serde(rename = "target_high", default)]
    pub target_high: Vec<TargetEntry>,

    /// Units the targets are expressed in (`mmol` or `mg/dl`)
    #[serde(default)]
    pub units: String,
}

/// The Nightscout profile document. The API returns a list; the first
/// element is the active one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Server-side object id
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Name of the profile selected as default
    #[serde(rename = "defaultProfile", default)]
    pub default_profile: String,

    /// Named profiles
    #[serde(default)]
    pub store: HashMap<String, ProfileStore>,

    /// Document creation instant
    #[serde(rename = "created_at", default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Units the profile is expressed in
    #[serde(default)]
    pub units: String,
}

impl Profile {
    /// The store selected by `defaultProfile`, if present.
    #[must_use]
    pub fn default_store(&self) -> Option<&ProfileStore> {
        self.store.get(&self.default_profile)
    }
}
