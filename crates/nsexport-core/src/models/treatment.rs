// ABOUTME: Nightscout treatment model covering insulin doses and carb intake
// ABOUTME: Includes insulin type parsing and long-acting dose classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::LONG_ACTING_INSULIN_BRANDS;
use crate::downsample::Timestamped;
use crate::errors::ExportError;

/// JSON-encoded injection metadata attached to a treatment, e.g.
/// `[{"insulin":"Lantus","units":12.0}]`. Nightscout stores this as an
/// opaque string; only the long-acting classification reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsulinInjections(pub String);

impl InsulinInjections {
    /// Build injection metadata for one dose of the given type.
    #[must_use]
    pub fn new(units: f64, insulin_type: InsulinType) -> Self {
        Self(format!("[{{\"insulin\":\"{insulin_type}\",\"units\":{units:.1}}}]"))
    }

    /// Whether the metadata names a long-acting insulin brand.
    /// Case-insensitive substring match against the fixed brand list.
    #[must_use]
    pub fn is_long_acting(&self) -> bool {
        let lowered = self.0.to_lowercase();
        LONG_ACTING_INSULIN_BRANDS
            .iter()
            .any(|brand| lowered.contains(brand))
    }
}

impl fmt::Display for InsulinInjections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One insulin or carb event as returned by the Nightscout treatments API.
/// A treatment may carry insulin, carbs, or both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    /// Server-side object id; excluded when creating a new treatment
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Event type label (e.g. `Meal Bolus`)
    #[serde(rename = "eventType", default)]
    pub event_type: String,

    /// Who or what entered the treatment
    #[serde(rename = "enteredBy", default)]
    pub entered_by: String,

    /// Event instant
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,

    /// Insulin dose in units; zero when the treatment is carbs-only
    #[serde(default)]
    pub insulin: f64,

    /// Carbohydrate intake in grams; zero when the treatment is insulin-only
    #[serde(default)]
    pub carbs: f64,

    /// Injection metadata used for long-acting classification
    #[serde(rename = "insulinInjections", default)]
    pub insulin_injections: InsulinInjections,
}

impl Timestamped for Treatment {
    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Known insulin preparations. The first five are rapid-acting; Lantus and
/// Toujeo are long-acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsulinType {
    /// Fiasp (rapid)
    Fiasp,
    /// NovoRapid (rapid)
    Novorapid,
    /// Humalog (rapid)
    Humalog,
    /// Lispro (rapid)
    Lispro,
    /// Actrapid (rapid)
    Actapid,
    /// Lantus (long-acting)
    Lantus,
    /// Toujeo (long-acting)
    Toujeo,
}

impl InsulinType {
    /// Whether this preparation is a long-acting basal insulin.
    #[must_use]
    pub fn is_long_acting(self) -> bool {
        matches!(self, Self::Lantus | Self::Toujeo)
    }
}

impl fmt::Display for InsulinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fiasp => "Fiasp",
            Self::Novorapid => "Novorapid",
            Self::Humalog => "Humalog",
            Self::Lispro => "Lispro",
            Self::Actapid => "Actapid",
            Self::Lantus => "Lantus",
            Self::Toujeo => "Toujeo",
        };
        f.write_str(name)
    }
}

impl FromStr for InsulinType {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "fiasp" => Ok(Self::Fiasp),
            "novorapid" => Ok(Self::Novorapid),
            "humalog" => Ok(Self::Humalog),
            "lispro" => Ok(Self::Lispro),
            "actapid" => Ok(Self::Actapid),
            "lantus" => Ok(Self::Lantus),
            "toujeo" => Ok(Self::Toujeo),
            other => Err(ExportError::parse(
                "insulin type",
                format!("unknown insulin type {other}"),
            )),
        }
    }
}
