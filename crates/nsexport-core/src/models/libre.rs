// ABOUTME: LibreView wire schema for auth, measurement submission, and sensor registration
// ABOUTME: Field names and casing mirror the LibreView JSON documents exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! LibreView target schema.
//!
//! The submission document nests device metadata and a measurement log with
//! five typed entry buckets. LibreView mixes `PascalCase` envelope fields
//! with `camelCase` entry fields; the serde renames below reproduce that
//! exactly rather than normalising it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{sensor, DEVICE_CAPABILITIES};
use crate::errors::ExportError;

/// Authentication request posted to `lsl/api/nisperson/getauthentication`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    /// Account culture code (e.g. `ru-RU`)
    #[serde(rename = "Culture")]
    pub culture: String,

    /// Device unique identifier from the config
    #[serde(rename = "DeviceId")]
    pub device_id: String,

    /// Gateway type string (e.g. `FSLibreLink.Android`)
    #[serde(rename = "GatewayType")]
    pub gateway_type: String,

    /// Whether to claim this app as the account's main device
    #[serde(rename = "SetDevice")]
    pub set_device: bool,

    /// Account user name
    #[serde(rename = "UserName")]
    pub user_name: String,

    /// Account domain (e.g. `Libreview`)
    #[serde(rename = "Domain")]
    pub domain: String,

    /// Account password
    #[serde(rename = "Password")]
    pub password: String,
}

/// Token payload inside an authentication response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResult {
    /// Bearer token for subsequent calls; empty means the login failed
    #[serde(rename = "UserToken", default)]
    pub user_token: String,

    /// Account id
    #[serde(rename = "AccountId", default)]
    pub account_id: String,
}

/// Authentication response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    /// API-level status code; zero is success
    #[serde(default)]
    pub status: i64,

    /// Token payload
    #[serde(default)]
    pub result: AuthResult,
}

/// Trend bucket reported on unscheduled glucose entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendArrow {
    /// Glucose trending upward
    Rising,
    /// Glucose trending downward
    Falling,
    /// Flat or unrecognised trend
    Stable,
}

impl TrendArrow {
    /// Map a Nightscout direction string onto the three-arrow model.
    /// `SingleUp`/`DoubleUp`/`FortyFiveUp` variants rise, `Down` variants
    /// fall, `Flat` and anything unrecognised is stable.
    #[must_use]
    pub fn from_direction(direction: &str) -> Self {
        if direction.contains("Up") {
            Self::Rising
        } else if direction.contains("Down") {
            Self::Falling
        } else {
            Self::Stable
        }
    }
}

impl fmt::Display for TrendArrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rising => "Rising",
            Self::Falling => "Falling",
            Self::Stable => "Stable",
        };
        f.write_str(name)
    }
}

/// Extended properties of a scheduled glucose entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledProperties {
    /// Device system time carried through from the source sample
    #[serde(rename = "factoryTimestamp")]
    pub factory_timestamp: DateTime<Utc>,

    /// `"true"` when the value is at or below the low threshold
    #[serde(rename = "lowOutOfRange")]
    pub low_out_of_range: String,

    /// `"true"` when the value is at or above the high threshold
    #[serde(rename = "highOutOfRange")]
    pub high_out_of_range: String,

    /// Always false; no device clock changes are synthesised
    #[serde(rename = "isFirstAfterTimeChange")]
    pub is_first_after_time_change: bool,

    /// Always `"true"` for scheduled entries
    #[serde(rename = "canMerge")]
    pub can_merge: String,
}

/// One scheduled (fixed-interval) continuous glucose entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledGlucoseEntry {
    /// Glucose value, mg/dL
    #[serde(rename = "valueInMgPerDl")]
    pub value_in_mg_per_dl: f64,

    /// Extended properties block
    #[serde(rename = "extendedProperties")]
    pub extended_properties: ScheduledProperties,

    /// Synthesised record number (band + Unix seconds)
    #[serde(rename = "recordNumber")]
    pub record_number: i64,

    /// Sample instant in the account's local timezone
    pub timestamp: DateTime<FixedOffset>,
}

/// Extended properties of an unscheduled glucose entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnscheduledProperties {
    /// Device system time carried through from the source sample
    #[serde(rename = "factoryTimestamp")]
    pub factory_timestamp: DateTime<Utc>,

    /// `"true"` when the value is at or below the low threshold
    #[serde(rename = "lowOutOfRange")]
    pub low_out_of_range: String,

    /// `"true"` when the value is at or above the high threshold
    #[serde(rename = "highOutOfRange")]
    pub high_out_of_range: String,

    /// Trend bucket derived from the source direction
    #[serde(rename = "trendArrow")]
    pub trend_arrow: TrendArrow,

    /// Always true; scans are actionable readings
    #[serde(rename = "isActionable")]
    pub is_actionable: bool,
}

/// One unscheduled (manual-scan-like) continuous glucose entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnscheduledGlucoseEntry {
    /// Glucose value, mg/dL
    #[serde(rename = "valueInMgPerDl")]
    pub value_in_mg_per_dl: f64,

    /// Extended properties block
    #[serde(rename = "extendedProperties")]
    pub extended_properties: UnscheduledProperties,

    /// Synthesised record number (band + Unix seconds)
    #[serde(rename = "recordNumber")]
    pub record_number: i64,

    /// Jittered sample instant in the account's local timezone
    pub timestamp: DateTime<FixedOffset>,
}

/// Dose classification reported on insulin entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsulinDoseType {
    /// Bolus / mealtime insulin
    RapidActing,
    /// Basal insulin (Lantus, Toujeo, Tresiba)
    LongActing,
}

/// Extended properties carrying only the factory timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryTimestampProperties {
    /// Event instant as recorded by the source
    #[serde(rename = "factoryTimestamp")]
    pub factory_timestamp: DateTime<Utc>,
}

/// One insulin dose entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsulinEntry {
    /// Extended properties block
    #[serde(rename = "extendedProperties")]
    pub extended_properties: FactoryTimestampProperties,

    /// Synthesised record number (band + Unix seconds)
    #[serde(rename = "recordNumber")]
    pub record_number: i64,

    /// Dose instant in the account's local timezone
    pub timestamp: DateTime<FixedOffset>,

    /// Dose size in insulin units
    pub units: f64,

    /// Rapid or long-acting classification
    #[serde(rename = "insulinType")]
    pub insulin_type: InsulinDoseType,
}

/// One food (carbohydrate) entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Extended properties block
    #[serde(rename = "extendedProperties")]
    pub extended_properties: FactoryTimestampProperties,

    /// Synthesised record number (band + Unix seconds)
    #[serde(rename = "recordNumber")]
    pub record_number: i64,

    /// Intake instant in the account's local timezone
    pub timestamp: DateTime<FixedOffset>,

    /// Carbohydrate grams, truncated to an integer
    #[serde(rename = "gramsCarbs")]
    pub grams_carbs: i64,

    /// Food classification; always `Unknown`
    #[serde(rename = "foodType")]
    pub food_type: String,
}

/// Extended properties of a sensor start event. LibreView expresses the
/// capability numbers as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorStartProperties {
    /// Event instant as recorded by the source
    #[serde(rename = "factoryTimestamp")]
    pub factory_timestamp: DateTime<Utc>,

    /// Lowest reportable glucose value, mg/dL
    pub gmin: String,

    /// Highest reportable glucose value, mg/dL
    pub gmax: String,

    /// Sensor wear duration in minutes
    #[serde(rename = "wearDuration")]
    pub wear_duration: String,

    /// Sensor warm-up time in minutes
    #[serde(rename = "warmupTime")]
    pub warmup_time: String,
}

/// One generic entry; the only kind produced here is the sensor start event
/// marking a new sensor's first scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericEntry {
    /// Generic entry type discriminator
    #[serde(rename = "type")]
    pub entry_type: String,

    /// Extended properties block
    #[serde(rename = "extendedProperties")]
    pub extended_properties: SensorStartProperties,

    /// Synthesised record number (band + Unix seconds)
    #[serde(rename = "recordNumber")]
    pub record_number: i64,

    /// Event instant in the account's local timezone
    pub timestamp: DateTime<FixedOffset>,
}

impl GenericEntry {
    /// Whether this generic entry is a sensor start event.
    #[must_use]
    pub fn is_sensor_start(&self) -> bool {
        self.entry_type == sensor::START_EVENT_TYPE
    }
}

/// The measurement log: capability list plus the typed entry buckets.
/// Buckets for kinds this tool never produces stay empty but must be
/// present in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementLog {
    /// Capability strings advertised with every submission
    pub capabilities: Vec<String>,

    /// Fingerstick readings; never produced here
    #[serde(rename = "bloodGlucoseEntries")]
    pub blood_glucose_entries: Vec<serde_json::Value>,

    /// Generic events (sensor starts)
    #[serde(rename = "genericEntries")]
    pub generic_entries: Vec<GenericEntry>,

    /// Ketone readings; never produced here
    #[serde(rename = "ketoneEntries")]
    pub ketone_entries: Vec<serde_json::Value>,

    /// Scheduled continuous glucose entries
    #[serde(rename = "scheduledContinuousGlucoseEntries")]
    pub scheduled_continuous_glucose_entries: Vec<ScheduledGlucoseEntry>,

    /// Insulin dose entries
    #[serde(rename = "insulinEntries")]
    pub insulin_entries: Vec<InsulinEntry>,

    /// Food entries
    #[serde(rename = "foodEntries")]
    pub food_entries: Vec<FoodEntry>,

    /// Unscheduled continuous glucose entries
    #[serde(rename = "unscheduledContinuousGlucoseEntries")]
    pub unscheduled_continuous_glucose_entries: Vec<UnscheduledGlucoseEntry>,
}

impl Default for MeasurementLog {
    fn default() -> Self {
        Self {
            capabilities: DEVICE_CAPABILITIES.iter().map(ToString::to_string).collect(),
            blood_glucose_entries: Vec::new(),
            generic_entries: Vec::new(),
            ketone_entries: Vec::new(),
            scheduled_continuous_glucose_entries: Vec::new(),
            insulin_entries: Vec::new(),
            food_entries: Vec::new(),
            unscheduled_continuous_glucose_entries: Vec::new(),
        }
    }
}

impl MeasurementLog {
    /// Whether every entry bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheduled_continuous_glucose_entries.is_empty()
            && self.unscheduled_continuous_glucose_entries.is_empty()
            && self.insulin_entries.is_empty()
            && self.food_entries.is_empty()
            && self.generic_entries.is_empty()
    }
}

/// Factory configuration block of the device settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Unit of measure shown to the user (`mmol/L` or `mg/dL`)
    #[serde(rename = "UOM")]
    pub uom: String,
}

/// Miscellaneous device settings block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Miscellaneous {
    /// Device display language
    #[serde(rename = "selectedLanguage")]
    pub selected_language: String,

    /// Lower glucose target shown on the device, mg/dL
    #[serde(rename = "valueGlucoseTargetRangeLowInMgPerDl")]
    pub glucose_target_range_low: i32,

    /// Upper glucose target shown on the device, mg/dL
    #[serde(rename = "valueGlucoseTargetRangeHighInMgPerDl")]
    pub glucose_target_range_high: i32,

    /// Clock format (`24hr` or `12hr`)
    #[serde(rename = "selectedTimeFormat")]
    pub selected_time_format: String,

    /// Carb accounting mode
    #[serde(rename = "selectedCarbType")]
    pub selected_carb_type: String,
}

/// Device settings block of the submission document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSettings {
    /// Factory configuration
    #[serde(rename = "factoryConfig")]
    pub factory_config: FactoryConfig,

    /// Reported firmware version
    #[serde(rename = "firmwareVersion")]
    pub firmware_version: String,

    /// Miscellaneous settings
    pub miscellaneous: Miscellaneous,
}

/// Device identity block of the submission document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Hardware model description
    #[serde(rename = "hardwareDescriptor")]
    pub hardware_descriptor: String,

    /// Operating system version string
    #[serde(rename = "osVersion")]
    pub os_version: String,

    /// Application model name
    #[serde(rename = "modelName")]
    pub model_name: String,

    /// Operating system type
    #[serde(rename = "osType")]
    pub os_type: String,

    /// Stable unique identifier for this uploader
    #[serde(rename = "uniqueIdentifier")]
    pub unique_identifier: String,

    /// Hardware vendor name
    #[serde(rename = "hardwareName")]
    pub hardware_name: String,
}

/// Header wrapping the device identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceDataHeader {
    /// Device identity
    pub device: Device,
}

/// Device metadata plus the measurement log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceData {
    /// Device settings
    #[serde(rename = "deviceSettings")]
    pub device_settings: DeviceSettings,

    /// Device identity header
    pub header: DeviceDataHeader,

    /// The measurement log
    #[serde(rename = "measurementLog")]
    pub measurement_log: MeasurementLog,
}

/// Top-level measurement submission document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurements {
    /// Session bearer token
    #[serde(rename = "UserToken")]
    pub user_token: String,

    /// Gateway type string
    #[serde(rename = "GatewayType")]
    pub gateway_type: String,

    /// Account domain
    #[serde(rename = "Domain")]
    pub domain: String,

    /// Device metadata and measurement log
    #[serde(rename = "DeviceData")]
    pub device_data: DeviceData,
}

/// Per-kind entry counts echoed back by a successful submission.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MeasurementCounts {
    /// Accepted scheduled glucose entries
    #[serde(rename = "ScheduledGlucoseCount", default)]
    pub scheduled_glucose: i64,

    /// Accepted unscheduled glucose entries
    #[serde(rename = "UnScheduledGlucoseCount", default)]
    pub unscheduled_glucose: i64,

    /// Accepted fingerstick entries
    #[serde(rename = "BloodGlucoseCount", default)]
    pub blood_glucose: i64,

    /// Accepted insulin entries
    #[serde(rename = "InsulinCount", default)]
    pub insulin: i64,

    /// Accepted generic entries
    #[serde(rename = "GenericCount", default)]
    pub generic: i64,

    /// Accepted food entries
    #[serde(rename = "FoodCount", default)]
    pub food: i64,

    /// Accepted ketone entries
    #[serde(rename = "KetoneCount", default)]
    pub ketone: i64,

    /// Total accepted entries
    #[serde(rename = "TotalCount", default)]
    pub total: i64,
}

/// Result payload of a successful submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResult {
    /// Server-assigned upload id
    #[serde(rename = "UploadId", default)]
    pub upload_id: String,

    /// Upload status
    #[serde(rename = "Status", default)]
    pub status: i64,

    /// Per-kind accepted counts
    #[serde(rename = "MeasurementCounts", default)]
    pub measurement_counts: MeasurementCounts,

    /// Number of items in the upload
    #[serde(rename = "ItemCount", default)]
    pub item_count: i64,

    /// Serial number the upload was attributed to
    #[serde(rename = "SerialNumber", default)]
    pub serial_number: String,
}

/// Submission response envelope. A nonzero `status` fails the run even on
/// HTTP 200.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportResponse {
    /// API-level status code; zero is success
    #[serde(default)]
    pub status: i64,

    /// Result payload
    #[serde(default)]
    pub result: UploadResult,
}

/// Sensor registration request sent with PUT to the new-sensor endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NewSensorRequest {
    /// Session bearer token
    #[serde(rename = "UserToken")]
    pub user_token: String,

    /// Gateway type string
    #[serde(rename = "GatewayType")]
    pub gateway_type: String,

    /// Account domain
    #[serde(rename = "Domain")]
    pub domain: String,

    /// Serial number of the sensor being registered
    #[serde(rename = "SerialNumber")]
    pub serial_number: String,
}

/// Measurement kinds selectable for upload with `--measurements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    /// Scheduled continuous glucose entries
    ScheduledGlucose,
    /// Unscheduled continuous glucose entries
    UnscheduledGlucose,
    /// Insulin dose entries
    Insulin,
    /// Food entries
    Food,
    /// Generic sensor start entries
    Generic,
}

impl MeasurementKind {
    /// All kinds, the default upload selection.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![
            Self::ScheduledGlucose,
            Self::UnscheduledGlucose,
            Self::Insulin,
            Self::Food,
            Self::Generic,
        ]
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ScheduledGlucose => "scheduledContinuousGlucose",
            Self::UnscheduledGlucose => "unscheduledContinuousGlucose",
            Self::Insulin => "insulin",
            Self::Food => "food",
            Self::Generic => "generic",
        };
        f.write_str(name)
    }
}

impl FromStr for MeasurementKind {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "scheduledContinuousGlucose" => Ok(Self::ScheduledGlucose),
            "unscheduledContinuousGlucose" => Ok(Self::UnscheduledGlucose),
            "insulin" => Ok(Self::Insulin),
            "food" => Ok(Self::Food),
            "generic" => Ok(Self::Generic),
            other => Err(ExportError::parse(
                "measurement kind",
                format!("unknown measurement kind {other}"),
            )),
        }
    }
}
