// ABOUTME: YAML configuration file handling for the Nightscout and LibreView sections
// ABOUTME: Explicit settings struct passed into components; no ambient global state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! # Configuration
//!
//! One YAML document with two top-level sections: the Nightscout source
//! (URL and API token) and the LibreView target (credentials, device
//! identity, unit/locale settings). Loaded once at startup into a
//! [`Settings`] value that is passed explicitly into each component.
//!
//! `Settings::seed_default` produces a ready-to-edit config with sensible
//! device defaults and a freshly generated unique identifier. Individual
//! keys can be rewritten in place with [`set_value`], which powers the
//! `config set` command.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ExportError, ExportResult};

/// Nightscout source section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NightscoutConfig {
    /// Base URL of the Nightscout server
    #[serde(default)]
    pub url: String,

    /// URL token exchanged for a JWT at startup
    #[serde(rename = "apiToken", default)]
    pub api_token: String,
}

/// LibreView account credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Account user name
    #[serde(default)]
    pub username: String,

    /// Account password
    #[serde(default)]
    pub password: String,
}

/// Device identity and display settings reported with every submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceSettingsConfig {
    /// Device display language
    #[serde(rename = "selectedLanguage", default)]
    pub selected_language: String,

    /// Clock format (`24hr` or `12hr`)
    #[serde(rename = "selectedTimeFormat", default)]
    pub selected_time_format: String,

    /// Carb accounting mode
    #[serde(rename = "selectedCarbType", default)]
    pub selected_carb_type: String,

    /// Lower glucose target shown on the device, mg/dL
    #[serde(rename = "glucoseTargetRangeLowInMgPerDl", default)]
    pub glucose_target_range_low: i32,

    /// Upper glucose target shown on the device, mg/dL
    #[serde(rename = "glucoseTargetRangeHighInMgPerDl", default)]
    pub glucose_target_range_high: i32,

    /// Reported firmware version
    #[serde(rename = "firmwareVersion", default)]
    pub firmware_version: String,

    /// Hardware vendor name
    #[serde(rename = "hardwareName", default)]
    pub hardware_name: String,

    /// Hardware model description
    #[serde(rename = "hardwareDescriptor", default)]
    pub hardware_descriptor: String,

    /// Operating system type
    #[serde(rename = "osType", default)]
    pub os_type: String,

    /// Operating system version string
    #[serde(rename = "osVersion", default)]
    pub os_version: String,

    /// Application model name
    #[serde(rename = "modelName", default)]
    pub model_name: String,

    /// Stable unique identifier for this uploader
    #[serde(rename = "uniqueIdentifier", default)]
    pub unique_identifier: String,
}

/// LibreView import settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    /// API endpoint base URL
    #[serde(rename = "apiEndpoint", default)]
    pub api_endpoint: String,

    /// Account domain
    #[serde(default)]
    pub domain: String,

    /// Account culture code
    #[serde(default)]
    pub culture: String,

    /// Gateway type string
    #[serde(rename = "gatewayType", default)]
    pub gateway_type: String,

    /// Unit of measure shown to the user
    #[serde(default)]
    pub uom: String,

    /// Device identity and display settings
    #[serde(rename = "deviceSettings", default)]
    pub device_settings: DeviceSettingsConfig,
}

/// LibreView target section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibreviewConfig {
    /// Account credentials
    #[serde(default)]
    pub auth: AuthConfig,

    /// Import settings and device identity
    #[serde(rename = "importConfig", default)]
    pub import_config: ImportConfig,
}

/// The whole configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Nightscout source section
    #[serde(default)]
    pub nightscout: NightscoutConfig,

    /// LibreView target section
    #[serde(default)]
    pub libreview: LibreviewConfig,
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Config`] when the file is missing, unreadable,
    /// or not valid YAML.
    pub fn load(path: &Path) -> ExportResult<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            ExportError::config(format!("couldn't load config file {}: {err}", path.display()))
        })?;
        serde_yaml::from_str(&raw)
            .map_err(|err| ExportError::config(format!("bad yaml in {}: {err}", path.display())))
    }

    /// Write settings to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Config`] when serialization or the write fails.
    pub fn save(&self, path: &Path) -> ExportResult<()> {
        let raw = serde_yaml::to_string(self).map_err(ExportError::config)?;
        fs::write(path, raw).map_err(|err| {
            ExportError::config(format!("couldn't write config file {}: {err}", path.display()))
        })
    }

    /// A ready-to-edit default configuration with a freshly generated
    /// device identifier. Credentials and the Nightscout URL stay empty.
    #[must_use]
    pub fn seed_default() -> Self {
        Self {
            nightscout: NightscoutConfig::default(),
            libreview: LibreviewConfig {
                auth: AuthConfig::default(),
                import_config: ImportConfig {
                    api_endpoint: "https://api.libreview.io".to_owned(),
                    domain: "Libreview".to_owned(),
                    culture: "en-US".to_owned(),
                    gateway_type: "FSLibreLink.Android".to_owned(),
                    uom: "mmol/L".to_owned(),
                    device_settings: DeviceSettingsConfig {
                        selected_language: "en_US".to_owned(),
                        selected_time_format: "24hr".to_owned(),
                        selected_carb_type: "grams of carbs".to_owned(),
                        glucose_target_range_low: 90,
                        glucose_target_range_high: 144,
                        firmware_version: "2.8.2".to_owned(),
                        hardware_name: "Xiaomi".to_owned(),
                        hardware_descriptor: "Redmi Note 8 Pro".to_owned(),
                        os_type: "Android".to_owned(),
                        os_version: "29".to_owned(),
                        model_name: "com.freestylelibre.app".to_owned(),
                        unique_identifier: uuid::Uuid::new_v4().to_string(),
                    },
                },
            },
        }
    }

    /// Check that the sections an export run needs are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Config`] naming the first missing value.
    pub fn validate(&self) -> ExportResult<()> {
        if self.nightscout.url.is_empty() {
            return Err(ExportError::config("nightscout.url is not set"));
        }
        if self.libreview.auth.username.is_empty() {
            return Err(ExportError::config("libreview.auth.username is not set"));
        }
        if self.libreview.import_config.api_endpoint.is_empty() {
            return Err(ExportError::config(
                "libreview.importConfig.apiEndpoint is not set",
            ));
        }
        Ok(())
    }
}

/// Set one key in a YAML document by dotted path, e.g.
/// `libreview.importConfig.uom`. Values that parse as integers or booleans
/// are stored typed; everything else is stored as a string. Intermediate
/// mappings are created as needed.
///
/// # Errors
///
/// Returns [`ExportError::Config`] when a path segment traverses a
/// non-mapping node.
pub fn set_value(doc: &mut serde_yaml::Value, dotted_key: &str, value: &str) -> ExportResult<()> {
    let typed = if let Ok(n) = value.parse::<i64>() {
        serde_yaml::Value::from(n)
    } else if let Ok(b) = value.parse::<bool>() {
        serde_yaml::Value::from(b)
    } else {
        serde_yaml::Value::from(value)
    };

    let segments: Vec<&str> = dotted_key.split('.').collect();
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| ExportError::config("empty config key"))?;

    let mut node = doc;
    for segment in parents {
        let map = node.as_mapping_mut().ok_or_else(|| {
            ExportError::config(format!("key {dotted_key}: {segment} is not a mapping"))
        })?;
        node = map
            .entry(serde_yaml::Value::from(*segment))
            .or_insert_with(|| serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
    }

    let map = node.as_mapping_mut().ok_or_else(|| {
        ExportError::config(format!("key {dotted_key}: {last} is not a mapping"))
    })?;
    map.insert(serde_yaml::Value::from(*last), typed);

    Ok(())
}
