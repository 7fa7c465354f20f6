// ABOUTME: Tests for YAML configuration loading, seeding, and dotted-key editing
// ABOUTME: Round-trips the settings document and exercises set_value typing rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nsexport::core::config::{set_value, Settings};
use nsexport::core::errors::ExportError;

const SAMPLE_CONFIG: &str = r"
nightscout:
  url: https://ns.example.org
  apiToken: secret-token
libreview:
  auth:
    username: user@example.org
    password: hunter2
  importConfig:
    apiEndpoint: https://api.libreview.io
    domain: Libreview
    culture: en-US
    gatewayType: FSLibreLink.Android
    uom: mmol/L
    deviceSettings:
      firmwareVersion: 2.8.2
      glucoseTargetRangeHighInMgPerDl: 144
      glucoseTargetRangeLowInMgPerDl: 90
      hardwareDescriptor: Redmi Note 8 Pro
      hardwareName: Xiaomi
      modelName: com.freestylelibre.app
      osType: Android
      osVersion: '29'
      selectedCarbType: grams of carbs
      selectedLanguage: en_US
      selectedTimeFormat: 24hr
      uniqueIdentifier: 6b3c9a4e-0000-4000-8000-1234567890ab
";

#[test]
fn test_load_parses_both_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, SAMPLE_CONFIG).unwrap();

    let settings = Settings::load(&path).unwrap();

    assert_eq!(settings.nightscout.url, "https://ns.example.org");
    assert_eq!(settings.nightscout.api_token, "secret-token");
    assert_eq!(settings.libreview.auth.username, "user@example.org");
    assert_eq!(
        settings.libreview.import_config.device_settings.glucose_target_range_high,
        144
    );
    assert!(settings.validate().is_ok());
}

#[test]
fn test_missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, ExportError::Config { .. }));
}

#[test]
fn test_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let mut settings = Settings::seed_default();
    settings.nightscout.url = "https://ns.example.org".to_owned();
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded.nightscout.url, settings.nightscout.url);
    assert_eq!(
        loaded.libreview.import_config.device_settings.unique_identifier,
        settings.libreview.import_config.device_settings.unique_identifier
    );
}

#[test]
fn test_seed_default_generates_unique_identifier() {
    let a = Settings::seed_default();
    let b = Settings::seed_default();

    let id_a = a.libreview.import_config.device_settings.unique_identifier;
    let id_b = b.libreview.import_config.device_settings.unique_identifier;

    assert!(!id_a.is_empty());
    assert_ne!(id_a, id_b);
}

#[test]
fn test_validate_rejects_empty_nightscout_url() {
    let settings = Settings::seed_default();
    assert!(matches!(
        settings.validate().unwrap_err(),
        ExportError::Config { .. }
    ));
}

#[test]
fn test_set_value_rewrites_nested_string_key() {
    let mut doc: serde_yaml::Value = serde_yaml::from_str(SAMPLE_CONFIG).unwrap();

    set_value(&mut doc, "libreview.importConfig.uom", "mg/dL").unwrap();

    assert_eq!(doc["libreview"]["importConfig"]["uom"], "mg/dL");
}

#[test]
fn test_set_value_stores_integers_typed() {
    let mut doc: serde_yaml::Value = serde_yaml::from_str(SAMPLE_CONFIG).unwrap();

    set_value(
        &mut doc,
        "libreview.importConfig.deviceSettings.glucoseTargetRangeLowInMgPerDl",
        "80",
    )
    .unwrap();

    assert_eq!(
        doc["libreview"]["importConfig"]["deviceSettings"]["glucoseTargetRangeLowInMgPerDl"],
        80
    );
}

#[test]
fn test_set_value_creates_missing_intermediate_mappings() {
    let mut doc: serde_yaml::Value = serde_yaml::from_str("{}").unwrap();

    set_value(&mut doc, "nightscout.url", "https://ns.example.org").unwrap();

    assert_eq!(doc["nightscout"]["url"], "https://ns.example.org");
}

#[test]
fn test_set_value_rejects_traversing_a_scalar() {
    let mut doc: serde_yaml::Value = serde_yaml::from_str(SAMPLE_CONFIG).unwrap();

    let err = set_value(&mut doc, "nightscout.url.deeper", "x").unwrap_err();
    assert!(matches!(err, ExportError::Config { .. }));
}
