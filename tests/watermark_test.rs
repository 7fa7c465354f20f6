// ABOUTME: Tests for watermark file persistence
// ABOUTME: Round-trip with sub-second truncation, missing file handling, parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{TimeZone, Timelike, Utc};
use nsexport::core::errors::ExportError;
use nsexport::watermark;

#[test]
fn test_round_trip_truncates_to_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last.ts");

    let ts = Utc
        .with_ymd_and_hms(2026, 3, 1, 22, 15, 30)
        .unwrap()
        .with_nanosecond(123_456_789)
        .unwrap();

    watermark::store(&path, ts).unwrap();
    let loaded = watermark::load(&path).unwrap().unwrap();

    assert_eq!(loaded, ts.with_nanosecond(0).unwrap());
}

#[test]
fn test_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.ts");

    assert!(watermark::load(&path).unwrap().is_none());
}

#[test]
fn test_garbage_content_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last.ts");
    std::fs::write(&path, "not a timestamp").unwrap();

    let err = watermark::load(&path).unwrap_err();
    assert!(matches!(err, ExportError::Parse { .. }));
}

#[test]
fn test_store_overwrites_previous_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last.ts");

    let first = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();

    watermark::store(&path, first).unwrap();
    watermark::store(&path, second).unwrap();

    assert_eq!(watermark::load(&path).unwrap().unwrap(), second);
}

#[test]
fn test_load_trims_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last.ts");
    std::fs::write(&path, "2026-03-01T10:00:00Z\n").unwrap();

    let loaded = watermark::load(&path).unwrap().unwrap();
    assert_eq!(loaded, Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap());
}
