// ABOUTME: Watermark file holding the last successfully exported scheduled-glucose timestamp
// ABOUTME: One RFC3339 line; absence is not an error, sub-second precision is truncated on write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! Watermark persistence.
//!
//! The watermark makes repeated runs incremental: the orchestrator filters
//! every fetched sequence to entries strictly after `watermark + 1 minute`
//! (the pad avoids re-exporting a boundary entry on clock or precision
//! skew). It is read fresh at the start of each run and rewritten only
//! after a successful submission.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};

use nsexport_core::errors::{ExportError, ExportResult};

/// Read the watermark. A missing file yields `None`.
///
/// # Errors
///
/// Returns [`ExportError::Parse`] when the file exists but does not hold a
/// valid RFC3339 timestamp, and [`ExportError::Config`] on other I/O
/// failures.
pub fn load(path: &Path) -> ExportResult<Option<DateTime<Utc>>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ExportError::config(format!(
                "couldn't read watermark file {}: {err}",
                path.display()
            )))
        }
    };

    let ts = DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|err| ExportError::parse("watermark file", err))?;

    Ok(Some(ts.with_timezone(&Utc)))
}

/// Write the watermark, truncated to whole seconds.
///
/// # Errors
///
/// Returns [`ExportError::Config`] when the write fails.
pub fn store(path: &Path, ts: DateTime<Utc>) -> ExportResult<()> {
    let raw = ts.to_rfc3339_opts(SecondsFormat::Secs, true);
    fs::write(path, raw).map_err(|err| {
        ExportError::config(format!(
            "couldn't write watermark file {}: {err}",
            path.display()
        ))
    })
}
