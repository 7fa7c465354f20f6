// ABOUTME: Unified error taxonomy for one export run
// ABOUTME: Distinguishes fetch, auth, submission, sensor-registration, parse, and config failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! # Error Handling
//!
//! One `thiserror` enum covers the failure modes of an export run. Every
//! variant except [`ExportError::SensorRegistration`] is fatal: it bubbles
//! synchronously to the command dispatcher, which reports it and exits
//! non-zero. There is no retry logic anywhere; a single failed HTTP call
//! fails the entire run. Empty fetch results are not errors — the
//! orchestrator short-circuits them as a deliberate no-op success.

use thiserror::Error;

/// Result alias used throughout the nsexport crates.
pub type ExportResult<T> = Result<T, ExportError>;

/// Failure modes of an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A read from the Nightscout server failed (network, HTTP status, or
    /// JSON decode). `operation` names the fetch that failed.
    #[error("fetch {operation}: {reason}")]
    Fetch {
        /// Which fetch failed (e.g. "glucose entries", "insulin treatments")
        operation: String,
        /// Underlying failure description
        reason: String,
    },

    /// Authentication against either service failed (bad credentials,
    /// rejected token exchange, or an empty token in the response).
    #[error("authentication: {reason}")]
    Auth {
        /// Underlying failure description
        reason: String,
    },

    /// The measurement submission was rejected: non-2xx HTTP status or a
    /// nonzero API-level status code in the response body.
    #[error("measurement submission: {reason}")]
    Submission {
        /// Underlying failure description
        reason: String,
    },

    /// Sensor registration failed. Soft failure: the orchestrator logs it
    /// and still reports overall success, because the measurement
    /// submission already went through.
    #[error("sensor registration: {reason}")]
    SensorRegistration {
        /// Underlying failure description
        reason: String,
    },

    /// A flag or file value could not be parsed (dates, durations, the
    /// watermark file). Surfaces before any network activity.
    #[error("parse {what}: {reason}")]
    Parse {
        /// What was being parsed
        what: String,
        /// Underlying failure description
        reason: String,
    },

    /// The configuration file is missing, unreadable, or invalid.
    #[error("config: {reason}")]
    Config {
        /// Underlying failure description
        reason: String,
    },
}

impl ExportError {
    /// Build a fetch error with the name of the failing operation.
    pub fn fetch(operation: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    /// Build an auth error.
    pub fn auth(reason: impl std::fmt::Display) -> Self {
        Self::Auth {
            reason: reason.to_string(),
        }
    }

    /// Build a submission error.
    pub fn submission(reason: impl std::fmt::Display) -> Self {
        Self::Submission {
            reason: reason.to_string(),
        }
    }

    /// Build a sensor registration error.
    pub fn sensor_registration(reason: impl std::fmt::Display) -> Self {
        Self::SensorRegistration {
            reason: reason.to_string(),
        }
    }

    /// Build a parse error naming the value that failed to parse.
    pub fn parse(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a config error.
    pub fn config(reason: impl std::fmt::Display) -> Self {
        Self::Config {
            reason: reason.to_string(),
        }
    }
}
