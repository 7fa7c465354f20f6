// ABOUTME: Logging configuration and structured logging setup for the CLI
// ABOUTME: tracing-subscriber console output with env-filter and a debug toggle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! Console logging for one CLI invocation.
//!
//! Level resolution: `RUST_LOG` wins when set; otherwise `--debug` selects
//! `debug`, else `info`. Output goes to stderr so command output (YAML
//! listings, chart paths) stays clean on stdout.

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error when a subscriber is already installed or `RUST_LOG`
/// does not parse.
pub fn init(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    let format = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init()?;

    Ok(())
}
