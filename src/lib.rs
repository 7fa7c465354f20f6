// ABOUTME: Main library entry point for the nsexport Nightscout to LibreView exporter
// ABOUTME: Export orchestration, watermark persistence, chart rendering, and logging bootstrap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

#![deny(unsafe_code)]

//! # nsexport
//!
//! Exports glucose and treatment data from a Nightscout server and
//! re-uploads it to the LibreView cloud service.
//!
//! ## Architecture
//!
//! - **`nsexport-core`**: models, the downsample engine, the transformation
//!   layer, and configuration (re-exported here as [`core`])
//! - **`nsexport-providers`**: the Nightscout and LibreView HTTP clients
//!   (re-exported here as [`providers`])
//! - **this crate**: one-run export orchestration ([`export`]), the
//!   watermark file ([`watermark`]), chart rendering ([`chart`]), logging
//!   setup ([`logging`]), and the `nsexport` CLI binary
//!
//! One invocation performs one run: fetch, filter, downsample twice,
//! transform, submit, persist the watermark. Nothing is shared across runs
//! except the watermark file.

/// Core domain logic (models, downsample, transform, config)
pub use nsexport_core as core;

/// Nightscout and LibreView HTTP clients
pub use nsexport_providers as providers;

/// Glucose chart rendering
pub mod chart;

/// One-run export orchestration
pub mod export;

/// Logging configuration and startup
pub mod logging;

/// Last-exported-timestamp persistence
pub mod watermark;
