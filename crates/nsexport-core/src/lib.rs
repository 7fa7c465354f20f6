// ABOUTME: Core types and algorithms for the nsexport Nightscout to LibreView exporter
// ABOUTME: Foundation crate with models, downsample engine, transformation layer, and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

#![deny(unsafe_code)]

//! # nsexport Core
//!
//! Foundation crate for the nsexport tool. Everything with actual algorithmic
//! content lives here; the HTTP plumbing lives in `nsexport-providers` and the
//! orchestration in the root crate.
//!
//! ## Modules
//!
//! - **models**: Nightscout source schema and LibreView target schema
//! - **downsample**: gap-policy driven thinning of time-ordered samples
//! - **transform**: per-kind mapping from Nightscout entries to LibreView entries
//! - **config**: YAML settings file (Nightscout section + LibreView section)
//! - **errors**: unified error taxonomy for a single export run
//! - **constants**: record-number bands, glucose thresholds, device capabilities

/// Unified error taxonomy for fetch, auth, submission, and parse failures
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Nightscout and LibreView data models
pub mod models;

/// Gap-policy driven downsampling of time-ordered samples
pub mod downsample;

/// Mapping from Nightscout entries to LibreView entries
pub mod transform;

/// YAML configuration file handling
pub mod config;

pub use errors::{ExportError, ExportResult};
