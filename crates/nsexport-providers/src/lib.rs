// ABOUTME: HTTP clients for the Nightscout source server and the LibreView cloud service
// ABOUTME: Thin plumbing over reqwest; all decode targets live in nsexport-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

#![deny(unsafe_code)]

//! # nsexport Providers
//!
//! The two external collaborators of an export run:
//!
//! - [`nightscout`]: read (and for treatments, write) access to the source
//!   server, authenticated with a JWT obtained from the URL token.
//! - [`libreview`]: authentication, measurement submission, and sensor
//!   registration against the target service.
//!
//! Both clients share one pooled [`reqwest::Client`]. Neither retries: a
//! single failed HTTP call fails the caller's run.

/// Shared HTTP client with connection pooling
pub mod http_client;

/// LibreView cloud client
pub mod libreview;

/// Nightscout server client
pub mod nightscout;

pub use libreview::LibreviewClient;
pub use nightscout::{ListOptions, NightscoutClient, TreatmentKind};
