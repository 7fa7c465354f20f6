// ABOUTME: Data models for the Nightscout source schema and the LibreView target schema
// ABOUTME: Re-exports GlucoseEntry, Treatment, DeviceStatus, Profile, and the LibreView wire types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! # Data Models
//!
//! Two vendor schemas live here, kept deliberately separate:
//!
//! - The **Nightscout** side ([`GlucoseEntry`], [`Treatment`],
//!   [`DeviceStatus`], [`Profile`]) mirrors the JSON the source server
//!   returns. Entries are immutable once fetched.
//! - The **LibreView** side ([`libre`]) mirrors the JSON document the target
//!   service accepts: device metadata plus five typed entry buckets.
//!
//! The mapping between the two sides lives in [`crate::transform`]; nothing
//! in this module converts anything.

mod device;
mod glucose;
mod profile;
mod treatment;

/// LibreView wire schema (auth, measurement log, export response)
pub mod libre;

pub use device::{DeviceStatus, Uploader};
pub use glucose::{GlucoseEntry, Sgv};
pub use profile::{Profile, ProfileStore, TargetEntry};
pub use treatment::{InsulinInjections, InsulinType, Treatment};
