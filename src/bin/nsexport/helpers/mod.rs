// ABOUTME: Shared helpers for nsexport CLI commands
// ABOUTME: Flag parsing (dates, durations, timezone) and client construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

pub mod client;
pub mod flags;
