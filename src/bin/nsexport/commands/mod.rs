// ABOUTME: CLI subcommand implementations for nsexport
// ABOUTME: One module per command group: export, list, create, delete, graph, config, auth, sensor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

pub mod auth;
pub mod config;
pub mod create;
pub mod delete;
pub mod graph;
pub mod libreview;
pub mod list;
pub mod sensor;
