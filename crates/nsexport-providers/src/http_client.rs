// ABOUTME: Shared HTTP client with connection pooling for provider API calls
// ABOUTME: Lazily built once with fixed timeouts; both providers borrow it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Request timeout in seconds
const TIMEOUT_SECS: u64 = 30;

/// Connection timeout in seconds
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Global shared HTTP client
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get the shared HTTP client for provider API calls.
///
/// Built on first use with pooled connections and fixed timeouts. One run
/// talks to at most two hosts, so a single pool serves both providers.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        ClientBuilder::new()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
