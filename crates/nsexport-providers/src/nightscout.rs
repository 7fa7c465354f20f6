// ABOUTME: Nightscout client for glucose entries, treatments, device statuses, and profiles
// ABOUTME: JWT token exchange plus date-range-bounded JSON queries over the v1 API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! Nightscout server client.
//!
//! Authentication is a two-step flow: the configured URL token is exchanged
//! once for a JWT (`api/v2/authorization/request/{token}`), and every
//! subsequent request sends it as a bearer header. All reads are bounded by
//! a date range and a `count` limit; decode errors surface as fetch errors
//! before any transformation runs.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use nsexport_core::errors::{ExportError, ExportResult};
use nsexport_core::models::{DeviceStatus, GlucoseEntry, Profile, Treatment};

use crate::http_client::shared_client;

const API_V1: &str = "api/v1";
const API_V2: &str = "api/v2";

/// Which treatment quantity a query filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreatmentKind {
    /// Treatments with a positive insulin dose
    Insulin,
    /// Treatments with positive carbs
    Carbs,
}

impl TreatmentKind {
    fn field(self) -> &'static str {
        match self {
            Self::Insulin => "insulin",
            Self::Carbs => "carbs",
        }
    }
}

/// Options for date-range-bounded list queries.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    /// Start of the sampling period (inclusive)
    pub date_from: DateTime<Utc>,

    /// End of the sampling period (inclusive)
    pub date_to: DateTime<Utc>,

    /// Maximum number of entries per query
    pub count: usize,
}

/// JWT payload returned by the authorization endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: String,
}

/// Client for one Nightscout server.
#[derive(Debug, Clone)]
pub struct NightscoutClient {
    base_url: Url,
    jwt: Option<String>,
    client: &'static Client,
}

impl NightscoutClient {
    /// Create an unauthenticated client (public read endpoints only).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Config`] when `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> ExportResult<Self> {
        let url = Url::parse(base_url)
            .map_err(|err| ExportError::config(format!("bad nightscout url {base_url}: {err}")))?;
        Ok(Self {
            base_url: url,
            jwt: None,
            client: shared_client(),
        })
    }

    /// Create a client that sends the given JWT as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Config`] when `base_url` is not a valid URL.
    pub fn with_jwt(base_url: &str, jwt: String) -> ExportResult<Self> {
        let mut client = Self::new(base_url)?;
        client.jwt = Some(jwt);
        Ok(client)
    }

    /// Exchange the configured URL token for a JWT.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Auth`] when the exchange fails or the
    /// response carries no token.
    pub async fn request_jwt(base_url: &str, url_token: &str) -> ExportResult<String> {
        let client = Self::new(base_url)?;
        let url = client.api_url(API_V2, &["authorization", "request", url_token])?;

        let response = client
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| ExportError::auth(format!("token exchange: {err}")))?;

        if !response.status().is_success() {
            return Err(ExportError::auth(format!(
                "token exchange: bad status {} at {url}",
                response.status()
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|err| ExportError::auth(format!("token exchange decode: {err}")))?;

        if token_response.token.is_empty() {
            return Err(ExportError::auth("token exchange: empty token in response"));
        }

        Ok(token_response.token)
    }

    /// List glucose entries of the given kind (`sgv` for CGM samples)
    /// inside the date range.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Fetch`] on network, HTTP, or decode failure.
    pub async fn glucose_entries(
        &self,
        kind: &str,
        opts: ListOptions,
    ) -> ExportResult<Vec<GlucoseEntry>> {
        let url = self.api_url(API_V1, &["entries", &format!("{kind}.json")])?;
        let query = [
            ("find[dateString][$gte]".to_owned(), rfc3339(opts.date_from)),
            ("find[dateString][$lte]".to_owned(), rfc3339(opts.date_to)),
            ("count".to_owned(), opts.count.to_string()),
        ];
        self.get_json("glucose entries", url, &query).await
    }

    /// List treatments carrying a positive insulin or carb quantity inside
    /// the date range.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Fetch`] on network, HTTP, or decode failure.
    pub async fn treatments(
        &self,
        kind: TreatmentKind,
        opts: ListOptions,
    ) -> ExportResult<Vec<Treatment>> {
        let url = self.api_url(API_V1, &["treatments.json"])?;
        let query = [
            ("find[created_at][$gte]".to_owned(), rfc3339(opts.date_from)),
            ("find[created_at][$lte]".to_owned(), rfc3339(opts.date_to)),
            (format!("find[{}][$gt]", kind.field()), "0".to_owned()),
            ("count".to_owned(), opts.count.to_string()),
        ];
        self.get_json(
            match kind {
                TreatmentKind::Insulin => "insulin treatments",
                TreatmentKind::Carbs => "carb treatments",
            },
            url,
            &query,
        )
        .await
    }

    /// Create a treatment. The server echoes the created records back.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Fetch`] on network, HTTP, or decode failure.
    pub async fn create_treatment(&self, treatment: &Treatment) -> ExportResult<Vec<Treatment>> {
        let url = self.api_url(API_V1, &["treatments.json"])?;
        debug!(url = %url, "create treatment");

        let response = self
            .authorized(self.client.post(url.clone()))
            .json(treatment)
            .send()
            .await
            .map_err(|err| ExportError::fetch("create treatment", err))?;

        Self::decode("create treatment", url, response).await
    }

    /// Delete a treatment by id.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Fetch`] on network or HTTP failure.
    pub async fn delete_treatment(&self, id: &str) -> ExportResult<()> {
        let url = self.api_url(API_V1, &["treatments", id])?;
        debug!(url = %url, "delete treatment");

        let response = self
            .authorized(self.client.delete(url.clone()))
            .send()
            .await
            .map_err(|err| ExportError::fetch("delete treatment", err))?;

        if !response.status().is_success() {
            return Err(ExportError::fetch(
                "delete treatment",
                format!("bad status {} at {url}", response.status()),
            ));
        }

        Ok(())
    }

    /// List device status records inside the date range, optionally
    /// filtered to one uploader kind.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Fetch`] on network, HTTP, or decode failure.
    pub async fn device_statuses(
        &self,
        device_type: Option<&str>,
        opts: ListOptions,
    ) -> ExportResult<Vec<DeviceStatus>> {
        let url = self.api_url(API_V1, &["devicestatus.json"])?;
        let query = [
            ("find[created_at][$gte]".to_owned(), rfc3339(opts.date_from)),
            ("find[created_at][$lte]".to_owned(), rfc3339(opts.date_to)),
            ("count".to_owned(), opts.count.to_string()),
        ];
        let mut statuses: Vec<DeviceStatus> =
            self.get_json("device statuses", url, &query).await?;

        if let Some(device_type) = device_type {
            statuses.retain(|status| status.is_device_type(device_type));
        }

        Ok(statuses)
    }

    /// Fetch the active profile (the first document in the profile list).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Fetch`] on failure or when no profile exists.
    pub async fn profile(&self) -> ExportResult<Profile> {
        let url = self.api_url(API_V1, &["profile.json"])?;
        let profiles: Vec<Profile> = self.get_json("profile", url, &[]).await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| ExportError::fetch("profile", "empty profile list"))
    }

    fn api_url(&self, version: &str, segments: &[&str]) -> ExportResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ExportError::config(format!("nightscout url {} cannot be a base", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(version.split('/'));
            path.extend(segments);
        }
        Ok(url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("Content-Type", "application/json");
        match &self.jwt {
            Some(jwt) => request.bearer_auth(jwt),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
        query: &[(String, String)],
    ) -> ExportResult<T> {
        debug!(url = %url, operation, "nightscout query");

        let response = self
            .authorized(self.client.get(url.clone()))
            .query(query)
            .send()
            .await
            .map_err(|err| ExportError::fetch(operation, err))?;

        Self::decode(operation, url, response).await
    }

    async fn decode<T: DeserializeOwned>(
        operation: &'static str,
        url: Url,
        response: Response,
    ) -> ExportResult<T> {
        let status: StatusCode = response.status();
        if !status.is_success() {
            return Err(ExportError::fetch(
                operation,
                format!("bad status {status} at {url}"),
            ));
        }

        response
            .json()
            .await
            .map_err(|err| ExportError::fetch(operation, format!("decode: {err}")))
    }
}

fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
