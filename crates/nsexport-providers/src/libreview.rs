// ABOUTME: LibreView client for authentication, measurement submission, and sensor registration
// ABOUTME: Wraps the lsl API; a nonzero body status fails a submission even on HTTP 200
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 nsexport contributors

//! LibreView cloud client.
//!
//! The session token comes either from [`LibreviewClient::auth`]
//! (password login) or from [`LibreviewClient::set_token`] (a pre-supplied
//! token bypassing the login). Measurement submissions wrap the caller's
//! [`MeasurementLog`] in the device metadata from the configuration.

use reqwest::Client;
use tracing::debug;
use url::Url;

use nsexport_core::config::LibreviewConfig;
use nsexport_core::errors::{ExportError, ExportResult};
use nsexport_core::models::libre::{
    AuthRequest, AuthResponse, Device, DeviceData, DeviceDataHeader, DeviceSettings,
    ExportResponse, FactoryConfig, MeasurementLog, Measurements, Miscellaneous, NewSensorRequest,
};

use crate::http_client::shared_client;

/// Client for the LibreView cloud service.
#[derive(Debug, Clone)]
pub struct LibreviewClient {
    config: LibreviewConfig,
    endpoint: Url,
    user_token: Option<String>,
    client: &'static Client,
}

impl LibreviewClient {
    /// Create a client from the LibreView config section.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Config`] when the API endpoint is not a
    /// valid URL.
    pub fn new(config: LibreviewConfig) -> ExportResult<Self> {
        let endpoint = Url::parse(&config.import_config.api_endpoint).map_err(|err| {
            ExportError::config(format!(
                "bad libreview endpoint {}: {err}",
                config.import_config.api_endpoint
            ))
        })?;
        Ok(Self {
            config,
            endpoint,
            user_token: None,
            client: shared_client(),
        })
    }

    /// Authenticate with username/password and store the session token.
    /// `set_device` claims this app as the account's main device, which is
    /// necessary when another application (e.g. LibreLink) set it last.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Auth`] on network failure, a non-2xx status,
    /// or an empty token in the response.
    pub async fn auth(&mut self, set_device: bool) -> ExportResult<()> {
        let url = self.api_url(&["lsl", "api", "nisperson", "getauthentication"])?;
        let request = AuthRequest {
            culture: self.config.import_config.culture.clone(),
            device_id: self
                .config
                .import_config
                .device_settings
                .unique_identifier
                .clone(),
            gateway_type: self.config.import_config.gateway_type.clone(),
            set_device,
            user_name: self.config.auth.username.clone(),
            domain: self.config.import_config.domain.clone(),
            password: self.config.auth.password.clone(),
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(ExportError::auth)?;

        if !response.status().is_success() {
            return Err(ExportError::auth(format!(
                "bad status code {}",
                response.status()
            )));
        }

        let auth_response: AuthResponse = response
            .json()
            .await
            .map_err(|err| ExportError::auth(format!("decode: {err}")))?;

        if auth_response.result.user_token.is_empty() {
            return Err(ExportError::auth("empty user token in response"));
        }

        self.user_token = Some(auth_response.result.user_token);

        Ok(())
    }

    /// Use a pre-supplied session token, bypassing the password login.
    pub fn set_token(&mut self, token: String) {
        self.user_token = Some(token);
    }

    /// The current session token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.user_token.as_deref()
    }

    /// Submit a measurement log wrapped in the configured device metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Auth`] when no session token is set, and
    /// [`ExportError::Submission`] on network failure, a non-2xx status, or
    /// a nonzero API-level status in the response body.
    pub async fn import_measurements(&self, log: MeasurementLog) -> ExportResult<ExportResponse> {
        let user_token = self
            .user_token
            .clone()
            .ok_or_else(|| ExportError::auth("not authenticated"))?;

        let url = self.api_url(&["lsl", "api", "measurements"])?;
        let measurements = Measurements {
            user_token,
            gateway_type: self.config.import_config.gateway_type.clone(),
            domain: self.config.import_config.domain.clone(),
            device_data: DeviceData {
                device_settings: self.device_settings(),
                header: DeviceDataHeader {
                    device: self.device(),
                },
                measurement_log: log,
            },
        };

        let response = self
            .client
            .post(url)
            .json(&measurements)
            .send()
            .await
            .map_err(ExportError::submission)?;

        if !response.status().is_success() {
            return Err(ExportError::submission(format!(
                "bad http status code {}",
                response.status()
            )));
        }

        let export_response: ExportResponse = response
            .json()
            .await
            .map_err(|err| ExportError::submission(format!("decode: {err}")))?;

        if export_response.status != 0 {
            return Err(ExportError::submission(format!(
                "bad api status code {}",
                export_response.status
            )));
        }

        Ok(export_response)
    }

    /// Register a new sensor serial number for this account.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Auth`] when no session token is set, and
    /// [`ExportError::SensorRegistration`] on network failure or a non-2xx
    /// status. Callers treat that as a soft failure.
    pub async fn new_sensor(&self, serial: &str) -> ExportResult<()> {
        let user_token = self
            .user_token
            .clone()
            .ok_or_else(|| ExportError::auth("not authenticated"))?;

        let url = self.api_url(&["lsl", "api", "nisperson", "newsensor"])?;
        let request = NewSensorRequest {
            user_token,
            gateway_type: self.config.import_config.gateway_type.clone(),
            domain: self.config.import_config.domain.clone(),
            serial_number: serial.to_owned(),
        };

        debug!(serial, "register new sensor");

        let response = self
            .client
            .put(url)
            .json(&request)
            .send()
            .await
            .map_err(ExportError::sensor_registration)?;

        if !response.status().is_success() {
            return Err(ExportError::sensor_registration(format!(
                "bad status code {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn api_url(&self, segments: &[&str]) -> ExportResult<Url> {
        let mut url = self.endpoint.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ExportError::config(format!("libreview endpoint {} cannot be a base", self.endpoint))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn device_settings(&self) -> DeviceSettings {
        let import = &self.config.import_config;
        DeviceSettings {
            factory_config: FactoryConfig {
                uom: import.uom.clone(),
            },
            firmware_version: import.device_settings.firmware_version.clone(),
            miscellaneous: Miscellaneous {
                selected_language: import.device_settings.selected_language.clone(),
                glucose_target_range_low: import.device_settings.glucose_target_range_low,
                glucose_target_range_high: import.device_settings.glucose_target_range_high,
                selected_time_format: import.device_settings.selected_time_format.clone(),
                selected_carb_type: import.device_settings.selected_carb_type.clone(),
            },
        }
    }

    fn device(&self) -> Device {
        let settings = &self.config.import_config.device_settings;
        Device {
            hardware_descriptor: settings.hardware_descriptor.clone(),
            os_version: settings.os_version.clone(),
            model_name: settings.model_name.clone(),
            os_type: settings.os_type.clone(),
            unique_identifier: settings.unique_identifier.clone(),
            hardware_name: settings.hardware_name.clone(),
        }
    }
}
