//! Valhalla HTTP adapter for the `/locate` endpoint.

use thiserror::Error;
use tracing::debug;

use crate::locate::{LocateRequest, LocateResponse};
use crate::traits::LocateProvider;

pub const VALHALLA_LOCATE_PATH: &str = "/locate";

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Service error: {status} - {message}")]
    Service { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct ValhallaConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ValhallaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8002".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValhallaClient {
    config: ValhallaConfig,
    client: reqwest::blocking::Client,
}

impl ValhallaClient {
    pub fn new(config: ValhallaConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn locate_url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            VALHALLA_LOCATE_PATH
        )
    }
}

impl LocateProvider for ValhallaClient {
    fn locate(&self, request: &LocateRequest) -> Result<LocateResponse, LocateError> {
        let url = self.locate_url();
        debug!(%url, locations = request.locations.len(), "Valhalla: posting locate request");

        let response = self.client.post(url).json(request).send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(LocateError::Service { status, message });
        }

        let body = response.text()?;
        parse_locate_response(&body)
    }
}

/// Parses a `/locate` body, distinguishing a wrong top-level shape from
/// bad JSON.
pub fn parse_locate_response(body: &str) -> Result<LocateResponse, LocateError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_array() {
        return Err(LocateError::Malformed(
            "expected a JSON array of locate results".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}
