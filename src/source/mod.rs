//! Chart-data endpoint contract.
//!
//! A fetch is one `POST` carrying the selected axis keys. Success bodies are
//! `ChartData`; failure bodies are `{ "error": ".." }` with a non-2xx status.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{FETCH_TIMEOUT, HttpDataSource};

use serde::{Deserialize, Serialize};

use crate::core::ChartData;
use crate::error::{ViewportError, ViewportResult};

pub const CSRF_HEADER: &str = "X-CSRFToken";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Request body of a chart-data fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    #[serde(rename = "xAxis")]
    pub x_axis: String,
    #[serde(rename = "yAxis")]
    pub y_axis: String,
}

impl AxisSelection {
    #[must_use]
    pub fn new(x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        Self {
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Where and how to reach the chart-data endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddedEndpoint {
    fetch_data_url: Option<String>,
}

impl EndpointConfig {
    #[must_use]
    pub fn new(url: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            csrf_token: csrf_token.into(),
        }
    }

    /// Builds the endpoint from the page's embedded `{"fetch_data_url": ..}`
    /// blob and the session's CSRF token.
    pub fn from_embedded(blob: &str, csrf_token: impl Into<String>) -> ViewportResult<Self> {
        let embedded: EmbeddedEndpoint = serde_json::from_str(blob)
            .map_err(|e| ViewportError::Config(format!("failed to parse endpoint blob: {e}")))?;
        let url = embedded
            .fetch_data_url
            .ok_or_else(|| ViewportError::Config("endpoint blob has no fetch_data_url".to_owned()))?;
        let endpoint = Self::new(url, csrf_token);
        endpoint.validate()?;
        Ok(endpoint)
    }

    pub fn validate(&self) -> ViewportResult<()> {
        if self.url.trim().is_empty() {
            return Err(ViewportError::Config(
                "fetch url must not be empty".to_owned(),
            ));
        }
        if self.csrf_token.trim().is_empty() {
            return Err(ViewportError::Config(
                "csrf token must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Anything that can produce chart data for an axis selection.
pub trait DataSource {
    fn fetch(&self, selection: &AxisSelection) -> ViewportResult<ChartData>;
}

impl<F> DataSource for F
where
    F: Fn(&AxisSelection) -> ViewportResult<ChartData>,
{
    fn fetch(&self, selection: &AxisSelection) -> ViewportResult<ChartData> {
        self(selection)
    }
}

/// Maps an endpoint response onto chart data or a typed failure.
///
/// Non-2xx statuses become `Fetch` with the body's `error` field, or
/// `"Unknown error"` when the body carries none. A body that is not JSON at
/// all is a `Decode` failure regardless of status.
pub fn decode_response(status: u16, body: &str) -> ViewportResult<ChartData> {
    if (200..300).contains(&status) {
        return ChartData::from_json_str(body);
    }

    let error_body: ErrorBody = serde_json::from_str(body).map_err(|e| {
        ViewportError::Decode(format!("failed to parse error body (status {status}): {e}"))
    })?;
    Err(ViewportError::Fetch {
        status,
        message: error_body
            .error
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_owned()),
    })
}
