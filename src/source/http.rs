use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::core::ChartData;
use crate::error::{ViewportError, ViewportResult};

use super::{AxisSelection, CSRF_HEADER, DataSource, EndpointConfig, decode_response};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(12);

/// Blocking client for the chart-data endpoint.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::blocking::Client,
    endpoint: EndpointConfig,
}

impl HttpDataSource {
    pub fn new(endpoint: EndpointConfig) -> ViewportResult<Self> {
        endpoint.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| ViewportError::Transport(format!("reqwest client error: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// Uses a caller-configured client (proxy, TLS roots, timeouts).
    pub fn with_client(
        client: reqwest::blocking::Client,
        endpoint: EndpointConfig,
    ) -> ViewportResult<Self> {
        endpoint.validate()?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }
}

impl DataSource for HttpDataSource {
    fn fetch(&self, selection: &AxisSelection) -> ViewportResult<ChartData> {
        debug!(
            url = %self.endpoint.url,
            x_axis = %selection.x_axis,
            y_axis = %selection.y_axis,
            "fetching chart data"
        );
        let response = self
            .client
            .post(&self.endpoint.url)
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, &self.endpoint.csrf_token)
            .json(selection)
            .send()
            .map_err(|e| ViewportError::Transport(format!("chart data request error: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ViewportError::Transport(format!("chart data read error: {e}")))?;
        decode_response(status, &body)
    }
}
