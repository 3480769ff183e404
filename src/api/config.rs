use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::{ChartEngine, ZoomOptions, validate_zoom_options};
use crate::error::{ViewportError, ViewportResult};
use crate::mapper::ViewportTuning;
use crate::source::EndpointConfig;

pub const DEFAULT_SURFACE_ID: &str = "myChart";

/// Controller bootstrap configuration.
///
/// Serializable so hosts can persist/load the widget setup alongside their
/// own page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_surface_id")]
    pub surface_id: String,
    /// Pan bar track width in pixels; `None` when the page has no pan bar.
    #[serde(default)]
    pub pan_track_px: Option<f64>,
    /// Zoom bar track height in pixels; `None` when the page has no zoom bar.
    #[serde(default)]
    pub zoom_track_px: Option<f64>,
    #[serde(default = "default_scrollbar_arrows")]
    pub scrollbar_arrows: bool,
    #[serde(default)]
    pub tuning: ViewportTuning,
    #[serde(default)]
    pub zoom: ZoomOptions,
    #[serde(default)]
    pub endpoint: Option<EndpointConfig>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            surface_id: default_surface_id(),
            pan_track_px: None,
            zoom_track_px: None,
            scrollbar_arrows: default_scrollbar_arrows(),
            tuning: ViewportTuning::default(),
            zoom: ZoomOptions::default(),
            endpoint: None,
        }
    }
}

impl ViewportConfig {
    #[must_use]
    pub fn with_surface_id(mut self, surface_id: impl Into<String>) -> Self {
        self.surface_id = surface_id.into();
        self
    }

    #[must_use]
    pub fn with_tracks(mut self, pan_track_px: Option<f64>, zoom_track_px: Option<f64>) -> Self {
        self.pan_track_px = pan_track_px;
        self.zoom_track_px = zoom_track_px;
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: ViewportTuning) -> Self {
        self.tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomOptions) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Option<EndpointConfig>) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn validate(&self) -> ViewportResult<()> {
        if self.surface_id.trim().is_empty() {
            return Err(ViewportError::Config(
                "surface id must not be empty".to_owned(),
            ));
        }
        for (name, track) in [("pan", self.pan_track_px), ("zoom", self.zoom_track_px)] {
            if track.is_some_and(|length| !length.is_finite() || length < 0.0) {
                return Err(ViewportError::Config(format!(
                    "{name} track length must be finite and >= 0"
                )));
            }
        }
        self.tuning.validate()?;
        validate_zoom_options(self.zoom)?;
        if let Some(endpoint) = &self.endpoint {
            endpoint.validate()?;
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ViewportResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ViewportError::Config(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ViewportResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ViewportError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_surface_id() -> String {
    DEFAULT_SURFACE_ID.to_owned()
}

fn default_scrollbar_arrows() -> bool {
    true
}

/// External references resolved once when the controller is built.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceBindings {
    pub surface_id: String,
    pub pan_track_px: Option<f64>,
    pub zoom_track_px: Option<f64>,
    pub scrollbar_arrows: bool,
}

impl SurfaceBindings {
    pub(super) fn resolve<E: ChartEngine>(engine: &E, config: &ViewportConfig) -> Self {
        if !engine.has_surface(&config.surface_id) {
            warn!(
                surface = %config.surface_id,
                "drawing surface not found; chart creation will be refused until it exists"
            );
        }
        if config.pan_track_px.is_none() {
            warn!("pan scrollbar track not bound; pan bar disabled");
        }
        if config.zoom_track_px.is_none() {
            warn!("zoom scrollbar track not bound; zoom bar disabled");
        }
        Self {
            surface_id: config.surface_id.clone(),
            pan_track_px: config.pan_track_px,
            zoom_track_px: config.zoom_track_px,
            scrollbar_arrows: config.scrollbar_arrows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_SURFACE_ID, ViewportConfig};
    use crate::source::EndpointConfig;

    #[test]
    fn empty_json_uses_defaults() {
        let config = ViewportConfig::from_json_str("{}").expect("config");
        assert_eq!(config, ViewportConfig::default());
        assert_eq!(config.surface_id, DEFAULT_SURFACE_ID);
        assert!(config.scrollbar_arrows);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = ViewportConfig::default()
            .with_tracks(Some(640.0), Some(300.0))
            .with_endpoint(Some(EndpointConfig::new("/chart/data/", "tok")));
        let json = config.to_json_pretty().expect("json");
        let parsed = ViewportConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ViewportConfig::from_json_str(r#"{"surface_id":""}"#).expect_err("must fail");
        assert!(err.to_string().contains("surface id"));

        let err = ViewportConfig::from_json_str(r#"{"pan_track_px":-3.0}"#).expect_err("must fail");
        assert!(err.to_string().contains("pan track length"));

        let err = ViewportConfig::from_json_str(r#"{"zoom":{"wheel":{"speed":2.0}}}"#)
            .expect_err("must fail");
        assert!(err.to_string().contains("wheel zoom speed"));

        assert!(ViewportConfig::from_json_str("not json").is_err());
    }
}
