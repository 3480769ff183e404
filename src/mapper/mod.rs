//! Pure pixel <-> data conversions behind every pan and zoom gesture.
//!
//! Nothing here touches a chart instance: each resolver takes the current
//! scale state and widget geometry and returns the shift, factor or handle
//! geometry to apply. Pan shifts are always expressed as the signed amount
//! added to the visible window (`new_min = min + shift`).

mod handle_geometry_resolver;
mod pan_delta_resolver;
mod zoom_factor_resolver;

use serde::{Deserialize, Serialize};

use crate::error::{ViewportError, ViewportResult};

pub use handle_geometry_resolver::{resolve_pan_handle_geometry, resolve_zoom_handle_geometry};
pub use pan_delta_resolver::{
    PanDirection, clamp_handle_offset, resolve_arrow_pan_shift, resolve_canvas_drag_shift,
    resolve_pan_handle_shift,
};
pub use zoom_factor_resolver::{
    ZoomDirection, clamp_zoom_factor, max_zoom_in_factor, resolve_arrow_zoom_factor,
    resolve_pinch_zoom_factor, resolve_wheel_zoom_factor, resolve_zoom_handle_factor,
};

/// Handle length and leading-edge offset along its track, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleGeometry {
    pub length: f64,
    pub offset: f64,
}

impl HandleGeometry {
    /// Full-length handle at the track start; the fallback for unknown ranges.
    #[must_use]
    pub fn full(track_length: f64) -> Self {
        Self {
            length: if track_length.is_finite() {
                track_length.max(0.0)
            } else {
                0.0
            },
            offset: 0.0,
        }
    }

    /// Pixels the handle can travel inside its track.
    #[must_use]
    pub fn travel(self, track_length: f64) -> f64 {
        track_length - self.length
    }
}

/// Tuning for handle rendering and handle/arrow input mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportTuning {
    /// Handles never render shorter than this unless the track itself is shorter.
    pub min_handle_length_px: f64,
    /// Zoom factor change per pixel of zoom-handle drag.
    pub zoom_handle_sensitivity: f64,
    /// Lower bound of a single zoom-handle step (0.5 is at most a 2x zoom-out).
    pub max_zoom_out_factor: f64,
    /// Smallest fraction of the original range a zoom-handle step may target.
    pub min_visible_fraction: f64,
    /// Content shift per pan-arrow click, in plot pixels.
    pub pan_arrow_step_px: f64,
    /// Zoom-in factor per zoom-arrow click; zoom-out uses its reciprocal.
    pub zoom_arrow_step: f64,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            min_handle_length_px: 20.0,
            zoom_handle_sensitivity: 0.005,
            max_zoom_out_factor: 0.5,
            min_visible_fraction: 0.05,
            pan_arrow_step_px: 50.0,
            zoom_arrow_step: 1.1,
        }
    }
}

impl ViewportTuning {
    pub fn validate(self) -> ViewportResult<Self> {
        if !self.min_handle_length_px.is_finite() || self.min_handle_length_px < 0.0 {
            return Err(ViewportError::Config(
                "min handle length must be finite and >= 0".to_owned(),
            ));
        }
        if !self.zoom_handle_sensitivity.is_finite() || self.zoom_handle_sensitivity <= 0.0 {
            return Err(ViewportError::Config(
                "zoom handle sensitivity must be finite and > 0".to_owned(),
            ));
        }
        if !self.max_zoom_out_factor.is_finite()
            || self.max_zoom_out_factor <= 0.0
            || self.max_zoom_out_factor > 1.0
        {
            return Err(ViewportError::Config(
                "max zoom-out factor must be in (0, 1]".to_owned(),
            ));
        }
        if !self.min_visible_fraction.is_finite()
            || self.min_visible_fraction <= 0.0
            || self.min_visible_fraction > 1.0
        {
            return Err(ViewportError::Config(
                "min visible fraction must be in (0, 1]".to_owned(),
            ));
        }
        if !self.pan_arrow_step_px.is_finite() || self.pan_arrow_step_px <= 0.0 {
            return Err(ViewportError::Config(
                "pan arrow step must be finite and > 0".to_owned(),
            ));
        }
        if !self.zoom_arrow_step.is_finite() || self.zoom_arrow_step <= 1.0 {
            return Err(ViewportError::Config(
                "zoom arrow step must be finite and > 1".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{HandleGeometry, ViewportTuning};

    #[test]
    fn default_tuning_is_valid() {
        assert!(ViewportTuning::default().validate().is_ok());
    }

    #[test]
    fn tuning_rejects_out_of_range_values() {
        let tuning = ViewportTuning {
            min_visible_fraction: 0.0,
            ..ViewportTuning::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = ViewportTuning {
            zoom_arrow_step: 0.9,
            ..ViewportTuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn full_handle_ignores_non_finite_track() {
        assert_eq!(HandleGeometry::full(f64::NAN).length, 0.0);
        assert_eq!(HandleGeometry::full(120.0).travel(120.0), 0.0);
    }
}
