use serde::{Deserialize, Serialize};

use crate::core::OriginalRange;
use crate::error::{ViewportError, ViewportResult};

use super::ViewportTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Largest single-step zoom-in factor: the visible range may not shrink
/// below `min_visible_fraction` of the original range.
#[must_use]
pub fn max_zoom_in_factor(tuning: ViewportTuning) -> f64 {
    1.0 / tuning.min_visible_fraction
}

/// Clamps a factor into `[max_zoom_out_factor, max_zoom_in_factor]`.
#[must_use]
pub fn clamp_zoom_factor(factor: f64, tuning: ViewportTuning) -> f64 {
    let lower = tuning.max_zoom_out_factor;
    let upper = max_zoom_in_factor(tuning).max(lower);
    if factor.is_nan() {
        return 1.0_f64.clamp(lower, upper);
    }
    factor.clamp(lower, upper)
}

/// Zoom factor for a vertical zoom-handle drag of `delta_y_px`.
///
/// Dragging up (negative delta) zooms in. Returns `None` while the y axis has
/// no usable original range, in which case the step must be skipped.
#[must_use]
pub fn resolve_zoom_handle_factor(
    delta_y_px: f64,
    tuning: ViewportTuning,
    y_original: Option<OriginalRange>,
) -> Option<f64> {
    let original = y_original?;
    if !original.span().is_finite() || original.span() <= 0.0 || !delta_y_px.is_finite() {
        return None;
    }
    let intuitive = 1.0 + (-delta_y_px * tuning.zoom_handle_sensitivity);
    Some(clamp_zoom_factor(intuitive, tuning))
}

#[must_use]
pub fn resolve_arrow_zoom_factor(direction: ZoomDirection, tuning: ViewportTuning) -> f64 {
    match direction {
        ZoomDirection::In => tuning.zoom_arrow_step,
        ZoomDirection::Out => 1.0 / tuning.zoom_arrow_step,
    }
}

/// Wheel zoom factor: `1 + speed` for wheel-up, `2 - 1 / (1 - speed)` for wheel-down.
pub fn resolve_wheel_zoom_factor(wheel_delta_y: f64, speed: f64) -> ViewportResult<Option<f64>> {
    if !wheel_delta_y.is_finite() {
        return Err(ViewportError::InvalidData(
            "wheel delta must be finite".to_owned(),
        ));
    }
    if wheel_delta_y == 0.0 {
        return Ok(None);
    }

    let factor = if wheel_delta_y > 0.0 {
        2.0 - 1.0 / (1.0 - speed)
    } else {
        1.0 + speed
    };
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ViewportError::InvalidData(
            "computed wheel zoom factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(Some(factor))
}

pub fn resolve_pinch_zoom_factor(pinch_scale_factor: f64) -> ViewportResult<Option<f64>> {
    if !pinch_scale_factor.is_finite() || pinch_scale_factor <= 0.0 {
        return Err(ViewportError::InvalidData(
            "pinch zoom factor must be finite and > 0".to_owned(),
        ));
    }
    if (pinch_scale_factor - 1.0).abs() <= f64::EPSILON {
        return Ok(None);
    }
    Ok(Some(pinch_scale_factor))
}
