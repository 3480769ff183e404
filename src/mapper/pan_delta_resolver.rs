use serde::{Deserialize, Serialize};

use crate::core::ScaleState;

/// Pan arrow direction, named after the arrow the user clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanDirection {
    /// Reveals earlier categories.
    Left,
    /// Reveals later categories.
    Right,
}

/// Clamps a requested handle offset into `[0, track - handle]`.
///
/// A handle that fills or overflows its track always lands at 0.
#[must_use]
pub fn clamp_handle_offset(requested: f64, track_length: f64, handle_length: f64) -> f64 {
    let max_offset = track_length - handle_length;
    let requested = if requested.is_finite() { requested } else { 0.0 };
    requested.min(max_offset).max(0.0)
}

/// Window shift for a canvas drag from `start_value` to `current_value`.
///
/// Both values are the data positions under the pointer; shifting by their
/// difference keeps the grabbed point under the cursor at any zoom level.
#[must_use]
pub fn resolve_canvas_drag_shift(start_value: f64, current_value: f64) -> Option<f64> {
    let shift = start_value - current_value;
    if !shift.is_finite() || shift == 0.0 {
        return None;
    }
    Some(shift)
}

/// Window shift that moves the visible minimum to where the pan handle points.
///
/// `clamped_offset` must already be clamped into the handle's travel. Returns
/// `None` when nothing can move: fully zoomed out (`panable <= 0`), a handle
/// without travel, or an axis whose original range is not captured.
#[must_use]
pub fn resolve_pan_handle_shift(
    state: ScaleState,
    clamped_offset: f64,
    track_length: f64,
    handle_length: f64,
) -> Option<f64> {
    let original = state.original()?;
    let panable = state.panable_span()?;
    let travel = track_length - handle_length;
    if !panable.is_finite() || panable <= 0.0 || !travel.is_finite() || travel <= 0.0 {
        return None;
    }

    let ratio = (clamped_offset / travel).clamp(0.0, 1.0);
    let desired_min = original.min() + ratio * panable;
    let shift = desired_min - state.visible_min();
    if !shift.is_finite() || shift == 0.0 {
        return None;
    }
    Some(shift)
}

/// Window shift for one pan-arrow click: `step_px` of content at the current zoom.
#[must_use]
pub fn resolve_arrow_pan_shift(
    direction: PanDirection,
    step_px: f64,
    visible_span: f64,
    plot_width_px: f64,
) -> Option<f64> {
    if !plot_width_px.is_finite()
        || plot_width_px <= 0.0
        || !visible_span.is_finite()
        || visible_span <= 0.0
    {
        return None;
    }
    let step = step_px * visible_span / plot_width_px;
    if !step.is_finite() {
        return None;
    }
    match direction {
        PanDirection::Left => Some(-step),
        PanDirection::Right => Some(step),
    }
}
