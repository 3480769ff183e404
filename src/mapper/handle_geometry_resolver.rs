use crate::core::ScaleState;

use super::HandleGeometry;

/// Pan handle: length tracks the visible fraction, offset tracks the
/// visible minimum (leading-edge alignment).
#[must_use]
pub fn resolve_pan_handle_geometry(
    state: ScaleState,
    track_length: f64,
    min_handle_length: f64,
) -> HandleGeometry {
    let Some((original_min, original_span, length)) =
        resolve_length(state, track_length, min_handle_length)
    else {
        return HandleGeometry::full(track_length);
    };

    let raw_offset = (state.visible_min() - original_min) / original_span * track_length;
    finish(raw_offset, length, track_length)
}

/// Zoom handle: same length rule, but the handle is centered on the visible
/// midpoint so it reads as a zoom level indicator.
#[must_use]
pub fn resolve_zoom_handle_geometry(
    state: ScaleState,
    track_length: f64,
    min_handle_length: f64,
) -> HandleGeometry {
    let Some((original_min, original_span, length)) =
        resolve_length(state, track_length, min_handle_length)
    else {
        return HandleGeometry::full(track_length);
    };

    let center_ratio = (state.visible_mid() - original_min) / original_span;
    let raw_offset = center_ratio * track_length - length / 2.0;
    finish(raw_offset, length, track_length)
}

fn resolve_length(
    state: ScaleState,
    track_length: f64,
    min_handle_length: f64,
) -> Option<(f64, f64, f64)> {
    let original = state.original()?;
    let original_span = original.span();
    if !original_span.is_finite()
        || original_span <= 0.0
        || !track_length.is_finite()
        || track_length <= 0.0
    {
        return None;
    }

    let raw_length = state.visible_span() / original_span * track_length;
    if !raw_length.is_finite() {
        return None;
    }
    let length = raw_length
        .min(track_length)
        .max(min_handle_length)
        .min(track_length);
    Some((original.min(), original_span, length))
}

fn finish(raw_offset: f64, length: f64, track_length: f64) -> HandleGeometry {
    let offset = if raw_offset.is_finite() {
        raw_offset.min(track_length - length).max(0.0)
    } else {
        0.0
    };
    HandleGeometry { length, offset }
}
