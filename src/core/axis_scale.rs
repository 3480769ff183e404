use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ViewportError, ViewportResult};

/// Axis model with separate full and visible ranges.
///
/// `full_*` is the range fitted at construction.
/// `visible_*` follows user-driven pan and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    full_start: f64,
    full_end: f64,
    visible_start: f64,
    visible_end: f64,
}

impl AxisScale {
    /// Creates a scale with matching full and visible ranges.
    ///
    /// A zero-width range is allowed; it models a single category slot.
    pub fn new(start: f64, end: f64) -> ViewportResult<Self> {
        let (start, end) = normalize_range(start, end)?;
        Ok(Self {
            full_start: start,
            full_end: end,
            visible_start: start,
            visible_end: end,
        })
    }

    #[must_use]
    pub fn full_range(self) -> (f64, f64) {
        (self.full_start, self.full_end)
    }

    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        (self.visible_start, self.visible_end)
    }

    #[must_use]
    pub fn visible_span(self) -> f64 {
        self.visible_end - self.visible_start
    }

    pub fn set_visible_range(&mut self, start: f64, end: f64) -> ViewportResult<()> {
        let (start, end) = normalize_range(start, end)?;
        self.visible_start = start;
        self.visible_end = end;
        Ok(())
    }

    /// Shifts the visible window by an additive data delta.
    pub fn pan_visible_by_delta(&mut self, delta: f64) -> ViewportResult<()> {
        if !delta.is_finite() {
            return Err(ViewportError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }

        self.visible_start += delta;
        self.visible_end += delta;
        Ok(())
    }

    /// Zooms the visible window around an anchor value.
    ///
    /// `factor > 1.0` zooms in, `0.0 < factor < 1.0` zooms out.
    pub fn zoom_visible_by_factor(&mut self, factor: f64, anchor: f64) -> ViewportResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ViewportError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor.is_finite() {
            return Err(ViewportError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }

        let new_start = anchor - (anchor - self.visible_start) / factor;
        let new_end = anchor + (self.visible_end - anchor) / factor;
        self.set_visible_range(new_start, new_end)
    }

    /// Keeps the visible window inside the full range.
    ///
    /// A window wider than the full range collapses onto it; a narrower one is
    /// shifted back inside without changing its span.
    pub fn clamp_visible_to_full(&mut self) {
        let full_span = self.full_end - self.full_start;
        let span = self.visible_span();
        if span >= full_span {
            self.visible_start = self.full_start;
            self.visible_end = self.full_end;
            return;
        }
        if self.visible_start < self.full_start {
            self.visible_start = self.full_start;
            self.visible_end = self.full_start + span;
        } else if self.visible_end > self.full_end {
            self.visible_end = self.full_end;
            self.visible_start = self.full_end - span;
        }
    }

    pub fn pixel_to_value(self, pixel: f64, pixel_span: (f64, f64)) -> ViewportResult<f64> {
        self.visible_linear()?.pixel_to_domain(pixel, pixel_span)
    }

    pub fn value_to_pixel(self, value: f64, pixel_span: (f64, f64)) -> ViewportResult<f64> {
        self.visible_linear()?.domain_to_pixel(value, pixel_span)
    }

    fn visible_linear(self) -> ViewportResult<LinearScale> {
        LinearScale::new(self.visible_start, self.visible_end)
    }
}

fn normalize_range(start: f64, end: f64) -> ViewportResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ViewportError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }
    Ok((start.min(end), start.max(end)))
}
