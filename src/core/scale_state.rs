use serde::{Deserialize, Serialize};

use crate::error::{ViewportError, ViewportResult};

/// Full-data range of an axis, captured once after the first settled layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginalRange {
    min: f64,
    max: f64,
}

impl OriginalRange {
    pub fn new(min: f64, max: f64) -> ViewportResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ViewportError::InvalidData(
                "original range must be finite with min <= max".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Read-only snapshot of one axis: live visible range plus its original range.
///
/// `original` is `None` until the controller captures it and again after the
/// chart instance is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleState {
    visible_min: f64,
    visible_max: f64,
    original: Option<OriginalRange>,
}

impl ScaleState {
    pub fn new(visible_min: f64, visible_max: f64) -> ViewportResult<Self> {
        if !visible_min.is_finite() || !visible_max.is_finite() || visible_min > visible_max {
            return Err(ViewportError::InvalidData(
                "visible range must be finite with min <= max".to_owned(),
            ));
        }
        Ok(Self {
            visible_min,
            visible_max,
            original: None,
        })
    }

    #[must_use]
    pub fn with_original(mut self, original: Option<OriginalRange>) -> Self {
        self.original = original;
        self
    }

    #[must_use]
    pub fn visible_min(self) -> f64 {
        self.visible_min
    }

    #[must_use]
    pub fn visible_max(self) -> f64 {
        self.visible_max
    }

    #[must_use]
    pub fn visible_span(self) -> f64 {
        self.visible_max - self.visible_min
    }

    #[must_use]
    pub fn visible_mid(self) -> f64 {
        (self.visible_min + self.visible_max) / 2.0
    }

    #[must_use]
    pub fn original(self) -> Option<OriginalRange> {
        self.original
    }

    /// Range the visible window can still travel within the original range.
    ///
    /// Zero or negative when fully zoomed out.
    #[must_use]
    pub fn panable_span(self) -> Option<f64> {
        self.original
            .map(|original| original.span() - self.visible_span())
    }
}
