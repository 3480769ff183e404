mod headless;
mod options;

pub use headless::{HeadlessChart, HeadlessEngine, PlotPadding};
pub use options::{
    AxisOptions, CartesianScales, ChartOptions, ChartSpec, ChartType, LegendPosition, ScaleLimit,
    TickOptions, WheelOptions, ZoomLimits, ZoomOptions, format_tooltip_label,
    suggested_value_bounds,
};

pub(crate) use options::validate_zoom_options;

use serde::{Deserialize, Serialize};

use crate::core::{Axis, AxisMode, PixelPoint, PlotArea};
use crate::error::ViewportResult;

/// Signed data-space shift added to each axis' visible window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanShift {
    pub x: f64,
    pub y: f64,
}

impl PanShift {
    #[must_use]
    pub fn horizontal(x: f64) -> Self {
        Self { x, y: 0.0 }
    }

    #[must_use]
    pub fn along(axis: Axis, amount: f64) -> Self {
        match axis {
            Axis::X => Self { x: amount, y: 0.0 },
            Axis::Y => Self { x: 0.0, y: amount },
        }
    }
}

/// Factory side of the charting capability.
///
/// Implementations own the drawing surfaces; the controller only asks for a
/// new instance on a surface id and never keeps two instances alive.
pub trait ChartEngine {
    type Instance: ChartInstance;

    fn has_surface(&self, surface_id: &str) -> bool;

    fn construct(&mut self, surface_id: &str, spec: ChartSpec<'_>)
    -> ViewportResult<Self::Instance>;
}

/// One live chart: scale access, hit-testing and the pan/zoom primitives.
///
/// Each primitive returns only after the instance has finished updating its
/// own scales, so callers may read the new ranges immediately afterwards.
pub trait ChartInstance {
    /// Runs (or finishes) the first layout pass. Returns `false` while pixel
    /// geometry is not available yet.
    fn update_layout(&mut self) -> bool;

    fn plot_area(&self) -> Option<PlotArea>;

    /// Current visible range, or `None` for charts without that axis.
    fn visible_range(&self, axis: Axis) -> Option<(f64, f64)>;

    /// Inverse-maps a surface pixel coordinate through an axis scale.
    fn value_for_pixel(&self, axis: Axis, pixel: f64) -> Option<f64>;

    fn pan(&mut self, shift: PanShift) -> ViewportResult<()>;

    /// Zooms by `factor` (> 1 zooms in) keeping `anchor` fixed on `mode` axes.
    fn zoom(&mut self, factor: f64, anchor: PixelPoint, mode: AxisMode) -> ViewportResult<()>;

    /// Sets an axis' visible range directly (drag-rectangle zoom).
    fn zoom_to_range(&mut self, axis: Axis, min: f64, max: f64) -> ViewportResult<()>;

    /// Releases the instance and every listener it registered.
    fn destroy(self)
    where
        Self: Sized;
}
