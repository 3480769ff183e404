use std::cell::Cell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Axis, AxisMode, AxisScale, ChartData, PixelPoint, PlotArea, Viewport};
use crate::error::{ViewportError, ViewportResult};

use super::{AxisOptions, ChartEngine, ChartInstance, ChartOptions, ChartSpec, ChartType, PanShift};
use super::{ScaleLimit, ZoomLimits};

/// Space reserved around the plot area for axis titles, ticks and legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPadding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for PlotPadding {
    fn default() -> Self {
        Self {
            left: 48.0,
            top: 32.0,
            right: 16.0,
            bottom: 48.0,
        }
    }
}

/// Deterministic in-memory engine used by tests and headless hosts.
///
/// Category x axes span `[0, n - 1]`; value y axes fit every dataset plus the
/// suggested bounds. Pan and zoom follow the same window arithmetic a real
/// engine applies, without drawing anything.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    surfaces: IndexMap<String, u32>,
    padding: PlotPadding,
    constructed: usize,
    live: Rc<Cell<usize>>,
}

impl HeadlessEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a drawing surface of the given pixel width.
    #[must_use]
    pub fn with_surface(mut self, surface_id: impl Into<String>, width_px: u32) -> Self {
        self.add_surface(surface_id, width_px);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: PlotPadding) -> Self {
        self.padding = padding;
        self
    }

    pub fn add_surface(&mut self, surface_id: impl Into<String>, width_px: u32) {
        self.surfaces.insert(surface_id.into(), width_px);
    }

    pub fn remove_surface(&mut self, surface_id: &str) -> bool {
        self.surfaces.shift_remove(surface_id).is_some()
    }

    /// Instances constructed over the engine's lifetime.
    #[must_use]
    pub fn constructed_count(&self) -> usize {
        self.constructed
    }

    /// Instances constructed and not yet destroyed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.get()
    }
}

impl ChartEngine for HeadlessEngine {
    type Instance = HeadlessChart;

    fn has_surface(&self, surface_id: &str) -> bool {
        self.surfaces.contains_key(surface_id)
    }

    fn construct(
        &mut self,
        surface_id: &str,
        spec: ChartSpec<'_>,
    ) -> ViewportResult<Self::Instance> {
        let width = *self
            .surfaces
            .get(surface_id)
            .ok_or_else(|| ViewportError::MissingSurface(surface_id.to_owned()))?;
        let viewport = Viewport::new(width, spec.size.height_px());
        if !viewport.is_valid() {
            return Err(ViewportError::Engine(format!(
                "surface `{surface_id}` has zero size: width={}, height={}",
                viewport.width, viewport.height
            )));
        }

        let (x, y) = match &spec.options.scales {
            Some(scales) => {
                let last_category = spec.data.category_count().saturating_sub(1);
                let x = AxisScale::new(0.0, last_category as f64)?;
                let y = fit_value_axis(spec.data, &scales.y)?;
                (Some(x), Some(y))
            }
            None => (None, None),
        };

        self.constructed += 1;
        self.live.set(self.live.get() + 1);
        debug!(
            surface = surface_id,
            kind = %spec.kind,
            width = viewport.width,
            height = viewport.height,
            "headless chart constructed"
        );

        Ok(HeadlessChart {
            kind: spec.kind,
            options: spec.options.clone(),
            viewport,
            padding: self.padding,
            plot_area: None,
            x,
            y,
            limits: spec.options.zoom.limits,
            live: Rc::clone(&self.live),
        })
    }
}

fn fit_value_axis(data: &ChartData, options: &AxisOptions) -> ViewportResult<AxisScale> {
    let (mut min, mut max) = data.extrema().unwrap_or((0.0, 0.0));
    if let Some(suggested) = options.suggested_min {
        min = min.min(suggested);
    }
    if let Some(suggested) = options.suggested_max {
        max = max.max(suggested);
    }
    if min == max {
        min -= 1.0;
        max += 1.0;
    }
    AxisScale::new(min, max)
}

#[derive(Debug)]
pub struct HeadlessChart {
    kind: ChartType,
    options: ChartOptions,
    viewport: Viewport,
    padding: PlotPadding,
    plot_area: Option<PlotArea>,
    x: Option<AxisScale>,
    y: Option<AxisScale>,
    limits: ZoomLimits,
    live: Rc<Cell<usize>>,
}

impl HeadlessChart {
    #[must_use]
    pub fn kind(&self) -> ChartType {
        self.kind
    }

    /// Options the instance was constructed with.
    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn scale(&self, axis: Axis) -> Option<AxisScale> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn scale_mut(&mut self, axis: Axis) -> Option<&mut AxisScale> {
        match axis {
            Axis::X => self.x.as_mut(),
            Axis::Y => self.y.as_mut(),
        }
    }

    fn limit(&self, axis: Axis) -> ScaleLimit {
        match axis {
            Axis::X => self.limits.x,
            Axis::Y => self.limits.y,
        }
    }

    fn apply_limits(&mut self) {
        for axis in Axis::ALL {
            if self.limit(axis) != ScaleLimit::Original {
                continue;
            }
            if let Some(scale) = self.scale_mut(axis) {
                scale.clamp_visible_to_full();
            }
        }
    }
}

impl ChartInstance for HeadlessChart {
    fn update_layout(&mut self) -> bool {
        if self.plot_area.is_none() {
            let area = PlotArea::new(
                self.padding.left,
                self.padding.top,
                f64::from(self.viewport.width) - self.padding.right,
                f64::from(self.viewport.height) - self.padding.bottom,
            );
            if area.width() > 0.0 && area.height() > 0.0 {
                self.plot_area = Some(area);
            }
        }
        self.plot_area.is_some()
    }

    fn plot_area(&self) -> Option<PlotArea> {
        self.plot_area
    }

    fn visible_range(&self, axis: Axis) -> Option<(f64, f64)> {
        self.scale(axis).map(AxisScale::visible_range)
    }

    fn value_for_pixel(&self, axis: Axis, pixel: f64) -> Option<f64> {
        let area = self.plot_area?;
        let scale = self.scale(axis)?;
        scale.pixel_to_value(pixel, area.pixel_span(axis)).ok()
    }

    fn pan(&mut self, shift: PanShift) -> ViewportResult<()> {
        for (axis, amount) in [(Axis::X, shift.x), (Axis::Y, shift.y)] {
            if amount == 0.0 {
                continue;
            }
            if let Some(scale) = self.scale_mut(axis) {
                scale.pan_visible_by_delta(amount)?;
            }
        }
        self.apply_limits();
        Ok(())
    }

    fn zoom(&mut self, factor: f64, anchor: PixelPoint, mode: AxisMode) -> ViewportResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ViewportError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        let Some(area) = self.plot_area else {
            return Err(ViewportError::Engine(
                "zoom requested before the first layout pass".to_owned(),
            ));
        };

        for axis in mode.axes() {
            let span = area.pixel_span(axis);
            let anchor_px = anchor
                .coordinate(axis)
                .clamp(span.0.min(span.1), span.0.max(span.1));
            if let Some(scale) = self.scale_mut(axis) {
                let anchor_value = scale.pixel_to_value(anchor_px, span)?;
                scale.zoom_visible_by_factor(factor, anchor_value)?;
            }
        }
        self.apply_limits();
        Ok(())
    }

    fn zoom_to_range(&mut self, axis: Axis, min: f64, max: f64) -> ViewportResult<()> {
        if let Some(scale) = self.scale_mut(axis) {
            scale.set_visible_range(min, max)?;
        }
        self.apply_limits();
        Ok(())
    }

    fn destroy(self) {
        self.live.set(self.live.get().saturating_sub(1));
        debug!(kind = %self.kind, "headless chart destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::HeadlessEngine;
    use crate::core::{Axis, AxisMode, ChartData, ChartSize, Dataset, PixelPoint};
    use crate::engine::{ChartEngine, ChartInstance, ChartOptions, ChartSpec, ChartType};
    use crate::engine::{PanShift, ZoomOptions};
    use approx::assert_relative_eq;

    fn data() -> ChartData {
        ChartData::new(
            (0..11).map(|i| format!("c{i}")).collect(),
            vec![Dataset::new(
                "S",
                (0..11).map(|i| Some(f64::from(i) * 10.0)).collect(),
            )],
        )
    }

    fn build(kind: ChartType) -> super::HeadlessChart {
        let data = data();
        let options = ChartOptions::build(kind, &data, "x", "y", ZoomOptions::default());
        let mut engine = HeadlessEngine::new().with_surface("myChart", 564);
        let mut chart = engine
            .construct(
                "myChart",
                ChartSpec {
                    kind,
                    data: &data,
                    options: &options,
                    size: ChartSize::Small,
                },
            )
            .expect("construct");
        assert!(chart.update_layout());
        chart
    }

    #[test]
    fn fits_category_and_value_axes() {
        let chart = build(ChartType::Line);
        assert_eq!(chart.visible_range(Axis::X), Some((0.0, 10.0)));
        let (y_min, y_max) = chart.visible_range(Axis::Y).expect("y");
        assert_relative_eq!(y_min, 0.0);
        assert_relative_eq!(y_max, 110.0, epsilon = 1e-9);
        let area = chart.plot_area().expect("area");
        assert_relative_eq!(area.width(), 500.0);
    }

    #[test]
    fn value_for_pixel_inverts_x_scale() {
        let chart = build(ChartType::Bar);
        let area = chart.plot_area().expect("area");
        let value = chart
            .value_for_pixel(Axis::X, area.left + 250.0)
            .expect("value");
        assert_relative_eq!(value, 5.0);
    }

    #[test]
    fn y_axis_stays_inside_original_range() {
        let mut chart = build(ChartType::Bar);
        let center = chart.plot_area().expect("area").center();
        chart.zoom(2.0, center, AxisMode::Xy).expect("zoom");
        chart.pan(PanShift::along(Axis::Y, 500.0)).expect("pan");
        let (_, y_max) = chart.visible_range(Axis::Y).expect("y");
        assert_relative_eq!(y_max, 110.0, epsilon = 1e-9);

        chart.zoom(0.1, PixelPoint::new(0.0, 0.0), AxisMode::Y).expect("zoom out");
        let (y_min, y_max) = chart.visible_range(Axis::Y).expect("y");
        assert_relative_eq!(y_min, 0.0);
        assert_relative_eq!(y_max, 110.0, epsilon = 1e-9);
    }

    #[test]
    fn pie_chart_has_no_scales() {
        let mut chart = build(ChartType::Pie);
        assert!(chart.visible_range(Axis::X).is_none());
        chart.pan(PanShift::horizontal(3.0)).expect("pan is a no-op");
        assert!(chart.value_for_pixel(Axis::X, 10.0).is_none());
    }

    #[test]
    fn live_count_drops_on_destroy() {
        let data = data();
        let options = ChartOptions::build(ChartType::Bar, &data, "x", "y", ZoomOptions::default());
        let mut engine = HeadlessEngine::new().with_surface("myChart", 600);
        let spec = ChartSpec {
            kind: ChartType::Bar,
            data: &data,
            options: &options,
            size: ChartSize::Medium,
        };
        let chart = engine.construct("myChart", spec).expect("construct");
        assert_eq!(engine.live_count(), 1);
        chart.destroy();
        assert_eq!(engine.live_count(), 0);
        assert!(engine.construct("missing", spec).is_err());
    }
}
