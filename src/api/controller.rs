use indexmap::IndexMap;
use tracing::{debug, error, warn};

use crate::core::{Axis, AxisMode, ChartData, ChartSize, OriginalRange, PixelPoint};
use crate::engine::{ChartEngine, ChartInstance, ChartOptions, ChartSpec, ChartType, PanShift};
use crate::engine::ZoomOptions;
use crate::error::{ViewportError, ViewportResult};
use crate::extensions::{GestureSource, ViewportEvent, ViewportSnapshot};
use crate::interaction::CanvasPanState;
use crate::mapper::ViewportTuning;
use crate::scrollbar::{ScrollbarKind, ScrollbarWidget};

use super::{ChartController, RequestSequencer, SurfaceBindings, ViewportConfig};

impl<E: ChartEngine> ChartController<E> {
    pub fn new(engine: E, config: ViewportConfig) -> ViewportResult<Self> {
        config.validate()?;
        let bindings = SurfaceBindings::resolve(&engine, &config);
        let pan_bar = ScrollbarWidget::new(
            ScrollbarKind::Pan,
            bindings.pan_track_px,
            bindings.scrollbar_arrows,
        );
        let zoom_bar = ScrollbarWidget::new(
            ScrollbarKind::Zoom,
            bindings.zoom_track_px,
            bindings.scrollbar_arrows,
        );

        Ok(Self {
            engine,
            bindings,
            tuning: config.tuning,
            zoom: config.zoom,
            size: ChartSize::default(),
            instance: None,
            chart_type: None,
            layout_pending: false,
            x_original: None,
            y_original: None,
            data_units_per_pixel: 0.0,
            canvas_pan: CanvasPanState::default(),
            pan_bar,
            zoom_bar,
            observers: IndexMap::new(),
            endpoint: config.endpoint,
            sequencer: RequestSequencer::default(),
            last_alert: None,
        })
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[must_use]
    pub fn bindings(&self) -> &SurfaceBindings {
        &self.bindings
    }

    #[must_use]
    pub fn tuning(&self) -> ViewportTuning {
        self.tuning
    }

    #[must_use]
    pub fn zoom_options(&self) -> ZoomOptions {
        self.zoom
    }

    #[must_use]
    pub fn chart_size(&self) -> ChartSize {
        self.size
    }

    /// Surface height used by the next `create`.
    pub fn set_chart_size(&mut self, size: ChartSize) {
        self.size = size;
    }

    #[must_use]
    pub fn has_chart(&self) -> bool {
        self.instance.is_some()
    }

    #[must_use]
    pub fn instance(&self) -> Option<&E::Instance> {
        self.instance.as_ref()
    }

    #[must_use]
    pub fn chart_type(&self) -> Option<ChartType> {
        self.chart_type
    }

    /// `true` between a successful `create` and the first settled layout.
    #[must_use]
    pub fn layout_pending(&self) -> bool {
        self.layout_pending
    }

    #[must_use]
    pub fn original_range(&self, axis: Axis) -> Option<OriginalRange> {
        match axis {
            Axis::X => self.x_original,
            Axis::Y => self.y_original,
        }
    }

    /// X data units per plot pixel; zero disables canvas-drag panning.
    #[must_use]
    pub fn data_units_per_pixel(&self) -> f64 {
        self.data_units_per_pixel
    }

    #[must_use]
    pub fn last_alert(&self) -> Option<&str> {
        self.last_alert.as_deref()
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.last_alert.take()
    }

    /// Builds a chart on the bound surface.
    ///
    /// Refuses (logs and returns the error) when `data` has no usable
    /// dataset, the surface is absent, or the engine fails. A refusal for
    /// invalid data or a missing surface keeps any previous chart alive;
    /// use `replace` to drop it unconditionally.
    pub fn create(
        &mut self,
        kind: ChartType,
        data: &ChartData,
        x_label: &str,
        y_label: &str,
    ) -> ViewportResult<()> {
        if let Err(err) = data.validate() {
            warn!(error = %err, kind = %kind, "chart creation refused: invalid chart data");
            return Err(err);
        }
        if !self.engine.has_surface(&self.bindings.surface_id) {
            let err = ViewportError::MissingSurface(self.bindings.surface_id.clone());
            warn!(error = %err, kind = %kind, "chart creation refused: no drawing surface");
            return Err(err);
        }
        if self.instance.is_some() {
            debug!("destroying live chart before creating its replacement");
            self.destroy();
        }

        let options = ChartOptions::build(kind, data, x_label, y_label, self.zoom);
        let spec = ChartSpec {
            kind,
            data,
            options: &options,
            size: self.size,
        };
        let instance = match self.engine.construct(&self.bindings.surface_id, spec) {
            Ok(instance) => instance,
            Err(err) => {
                error!(
                    error = %err,
                    error_debug = ?err,
                    surface = %self.bindings.surface_id,
                    kind = %kind,
                    size = ?self.size,
                    datasets = data.datasets.len(),
                    categories = data.category_count(),
                    "chart engine failed to construct instance"
                );
                return Err(err);
            }
        };

        self.instance = Some(instance);
        self.chart_type = Some(kind);
        self.layout_pending = true;
        debug!(kind = %kind, size = ?self.size, "chart created; awaiting first layout");
        self.emit_event(ViewportEvent::ChartCreated { kind });
        Ok(())
    }

    /// Releases the live instance, clears both captured originals and drops
    /// every drag in progress. Safe to call without a live chart.
    pub fn destroy(&mut self) {
        self.canvas_pan.on_pan_end();
        self.pan_bar.reset_drag();
        self.zoom_bar.reset_drag();
        self.x_original = None;
        self.y_original = None;
        self.data_units_per_pixel = 0.0;
        self.layout_pending = false;

        let Some(instance) = self.instance.take() else {
            return;
        };
        instance.destroy();
        self.chart_type = None;
        debug!("chart destroyed");
        self.emit_event(ViewportEvent::ChartDestroyed);
    }

    pub fn replace(
        &mut self,
        kind: ChartType,
        data: &ChartData,
        x_label: &str,
        y_label: &str,
    ) -> ViewportResult<()> {
        self.destroy();
        self.create(kind, data, x_label, y_label)
    }

    /// Deferred post-layout step of `create`.
    ///
    /// Captures both original ranges, derives `data_units_per_pixel` and
    /// syncs the scrollbars. Returns `false` while the engine has no plot
    /// area yet; the step then stays pending and can be retried.
    pub fn settle_layout(&mut self) -> bool {
        let Some(instance) = self.instance.as_mut() else {
            return false;
        };
        if !self.layout_pending {
            return true;
        }
        if !instance.update_layout() {
            debug!("chart layout not settled yet; keeping capture pending");
            return false;
        }
        let Some(plot_area) = instance.plot_area() else {
            return false;
        };

        let capture = |axis: Axis| {
            instance
                .visible_range(axis)
                .and_then(|(min, max)| OriginalRange::new(min, max).ok())
        };
        self.x_original = capture(Axis::X);
        self.y_original = capture(Axis::Y);

        self.data_units_per_pixel = match self.x_original {
            Some(original) if plot_area.width() > 0.0 && original.span() > 0.0 => {
                original.span() / plot_area.width()
            }
            _ => 0.0,
        };
        self.layout_pending = false;
        debug!(
            x_original = ?self.x_original,
            y_original = ?self.y_original,
            data_units_per_pixel = self.data_units_per_pixel,
            plot_width = plot_area.width(),
            "chart layout settled"
        );

        self.sync_scrollbars();
        self.emit_event(ViewportEvent::LayoutSettled {
            data_units_per_pixel: self.data_units_per_pixel,
        });
        true
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            has_chart: self.instance.is_some(),
            chart_type: self.chart_type,
            x: self.scale_state(Axis::X),
            y: self.scale_state(Axis::Y),
            data_units_per_pixel: self.data_units_per_pixel,
            pan_handle: self.pan_bar.handle(),
            zoom_handle: self.zoom_bar.handle(),
            pan_phase: self.pan_bar.phase(),
            zoom_phase: self.zoom_bar.phase(),
        }
    }

    /// Applies a window shift, then re-syncs and notifies observers.
    pub(super) fn apply_pan(&mut self, shift: PanShift, source: GestureSource) -> ViewportResult<bool> {
        let Some(instance) = self.instance.as_mut() else {
            return Ok(false);
        };
        instance.pan(shift)?;
        self.after_viewport_change(ViewportEvent::PanComplete { source });
        Ok(true)
    }

    /// Applies a zoom step around `anchor`, then re-syncs and notifies observers.
    pub(super) fn apply_zoom(
        &mut self,
        factor: f64,
        anchor: PixelPoint,
        mode: AxisMode,
        source: GestureSource,
    ) -> ViewportResult<bool> {
        let Some(instance) = self.instance.as_mut() else {
            return Ok(false);
        };
        instance.zoom(factor, anchor, mode)?;
        self.after_viewport_change(ViewportEvent::ZoomComplete { source });
        Ok(true)
    }

    pub(super) fn after_viewport_change(&mut self, event: ViewportEvent) {
        self.sync_scrollbars();
        self.emit_event(event);
    }

    /// Collapses a gesture step result into the handler's `bool`.
    pub(super) fn settle_gesture(gesture: &'static str, result: ViewportResult<bool>) -> bool {
        match result {
            Ok(applied) => applied,
            Err(err) => {
                warn!(error = %err, gesture, "gesture step failed; viewport left unchanged");
                false
            }
        }
    }
}
