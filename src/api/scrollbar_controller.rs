use tracing::debug;

use crate::core::{Axis, AxisMode, PixelPoint, ScaleState};
use crate::engine::{ChartEngine, ChartInstance, PanShift};
use crate::error::ViewportResult;
use crate::extensions::GestureSource;
use crate::mapper::{
    PanDirection, ZoomDirection, resolve_arrow_pan_shift, resolve_arrow_zoom_factor,
    resolve_pan_handle_shift, resolve_zoom_handle_factor,
};
use crate::scrollbar::{HandleStep, ScrollbarWidget};

use super::ChartController;

impl<E: ChartEngine> ChartController<E> {
    #[must_use]
    pub fn pan_scrollbar(&self) -> &ScrollbarWidget {
        &self.pan_bar
    }

    #[must_use]
    pub fn zoom_scrollbar(&self) -> &ScrollbarWidget {
        &self.zoom_bar
    }

    /// Live visible range of `axis` paired with its captured original.
    #[must_use]
    pub fn scale_state(&self, axis: Axis) -> Option<ScaleState> {
        let (min, max) = self.instance.as_ref()?.visible_range(axis)?;
        ScaleState::new(min, max)
            .ok()
            .map(|state| state.with_original(self.original_range(axis)))
    }

    /// Re-renders both handles from the live scale states.
    ///
    /// The single sync path run after every viewport mutation. Each widget
    /// keeps its geometry when its axis has no captured original.
    pub fn sync_scrollbars(&mut self) {
        let min_handle = self.tuning.min_handle_length_px;
        let x = self.scale_state(Axis::X);
        let y = self.scale_state(Axis::Y);
        self.pan_bar.sync(x, min_handle);
        self.zoom_bar.sync(y, min_handle);
    }

    /// Rebinds the track lengths (e.g. after a page resize) and re-syncs.
    pub fn set_track_lengths(&mut self, pan_track_px: Option<f64>, zoom_track_px: Option<f64>) {
        self.bindings.pan_track_px = pan_track_px;
        self.bindings.zoom_track_px = zoom_track_px;
        self.pan_bar.set_track_length(pan_track_px);
        self.zoom_bar.set_track_length(zoom_track_px);
        self.sync_scrollbars();
    }

    pub fn pan_handle_press(&mut self, pointer_x: f64) -> bool {
        if self.instance.is_none() {
            return false;
        }
        self.pan_bar.press(pointer_x)
    }

    /// One pointer move while the pan handle is held.
    ///
    /// The drag re-bases even when nothing can pan (fully zoomed out), so the
    /// handle does not jump once panning becomes possible again.
    pub fn pan_handle_drag(&mut self, pointer_x: f64) -> bool {
        let Some(step) = self.pan_bar.drag_to(pointer_x) else {
            return false;
        };
        let result = self.pan_handle_step(step);
        Self::settle_gesture("pan-handle", result)
    }

    pub fn pan_handle_release(&mut self) -> bool {
        let was_dragging = self.pan_bar.release();
        self.sync_scrollbars();
        was_dragging
    }

    pub fn zoom_handle_press(&mut self, pointer_y: f64) -> bool {
        if self.instance.is_none() {
            return false;
        }
        self.zoom_bar.press(pointer_y)
    }

    /// One pointer move while the zoom handle is held; dragging up zooms in.
    pub fn zoom_handle_drag(&mut self, pointer_y: f64) -> bool {
        let Some(step) = self.zoom_bar.drag_to(pointer_y) else {
            return false;
        };
        let result = self.zoom_handle_step(step);
        Self::settle_gesture("zoom-handle", result)
    }

    pub fn zoom_handle_release(&mut self) -> bool {
        let was_dragging = self.zoom_bar.release();
        self.sync_scrollbars();
        was_dragging
    }

    /// Pans by a fixed pixel step of content at the current zoom level.
    pub fn pan_arrow(&mut self, direction: PanDirection) -> bool {
        if !self.pan_bar.has_arrows() {
            return false;
        }
        let result = self.pan_arrow_step(direction);
        Self::settle_gesture("pan-arrow", result)
    }

    /// Zooms one fixed step around the plot-area center.
    pub fn zoom_arrow(&mut self, direction: ZoomDirection) -> bool {
        if !self.zoom_bar.has_arrows() {
            return false;
        }
        let result = self.zoom_arrow_step(direction);
        Self::settle_gesture("zoom-arrow", result)
    }

    fn pan_handle_step(&mut self, step: HandleStep) -> ViewportResult<bool> {
        let (Some(state), Some(handle), Some(track_length)) = (
            self.scale_state(Axis::X),
            self.pan_bar.handle(),
            self.pan_bar.track_length(),
        ) else {
            return Ok(false);
        };
        let Some(shift) =
            resolve_pan_handle_shift(state, step.clamped_offset, track_length, handle.length)
        else {
            debug!(
                clamped_offset = step.clamped_offset,
                "pan handle step skipped: nothing to pan"
            );
            return Ok(false);
        };
        self.apply_pan(PanShift::horizontal(shift), GestureSource::PanHandle)
    }

    fn zoom_handle_step(&mut self, step: HandleStep) -> ViewportResult<bool> {
        let Some(factor) =
            resolve_zoom_handle_factor(step.pointer_delta, self.tuning, self.y_original)
        else {
            debug!("zoom handle step skipped: y original range unavailable");
            return Ok(false);
        };
        let Some(center) = self.plot_center() else {
            return Ok(false);
        };
        self.apply_zoom(factor, center, AxisMode::Xy, GestureSource::ZoomHandle)
    }

    fn pan_arrow_step(&mut self, direction: PanDirection) -> ViewportResult<bool> {
        let Some(instance) = self.instance.as_ref() else {
            return Ok(false);
        };
        let (Some(plot_area), Some(state)) = (instance.plot_area(), self.scale_state(Axis::X))
        else {
            return Ok(false);
        };
        let Some(shift) = resolve_arrow_pan_shift(
            direction,
            self.tuning.pan_arrow_step_px,
            state.visible_span(),
            plot_area.width(),
        ) else {
            return Ok(false);
        };
        self.apply_pan(PanShift::horizontal(shift), GestureSource::PanArrow)
    }

    fn zoom_arrow_step(&mut self, direction: ZoomDirection) -> ViewportResult<bool> {
        let Some(center) = self.plot_center() else {
            return Ok(false);
        };
        let factor = resolve_arrow_zoom_factor(direction, self.tuning);
        self.apply_zoom(factor, center, AxisMode::Xy, GestureSource::ZoomArrow)
    }

    fn plot_center(&self) -> Option<PixelPoint> {
        self.instance.as_ref()?.plot_area().map(|area| area.center())
    }
}
