use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{Axis, PixelPoint};
use crate::engine::{ChartEngine, ChartInstance, PanShift};
use crate::error::ViewportResult;
use crate::extensions::{GestureSource, ViewportEvent};
use crate::interaction::{DragPhase, PointerButton};
use crate::mapper::{resolve_canvas_drag_shift, resolve_pinch_zoom_factor, resolve_wheel_zoom_factor};

use super::ChartController;

impl<E: ChartEngine> ChartController<E> {
    #[must_use]
    pub fn canvas_pan_phase(&self) -> DragPhase {
        self.canvas_pan.phase()
    }

    /// Starts a canvas drag-to-pan. Only the primary and middle buttons pan,
    /// and only once the layout has produced a non-zero data/pixel ratio.
    pub fn canvas_pointer_down(&mut self, button: PointerButton, pointer_x: f64) -> bool {
        if !button.starts_canvas_pan() || self.instance.is_none() || !pointer_x.is_finite() {
            return false;
        }
        if self.data_units_per_pixel <= 0.0 {
            debug!("canvas pan disabled: data units per pixel is zero");
            return false;
        }
        self.canvas_pan.on_pan_start(pointer_x);
        true
    }

    /// Pans x so the data value grabbed at the previous pointer position
    /// follows the cursor.
    pub fn canvas_pointer_move(&mut self, pointer_x: f64) -> bool {
        let Some(previous_x) = self.canvas_pan.last_pointer_x() else {
            return false;
        };
        if !pointer_x.is_finite() {
            warn!(pointer_x, "ignoring non-finite canvas pointer position");
            return false;
        }
        let result = self.canvas_drag_step(previous_x, pointer_x);
        self.canvas_pan.on_pan_move(pointer_x);
        Self::settle_gesture("canvas-drag", result)
    }

    /// Ends the canvas drag. Always leaves the pan state idle.
    pub fn canvas_pointer_up(&mut self) -> bool {
        let was_panning = self.canvas_pan.on_pan_end();
        if was_panning {
            self.sync_scrollbars();
        }
        was_panning
    }

    /// Wheel zoom around the pointer on the configured axes.
    ///
    /// Negative `delta_y` (wheel up) zooms in.
    pub fn wheel(&mut self, delta_y: f64, anchor: PixelPoint) -> bool {
        if !self.zoom.wheel.enabled {
            return false;
        }
        let result = self.wheel_step(delta_y, anchor);
        Self::settle_gesture("wheel", result)
    }

    /// Pinch zoom by the gesture's scale factor relative to the last event.
    pub fn pinch(&mut self, scale_factor: f64, anchor: PixelPoint) -> bool {
        if !self.zoom.pinch_enabled {
            return false;
        }
        let result = self.pinch_step(scale_factor, anchor);
        Self::settle_gesture("pinch", result)
    }

    /// Drag-rectangle zoom: the configured axes are set to the data range
    /// covered by the rectangle between `start` and `end`.
    pub fn zoom_to_pixel_rect(&mut self, start: PixelPoint, end: PixelPoint) -> bool {
        if !self.zoom.drag_enabled {
            return false;
        }
        let result = self.drag_rect_step(start, end);
        Self::settle_gesture("drag-rectangle", result)
    }

    fn canvas_drag_step(&mut self, previous_x: f64, pointer_x: f64) -> ViewportResult<bool> {
        if self.data_units_per_pixel <= 0.0 {
            return Ok(false);
        }
        let Some(instance) = self.instance.as_ref() else {
            return Ok(false);
        };
        let (Some(start_value), Some(current_value)) = (
            instance.value_for_pixel(Axis::X, previous_x),
            instance.value_for_pixel(Axis::X, pointer_x),
        ) else {
            return Ok(false);
        };
        let Some(shift) = resolve_canvas_drag_shift(start_value, current_value) else {
            return Ok(false);
        };
        self.apply_pan(PanShift::horizontal(shift), GestureSource::CanvasDrag)
    }

    fn wheel_step(&mut self, delta_y: f64, anchor: PixelPoint) -> ViewportResult<bool> {
        let Some(factor) = resolve_wheel_zoom_factor(delta_y, self.zoom.wheel.speed)? else {
            return Ok(false);
        };
        self.apply_zoom(factor, anchor, self.zoom.mode, GestureSource::Wheel)
    }

    fn pinch_step(&mut self, scale_factor: f64, anchor: PixelPoint) -> ViewportResult<bool> {
        let Some(factor) = resolve_pinch_zoom_factor(scale_factor)? else {
            return Ok(false);
        };
        self.apply_zoom(factor, anchor, self.zoom.mode, GestureSource::Pinch)
    }

    fn drag_rect_step(&mut self, start: PixelPoint, end: PixelPoint) -> ViewportResult<bool> {
        let mode = self.zoom.mode;
        let Some(instance) = self.instance.as_mut() else {
            return Ok(false);
        };

        let mut ranges: SmallVec<[(Axis, f64, f64); 2]> = SmallVec::new();
        for axis in mode.axes() {
            let (Some(a), Some(b)) = (
                instance.value_for_pixel(axis, start.coordinate(axis)),
                instance.value_for_pixel(axis, end.coordinate(axis)),
            ) else {
                return Ok(false);
            };
            let (min, max) = (a.min(b), a.max(b));
            if !(max - min).is_finite() || max - min <= 0.0 {
                debug!(axis = ?axis, "drag-rectangle zoom skipped: empty selection");
                return Ok(false);
            }
            ranges.push((axis, min, max));
        }

        for (axis, min, max) in ranges {
            instance.zoom_to_range(axis, min, max)?;
        }
        self.after_viewport_change(ViewportEvent::ZoomComplete {
            source: GestureSource::DragRectangle,
        });
        Ok(true)
    }
}
