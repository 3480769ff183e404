//! Pan and zoom scrollbar widgets.
//!
//! A widget owns its track length, the rendered handle geometry and the drag
//! session. It never touches the chart: the controller feeds it scale states
//! through `sync` and turns its `HandleStep`s into pan/zoom commands.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Axis, ScaleState};
use crate::interaction::{DragPhase, DragSession};
use crate::mapper::{
    HandleGeometry, clamp_handle_offset, resolve_pan_handle_geometry,
    resolve_zoom_handle_geometry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollbarKind {
    /// Horizontal bar; handle offset follows the visible x minimum.
    Pan,
    /// Vertical bar; handle is centered on the visible y midpoint.
    Zoom,
}

impl ScrollbarKind {
    /// Axis whose scale state drives the handle geometry.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            ScrollbarKind::Pan => Axis::X,
            ScrollbarKind::Zoom => Axis::Y,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScrollbarKind::Pan => "pan",
            ScrollbarKind::Zoom => "zoom",
        }
    }
}

/// One pointer move while dragging, already clamped to the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleStep {
    /// Pointer movement since the previous (re-based) anchor.
    pub pointer_delta: f64,
    pub requested_offset: f64,
    pub clamped_offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollbarWidget {
    kind: ScrollbarKind,
    track_length: Option<f64>,
    arrows: bool,
    handle: Option<HandleGeometry>,
    drag: Option<DragSession>,
}

impl ScrollbarWidget {
    /// Creates a widget bound to a track of `track_length` pixels.
    ///
    /// `None` (or a non-finite length) models a missing track element: every
    /// operation on the widget then degrades to a no-op.
    #[must_use]
    pub fn new(kind: ScrollbarKind, track_length: Option<f64>, arrows: bool) -> Self {
        let mut widget = Self {
            kind,
            track_length: None,
            arrows,
            handle: None,
            drag: None,
        };
        widget.set_track_length(track_length);
        widget
    }

    #[must_use]
    pub fn kind(&self) -> ScrollbarKind {
        self.kind
    }

    #[must_use]
    pub fn track_length(&self) -> Option<f64> {
        self.track_length
    }

    #[must_use]
    pub fn handle(&self) -> Option<HandleGeometry> {
        self.handle
    }

    #[must_use]
    pub fn has_arrows(&self) -> bool {
        self.arrows && self.track_length.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.drag.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    /// Rebinds the track, resetting the handle to full length and dropping
    /// any drag in progress.
    pub fn set_track_length(&mut self, track_length: Option<f64>) {
        let track_length = track_length.filter(|length| length.is_finite() && *length >= 0.0);
        self.track_length = track_length;
        self.handle = track_length.map(HandleGeometry::full);
        self.drag = None;
    }

    /// `Idle -> Dragging`. Returns `false` when the widget has no handle.
    pub fn press(&mut self, pointer: f64) -> bool {
        let Some(handle) = self.handle else {
            debug!(widget = self.kind.as_str(), "handle press ignored: no track bound");
            return false;
        };
        if !pointer.is_finite() {
            return false;
        }
        self.drag = Some(DragSession::new(pointer, handle.offset));
        true
    }

    /// Advances the drag session to `pointer` and re-bases its anchor onto
    /// the clamped offset. Returns `None` while idle.
    pub fn drag_to(&mut self, pointer: f64) -> Option<HandleStep> {
        let session = self.drag.as_mut()?;
        let track_length = self.track_length?;
        let handle = self.handle.as_mut()?;
        if !pointer.is_finite() {
            return None;
        }

        let requested_offset = session.requested_offset(pointer);
        let clamped_offset = clamp_handle_offset(requested_offset, track_length, handle.length);
        let step = HandleStep {
            pointer_delta: session.pointer_delta(pointer),
            requested_offset,
            clamped_offset,
        };
        session.rebase(pointer, clamped_offset);
        handle.offset = clamped_offset;
        Some(step)
    }

    /// `Dragging -> Idle`. Returns `true` when a drag was in progress.
    pub fn release(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn reset_drag(&mut self) {
        self.drag = None;
    }

    /// Re-renders the handle from `state`.
    ///
    /// Leaves the geometry untouched and returns `false` when the track is
    /// unbound, no state is available, or the axis has no captured original.
    pub fn sync(&mut self, state: Option<ScaleState>, min_handle_length: f64) -> bool {
        let (Some(track_length), Some(_)) = (self.track_length, self.handle) else {
            return false;
        };
        let Some(state) = state.filter(|state| state.original().is_some()) else {
            return false;
        };

        let geometry = match self.kind {
            ScrollbarKind::Pan => {
                resolve_pan_handle_geometry(state, track_length, min_handle_length)
            }
            ScrollbarKind::Zoom => {
                resolve_zoom_handle_geometry(state, track_length, min_handle_length)
            }
        };
        self.handle = Some(geometry);
        true
    }
}
