use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Maps a DOM-style button index (0 primary, 1 middle, 2 secondary).
    #[must_use]
    pub fn from_index(index: u16) -> Option<Self> {
        match index {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Middle),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }

    #[must_use]
    pub fn starts_canvas_pan(self) -> bool {
        matches!(self, PointerButton::Primary | PointerButton::Middle)
    }
}

/// Transient state of one handle drag, alive between press and release.
///
/// Both anchors are re-based after every move so successive clamped steps
/// compose without drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub anchor_pointer: f64,
    pub anchor_offset: f64,
}

impl DragSession {
    #[must_use]
    pub fn new(anchor_pointer: f64, anchor_offset: f64) -> Self {
        Self {
            anchor_pointer,
            anchor_offset,
        }
    }

    #[must_use]
    pub fn pointer_delta(self, pointer: f64) -> f64 {
        pointer - self.anchor_pointer
    }

    #[must_use]
    pub fn requested_offset(self, pointer: f64) -> f64 {
        self.anchor_offset + self.pointer_delta(pointer)
    }

    pub fn rebase(&mut self, pointer: f64, offset: f64) {
        self.anchor_pointer = pointer;
        self.anchor_offset = offset;
    }
}

/// Canvas drag-to-pan state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasPanState {
    last_pointer_x: Option<f64>,
}

impl CanvasPanState {
    #[must_use]
    pub fn phase(self) -> DragPhase {
        if self.last_pointer_x.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    #[must_use]
    pub fn last_pointer_x(self) -> Option<f64> {
        self.last_pointer_x
    }

    pub fn on_pan_start(&mut self, pointer_x: f64) {
        self.last_pointer_x = Some(pointer_x);
    }

    pub fn on_pan_move(&mut self, pointer_x: f64) {
        if self.last_pointer_x.is_some() {
            self.last_pointer_x = Some(pointer_x);
        }
    }

    /// Returns `true` when a pan was in progress.
    pub fn on_pan_end(&mut self) -> bool {
        self.last_pointer_x.take().is_some()
    }
}
