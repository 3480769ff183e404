use serde::{Deserialize, Serialize};

use crate::core::ScaleState;
use crate::engine::ChartType;
use crate::error::{ViewportError, ViewportResult};
use crate::interaction::DragPhase;
use crate::mapper::HandleGeometry;

pub const VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Input path that produced a viewport mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureSource {
    CanvasDrag,
    Wheel,
    Pinch,
    DragRectangle,
    PanHandle,
    ZoomHandle,
    PanArrow,
    ZoomArrow,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewportEvent {
    ChartCreated { kind: ChartType },
    ChartDestroyed,
    LayoutSettled { data_units_per_pixel: f64 },
    PanComplete { source: GestureSource },
    ZoomComplete { source: GestureSource },
}

/// Read-only controller state passed to observer hooks.
///
/// Scale states are `None` while no chart is live or the chart has no such
/// axis. Handle geometry is `None` for a widget without a bound track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub has_chart: bool,
    pub chart_type: Option<ChartType>,
    pub x: Option<ScaleState>,
    pub y: Option<ScaleState>,
    pub data_units_per_pixel: f64,
    pub pan_handle: Option<HandleGeometry>,
    pub zoom_handle: Option<HandleGeometry>,
    pub pan_phase: DragPhase,
    pub zoom_phase: DragPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ViewportSnapshot,
}

impl ViewportSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ViewportResult<String> {
        let payload = ViewportSnapshotJsonContractV1 {
            schema_version: VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ViewportError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> ViewportResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ViewportSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ViewportSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ViewportError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ViewportError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

/// Hook interface for code that reacts to viewport changes.
///
/// Observers see every lifecycle and pan/zoom event after the scrollbars have
/// been re-synced, and cannot mutate the controller.
pub trait ViewportObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ViewportEvent, snapshot: ViewportSnapshot);
}

#[cfg(test)]
mod tests {
    use super::{ViewportSnapshot, ViewportSnapshotJsonContractV1};
    use crate::core::{OriginalRange, ScaleState};
    use crate::engine::ChartType;
    use crate::interaction::DragPhase;
    use crate::mapper::HandleGeometry;

    fn snapshot() -> ViewportSnapshot {
        let x = ScaleState::new(2.0, 6.0)
            .expect("x")
            .with_original(Some(OriginalRange::new(0.0, 10.0).expect("original")));
        ViewportSnapshot {
            has_chart: true,
            chart_type: Some(ChartType::Line),
            x: Some(x),
            y: None,
            data_units_per_pixel: 0.5,
            pan_handle: Some(HandleGeometry {
                length: 80.0,
                offset: 40.0,
            }),
            zoom_handle: None,
            pan_phase: DragPhase::Idle,
            zoom_phase: DragPhase::Idle,
        }
    }

    #[test]
    fn snapshot_contract_round_trips() {
        let json = snapshot().to_json_contract_v1_pretty().expect("serialize");
        assert!(json.contains("\"schema_version\": 1"));
        let parsed = ViewportSnapshot::from_json_compat_str(&json).expect("parse");
        assert_eq!(parsed, snapshot());
    }

    #[test]
    fn snapshot_contract_rejects_unknown_schema() {
        let payload = ViewportSnapshotJsonContractV1 {
            schema_version: 9,
            snapshot: snapshot(),
        };
        let json = serde_json::to_string(&payload).expect("serialize");
        let err = ViewportSnapshot::from_json_compat_str(&json).expect_err("must fail");
        assert!(err.to_string().contains("unsupported snapshot schema version"));
    }
}
