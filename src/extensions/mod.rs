//! Observer hooks for hosts that mirror viewport state elsewhere.

pub mod observers;

pub use observers::{
    GestureSource, VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1, ViewportEvent, ViewportObserver,
    ViewportSnapshot, ViewportSnapshotJsonContractV1,
};
