//! chart-viewport: headless pan/zoom interaction layer for category/value charts.
//!
//! The crate keeps a chart engine's visible window and two scrollbar-style
//! widgets (a horizontal pan bar and a vertical zoom bar) consistent under
//! canvas drag, wheel, pinch, drag-rectangle and scrollbar input. Drawing is
//! delegated to a `ChartEngine` implementation; `HeadlessEngine` provides a
//! deterministic one for tests and headless hosts.

pub mod api;
pub mod core;
pub mod engine;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod mapper;
pub mod scrollbar;
pub mod source;
pub mod telemetry;

pub use api::{ChartController, ViewportConfig};
pub use error::{ViewportError, ViewportResult};
