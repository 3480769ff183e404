//! Host-facing controller API.
//!
//! `ChartController` owns the single live chart instance, both scrollbar
//! widgets and every gesture path. Its methods are split by concern across
//! the files of this module.

mod config;
mod controller;
mod fetch_controller;
mod gesture_controller;
mod observer_registry;
mod scrollbar_controller;

use indexmap::IndexMap;

use crate::core::{ChartSize, OriginalRange};
use crate::engine::{ChartEngine, ChartType, ZoomOptions};
use crate::extensions::ViewportObserver;
use crate::interaction::CanvasPanState;
use crate::mapper::ViewportTuning;
use crate::scrollbar::ScrollbarWidget;
use crate::source::EndpointConfig;

pub use config::{DEFAULT_SURFACE_ID, SurfaceBindings, ViewportConfig};
pub use fetch_controller::{
    ChartSelection, FetchOutcome, FetchTicket, RequestSequencer, fetch_alert_message,
};

pub struct ChartController<E: ChartEngine> {
    engine: E,
    bindings: SurfaceBindings,
    tuning: ViewportTuning,
    zoom: ZoomOptions,
    size: ChartSize,
    instance: Option<E::Instance>,
    chart_type: Option<ChartType>,
    layout_pending: bool,
    x_original: Option<OriginalRange>,
    y_original: Option<OriginalRange>,
    data_units_per_pixel: f64,
    canvas_pan: CanvasPanState,
    pan_bar: ScrollbarWidget,
    zoom_bar: ScrollbarWidget,
    observers: IndexMap<String, Box<dyn ViewportObserver>>,
    endpoint: Option<EndpointConfig>,
    sequencer: RequestSequencer,
    last_alert: Option<String>,
}
