use approx::assert_relative_eq;
use chart_viewport::api::{ChartController, ViewportConfig};
use chart_viewport::core::{Axis, ChartData, ChartSize, Dataset};
use chart_viewport::engine::{
    ChartEngine, ChartInstance, ChartSpec, ChartType, HeadlessChart, HeadlessEngine,
};
use chart_viewport::{ViewportError, ViewportResult};

fn abc_data() -> ChartData {
    ChartData::from_json_str(
        r#"{"labels":["a","b","c"],"datasets":[{"label":"S","data":[1,2,3],"backgroundColor":"rgba(54,162,235,0.5)"}]}"#,
    )
    .expect("chart data")
}

fn decade_data() -> ChartData {
    ChartData::new(
        (0..11).map(|i| format!("c{i}")).collect(),
        vec![Dataset::new(
            "S",
            (0..11).map(|i| Some(f64::from(i) * 10.0)).collect(),
        )],
    )
}

fn build_controller() -> ChartController<HeadlessEngine> {
    let engine = HeadlessEngine::new().with_surface("myChart", 564);
    let config = ViewportConfig::default().with_tracks(Some(200.0), Some(200.0));
    ChartController::new(engine, config).expect("controller")
}

#[test]
fn bar_chart_gets_zero_based_padded_value_axis() {
    let mut controller = build_controller();
    controller
        .create(ChartType::Bar, &abc_data(), "Letter", "Count")
        .expect("create");
    assert!(controller.has_chart());
    assert!(controller.layout_pending());

    let chart = controller.instance().expect("instance");
    let scales = chart.options().scales.as_ref().expect("cartesian scales");
    assert_relative_eq!(scales.y.suggested_min.expect("min"), 0.0);
    assert_relative_eq!(scales.y.suggested_max.expect("max"), 3.3, epsilon = 1e-12);
    assert_eq!(chart.options().title, "Count over Letter");

    let (y_min, y_max) = chart.visible_range(Axis::Y).expect("y range");
    assert_relative_eq!(y_min, 0.0);
    assert_relative_eq!(y_max, 3.3, epsilon = 1e-12);
}

#[test]
fn empty_datasets_are_refused_without_instance() {
    let mut controller = build_controller();
    let data = ChartData::from_json_str(r#"{"labels":["a"],"datasets":[]}"#).expect("data");
    let err = controller
        .create(ChartType::Bar, &data, "x", "y")
        .expect_err("must refuse");
    assert!(matches!(err, ViewportError::InvalidData(_)));
    assert!(!controller.has_chart());
    assert_eq!(controller.engine().constructed_count(), 0);
}

#[test]
fn missing_surface_is_refused() {
    let engine = HeadlessEngine::new();
    let mut controller =
        ChartController::new(engine, ViewportConfig::default()).expect("controller");
    let err = controller
        .create(ChartType::Line, &abc_data(), "x", "y")
        .expect_err("must refuse");
    assert!(matches!(err, ViewportError::MissingSurface(id) if id == "myChart"));
    assert!(!controller.has_chart());
}

struct FailingEngine;

impl ChartEngine for FailingEngine {
    type Instance = HeadlessChart;

    fn has_surface(&self, _surface_id: &str) -> bool {
        true
    }

    fn construct(
        &mut self,
        _surface_id: &str,
        _spec: ChartSpec<'_>,
    ) -> ViewportResult<Self::Instance> {
        Err(ViewportError::Engine("canvas context unavailable".to_owned()))
    }
}

#[test]
fn engine_construction_failure_is_treated_as_refusal() {
    let mut controller =
        ChartController::new(FailingEngine, ViewportConfig::default()).expect("controller");
    let err = controller
        .create(ChartType::Bar, &abc_data(), "x", "y")
        .expect_err("must refuse");
    assert!(err.to_string().contains("canvas context unavailable"));
    assert!(!controller.has_chart());
    assert!(!controller.settle_layout());
}

#[test]
fn settle_layout_captures_originals_and_data_units_per_pixel() {
    let mut controller = build_controller();
    controller
        .create(ChartType::Line, &decade_data(), "x", "y")
        .expect("create");
    assert!(controller.original_range(Axis::X).is_none());

    assert!(controller.settle_layout());
    assert!(!controller.layout_pending());
    let x = controller.original_range(Axis::X).expect("x original");
    assert_relative_eq!(x.min(), 0.0);
    assert_relative_eq!(x.max(), 10.0);
    let y = controller.original_range(Axis::Y).expect("y original");
    assert_relative_eq!(y.max(), 110.0, epsilon = 1e-9);

    // 564 px surface minus 48 + 16 px padding leaves a 500 px plot.
    assert_relative_eq!(controller.data_units_per_pixel(), 0.02, epsilon = 1e-12);

    let handle = controller.pan_scrollbar().handle().expect("pan handle");
    assert_relative_eq!(handle.length, 200.0);
    assert_relative_eq!(handle.offset, 0.0);
}

#[test]
fn single_category_disables_canvas_pan() {
    let mut controller = build_controller();
    let data = ChartData::new(
        vec!["only".to_owned()],
        vec![Dataset::new("S", vec![Some(4.0)])],
    );
    controller
        .create(ChartType::Bar, &data, "x", "y")
        .expect("create");
    assert!(controller.settle_layout());
    assert_eq!(controller.data_units_per_pixel(), 0.0);
}

#[test]
fn destroy_clears_originals_and_sync_becomes_no_op() {
    let mut controller = build_controller();
    controller
        .create(ChartType::Bar, &decade_data(), "x", "y")
        .expect("create");
    assert!(controller.settle_layout());
    let pan_before = controller.pan_scrollbar().handle();
    let zoom_before = controller.zoom_scrollbar().handle();

    controller.destroy();
    assert!(!controller.has_chart());
    assert!(controller.original_range(Axis::X).is_none());
    assert!(controller.original_range(Axis::Y).is_none());

    controller.sync_scrollbars();
    assert_eq!(controller.pan_scrollbar().handle(), pan_before);
    assert_eq!(controller.zoom_scrollbar().handle(), zoom_before);

    controller.destroy();
    assert_eq!(controller.engine().live_count(), 0);
}

#[test]
fn replace_never_keeps_two_instances_alive() {
    let mut controller = build_controller();
    controller
        .create(ChartType::Bar, &decade_data(), "x", "y")
        .expect("create");
    assert!(controller.settle_layout());

    controller.set_chart_size(ChartSize::Large);
    controller
        .replace(ChartType::Line, &abc_data(), "x", "y")
        .expect("replace");
    assert_eq!(controller.engine().live_count(), 1);
    assert_eq!(controller.engine().constructed_count(), 2);
    assert_eq!(controller.chart_type(), Some(ChartType::Line));
    assert!(controller.layout_pending());
    assert!(controller.original_range(Axis::X).is_none());

    let chart = controller.instance().expect("instance");
    assert_eq!(chart.viewport().height, 800);
}

#[test]
fn non_cartesian_chart_leaves_scrollbars_idle() {
    let mut controller = build_controller();
    controller
        .create(ChartType::Pie, &abc_data(), "x", "y")
        .expect("create");
    assert!(controller.settle_layout());
    assert!(controller.original_range(Axis::X).is_none());
    assert!(controller.scale_state(Axis::Y).is_none());

    let handle = controller.pan_scrollbar().handle().expect("handle");
    assert_relative_eq!(handle.length, 200.0);
    assert!(controller.pan_handle_press(10.0));
    assert!(!controller.pan_handle_drag(60.0));
    assert!(controller.pan_handle_release());
    assert_eq!(controller.pan_scrollbar().handle(), Some(handle));
}

#[test]
fn refused_create_keeps_previous_chart() {
    let mut controller = build_controller();
    controller
        .create(ChartType::Bar, &decade_data(), "x", "y")
        .expect("create");
    assert!(controller.settle_layout());

    let empty = ChartData::from_json_str(r#"{"labels":[],"datasets":[]}"#).expect("data");
    let err = controller
        .create(ChartType::Line, &empty, "x", "y")
        .expect_err("must refuse");
    assert!(matches!(err, ViewportError::InvalidData(_)));
    assert!(controller.has_chart());
    assert_eq!(controller.chart_type(), Some(ChartType::Bar));
    assert!(controller.original_range(Axis::X).is_some());
    assert_eq!(controller.engine().live_count(), 1);
}
