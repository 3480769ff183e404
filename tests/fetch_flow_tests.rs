use std::cell::Cell;

use chart_viewport::api::{ChartController, ChartSelection, FetchOutcome, ViewportConfig};
use chart_viewport::core::{ChartData, ChartSize, Dataset};
use chart_viewport::engine::{ChartType, HeadlessEngine};
use chart_viewport::source::{AxisSelection, EndpointConfig, decode_response};
use chart_viewport::{ViewportError, ViewportResult};

type SourceFn = fn(&AxisSelection) -> ViewportResult<ChartData>;

fn build_controller() -> ChartController<HeadlessEngine> {
    let engine = HeadlessEngine::new().with_surface("myChart", 564);
    let config = ViewportConfig::default().with_tracks(Some(200.0), Some(200.0));
    ChartController::new(engine, config).expect("controller")
}

fn sample_data(points: usize) -> ChartData {
    ChartData::new(
        (0..points).map(|i| format!("c{i}")).collect(),
        vec![Dataset::new(
            "S",
            (0..points).map(|i| Some(i as f64)).collect(),
        )],
    )
}

fn selection(kind: ChartType, x: &str, y: &str) -> ChartSelection {
    ChartSelection {
        chart_type: kind,
        size: ChartSize::Small,
        x_axis: Some(x.to_owned()),
        y_axis: Some(y.to_owned()),
    }
}

fn with_live_chart() -> ChartController<HeadlessEngine> {
    let mut controller = build_controller();
    controller
        .create(ChartType::Bar, &sample_data(5), "x", "y")
        .expect("create");
    assert!(controller.settle_layout());
    controller
}

#[test]
fn error_status_alerts_with_server_message_and_destroys_chart() {
    let mut controller = with_live_chart();
    let source = |_: &AxisSelection| -> ViewportResult<ChartData> {
        decode_response(500, r#"{"error":"bad axis"}"#)
    };

    let outcome = controller.refresh(&source, selection(ChartType::Bar, "month", "sales"));
    match outcome {
        FetchOutcome::Failed { alert } => assert!(alert.contains("bad axis")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!controller.has_chart());
    assert!(controller.instance().is_none());
    assert!(controller.last_alert().expect("alert").contains("bad axis"));
    assert_eq!(controller.engine().live_count(), 0);
}

#[test]
fn transport_and_config_failures_use_fixed_alerts() {
    let mut controller = with_live_chart();
    let offline = |_: &AxisSelection| -> ViewportResult<ChartData> {
        Err(ViewportError::Transport("connection refused".to_owned()))
    };
    let outcome = controller.refresh(&offline, selection(ChartType::Bar, "a", "b"));
    assert_eq!(
        outcome,
        FetchOutcome::Failed {
            alert: "An error occurred while fetching chart data.".to_owned()
        }
    );

    controller
        .create(ChartType::Bar, &sample_data(3), "a", "b")
        .expect("create");
    let unconfigured = |_: &AxisSelection| -> ViewportResult<ChartData> {
        Err(ViewportError::Config("fetch url must not be empty".to_owned()))
    };
    let outcome = controller.refresh(&unconfigured, selection(ChartType::Bar, "a", "b"));
    assert_eq!(
        outcome,
        FetchOutcome::Failed {
            alert: "Configuration error: Could not fetch chart update URL.".to_owned()
        }
    );
    assert!(!controller.has_chart());
    assert!(controller.take_alert().is_some());
    assert!(controller.last_alert().is_none());
}

#[test]
fn successful_fetch_rebuilds_chart_with_selection() {
    let mut controller = with_live_chart();
    let requests = Cell::new(0_u32);
    let source = |request: &AxisSelection| -> ViewportResult<ChartData> {
        requests.set(requests.get() + 1);
        assert_eq!(request.x_axis, "month");
        assert_eq!(request.y_axis, "sales");
        Ok(sample_data(12))
    };

    let outcome = controller.refresh(&source, selection(ChartType::Line, "month", "sales"));
    assert_eq!(outcome, FetchOutcome::Rendered);
    assert_eq!(requests.get(), 1);
    assert_eq!(controller.chart_type(), Some(ChartType::Line));
    assert_eq!(controller.chart_size(), ChartSize::Small);

    let chart = controller.instance().expect("instance");
    assert_eq!(chart.options().title, "sales over month");
    assert_eq!(chart.viewport().height, 400);
    assert_eq!(controller.engine().live_count(), 1);
}

#[test]
fn incomplete_selection_skips_fetch() {
    let mut controller = with_live_chart();
    let source = |_: &AxisSelection| -> ViewportResult<ChartData> {
        panic!("must not be called without both axes")
    };
    let partial = ChartSelection {
        x_axis: Some("month".to_owned()),
        ..ChartSelection::default()
    };
    assert_eq!(controller.refresh(&source, partial), FetchOutcome::Skipped);
    assert!(controller.has_chart());
}

#[test]
fn stale_responses_are_discarded() {
    let mut controller = with_live_chart();
    let first = controller
        .begin_fetch(selection(ChartType::Bar, "month", "sales"))
        .expect("first ticket");
    let second = controller
        .begin_fetch(selection(ChartType::Line, "month", "profit"))
        .expect("second ticket");
    assert!(second.seq() > first.seq());
    assert_eq!(controller.latest_fetch_seq(), second.seq());

    let outcome = controller.complete_fetch(first, Ok(sample_data(20)));
    assert_eq!(outcome, FetchOutcome::Stale);
    assert_eq!(controller.chart_type(), Some(ChartType::Bar));
    assert_eq!(controller.engine().constructed_count(), 1);

    let outcome = controller.complete_fetch(second, Ok(sample_data(7)));
    assert_eq!(outcome, FetchOutcome::Rendered);
    assert_eq!(controller.chart_type(), Some(ChartType::Line));
}

#[test]
fn stale_failure_does_not_destroy_live_chart() {
    let mut controller = with_live_chart();
    let first = controller
        .begin_fetch(selection(ChartType::Bar, "a", "b"))
        .expect("ticket");
    let _second = controller
        .begin_fetch(selection(ChartType::Bar, "a", "c"))
        .expect("ticket");

    let outcome = controller.complete_fetch(
        first,
        Err(ViewportError::Fetch {
            status: 500,
            message: "late".to_owned(),
        }),
    );
    assert_eq!(outcome, FetchOutcome::Stale);
    assert!(controller.has_chart());
    assert!(controller.last_alert().is_none());
}

#[test]
fn empty_fetched_data_is_refused_without_alert() {
    let mut controller = with_live_chart();
    let source = |_: &AxisSelection| -> ViewportResult<ChartData> {
        ChartData::from_json_str(r#"{"labels":[],"datasets":[]}"#)
    };
    let outcome = controller.refresh(&source, selection(ChartType::Bar, "a", "b"));
    assert!(matches!(outcome, FetchOutcome::Refused { .. }));
    assert!(!controller.has_chart());
    assert!(controller.last_alert().is_none());
}

#[test]
fn missing_endpoint_raises_configuration_alert() {
    let mut controller = with_live_chart();
    assert!(controller.endpoint().is_none());

    let outcome = controller.refresh_from_endpoint(
        selection(ChartType::Bar, "month", "sales"),
        |_: &EndpointConfig| -> ViewportResult<SourceFn> {
            panic!("no source may be built without an endpoint")
        },
    );
    assert_eq!(
        outcome,
        FetchOutcome::Failed {
            alert: "Configuration error: Could not fetch chart update URL.".to_owned()
        }
    );
    assert!(!controller.has_chart());
    assert_eq!(controller.engine().live_count(), 0);
}

#[test]
fn blank_csrf_token_raises_configuration_alert() {
    let mut controller = with_live_chart();
    controller.set_endpoint(Some(EndpointConfig::new("/chart-data/", " ")));

    let outcome = controller.refresh_from_endpoint(
        selection(ChartType::Bar, "month", "sales"),
        |_: &EndpointConfig| -> ViewportResult<SourceFn> {
            panic!("an invalid endpoint must not reach the source builder")
        },
    );
    assert!(matches!(
        outcome,
        FetchOutcome::Failed { ref alert } if alert.starts_with("Configuration error")
    ));
    assert!(!controller.has_chart());
}

#[test]
fn configured_endpoint_feeds_the_source_builder() {
    let engine = HeadlessEngine::new().with_surface("myChart", 564);
    let config = ViewportConfig::default()
        .with_endpoint(Some(EndpointConfig::new("/chart-data/", "token-1")));
    let mut controller = ChartController::new(engine, config).expect("controller");

    let outcome = controller.refresh_from_endpoint(
        selection(ChartType::Line, "month", "sales"),
        |endpoint: &EndpointConfig| -> ViewportResult<SourceFn> {
            assert_eq!(endpoint.url, "/chart-data/");
            assert_eq!(endpoint.csrf_token, "token-1");
            let source: SourceFn = |_| Ok(sample_data(4));
            Ok(source)
        },
    );
    assert_eq!(outcome, FetchOutcome::Rendered);
    assert_eq!(controller.chart_type(), Some(ChartType::Line));
}
