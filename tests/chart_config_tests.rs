use chrono::{TimeZone, Utc};
use plotchart::api::{ChartConfiguration, ChartEngine, LabelFormatter, LineStyle, RecordingHost};
use plotchart::core::{ChartType, DataPoint, Viewport, XAxisMode};
use plotchart::error::ChartError;
use plotchart::interaction::ReleaseBehavior;
use plotchart::render::{CanvasLayerKind, Color, RecordingSurface};

#[test]
fn json_configuration_round_trips_through_serde() {
    let config = ChartConfiguration::new(ChartType::Bar, XAxisMode::Date)
        .with_units("$", false)
        .with_line_style(LineStyle::Curved)
        .with_release_behavior(ReleaseBehavior::Persist)
        .with_colors(Color::rgb8(200, 40, 40), Color::WHITE);
    let json = serde_json::to_string(&config).expect("serialize");
    let parsed = ChartConfiguration::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn legacy_codes_and_names_map_to_closed_variants() {
    let config = ChartConfiguration::from_codes(2, 1).expect("known codes");
    assert_eq!(config.chart_type, ChartType::Scatter);
    assert_eq!(config.x_axis_mode, XAxisMode::Date);

    assert_eq!(" Bar ".parse::<ChartType>().expect("name"), ChartType::Bar);
    assert_eq!("NUMERIC".parse::<XAxisMode>().expect("name"), XAxisMode::Numeric);
    assert!(matches!(
        "pie".parse::<ChartType>(),
        Err(ChartError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ChartConfiguration::from_codes(3, 0),
        Err(ChartError::InvalidConfiguration(_))
    ));
}

#[test]
fn invalid_json_and_values_are_configuration_errors() {
    assert!(matches!(
        ChartConfiguration::from_json_str("{not json"),
        Err(ChartError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ChartConfiguration::from_json_str(r#"{"x_axis_mode": "polar"}"#),
        Err(ChartError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ChartConfiguration::from_json_str(r#"{"scatter_radius": -1.0}"#),
        Err(ChartError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ChartConfiguration::from_json_str(r#"{"date_format": "%!"}"#),
        Err(ChartError::InvalidConfiguration(_))
    ));
}

#[test]
fn date_axis_labels_use_calendar_format() {
    let start = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();
    let points: Vec<_> = (0..3i32)
        .map(|day| {
            DataPoint::dated(
                f64::from(day) * 10.0,
                start + chrono::Duration::days(i64::from(day)),
            )
        })
        .collect();
    let config = ChartConfiguration::new(ChartType::Line, XAxisMode::Date).with_units("kg", true);

    let formatter = LabelFormatter::from_config(&config);
    assert_eq!(formatter.format_pair(&points, 2), "(1/3/15, 20.00kg)");

    let mut chart =
        ChartEngine::new(RecordingHost::default(), Viewport::new(480, 320)).expect("engine init");
    chart.set_data(points, config).expect("set data");
    let frame = chart.build_render_frame(&RecordingSurface::default());
    let baseline = chart.geometry().baseline_y();
    let x_labels: Vec<_> = frame
        .texts_in(CanvasLayerKind::Axis)
        .filter(|text| text.at.y > baseline)
        .map(|text| text.text.clone())
        .collect();
    assert_eq!(x_labels, ["1/1/15", "1/2/15", "1/3/15"]);
}

#[test]
fn scatter_labels_every_revealed_point_when_enabled() {
    let points: Vec<_> = (0..8)
        .map(|i| DataPoint::new(f64::from(i % 3), f64::from(i) * 1.5))
        .collect();
    let mut chart =
        ChartEngine::new(RecordingHost::default(), Viewport::new(640, 320)).expect("engine init");
    chart
        .set_data(
            points.clone(),
            ChartConfiguration::new(ChartType::Scatter, XAxisMode::Numeric),
        )
        .expect("set data");

    let count_x_labels = |chart: &ChartEngine<RecordingHost>| {
        let baseline = chart.geometry().baseline_y();
        chart
            .build_render_frame(&RecordingSurface::default())
            .texts_in(CanvasLayerKind::Axis)
            .filter(|text| text.at.y > baseline)
            .count()
    };
    assert_eq!(count_x_labels(&chart), 8);

    chart
        .set_data(
            points,
            ChartConfiguration::new(ChartType::Scatter, XAxisMode::Numeric)
                .with_scatter_x_labels(false),
        )
        .expect("set data");
    assert_eq!(count_x_labels(&chart), 5);
}
