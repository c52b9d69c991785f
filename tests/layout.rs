mod common;

use chrono::Duration;
use common::at;
use nws_forecast_dashboard::domain::chart::layout::{
    anchor_ratio_from_x, day_segments, format_value, index_from_x, overscroll_offset, overscroll_offset_x,
    tick_indices, timeline_days, timeline_index_from_x, timeline_markers,
};
use nws_forecast_dashboard::domain::config::ChartPadding;

const CANVAS: f64 = 438.0;

fn padding() -> ChartPadding {
    ChartPadding::default()
}

#[test]
fn anchor_ratio_spans_the_plot_area() {
    assert_eq!(anchor_ratio_from_x(233.0, CANVAS, &padding()), 0.5);
    assert_eq!(anchor_ratio_from_x(0.0, CANVAS, &padding()), 0.0);
    assert_eq!(anchor_ratio_from_x(500.0, CANVAS, &padding()), 1.0);
    assert_eq!(anchor_ratio_from_x(20.0, 40.0, &padding()), 0.5);
}

#[test]
fn index_from_x_maps_plot_edges_to_window_edges() {
    let p = padding();
    assert_eq!(index_from_x(38.0, CANVAS, &p, 100, 10, 20), 10);
    assert_eq!(index_from_x(428.0, CANVAS, &p, 100, 10, 20), 29);
    assert_eq!(index_from_x(0.0, CANVAS, &p, 100, 10, 20), 10);
    assert_eq!(index_from_x(200.0, CANVAS, &p, 1, 0, 1), 0);
}

#[test]
fn ticks_fit_the_width_and_end_on_the_last_hour() {
    assert_eq!(tick_indices(49, 390.0, 40.0), vec![0, 10, 20, 30, 40, 48]);
    assert_eq!(tick_indices(1, 390.0, 40.0), vec![0]);
    assert!(tick_indices(0, 390.0, 40.0).is_empty());
}

#[test]
fn days_split_at_local_midnight() {
    let start = at("2024-03-01T20:00:00-05:00");
    let times: Vec<_> = (0..30).map(|h| start + Duration::hours(h)).collect();

    let segments = day_segments(&times);
    let spans: Vec<(usize, usize, &str)> = segments.iter().map(|s| (s.start, s.end, s.label.as_str())).collect();
    assert_eq!(spans, vec![(0, 4, "Fri"), (4, 28, "Sat"), (28, 29, "Sun")]);

    let days = timeline_days(&times);
    let hours: Vec<usize> = days.iter().map(|d| d.hours).collect();
    assert_eq!(hours, vec![4, 24, 2]);
    assert!((days.iter().map(|d| d.fraction).sum::<f64>() - 1.0).abs() < 1e-9);
}

#[test]
fn timeline_markers_follow_the_window() {
    let m = timeline_markers(0, 20, 100, 300.0).unwrap();
    assert_eq!(m.start_x, 0.0);
    assert!((m.end_x - 19.0 / 99.0 * 300.0).abs() < 1e-9);

    let full = timeline_markers(0, 100, 100, 300.0).unwrap();
    assert_eq!((full.start_x, full.end_x), (0.0, 300.0));

    let past_end = timeline_markers(95, 20, 100, 300.0).unwrap();
    assert_eq!(past_end.end_x, 300.0);

    assert!(timeline_markers(0, 1, 1, 300.0).is_none());
    assert!(timeline_markers(0, 20, 100, 0.0).is_none());
}

#[test]
fn timeline_index_clamps_to_the_track() {
    assert_eq!(timeline_index_from_x(150.0, 300.0, 99), 50);
    assert_eq!(timeline_index_from_x(-20.0, 300.0, 99), 0);
    assert_eq!(timeline_index_from_x(1000.0, 300.0, 99), 99);
}

#[test]
fn overscrolled_series_shift_with_the_window() {
    assert_eq!(overscroll_offset(0, 20, 99), 0.0);
    assert_eq!(overscroll_offset(-5, 20, 99), -5.0);
    assert_eq!(overscroll_offset(-5, 20, 10), -0.5);
    assert!((overscroll_offset_x(390.0, -5, 20, 99) - 390.0 * 5.0 / 19.0).abs() < 1e-9);
}

#[test]
fn values_format_by_field() {
    assert_eq!(format_value(None, "temperature"), "--");
    assert_eq!(format_value(Some(45.0), "temperature"), "45");
    assert_eq!(format_value(Some(45.06), "temperature"), "45.1");
    assert_eq!(format_value(Some(0.1234), "quantitativePrecipitation"), "0.12");
    assert_eq!(format_value(Some(2.999), "snowfallAmount"), "3");
}
