mod common;

use chrono::{DateTime, Duration, FixedOffset};
use common::{at, hourly_periods, property};
use nws_forecast_dashboard::domain::chart::layout::midnight_indices;
use nws_forecast_dashboard::domain::config::DashboardConfig;
use nws_forecast_dashboard::domain::forecast::{
    ForecastAssembler, ForecastBundle, HourlyGridBuilder, HourlyPeriod, MetricKey,
};

#[test]
fn snowfall_liquid_equivalent_is_removed_from_precipitation() {
    let config = DashboardConfig::default();
    let builder = HourlyGridBuilder::new(&config);
    let start = at("2024-01-10T00:00:00+00:00");
    let grid = vec![
        property("quantitativePrecipitation", Some("wmoUnit:mm"), &[("2024-01-10T00:00:00+00:00/PT1H", Some(7.62))]),
        property("snowfallAmount", Some("wmoUnit:mm"), &[("2024-01-10T00:00:00+00:00/PT1H", Some(50.8))]),
    ];
    let sources = builder.metric_sources(&grid);
    let out = builder.build(&sources, &hourly_periods(start, 1), start);

    let qpf = out.rows[0].value(&MetricKey::from("quantitativePrecipitation")).unwrap();
    let snow = out.rows[0].value(&MetricKey::from("snowfallAmount")).unwrap();
    assert!((snow - 2.0).abs() < 1e-6);
    assert!((qpf - 0.10).abs() < 1e-6);
}

#[test]
fn precipitation_never_goes_negative() {
    let config = DashboardConfig::default();
    let builder = HourlyGridBuilder::new(&config);
    let start = at("2024-01-10T00:00:00+00:00");
    let grid = vec![
        property("quantitativePrecipitation", Some("wmoUnit:mm"), &[("2024-01-10T00:00:00+00:00/PT1H", Some(1.0))]),
        property("snowfallAmount", Some("wmoUnit:mm"), &[("2024-01-10T00:00:00+00:00/PT1H", Some(100.0))]),
    ];
    let sources = builder.metric_sources(&grid);
    let out = builder.build(&sources, &hourly_periods(start, 1), start);
    assert_eq!(out.rows[0].value(&MetricKey::from("quantitativePrecipitation")), Some(0.0));
}

#[test]
fn axis_is_contiguous_across_missing_periods() {
    let config = DashboardConfig::default();
    let builder = HourlyGridBuilder::new(&config);
    let start = at("2024-03-01T00:00:00+00:00");
    let mut periods = hourly_periods(start, 5);
    periods.remove(2);

    let out = builder.build(&[], &periods, start);
    assert_eq!(out.rows.len(), 5);
    for pair in out.rows.windows(2) {
        assert_eq!(pair[1].time - pair[0].time, Duration::hours(1));
    }
    assert_eq!(out.rows[2].short_forecast, "");
    assert_eq!(out.rows[3].short_forecast, "Partly Cloudy");
}

#[test]
fn past_hours_are_trimmed_from_the_current_hour() {
    let config = DashboardConfig::default();
    let builder = HourlyGridBuilder::new(&config);
    let start = at("2024-03-01T00:00:00+00:00");
    let out = builder.build(&[], &hourly_periods(start, 6), at("2024-03-01T02:40:00+00:00"));
    assert_eq!(out.rows.len(), 4);
    assert_eq!(out.rows[0].time, at("2024-03-01T02:00:00+00:00"));
}

#[test]
fn future_series_is_not_trimmed() {
    let config = DashboardConfig::default();
    let builder = HourlyGridBuilder::new(&config);
    let start = at("2024-03-01T06:00:00+00:00");
    let out = builder.build(&[], &hourly_periods(start, 3), at("2024-03-01T01:00:00+00:00"));
    assert_eq!(out.rows.len(), 3);
}

#[test]
fn excluded_and_empty_metrics_are_dropped_and_rest_sorted_by_label() {
    let config = DashboardConfig::default();
    let builder = HourlyGridBuilder::new(&config);
    let start = at("2024-03-01T00:00:00+00:00");
    let grid = vec![
        property("windSpeed", Some("wmoUnit:km_h-1"), &[("2024-03-01T00:00:00+00:00/PT3H", Some(10.0))]),
        property("windDirection", Some("wmoUnit:degree_(angle)"), &[("2024-03-01T00:00:00+00:00/PT3H", Some(90.0))]),
        property("temperature", Some("wmoUnit:degC"), &[("2024-03-01T00:00:00+00:00/PT3H", Some(5.0))]),
        property("iceAccumulation", Some("wmoUnit:mm"), &[("2024-03-01T00:00:00+00:00/PT3H", None)]),
        property("apparentTemperature", Some("wmoUnit:degC"), &[("2024-03-01T00:00:00+00:00/PT3H", Some(3.0))]),
    ];
    let sources = builder.metric_sources(&grid);
    assert_eq!(sources.len(), 4);

    let out = builder.build(&sources, &hourly_periods(start, 3), start);
    let labels: Vec<&str> = out.metrics.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["Feels Like", "Temperature", "Wind Speed"]);
    assert_eq!(out.metrics[2].unit, "mph");
    assert!(out.rows.iter().all(|row| row.metrics.len() == 4));
}

#[test]
fn metric_kept_when_only_past_hours_have_values() {
    let config = DashboardConfig::default();
    let builder = HourlyGridBuilder::new(&config);
    let start = at("2024-03-01T00:00:00+00:00");
    let grid = vec![property("snowLevel", Some("wmoUnit:m"), &[("2024-03-01T00:00:00+00:00/PT1H", Some(500.0))])];
    let sources = builder.metric_sources(&grid);
    let out = builder.build(&sources, &hourly_periods(start, 4), at("2024-03-01T02:00:00+00:00"));
    assert_eq!(out.metrics.len(), 1);
    assert!(out.rows.iter().all(|row| row.value(&MetricKey::from("snowLevel")).is_none()));
}

#[test]
fn assembler_computes_extents_over_trimmed_rows() {
    let config = DashboardConfig::default();
    let bundle = common::sample_bundle("2024-03-01T00:00:00+00:00", 10);
    let location = config.locations[0].clone();
    let dataset = ForecastAssembler::new(&config).assemble(&location, &bundle, at("2024-03-01T05:00:00+00:00"));

    assert_eq!(dataset.len(), 5);
    let extent = dataset.extents.metric(&MetricKey::from("temperature")).unwrap();
    // 5..9 °C
    assert!((extent.min - 41.0).abs() < 1e-6);
    assert!((extent.max - 48.2).abs() < 1e-6);
    assert_eq!(dataset.daily.len(), 1);
}

#[test]
fn empty_bundle_gives_empty_dataset() {
    let config = DashboardConfig::default();
    let location = config.locations[0].clone();
    let dataset =
        ForecastAssembler::new(&config).assemble(&location, &ForecastBundle::default(), at("2024-03-01T00:00:00Z"));
    assert!(dataset.is_empty());
    assert!(dataset.metrics.is_empty());
}

/// Eastern time periods from local midnight on 2024-11-03, the day clocks
/// fall back from -04:00 to -05:00.
fn fall_back_periods(hours: i64) -> Vec<HourlyPeriod> {
    let edt = FixedOffset::west_opt(4 * 3600).unwrap();
    let est = FixedOffset::west_opt(5 * 3600).unwrap();
    let change = at("2024-11-03T06:00:00+00:00");
    let start = at("2024-11-03T04:00:00+00:00");
    (0..hours)
        .map(|h| {
            let instant = start + Duration::hours(h);
            let offset = if instant < change { edt } else { est };
            HourlyPeriod {
                start_time: instant.with_timezone(&offset),
                short_forecast: "Clear".to_string(),
                wind_direction: "N".to_string(),
                wind_speed: "5 mph".to_string(),
            }
        })
        .collect()
}

#[test]
fn rows_follow_the_local_offset_across_the_dst_change() {
    let config = DashboardConfig::default();
    let builder = HourlyGridBuilder::new(&config);
    let mut periods = fall_back_periods(26);
    periods.remove(10);
    let first = periods[0].start_time;

    let out = builder.build(&[], &periods, first);
    assert_eq!(out.rows.len(), 26);

    let times: Vec<DateTime<FixedOffset>> = out.rows.iter().map(|row| row.time).collect();
    assert_eq!(times[1].to_rfc3339(), "2024-11-03T01:00:00-04:00");
    assert_eq!(times[2].to_rfc3339(), "2024-11-03T01:00:00-05:00");
    assert_eq!(times[10].to_rfc3339(), "2024-11-03T09:00:00-05:00");
    assert_eq!(times[25].to_rfc3339(), "2024-11-04T00:00:00-05:00");
    for pair in times.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::hours(1));
    }
    assert_eq!(midnight_indices(&times), vec![0, 25]);
}
