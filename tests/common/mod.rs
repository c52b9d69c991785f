#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset};
use nws_forecast_dashboard::domain::forecast::{
    ForecastBundle, ForecastPeriod, GridProperty, HourlyPeriod, MetricKey, RawObservation,
};

pub fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

pub fn ms(rfc3339: &str) -> i64 {
    at(rfc3339).timestamp_millis()
}

pub fn property(key: &str, uom: Option<&str>, values: &[(&str, Option<f64>)]) -> GridProperty {
    GridProperty {
        key: MetricKey::from(key),
        uom: uom.map(str::to_string),
        values: values.iter().map(|(t, v)| RawObservation::new(t, *v)).collect(),
    }
}

pub fn hourly_periods(start: DateTime<FixedOffset>, hours: usize) -> Vec<HourlyPeriod> {
    (0..hours)
        .map(|h| HourlyPeriod {
            start_time: start + Duration::hours(h as i64),
            short_forecast: "Partly Cloudy".to_string(),
            wind_direction: "NW".to_string(),
            wind_speed: "10 mph".to_string(),
        })
        .collect()
}

pub fn period(name: &str, start: &str, is_daytime: bool, temp: f64, text: &str, pop: Option<f64>) -> ForecastPeriod {
    ForecastPeriod {
        name: name.to_string(),
        start_time: at(start),
        is_daytime,
        temperature: Some(temp),
        temperature_unit: "F".to_string(),
        short_forecast: text.to_string(),
        precipitation_probability: pop,
    }
}

/// `hours` hourly periods from `start` with a temperature series rising
/// one degree C per hour and a dew point three degrees below.
pub fn sample_bundle(start: &str, hours: usize) -> ForecastBundle {
    let start_time = at(start);
    let temps: Vec<(String, Option<f64>)> = (0..hours)
        .map(|h| ((start_time + Duration::hours(h as i64)).to_rfc3339() + "/PT1H", Some(h as f64)))
        .collect();
    let dews: Vec<(String, Option<f64>)> = (0..hours)
        .map(|h| ((start_time + Duration::hours(h as i64)).to_rfc3339() + "/PT1H", Some(h as f64 - 3.0)))
        .collect();
    let as_refs = |v: &[(String, Option<f64>)]| -> Vec<RawObservation> {
        v.iter().map(|(t, x)| RawObservation::new(t, *x)).collect()
    };

    ForecastBundle {
        updated: Some(start.to_string()),
        grid: vec![
            GridProperty {
                key: MetricKey::from("temperature"),
                uom: Some("wmoUnit:degC".to_string()),
                values: as_refs(&temps),
            },
            GridProperty { key: MetricKey::from("dewpoint"), uom: Some("wmoUnit:degC".to_string()), values: as_refs(&dews) },
            property("skyCover", Some("wmoUnit:percent"), &[(&format!("{}/P10D", start), Some(40.0))]),
        ],
        hourly: hourly_periods(start_time, hours),
        periods: vec![
            period("Today", start, true, 60.0, "Sunny", Some(10.0)),
            period("Tonight", &(start_time + Duration::hours(12)).to_rfc3339(), false, 40.0, "Clear", None),
        ],
    }
}
