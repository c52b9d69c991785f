use nws_forecast_dashboard::domain::errors::InfrastructureError;
use nws_forecast_dashboard::domain::forecast::MetricKey;
use nws_forecast_dashboard::infrastructure::dto::{
    parse_json, ForecastResponse, GridDataResponse, HourlyResponse, PointsResponse,
};
use serde_json::json;

#[test]
fn points_links_are_read() {
    let body = json!({
        "properties": {
            "forecast": "https://api.weather.gov/gridpoints/LWX/87,69/forecast",
            "forecastHourly": "https://api.weather.gov/gridpoints/LWX/87,69/forecast/hourly",
            "forecastGridData": "https://api.weather.gov/gridpoints/LWX/87,69",
            "gridId": "LWX"
        }
    });
    let points: PointsResponse = parse_json(&body, "points").unwrap();
    assert!(points.properties.forecast_hourly.ends_with("/forecast/hourly"));
    assert!(points.properties.forecast_grid_data.ends_with("87,69"));
}

#[test]
fn grid_keeps_only_value_series() {
    let body = json!({
        "properties": {
            "@id": "https://api.weather.gov/gridpoints/LWX/87,69",
            "updateTime": "2024-03-01T00:00:00+00:00",
            "elevation": { "unitCode": "wmoUnit:m", "value": 120.1 },
            "temperature": {
                "uom": "wmoUnit:degC",
                "values": [
                    { "validTime": "2024-03-01T00:00:00+00:00/PT1H", "value": 4.5 },
                    { "validTime": "2024-03-01T01:00:00+00:00/PT2H", "value": null }
                ]
            },
            "weather": {
                "values": [
                    { "validTime": "2024-03-01T00:00:00+00:00/PT6H", "value": [{ "coverage": "chance" }] }
                ]
            }
        }
    });
    let grid: GridDataResponse = parse_json(&body, "grid").unwrap();
    let properties = grid.into_domain();
    let keys: Vec<&str> = properties.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["temperature", "weather"]);

    let temperature = &properties[0];
    assert_eq!(temperature.key, MetricKey::from("temperature"));
    assert_eq!(temperature.uom.as_deref(), Some("wmoUnit:degC"));
    assert_eq!(temperature.values[0].value, Some(4.5));
    assert_eq!(temperature.values[1].value, None);

    assert_eq!(properties[1].uom, None);
    assert_eq!(properties[1].values[0].value, None);
}

#[test]
fn hourly_periods_skip_unreadable_times() {
    let body = json!({
        "properties": {
            "updateTime": "2024-03-01T02:11:00+00:00",
            "periods": [
                { "startTime": "2024-03-01T03:00:00-05:00", "shortForecast": "Cloudy", "windDirection": "S", "windSpeed": "5 mph" },
                { "startTime": "yesterday", "shortForecast": "Rain" },
                { "startTime": "2024-03-01T04:00:00-05:00" }
            ]
        }
    });
    let hourly: HourlyResponse = parse_json(&body, "hourly").unwrap();
    let (updated, periods) = hourly.into_domain();
    assert_eq!(updated.as_deref(), Some("2024-03-01T02:11:00+00:00"));
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].short_forecast, "Cloudy");
    assert_eq!(periods[0].wind_speed, "5 mph");
    assert_eq!(periods[1].short_forecast, "");
}

#[test]
fn forecast_periods_carry_precipitation_chance() {
    let body = json!({
        "properties": {
            "periods": [
                {
                    "name": "Tonight",
                    "startTime": "2024-03-01T18:00:00-05:00",
                    "isDaytime": false,
                    "temperature": 38,
                    "temperatureUnit": "F",
                    "shortForecast": "Chance Rain",
                    "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 40 }
                },
                {
                    "name": "Saturday",
                    "startTime": "2024-03-02T06:00:00-05:00",
                    "isDaytime": true,
                    "temperature": 55,
                    "temperatureUnit": "F",
                    "shortForecast": "Sunny",
                    "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": null }
                }
            ]
        }
    });
    let forecast: ForecastResponse = parse_json(&body, "forecast").unwrap();
    let periods = forecast.into_domain();
    assert_eq!(periods.len(), 2);
    assert!(!periods[0].is_daytime);
    assert_eq!(periods[0].temperature, Some(38.0));
    assert_eq!(periods[0].precipitation_probability, Some(40.0));
    assert_eq!(periods[1].precipitation_probability, None);
}

#[test]
fn wrong_shape_is_a_parse_error() {
    let err = parse_json::<PointsResponse>(&json!({ "properties": { "forecast": 3 } }), "points").unwrap_err();
    match err {
        InfrastructureError::Parse(msg) => assert!(msg.starts_with("points payload")),
        other => panic!("unexpected error: {}", other),
    }
}
