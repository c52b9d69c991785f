//! Wire shapes of the forecast API and their mapping onto domain entities.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::errors::InfrastructureError;
use crate::domain::forecast::{ForecastPeriod, GridProperty, HourlyPeriod, MetricKey, RawObservation};
use crate::domain::logging::LogComponent;
use crate::log_debug;

/// `GET /points/{lat},{lon}`: links to the three products for that grid cell.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsProperties {
    pub forecast: String,
    pub forecast_hourly: String,
    pub forecast_grid_data: String,
}

/// Grid data keeps its property bag untyped; only numeric series are used.
#[derive(Debug, Clone, Deserialize)]
pub struct GridDataResponse {
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyResponse {
    pub properties: HourlyProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyProperties {
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub periods: Vec<HourlyPeriodDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPeriodDto {
    pub start_time: String,
    #[serde(default)]
    pub short_forecast: Option<String>,
    #[serde(default)]
    pub wind_direction: Option<String>,
    #[serde(default)]
    pub wind_speed: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriodDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriodDto {
    #[serde(default)]
    pub name: String,
    pub start_time: String,
    #[serde(default)]
    pub is_daytime: bool,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub temperature_unit: Option<String>,
    #[serde(default)]
    pub short_forecast: Option<String>,
    #[serde(default)]
    pub probability_of_precipitation: Option<QuantitativeValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit_code: Option<String>,
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim()).ok()
}

/// Decode a JSON body into one of the response types above.
pub fn parse_json<T: for<'de> Deserialize<'de>>(body: &Value, what: &str) -> Result<T, InfrastructureError> {
    T::deserialize(body).map_err(|e| InfrastructureError::Parse(format!("{} payload: {}", what, e)))
}

impl GridDataResponse {
    /// Every property carrying a `values` array, in key order. Scalar
    /// values that are not numbers (e.g. weather text arrays) become missing.
    pub fn into_domain(self) -> Vec<GridProperty> {
        self.properties
            .into_iter()
            .filter_map(|(key, prop)| {
                let values = prop.get("values")?.as_array()?;
                let uom = prop.get("uom").and_then(Value::as_str).map(str::to_string);
                let values = values
                    .iter()
                    .filter_map(|entry| {
                        let valid_time = entry.get("validTime")?.as_str()?;
                        Some(RawObservation::new(valid_time, entry.get("value").and_then(Value::as_f64)))
                    })
                    .collect();
                Some(GridProperty { key: MetricKey::new(key), uom, values })
            })
            .collect()
    }
}

impl HourlyResponse {
    pub fn into_domain(self) -> (Option<String>, Vec<HourlyPeriod>) {
        let total = self.properties.periods.len();
        let periods: Vec<HourlyPeriod> = self
            .properties
            .periods
            .into_iter()
            .filter_map(|p| {
                Some(HourlyPeriod {
                    start_time: parse_timestamp(&p.start_time)?,
                    short_forecast: p.short_forecast.unwrap_or_default(),
                    wind_direction: p.wind_direction.unwrap_or_default(),
                    wind_speed: p.wind_speed.unwrap_or_default(),
                })
            })
            .collect();
        if periods.len() < total {
            log_debug!(
                LogComponent::Infrastructure("ForecastDto"),
                "Dropped {} hourly periods with unreadable start times",
                total - periods.len()
            );
        }
        (self.properties.update_time, periods)
    }
}

impl ForecastResponse {
    pub fn into_domain(self) -> Vec<ForecastPeriod> {
        self.properties
            .periods
            .into_iter()
            .filter_map(|p| {
                Some(ForecastPeriod {
                    start_time: parse_timestamp(&p.start_time)?,
                    name: p.name,
                    is_daytime: p.is_daytime,
                    temperature: p.temperature.filter(|t| t.is_finite()),
                    temperature_unit: p.temperature_unit.unwrap_or_default(),
                    short_forecast: p.short_forecast.unwrap_or_default(),
                    precipitation_probability: p.probability_of_precipitation.and_then(|q| q.value),
                })
            })
            .collect()
    }
}
