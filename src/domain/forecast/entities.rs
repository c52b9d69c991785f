use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::daily::DailySummary;
use super::intervals::{IntervalSeries, RawObservation};
use super::value_objects::{Location, MetricKey};
use crate::domain::chart::{Color, ExtentTable};

/// One named property of the grid resource, still in source units.
#[derive(Debug, Clone, PartialEq)]
pub struct GridProperty {
    pub key: MetricKey,
    pub uom: Option<String>,
    pub values: Vec<RawObservation>,
}

/// One period of the hourly forecast product.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPeriod {
    pub start_time: DateTime<FixedOffset>,
    pub short_forecast: String,
    pub wind_direction: String,
    pub wind_speed: String,
}

/// One period of the day/night forecast product.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPeriod {
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    pub is_daytime: bool,
    pub temperature: Option<f64>,
    pub temperature_unit: String,
    pub short_forecast: String,
    pub precipitation_probability: Option<f64>,
}

/// Everything fetched for one location in one refresh cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastBundle {
    pub updated: Option<String>,
    pub grid: Vec<GridProperty>,
    pub hourly: Vec<HourlyPeriod>,
    pub periods: Vec<ForecastPeriod>,
}

/// Per-metric description shared by rows, groups and visibility flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDescriptor {
    pub key: MetricKey,
    pub label: String,
    pub unit: String,
    pub color: Color,
}

/// A grid property prepared for per-hour lookup.
#[derive(Debug, Clone)]
pub struct MetricSource {
    pub key: MetricKey,
    pub label: String,
    pub conversion: super::units::UnitConversion,
    pub intervals: IntervalSeries,
    pub accumulation: bool,
}

/// One hour of the dense forecast axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRow {
    pub time: DateTime<FixedOffset>,
    pub short_forecast: String,
    pub wind_direction: String,
    pub wind_speed_text: String,
    pub metrics: BTreeMap<MetricKey, Option<f64>>,
}

impl HourlyRow {
    pub fn value(&self, key: &MetricKey) -> Option<f64> {
        self.metrics.get(key).copied().flatten()
    }
}

/// Fully processed forecast for one location; replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDataset {
    pub location: Location,
    pub updated: Option<String>,
    pub rows: Vec<HourlyRow>,
    pub metrics: Vec<MetricDescriptor>,
    pub extents: ExtentTable,
    pub daily: Vec<DailySummary>,
}

impl LocationDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn times(&self) -> Vec<DateTime<FixedOffset>> {
        self.rows.iter().map(|row| row.time).collect()
    }

    /// Full-length value column for one metric.
    pub fn series(&self, key: &MetricKey) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.value(key)).collect()
    }

    pub fn metric(&self, key: &MetricKey) -> Option<&MetricDescriptor> {
        self.metrics.iter().find(|m| &m.key == key)
    }
}
