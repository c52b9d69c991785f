use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, DurationRound, FixedOffset};

use super::catalog::{self, PRECIPITATION_KEY, SNOWFALL_KEY};
use super::entities::{GridProperty, HourlyPeriod, HourlyRow, MetricDescriptor, MetricSource};
use super::intervals::{sanitize, IntervalSeries, ResolveMode};
use super::units::normalize_uom;
use super::value_objects::MetricKey;
use crate::domain::config::DashboardConfig;
use crate::domain::logging::LogComponent;
use crate::log_debug;

/// Output of the grid builder: dense rows plus the metrics worth showing.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyGrid {
    pub rows: Vec<HourlyRow>,
    pub metrics: Vec<MetricDescriptor>,
}

/// Turns irregular grid intervals into one row per forecast hour.
pub struct HourlyGridBuilder<'a> {
    config: &'a DashboardConfig,
}

impl<'a> HourlyGridBuilder<'a> {
    pub fn new(config: &'a DashboardConfig) -> Self {
        Self { config }
    }

    /// Prepare lookups for every non-excluded grid property.
    pub fn metric_sources(&self, grid: &[GridProperty]) -> Vec<MetricSource> {
        grid.iter()
            .filter(|property| !self.config.is_excluded(property.key.as_str()))
            .map(|property| {
                let key = property.key.as_str();
                MetricSource {
                    key: property.key.clone(),
                    label: catalog::label_for(key),
                    conversion: normalize_uom(property.uom.as_deref()).for_metric(key),
                    intervals: IntervalSeries::from_raw(&property.values, self.config.sanity_bound),
                    accumulation: catalog::is_accumulation(key),
                }
            })
            .collect()
    }

    /// Build the grid. `now` trims hours that are already in the past.
    pub fn build(&self, sources: &[MetricSource], periods: &[HourlyPeriod], now: DateTime<FixedOffset>) -> HourlyGrid {
        let axis = hour_axis(periods);
        let columns = self.resolve_columns(sources, &axis);

        let mut rows: Vec<HourlyRow> = axis
            .iter()
            .enumerate()
            .map(|(i, (time, period))| HourlyRow {
                time: *time,
                short_forecast: period.map(|p| p.short_forecast.clone()).unwrap_or_default(),
                wind_direction: period.map(|p| p.wind_direction.clone()).unwrap_or_default(),
                wind_speed_text: period.map(|p| p.wind_speed.clone()).unwrap_or_default(),
                metrics: sources
                    .iter()
                    .zip(columns.iter())
                    .map(|(source, column)| (source.key.clone(), column[i]))
                    .collect::<BTreeMap<_, _>>(),
            })
            .collect();

        rows.iter_mut().for_each(adjust_for_snowfall);

        let metrics = self.retained_metrics(sources, &rows);
        let rows = trim_past_hours(rows, now);

        log_debug!(
            LogComponent::Domain("HourlyGridBuilder"),
            "Built {} hourly rows with {} metrics",
            rows.len(),
            metrics.len()
        );

        HourlyGrid { rows, metrics }
    }

    /// One value column per source, aligned with `axis`.
    fn resolve_columns(
        &self,
        sources: &[MetricSource],
        axis: &[(DateTime<FixedOffset>, Option<&HourlyPeriod>)],
    ) -> Vec<Vec<Option<f64>>> {
        let times: Vec<i64> = axis.iter().map(|(time, _)| time.timestamp_millis()).collect();
        let bound = self.config.sanity_bound;

        #[cfg(feature = "parallel")]
        let columns = {
            use rayon::prelude::*;
            sources.par_iter().map(|source| resolve_column(source, &times, bound)).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let columns = sources.iter().map(|source| resolve_column(source, &times, bound)).collect();

        columns
    }

    /// Metrics with at least one value, sorted by label, colored by position.
    fn retained_metrics(&self, sources: &[MetricSource], rows: &[HourlyRow]) -> Vec<MetricDescriptor> {
        let mut kept: Vec<&MetricSource> = sources
            .iter()
            .filter(|source| rows.iter().any(|row| row.value(&source.key).is_some()))
            .collect();
        kept.sort_by(|a, b| compare_labels(&a.label, &b.label));
        kept.into_iter()
            .enumerate()
            .map(|(index, source)| MetricDescriptor {
                key: source.key.clone(),
                label: source.label.clone(),
                unit: source.conversion.display_unit.clone(),
                color: catalog::metric_color(source.key.as_str(), index),
            })
            .collect()
    }
}

fn resolve_column(source: &MetricSource, times: &[i64], bound: f64) -> Vec<Option<f64>> {
    let mode = if source.accumulation { ResolveMode::PerHour } else { ResolveMode::Instant };
    times
        .iter()
        .map(|&t| {
            let raw = source.intervals.resolve_with(t, mode)?;
            sanitize(Some(source.conversion.convert(raw)), bound)
        })
        .collect()
}

/// Case-insensitive label ordering with a stable tiebreak.
pub fn compare_labels(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Contiguous hourly axis spanning the periods; hours without a period
/// still get a row. Each row carries its period's UTC offset, gap rows the
/// offset of the preceding period.
fn hour_axis(periods: &[HourlyPeriod]) -> Vec<(DateTime<FixedOffset>, Option<&HourlyPeriod>)> {
    let mut by_hour: HashMap<i64, &HourlyPeriod> = HashMap::with_capacity(periods.len());
    let mut first: Option<DateTime<FixedOffset>> = None;
    let mut last: Option<DateTime<FixedOffset>> = None;

    for period in periods {
        let hour = floor_to_hour(period.start_time);
        by_hour.entry(hour.timestamp_millis()).or_insert(period);
        if first.is_none_or(|f| hour < f) {
            first = Some(hour);
        }
        if last.is_none_or(|l| hour > l) {
            last = Some(hour);
        }
    }

    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };

    let mut axis = Vec::new();
    let mut offset = *first.offset();
    let mut time = first;
    while time <= last {
        let period = by_hour.get(&time.timestamp_millis()).copied();
        if let Some(period) = period {
            offset = *period.start_time.offset();
        }
        axis.push((time.with_timezone(&offset), period));
        time += Duration::hours(1);
    }
    axis
}

pub fn floor_to_hour(time: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    time.duration_trunc(Duration::hours(1)).unwrap_or(time)
}

/// Remove the liquid equivalent of snowfall (10:1) from precipitation.
fn adjust_for_snowfall(row: &mut HourlyRow) {
    let precip_key = MetricKey::from(PRECIPITATION_KEY);
    let snow = row.value(&MetricKey::from(SNOWFALL_KEY));
    if let (Some(qpf), Some(snow)) = (row.value(&precip_key), snow) {
        row.metrics.insert(precip_key, Some((qpf - snow / 10.0).max(0.0)));
    }
}

/// Drop rows before the current hour once the series has fallen behind.
pub fn trim_past_hours(rows: Vec<HourlyRow>, now: DateTime<FixedOffset>) -> Vec<HourlyRow> {
    let current_hour = floor_to_hour(now);
    match rows.first() {
        Some(first) if current_hour > first.time => rows.into_iter().filter(|row| row.time >= current_hour).collect(),
        _ => rows,
    }
}
