use std::collections::BTreeMap;

use serde::Serialize;

use super::grouping::{group_key, group_of};
use crate::domain::forecast::{HourlyRow, MetricDescriptor, MetricKey};

/// Value Object - vertical axis range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range of the finite values, `None` when there are none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(e) => Some(Self::new(e.min.min(v), e.max.max(v))),
        })
    }

    pub fn union(self, other: Extent) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Fraction of the way from `min` to `max`; 0.5 for a flat range.
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 { 0.5 } else { (value - self.min) / span }
    }
}

/// Whole-series extents, per metric and per `group|unit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtentTable {
    metrics: BTreeMap<MetricKey, Extent>,
    groups: BTreeMap<String, Extent>,
}

impl ExtentTable {
    pub fn metric(&self, key: &MetricKey) -> Option<Extent> {
        self.metrics.get(key).copied()
    }

    pub fn group(&self, group_key: &str) -> Option<Extent> {
        self.groups.get(group_key).copied()
    }

    pub fn group_keys(&self) -> impl Iterator<Item = &String> {
        self.groups.keys()
    }
}

/// Extents over every row, independent of the visible window.
pub fn compute_extents(rows: &[HourlyRow], metrics: &[MetricDescriptor]) -> ExtentTable {
    let mut table = ExtentTable::default();
    for metric in metrics {
        let Some(extent) = Extent::of(rows.iter().filter_map(|row| row.value(&metric.key))) else {
            continue;
        };
        table.metrics.insert(metric.key.clone(), extent);

        let group = group_of(metric.key.as_str(), &metric.unit);
        table
            .groups
            .entry(group_key(&group.id, &metric.unit))
            .and_modify(|existing| *existing = existing.union(extent))
            .or_insert(extent);
    }
    table
}

/// Final axis range for a unit: percentages pin to 0..100, amounts and
/// speeds start at zero, inches never shrink below 0.05, flat ranges pad by 1.
pub fn normalize_extent(extent: Extent, unit: &str) -> Extent {
    let Extent { mut min, mut max } = extent;
    if unit == "%" {
        min = 0.0;
        max = 100.0;
    }
    if unit == "in" || unit == "mph" {
        min = 0.0;
    }
    if unit == "in" {
        max = max.max(0.05);
    }
    if min == max {
        min -= 1.0;
        max += 1.0;
    }
    Extent::new(min, max)
}
