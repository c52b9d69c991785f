use std::cmp::Ordering;

use derive_more::Display;
use serde::Serialize;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use super::extent::{normalize_extent, Extent, ExtentTable};
use crate::domain::forecast::grid::compare_labels;
use crate::domain::forecast::MetricDescriptor;

/// Display groups, declared in the order charts are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr, Serialize)]
pub enum GroupKind {
    #[display(fmt = "Temperature")]
    #[strum(serialize = "temperature")]
    Temperature,
    #[display(fmt = "Precipitation")]
    #[strum(serialize = "precip-prob")]
    PrecipitationChance,
    #[display(fmt = "Precipitation")]
    #[strum(serialize = "precip")]
    Precipitation,
    #[display(fmt = "Wind")]
    #[strum(serialize = "wind")]
    Wind,
    #[display(fmt = "Cloud Cover")]
    #[strum(serialize = "sky")]
    Sky,
    #[display(fmt = "Humidity")]
    #[strum(serialize = "humidity")]
    Humidity,
    #[display(fmt = "Pressure")]
    #[strum(serialize = "pressure")]
    Pressure,
    #[display(fmt = "Visibility")]
    #[strum(serialize = "visibility")]
    Visibility,
    #[display(fmt = "Other")]
    #[strum(serialize = "other")]
    Other,
}

impl GroupKind {
    /// Stacking position; `Other` groups have none and sort last.
    pub fn rank(self) -> Option<usize> {
        match self {
            GroupKind::Other => None,
            kind => GroupKind::iter().position(|k| k == kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupInfo {
    pub kind: GroupKind,
    pub id: String,
    pub label: String,
}

/// Classify a metric by key substrings, first match wins.
pub fn group_of(key: &str, unit: &str) -> GroupInfo {
    let k = key.to_lowercase();
    let kind = if k.contains("probabilityofprecipitation") || (k.contains("probability") && k.contains("thunder")) {
        GroupKind::PrecipitationChance
    } else if ["temperature", "dewpoint", "heatindex", "windchill"].iter().any(|t| k.contains(t)) {
        GroupKind::Temperature
    } else if k.contains("wind") {
        GroupKind::Wind
    } else if ["precip", "snow", "ice"].iter().any(|t| k.contains(t)) {
        GroupKind::Precipitation
    } else if k.contains("sky") || k.contains("cloud") {
        GroupKind::Sky
    } else if k.contains("humidity") {
        GroupKind::Humidity
    } else if k.contains("pressure") || k.contains("barometric") {
        GroupKind::Pressure
    } else if k.contains("visibility") {
        GroupKind::Visibility
    } else {
        GroupKind::Other
    };

    let id = match kind {
        GroupKind::Other => format!("other-{}", if unit.is_empty() { "misc" } else { unit }),
        kind => kind.as_ref().to_string(),
    };
    GroupInfo { kind, id, label: kind.to_string() }
}

/// Aggregation key: one chart per `(group, unit)`.
pub fn group_key(group_id: &str, unit: &str) -> String {
    format!("{}|{}", group_id, if unit.is_empty() { "unitless" } else { unit })
}

/// Tiebreak between same-group charts with different units.
pub fn unit_sort_rank(unit: &str) -> u8 {
    match unit.to_lowercase().as_str() {
        "%" => 0,
        "in" => 1,
        "mph" => 2,
        "°f" => 3,
        _ => 10,
    }
}

/// One chart: metrics sharing a group and unit, with its fixed axis range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGroup {
    pub id: String,
    #[serde(skip)]
    pub kind: GroupKind,
    pub label: String,
    pub unit: String,
    pub metrics: Vec<MetricDescriptor>,
    pub extent: Option<Extent>,
}

impl ChartGroup {
    pub fn key(&self) -> String {
        group_key(&self.id, &self.unit)
    }

    /// Heading as shown above the chart.
    pub fn title(&self) -> String {
        if self.unit.is_empty() { self.label.clone() } else { format!("{} ({})", self.label, self.unit) }
    }
}

/// Bucket metrics into charts and order charts and their series for display.
pub fn group_metrics(metrics: &[MetricDescriptor], extents: &ExtentTable) -> Vec<ChartGroup> {
    let mut groups: Vec<ChartGroup> = Vec::new();
    for metric in metrics {
        let info = group_of(metric.key.as_str(), &metric.unit);
        let key = group_key(&info.id, &metric.unit);
        match groups.iter_mut().find(|g| g.key() == key) {
            Some(group) => group.metrics.push(metric.clone()),
            None => groups.push(ChartGroup {
                id: info.id,
                kind: info.kind,
                label: info.label,
                unit: metric.unit.clone(),
                metrics: vec![metric.clone()],
                extent: None,
            }),
        }
    }

    groups.sort_by(compare_groups);
    for group in &mut groups {
        if group.kind == GroupKind::Temperature {
            group.metrics.sort_by(compare_temperature_series);
        }
        group.extent = extents.group(&group.key()).map(|e| normalize_extent(e, &group.unit));
    }
    groups
}

fn compare_groups(a: &ChartGroup, b: &ChartGroup) -> Ordering {
    match (a.kind.rank(), b.kind.rank()) {
        (None, None) => compare_labels(&a.label, &b.label).then_with(|| a.unit.cmp(&b.unit)),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) if x != y => x.cmp(&y),
        _ => unit_sort_rank(&a.unit)
            .cmp(&unit_sort_rank(&b.unit))
            .then_with(|| a.unit.cmp(&b.unit)),
    }
}

/// Dew point trails the other temperature lines.
fn compare_temperature_series(a: &MetricDescriptor, b: &MetricDescriptor) -> Ordering {
    let a_dew = a.key.normalized() == "dewpoint";
    let b_dew = b.key.normalized() == "dewpoint";
    a_dew.cmp(&b_dew).then_with(|| compare_labels(&a.label, &b.label))
}
