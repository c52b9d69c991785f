//! Serializable snapshot handed to the JS drawing code on every frame.

use serde::Serialize;

use crate::domain::chart::layout::{
    day_segments, format_value, index_from_x, last_non_null, overscroll_offset_x, tick_indices, timeline_days,
    timeline_markers, DaySegment, TimelineDay, TimelineMarkers,
};
use crate::domain::chart::{group_metrics, normalize_extent, Color, Extent, GroupKind, MetricVisibility};
use crate::domain::config::ChartPadding;
use crate::domain::forecast::{DailySummary, LocationDataset, MetricKey};
use crate::gesture::Surface;
use crate::view_state::WindowState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowView {
    pub start_index: i64,
    pub window_size: usize,
    pub end_index: i64,
    pub series_len: usize,
    /// First row actually present in `hours`.
    pub clamp_start: usize,
    /// Empty leading slots when the window starts before the data.
    pub window_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourView {
    pub index: usize,
    pub time: String,
    pub short_forecast: String,
    pub wind_direction: String,
    pub wind_speed_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesView {
    pub key: MetricKey,
    pub label: String,
    pub color: Color,
    pub visible: bool,
    /// Values for the rows in `hours`.
    pub values: Vec<Option<f64>>,
    pub overscroll_offset_x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub id: String,
    pub key: String,
    pub title: String,
    pub unit: String,
    pub extent: Extent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub series: Vec<SeriesView>,
}

const PRECIPITATION_NOTE: &str =
    "Hourly-resolution precipitation accumulation is only available 66\u{2013}72 hours in advance";

fn group_note(kind: GroupKind) -> Option<String> {
    (kind == GroupKind::Precipitation).then(|| PRECIPITATION_NOTE.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricToggleView {
    pub key: MetricKey,
    pub label: String,
    pub unit: String,
    pub color: Color,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewModel {
    pub location_name: Option<String>,
    pub updated: Option<String>,
    pub last_checked: Option<String>,
    pub is_interacting: bool,
    pub window: WindowView,
    pub hours: Vec<HourView>,
    /// Offsets into `hours` that get an axis label.
    pub tick_indices: Vec<usize>,
    pub day_segments: Vec<DaySegment>,
    pub groups: Vec<GroupView>,
    pub metrics: Vec<MetricToggleView>,
    pub timeline_days: Vec<TimelineDay>,
    pub timeline_markers: Option<TimelineMarkers>,
    pub daily: Vec<DailySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipRow {
    pub key: MetricKey,
    pub label: String,
    pub value: String,
    pub unit: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipView {
    pub index: usize,
    pub time: String,
    pub short_forecast: String,
    pub wind: String,
    pub rows: Vec<TooltipRow>,
}

/// Everything the snapshot is computed from.
pub struct ViewContext<'a> {
    pub dataset: Option<&'a LocationDataset>,
    pub window: &'a WindowState,
    pub visibility: &'a MetricVisibility,
    pub surface: &'a Surface,
    pub padding: &'a ChartPadding,
    pub tick_label_width: f64,
    pub is_interacting: bool,
    pub last_checked: Option<String>,
}

impl<'a> ViewContext<'a> {
    pub fn view_model(&self) -> DashboardViewModel {
        let window = self.window;
        let slice = window.visible_slice();
        let window_view = WindowView {
            start_index: window.start_index(),
            window_size: window.window_size(),
            end_index: window.end_index(),
            series_len: window.series_len(),
            clamp_start: slice.start,
            window_offset: slice.offset,
        };

        let Some(dataset) = self.dataset else {
            return DashboardViewModel {
                location_name: None,
                updated: None,
                last_checked: self.last_checked.clone(),
                is_interacting: self.is_interacting,
                window: window_view,
                hours: Vec::new(),
                tick_indices: Vec::new(),
                day_segments: Vec::new(),
                groups: Vec::new(),
                metrics: Vec::new(),
                timeline_days: Vec::new(),
                timeline_markers: None,
                daily: Vec::new(),
            };
        };

        let end = slice.end.min(dataset.len());
        let start = slice.start.min(end);
        let rows = &dataset.rows[start..end];
        let hours = rows
            .iter()
            .enumerate()
            .map(|(i, row)| HourView {
                index: start + i,
                time: row.time.to_rfc3339(),
                short_forecast: row.short_forecast.clone(),
                wind_direction: row.wind_direction.clone(),
                wind_speed_text: row.wind_speed_text.clone(),
            })
            .collect();
        let window_times: Vec<_> = rows.iter().map(|row| row.time).collect();

        let chart_width = self.padding.chart_width(self.surface.canvas_width);
        let groups = group_metrics(&dataset.metrics, &dataset.extents)
            .into_iter()
            .map(|group| GroupView {
                id: group.id.clone(),
                key: group.key(),
                title: group.title(),
                unit: group.unit.clone(),
                extent: group.extent.unwrap_or_else(|| normalize_extent(Extent::new(0.0, 1.0), &group.unit)),
                note: group_note(group.kind),
                series: group
                    .metrics
                    .iter()
                    .map(|metric| {
                        let full = dataset.series(&metric.key);
                        let offset_x = match last_non_null(&full) {
                            Some(last) => {
                                overscroll_offset_x(chart_width, window.start_index(), window.window_size(), last)
                            }
                            None => 0.0,
                        };
                        SeriesView {
                            key: metric.key.clone(),
                            label: metric.label.clone(),
                            color: metric.color,
                            visible: self.visibility.is_visible(&metric.key),
                            values: full[start..end].to_vec(),
                            overscroll_offset_x: offset_x,
                        }
                    })
                    .collect(),
            })
            .collect();

        let metrics = dataset
            .metrics
            .iter()
            .map(|metric| MetricToggleView {
                key: metric.key.clone(),
                label: metric.label.clone(),
                unit: metric.unit.clone(),
                color: metric.color,
                visible: self.visibility.is_visible(&metric.key),
            })
            .collect();

        let all_times = dataset.times();
        DashboardViewModel {
            location_name: Some(dataset.location.name.clone()),
            updated: dataset.updated.clone(),
            last_checked: self.last_checked.clone(),
            is_interacting: self.is_interacting,
            window: window_view,
            hours,
            tick_indices: tick_indices(window_times.len(), chart_width, self.tick_label_width),
            day_segments: day_segments(&window_times),
            groups,
            metrics,
            timeline_days: timeline_days(&all_times),
            timeline_markers: timeline_markers(
                window.start_index(),
                window.window_size(),
                dataset.len(),
                self.surface.track_width,
            ),
            daily: dataset.daily.clone(),
        }
    }

    /// Hover details for the hour under `local_x` on the chart `group_key`.
    /// Hidden mid-gesture, and when none of the chart's visible metrics
    /// has a value at that hour.
    pub fn tooltip_at(&self, group_key: &str, local_x: f64) -> Option<TooltipView> {
        if self.is_interacting {
            return None;
        }
        let dataset = self.dataset.filter(|d| !d.is_empty())?;
        let group = group_metrics(&dataset.metrics, &dataset.extents)
            .into_iter()
            .find(|group| group.key() == group_key)?;
        let index = index_from_x(
            local_x,
            self.surface.canvas_width,
            self.padding,
            dataset.len(),
            self.window.start_index(),
            self.window.window_size(),
        )
        .clamp(0, dataset.len() as i64 - 1) as usize;
        let row = &dataset.rows[index];

        let rows: Vec<TooltipRow> = group
            .metrics
            .iter()
            .filter(|metric| self.visibility.is_visible(&metric.key))
            .filter_map(|metric| {
                let value = row.value(&metric.key)?;
                Some(TooltipRow {
                    key: metric.key.clone(),
                    label: metric.label.clone(),
                    value: format_value(Some(value), metric.key.as_str()),
                    unit: metric.unit.clone(),
                    color: metric.color,
                })
            })
            .collect();
        if rows.is_empty() {
            return None;
        }

        let wind = match (row.wind_direction.is_empty(), row.wind_speed_text.is_empty()) {
            (true, true) => String::new(),
            (true, false) => row.wind_speed_text.clone(),
            (false, true) => row.wind_direction.clone(),
            (false, false) => format!("{} {}", row.wind_direction, row.wind_speed_text),
        };

        Some(TooltipView {
            index,
            time: row.time.format("%a %-I %p").to_string(),
            short_forecast: row.short_forecast.clone(),
            wind,
            rows,
        })
    }
}
