//! Pixel/index geometry shared by the chart and timeline drawing code.

use chrono::{DateTime, FixedOffset, Timelike};
use serde::Serialize;

use crate::domain::config::ChartPadding;

/// Horizontal position inside the plotting area as a 0..1 ratio.
/// Falls back to the center when the plot has no width.
pub fn anchor_ratio_from_x(local_x: f64, canvas_width: f64, padding: &ChartPadding) -> f64 {
    let chart_width = padding.chart_width(canvas_width);
    if chart_width <= 0.0 {
        return 0.5;
    }
    ((local_x - padding.left) / chart_width).clamp(0.0, 1.0)
}

/// Series index under `local_x` for a window starting at `start`.
pub fn index_from_x(
    local_x: f64,
    canvas_width: f64,
    padding: &ChartPadding,
    count: usize,
    start: i64,
    window_size: usize,
) -> i64 {
    let chart_width = padding.chart_width(canvas_width);
    if chart_width <= 0.0 || count <= 1 || window_size <= 1 {
        return start;
    }
    let ratio = (local_x - padding.left).clamp(0.0, chart_width) / chart_width;
    let index = start as f64 + ratio * (window_size - 1) as f64;
    (index.round() as i64).clamp(0, count as i64 - 1)
}

/// Index units between the first and last visible point; never zero.
pub fn window_span(window_size: usize) -> f64 {
    window_size.saturating_sub(1).max(1) as f64
}

pub fn last_non_null(values: &[Option<f64>]) -> Option<usize> {
    values.iter().rposition(Option::is_some)
}

/// Index shift applied to a series whose data ends before, or starts
/// after, the window edge, so the line tracks an overscrolled window.
pub fn overscroll_offset(window_start: i64, window_size: usize, last_non_null: usize) -> f64 {
    let span = window_span(window_size);
    let data_span = last_non_null as f64;
    let start = window_start as f64;
    let end = start + window_size as f64;
    if start < 0.0 && end > data_span {
        start + (span - data_span) / 2.0
    } else if start < 0.0 {
        start
    } else if start > data_span {
        start - data_span
    } else {
        0.0
    }
}

pub fn overscroll_offset_x(chart_width: f64, window_start: i64, window_size: usize, last_non_null: usize) -> f64 {
    -chart_width * overscroll_offset(window_start, window_size, last_non_null) / window_span(window_size)
}

/// Rows falling exactly on local midnight.
pub fn midnight_indices(times: &[DateTime<FixedOffset>]) -> Vec<usize> {
    times
        .iter()
        .enumerate()
        .filter(|(_, t)| t.hour() == 0 && t.minute() == 0)
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySegment {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// Spans between midnights, labelled with the weekday they start on.
pub fn day_segments(times: &[DateTime<FixedOffset>]) -> Vec<DaySegment> {
    let Some(last) = times.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut bounds = vec![0];
    bounds.extend(midnight_indices(times).into_iter().filter(|&i| i != 0));
    bounds.push(last);

    bounds
        .windows(2)
        .filter(|pair| pair[1] > pair[0])
        .map(|pair| DaySegment { start: pair[0], end: pair[1], label: times[pair[0]].format("%a").to_string() })
        .collect()
}

const MIN_LABEL_GAP_PX: f64 = 16.0;

/// Evenly spaced axis label indices that fit the width; the last index
/// is always labelled.
pub fn tick_indices(count: usize, chart_width: f64, label_width: f64) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let max_labels = ((chart_width / (label_width + MIN_LABEL_GAP_PX)).floor() as usize).max(2);
    let step = ((count - 1) as f64 / (max_labels - 1) as f64).ceil().max(1.0) as usize;
    let mut indices: Vec<usize> = (0..count).step_by(step).collect();
    if indices.last() != Some(&(count - 1)) {
        indices.push(count - 1);
    }
    indices
}

/// One calendar day on the overview timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineDay {
    pub label: String,
    pub hours: usize,
    pub fraction: f64,
}

pub fn timeline_days(times: &[DateTime<FixedOffset>]) -> Vec<TimelineDay> {
    let mut days: Vec<(chrono::NaiveDate, TimelineDay)> = Vec::new();
    for time in times {
        let date = time.date_naive();
        match days.last_mut() {
            Some((current, day)) if *current == date => day.hours += 1,
            _ => days.push((date, TimelineDay { label: time.format("%a").to_string(), hours: 1, fraction: 0.0 })),
        }
    }
    let total = days.iter().map(|(_, d)| d.hours).sum::<usize>().max(1) as f64;
    days.into_iter()
        .map(|(_, mut day)| {
            day.fraction = day.hours as f64 / total;
            day
        })
        .collect()
}

/// Selection bounds on the overview timeline, in track pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMarkers {
    pub start_x: f64,
    pub end_x: f64,
}

pub fn timeline_markers(start_index: i64, window_size: usize, count: usize, track_width: f64) -> Option<TimelineMarkers> {
    if count <= 1 || track_width <= 0.0 {
        return None;
    }
    let max_index = (count - 1) as f64;
    let selection_width = window_span(window_size) / max_index * track_width;
    if selection_width >= track_width {
        return Some(TimelineMarkers { start_x: 0.0, end_x: track_width });
    }
    let mut start_x = start_index as f64 / max_index * track_width;
    let mut end_x = start_x + selection_width;
    if start_x < 0.0 {
        start_x = 0.0;
        end_x = selection_width;
    }
    if end_x > track_width {
        end_x = track_width;
        start_x = track_width - selection_width;
    }
    Some(TimelineMarkers { start_x, end_x })
}

/// Series index for a pointer at `x` pixels along the timeline track.
pub fn timeline_index_from_x(x: f64, track_width: f64, max_index: usize) -> i64 {
    let width = if track_width > 0.0 { track_width } else { 1.0 };
    (x.clamp(0.0, width) / width * max_index as f64).round() as i64
}

/// Tooltip/axis text: two decimals for precipitation-like keys, one
/// otherwise, integers without a fraction, `--` for missing.
pub fn format_value(value: Option<f64>, key: &str) -> String {
    let Some(value) = value else {
        return "--".to_string();
    };
    let k = key.to_lowercase();
    let precision = if k.contains("precip") || k.contains("snow") || k.contains("ice") { 2 } else { 1 };
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.*}", precision, rounded)
    }
}
