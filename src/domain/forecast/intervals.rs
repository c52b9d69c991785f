use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: i64 = 60 * 1000;

/// One `(validTime, value)` pair as the grid resource publishes it,
/// e.g. `("2024-03-01T06:00:00+00:00/PT3H", 1.2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObservation {
    pub valid_time: String,
    pub value: Option<f64>,
}

impl RawObservation {
    pub fn new(valid_time: &str, value: Option<f64>) -> Self {
        Self { valid_time: valid_time.to_string(), value }
    }
}

/// Half-open `[start, end)` interval in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationInterval {
    pub start: i64,
    pub end: i64,
    pub value: Option<f64>,
    pub duration_hours: f64,
}

impl ObservationInterval {
    /// `None` when the end does not fit in epoch milliseconds.
    pub fn new(start: DateTime<FixedOffset>, duration_minutes: i64, value: Option<f64>) -> Option<Self> {
        let start = start.timestamp_millis();
        let end = duration_minutes.checked_mul(MS_PER_MINUTE).and_then(|ms| start.checked_add(ms))?;
        Some(Self { start, end, value, duration_hours: duration_minutes as f64 / 60.0 })
    }

    pub fn contains(&self, time_ms: i64) -> bool {
        self.start <= time_ms && time_ms < self.end
    }

    /// Value spread evenly over the hours it covers.
    pub fn hourly_value(&self) -> Option<f64> {
        if self.duration_hours > 1.0 {
            self.value.map(|v| v / self.duration_hours)
        } else {
            self.value
        }
    }
}

/// How a resolved interval turns into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// The interval's value as published.
    Instant,
    /// Accumulations over multi-hour buckets become per-hour amounts.
    PerHour,
}

/// Null out non-finite values and fill values beyond the sanity bound.
pub fn sanitize(value: Option<f64>, bound: f64) -> Option<f64> {
    value.filter(|v| v.is_finite() && v.abs() <= bound)
}

/// Minutes in a `P[n]D[T[n]H[n]M]` duration. Anything unparseable or
/// out of range is zero.
pub fn parse_duration_minutes(duration: &str) -> i64 {
    let Some(p) = duration.find('P') else {
        return 0;
    };
    let mut rest = &duration[p + 1..];

    let days = take_component(&mut rest, 'D');
    let (mut hours, mut minutes) = (0, 0);
    if let Some(time) = rest.strip_prefix('T') {
        rest = time;
        hours = take_component(&mut rest, 'H');
        minutes = take_component(&mut rest, 'M');
    }
    days.checked_mul(24)
        .and_then(|h| h.checked_add(hours))
        .and_then(|h| h.checked_mul(60))
        .and_then(|m| m.checked_add(minutes))
        .unwrap_or(0)
}

/// Consume `<digits><designator>` from the front of `rest`, if present.
fn take_component(rest: &mut &str, designator: char) -> i64 {
    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || !rest[digits..].starts_with(designator) {
        return 0;
    }
    let parsed = rest[..digits].parse::<i64>().unwrap_or(0);
    *rest = &rest[digits + designator.len_utf8()..];
    parsed
}

/// Time-ordered observation intervals for a single metric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalSeries {
    intervals: Vec<ObservationInterval>,
}

impl IntervalSeries {
    pub fn new(mut intervals: Vec<ObservationInterval>) -> Self {
        intervals.sort_by_key(|interval| interval.start);
        Self { intervals }
    }

    /// Build from raw pairs. Null values are dropped, fill values become
    /// null, and entries whose start cannot be parsed or whose end overflows
    /// are skipped.
    pub fn from_raw(values: &[RawObservation], sanity_bound: f64) -> Self {
        let intervals = values
            .iter()
            .filter(|entry| entry.value.is_some())
            .filter_map(|entry| {
                let (start, duration) = entry.valid_time.split_once('/').unwrap_or((&entry.valid_time, ""));
                let start = DateTime::parse_from_rfc3339(start.trim()).ok()?;
                let minutes = parse_duration_minutes(duration);
                ObservationInterval::new(start, minutes, sanitize(entry.value, sanity_bound))
            })
            .collect();
        Self::new(intervals)
    }

    pub fn intervals(&self) -> &[ObservationInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The single interval containing `time_ms`. Overlaps yield `None`.
    pub fn find(&self, time_ms: i64) -> Option<&ObservationInterval> {
        let upper = self.intervals.partition_point(|interval| interval.start <= time_ms);
        let mut hits = self.intervals[..upper].iter().filter(|interval| interval.contains(time_ms));
        match (hits.next(), hits.next()) {
            (Some(interval), None) => Some(interval),
            _ => None,
        }
    }

    pub fn resolve(&self, time_ms: i64) -> Option<f64> {
        self.resolve_with(time_ms, ResolveMode::Instant)
    }

    pub fn resolve_with(&self, time_ms: i64, mode: ResolveMode) -> Option<f64> {
        let interval = self.find(time_ms)?;
        match mode {
            ResolveMode::Instant => interval.value,
            ResolveMode::PerHour => interval.hourly_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duration_components() {
        assert_eq!(parse_duration_minutes("PT1H"), 60);
        assert_eq!(parse_duration_minutes("PT6H"), 360);
        assert_eq!(parse_duration_minutes("P1D"), 1440);
        assert_eq!(parse_duration_minutes("P2DT3H"), (2 * 24 + 3) * 60);
        assert_eq!(parse_duration_minutes("PT1H30M"), 90);
        assert_eq!(parse_duration_minutes("PT45M"), 45);
    }

    #[test]
    fn malformed_duration_is_zero() {
        assert_eq!(parse_duration_minutes(""), 0);
        assert_eq!(parse_duration_minutes("garbage"), 0);
        assert_eq!(parse_duration_minutes("PXH"), 0);
    }

    #[test]
    fn oversized_duration_is_zero() {
        assert_eq!(parse_duration_minutes("P99999999999999999D"), 0);
        assert_eq!(parse_duration_minutes("PT9999999999999999999H"), 0);
        assert_eq!(parse_duration_minutes("P1DT9223372036854775807M"), 0);
    }

    #[test]
    fn interval_end_past_epoch_range_is_skipped() {
        let series = IntervalSeries::from_raw(
            &[
                RawObservation::new("2024-03-01T00:00:00+00:00/P99999999999999D", Some(1.0)),
                RawObservation::new("2024-03-01T01:00:00+00:00/PT1H", Some(2.0)),
            ],
            9000.0,
        );
        assert_eq!(series.len(), 1);
        assert_eq!(series.intervals()[0].value, Some(2.0));
    }

    #[test]
    fn sanitize_drops_fill_values() {
        assert_eq!(sanitize(Some(9999.0), 9000.0), None);
        assert_eq!(sanitize(Some(-9001.0), 9000.0), None);
        assert_eq!(sanitize(Some(f64::NAN), 9000.0), None);
        assert_eq!(sanitize(Some(9000.0), 9000.0), Some(9000.0));
        assert_eq!(sanitize(None, 9000.0), None);
    }

    #[test]
    fn unparseable_start_is_skipped() {
        let series = IntervalSeries::from_raw(
            &[
                RawObservation::new("not-a-date/PT1H", Some(1.0)),
                RawObservation::new("2024-03-01T00:00:00+00:00/PT1H", Some(2.0)),
            ],
            9000.0,
        );
        assert_eq!(series.len(), 1);
    }
}
