use chrono::NaiveDate;
use serde::Serialize;

use super::entities::ForecastPeriod;

/// Day card: daytime high, overnight low and a combined blurb.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub name: String,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub unit: String,
    pub blurb: String,
    pub precip_prob: Option<f64>,
}

struct DaySlots<'a> {
    date: NaiveDate,
    day: Option<&'a ForecastPeriod>,
    night: Option<&'a ForecastPeriod>,
}

/// Pair day and night periods by calendar date, in first-seen order.
pub fn build_daily_forecast(periods: &[ForecastPeriod]) -> Vec<DailySummary> {
    let mut days: Vec<DaySlots> = Vec::new();
    for period in periods {
        let date = period.start_time.date_naive();
        let slot = match days.iter().position(|d| d.date == date) {
            Some(i) => &mut days[i],
            None => {
                days.push(DaySlots { date, day: None, night: None });
                let last = days.len() - 1;
                &mut days[last]
            }
        };
        if period.is_daytime {
            slot.day = Some(period);
        } else {
            slot.night = Some(period);
        }
    }

    days.iter().map(summarize).collect()
}

fn summarize(slots: &DaySlots) -> DailySummary {
    let (day, night) = (slots.day, slots.night);
    let name = day
        .or(night)
        .map(|p| p.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| slots.date.format("%A").to_string());
    let unit = [day, night]
        .into_iter()
        .flatten()
        .map(|p| p.temperature_unit.clone())
        .find(|u| !u.is_empty())
        .unwrap_or_default();
    let precip_prob = [day, night]
        .into_iter()
        .flatten()
        .filter_map(|p| p.precipitation_probability)
        .reduce(f64::max);

    DailySummary {
        name,
        high: day.and_then(|p| p.temperature),
        low: night.and_then(|p| p.temperature),
        unit,
        blurb: blurb(day, night),
        precip_prob,
    }
}

fn blurb(day: Option<&ForecastPeriod>, night: Option<&ForecastPeriod>) -> String {
    let day_text = day.map(|p| p.short_forecast.as_str()).filter(|s| !s.is_empty());
    let night_text = night.map(|p| p.short_forecast.as_str()).filter(|s| !s.is_empty());
    match (day_text, night_text) {
        (Some(d), Some(n)) => {
            let combined = format!("{} then {}", d, n);
            let mut parts = split_then(&combined);
            parts.dedup();
            parts.join(" then ")
        }
        (Some(text), None) | (None, Some(text)) => text.to_string(),
        (None, None) => String::new(),
    }
}

/// Split on the word `then` (any case), collapsing whitespace.
fn split_then(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        if word.eq_ignore_ascii_case("then") {
            if !current.is_empty() {
                parts.push(current.join(" "));
            }
            current.clear();
        } else {
            current.push(word);
        }
    }
    if !current.is_empty() {
        parts.push(current.join(" "));
    }
    parts
}
