//! Fixed knowledge about grid fields: labels, colors and which fields
//! accumulate over their reporting interval.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::domain::chart::Color;

static LABEL_OVERRIDES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("probabilityOfPrecipitation", "Probability of Precipitation"),
        ("quantitativePrecipitation", "Precipitation Amount"),
        ("windSpeed", "Wind Speed"),
        ("windGust", "Wind Gust"),
        ("skyCover", "Sky Cover"),
        ("relativeHumidity", "Relative Humidity"),
        ("apparentTemperature", "Feels Like"),
    ])
});

pub const COLOR_PALETTE: [u32; 10] = [
    0xff7b2f, 0x0f8ea1, 0x5b56f0, 0x2f3b52, 0xe24a3b, 0x2f9d55, 0xb065f5, 0xe6a01a, 0x1a6fa8, 0x7c4a2a,
];

pub const PRECIPITATION_KEY: &str = "quantitativePrecipitation";
pub const SNOWFALL_KEY: &str = "snowfallAmount";

/// Human-readable label for a camelCase grid key.
pub fn label_for(key: &str) -> String {
    match LABEL_OVERRIDES.get(key) {
        Some(label) => label.to_string(),
        None => humanize_key(key),
    }
}

/// `snowfallAmount` -> `Snowfall Amount`
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => out,
    }
}

/// Quantities summed over the reporting interval (amounts, not chances).
pub fn is_accumulation(key: &str) -> bool {
    let k = key.to_lowercase();
    (k.contains("precip") && !k.contains("probability"))
        || k.contains("snow")
        || (k.contains("ice") && !k.contains("probability"))
}

/// Precipitation-type fields get fixed hues; everything else cycles the palette.
pub fn metric_color(key: &str, index: usize) -> Color {
    let k = key.to_lowercase();
    let hex = if k.contains("quantitativeprecipitation") {
        0x118ab2
    } else if k.contains("snow") {
        0x00bcd4
    } else if k.contains("ice") {
        0x8b5cf6
    } else if k.contains("rain") || k.contains("liquid") {
        0x00a676
    } else if k.contains("drizzle") {
        0xf59e0b
    } else if k.contains("sleet") || k.contains("freezing") {
        0xef4444
    } else {
        COLOR_PALETTE[index % COLOR_PALETTE.len()]
    };
    Color::from_hex(hex)
}
