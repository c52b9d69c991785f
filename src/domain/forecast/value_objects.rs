use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Value Object - raw grid field identifier, e.g. `quantitativePrecipitation`.
///
/// Stable join key between metric descriptors, visibility flags and row values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Deref, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricKey(String);

impl MetricKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl From<&str> for MetricKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Value Object - a named forecast point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(name: &str, lat: f64, lon: f64) -> Self {
        Self { name: name.to_string(), lat, lon }
    }

    /// `lat,lon` as the points endpoint expects it.
    pub fn coordinates(&self) -> String {
        format!("{:.4},{:.4}", self.lat, self.lon)
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}
