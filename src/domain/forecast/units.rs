use std::str::FromStr;

use strum::{AsRefStr, EnumIter, EnumString};

/// Source unit codes with a known display conversion, keyed by their
/// namespace-free spelling (`wmoUnit:degC` -> `degC`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, AsRefStr)]
pub enum UnitCode {
    #[strum(serialize = "percent")]
    Percent,
    #[strum(serialize = "degC")]
    Celsius,
    #[strum(serialize = "degF")]
    Fahrenheit,
    #[strum(serialize = "m_s-1")]
    MetersPerSecond,
    #[strum(serialize = "km_h-1")]
    KilometersPerHour,
    #[strum(serialize = "m")]
    Meters,
    #[strum(serialize = "mm")]
    Millimeters,
    #[strum(serialize = "cm")]
    Centimeters,
    #[strum(serialize = "kg_m-2")]
    KilogramsPerSquareMeter,
    #[strum(serialize = "Pa")]
    Pascals,
}

impl UnitCode {
    pub fn display_unit(self) -> &'static str {
        match self {
            UnitCode::Percent => "%",
            UnitCode::Celsius | UnitCode::Fahrenheit => "°F",
            UnitCode::MetersPerSecond | UnitCode::KilometersPerHour => "mph",
            UnitCode::Meters => "mi",
            UnitCode::Millimeters | UnitCode::Centimeters | UnitCode::KilogramsPerSquareMeter => "in",
            UnitCode::Pascals => "hPa",
        }
    }

    pub fn convert(self, value: f64) -> f64 {
        match self {
            UnitCode::Percent | UnitCode::Fahrenheit => value,
            UnitCode::Celsius => value * 1.8 + 32.0,
            UnitCode::MetersPerSecond => value * 2.23694,
            UnitCode::KilometersPerHour => value * 0.621371,
            UnitCode::Meters => value / 1609.34,
            UnitCode::Millimeters => value / 25.4,
            UnitCode::Centimeters => value / 2.54,
            // 1 mm of water over 1 m² weighs 1 kg
            UnitCode::KilogramsPerSquareMeter => value / 25.4,
            UnitCode::Pascals => value / 100.0,
        }
    }
}

/// Display unit plus the conversion that produces values in it.
/// Unknown codes convert with identity.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConversion {
    pub display_unit: String,
    code: Option<UnitCode>,
}

impl UnitConversion {
    pub fn identity(display_unit: &str) -> Self {
        Self { display_unit: display_unit.to_string(), code: None }
    }

    pub fn code(&self) -> Option<UnitCode> {
        self.code
    }

    pub fn convert(&self, value: f64) -> f64 {
        match self.code {
            Some(code) => code.convert(value),
            None => value,
        }
    }

    /// Probability fields arrive without a unit but are percentages.
    pub fn for_metric(mut self, key: &str) -> Self {
        if self.display_unit.is_empty() && key.to_lowercase().contains("probability") {
            self.display_unit = "%".to_string();
        }
        self
    }
}

/// Drop the `wmoUnit:` / `unit:` namespace prefix.
pub fn strip_namespace(raw: &str) -> String {
    raw.replacen("wmoUnit:", "", 1).replacen("unit:", "", 1)
}

/// Map a raw unit-of-measure code to its display unit and conversion.
pub fn normalize_uom(raw: Option<&str>) -> UnitConversion {
    let cleaned = strip_namespace(raw.unwrap_or_default());
    match UnitCode::from_str(&cleaned) {
        Ok(code) => UnitConversion { display_unit: code.display_unit().to_string(), code: Some(code) },
        Err(_) => UnitConversion::identity(&cleaned),
    }
}
