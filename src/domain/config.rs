//! Tunable constants for the dashboard. Every field has a default so a host
//! may pass a partial JSON object.

use serde::{Deserialize, Serialize};

use crate::domain::forecast::Location;
use crate::log_warn;
use crate::domain::logging::LogComponent;

/// Direction of the wheel-to-zoom mapping.
///
/// `Natural` zooms out on a positive (downward) wheel delta,
/// `Inverted` zooms in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WheelZoomSign {
    #[default]
    Natural,
    Inverted,
}

impl WheelZoomSign {
    pub fn factor(self) -> f64 {
        match self {
            WheelZoomSign::Natural => 1.0,
            WheelZoomSign::Inverted => -1.0,
        }
    }
}

/// Inset of the plotting area inside a chart canvas, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for ChartPadding {
    fn default() -> Self {
        Self { top: 14.0, right: 10.0, bottom: 28.0, left: 38.0 }
    }
}

impl ChartPadding {
    /// Width of the plotting area; may be zero or negative for tiny canvases.
    pub fn chart_width(&self, canvas_width: f64) -> f64 {
        canvas_width - self.left - self.right
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub min_window_hours: usize,
    pub default_window_hours: usize,
    pub wheel_zoom_k: f64,
    pub wheel_zoom_sign: WheelZoomSign,
    pub line_delta_px: f64,
    pub page_delta_px: f64,
    pub wheel_idle_ms: u32,
    pub allow_overscroll: bool,
    pub gesture_threshold_px: f64,
    pub vertical_scroll_ratio: f64,
    pub sanity_bound: f64,
    pub refresh_interval_minutes: u32,
    pub chart_padding: ChartPadding,
    /// Width reserved for one hour label on the x axis, in CSS pixels.
    pub tick_label_width: f64,
    pub hidden_by_default: Vec<String>,
    pub excluded_metrics: Vec<String>,
    pub api_base_url: String,
    pub user_agent: String,
    pub storage_version: u32,
    pub locations: Vec<Location>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            min_window_hours: 6,
            default_window_hours: 96,
            wheel_zoom_k: 0.002,
            wheel_zoom_sign: WheelZoomSign::Natural,
            line_delta_px: 16.0,
            page_delta_px: 400.0,
            wheel_idle_ms: 160,
            allow_overscroll: false,
            gesture_threshold_px: 6.0,
            vertical_scroll_ratio: 1.2,
            sanity_bound: 9000.0,
            refresh_interval_minutes: 15,
            chart_padding: ChartPadding::default(),
            tick_label_width: 34.0,
            hidden_by_default: vec!["dewpoint".to_string(), "windchill".to_string()],
            excluded_metrics: [
                "mintemperature",
                "maxtemperature",
                "winddirection",
                "transportwinddirection",
                "transportwindspeed",
                "ceilingheight",
                "mixingheight",
                "visibility",
                "lowvisibilityoccurrenceriskindex",
                "atmosphericdispersionindex",
                "windchill",
                "wetbulbglobetemperature",
                "waveheight",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            api_base_url: "https://api.weather.gov".to_string(),
            user_agent: "focused-forecast-demo".to_string(),
            storage_version: 1,
            locations: vec![
                Location::new("Sterling, VA", 39.0067, -77.4286),
                Location::new("Frederick, MD", 39.4143, -77.4105),
                Location::new("Midlothian, VA", 37.5057, -77.6499),
                Location::new("Broadway, VA", 38.6132, -78.7989),
                Location::new("Hatteras, NC", 35.2193, -75.6907),
            ],
        }
    }
}

impl DashboardConfig {
    /// Parse a host-supplied JSON object. Malformed input falls back to defaults.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<DashboardConfig>(json) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                log_warn!(
                    LogComponent::Domain("DashboardConfig"),
                    "⚠️ Ignoring malformed config ({}), using defaults",
                    e
                );
                Self::default()
            }
        }
    }

    /// Clamp fields whose nonsensical values would break window math.
    pub fn sanitized(mut self) -> Self {
        self.min_window_hours = self.min_window_hours.max(1);
        self.default_window_hours = self.default_window_hours.max(self.min_window_hours);
        if !self.wheel_zoom_k.is_finite() || self.wheel_zoom_k < 0.0 {
            self.wheel_zoom_k = 0.002;
        }
        if !self.sanity_bound.is_finite() || self.sanity_bound <= 0.0 {
            self.sanity_bound = 9000.0;
        }
        self.refresh_interval_minutes = self.refresh_interval_minutes.max(1);
        if !self.tick_label_width.is_finite() || self.tick_label_width < 0.0 {
            self.tick_label_width = 34.0;
        }
        self
    }

    pub fn is_excluded(&self, key: &str) -> bool {
        let normalized = key.to_lowercase();
        self.excluded_metrics.iter().any(|excluded| excluded.eq_ignore_ascii_case(&normalized))
    }

    pub fn is_hidden_by_default(&self, key: &str) -> bool {
        let normalized = key.to_lowercase();
        self.hidden_by_default.iter().any(|hidden| hidden.eq_ignore_ascii_case(&normalized))
    }
}
