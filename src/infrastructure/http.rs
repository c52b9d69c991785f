use gloo::net::http::Request;
use serde_json::Value;

use super::dto::{parse_json, ForecastResponse, GridDataResponse, HourlyResponse, PointsResponse};
use crate::domain::config::DashboardConfig;
use crate::domain::errors::{InfrastructureError, NetworkError, NetworkResult};
use crate::domain::forecast::{ForecastBundle, ForecastRepository, Location};
use crate::domain::logging::{get_logger, LogComponent, LogEntry, LogLevel};
use crate::{log_debug, log_info};

fn log_request_failure(url: &str, status: Option<u16>, message: &str) {
    let mut entry = LogEntry::new(LogLevel::Warn, LogComponent::Infrastructure("NwsHttpClient"), message)
        .with_field("url", url);
    if let Some(status) = status {
        entry = entry.with_field("status", status);
    }
    get_logger().log(entry);
}

/// Client for the public forecast API (points, hourly, period and grid products).
#[derive(Clone)]
pub struct NwsHttpClient {
    base_url: String,
    user_agent: String,
}

impl Default for NwsHttpClient {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl NwsHttpClient {
    pub fn new(base_url: &str, user_agent: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), user_agent: user_agent.to_string() }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(&config.api_base_url, &config.user_agent)
    }

    pub fn points_url(&self, location: &Location) -> String {
        format!("{}/points/{}", self.base_url, location.coordinates())
    }

    async fn get_json(&self, url: &str) -> NetworkResult<Value> {
        log_debug!(LogComponent::Infrastructure("NwsHttpClient"), "GET {}", url);

        let response = Request::get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/geo+json")
            .send()
            .await
            .map_err(|e| {
                log_request_failure(url, None, "❌ Request failed");
                NetworkError::HttpRequestFailed(format!("Failed to send request to {}: {:?}", url, e))
            })?;

        if !response.ok() {
            log_request_failure(url, Some(response.status()), "❌ Unexpected status");
            return Err(NetworkError::HttpStatus { url: url.to_string(), status: response.status() }.into());
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| NetworkError::InvalidResponse(format!("Failed to parse JSON from {}: {:?}", url, e)).into())
    }
}

impl ForecastRepository for NwsHttpClient {
    async fn fetch_bundle(&self, location: &Location) -> Result<ForecastBundle, InfrastructureError> {
        log_info!(
            LogComponent::Infrastructure("NwsHttpClient"),
            "📡 Fetching forecast for {} ({})",
            location.name,
            location.coordinates()
        );

        let points: PointsResponse = parse_json(&self.get_json(&self.points_url(location)).await?, "points")?;
        let links = points.properties;

        let hourly: HourlyResponse = parse_json(&self.get_json(&links.forecast_hourly).await?, "hourly forecast")?;
        let forecast: ForecastResponse = parse_json(&self.get_json(&links.forecast).await?, "forecast")?;
        let grid: GridDataResponse = parse_json(&self.get_json(&links.forecast_grid_data).await?, "grid data")?;

        let (updated, hourly) = hourly.into_domain();
        let bundle = ForecastBundle { updated, grid: grid.into_domain(), hourly, periods: forecast.into_domain() };

        log_info!(
            LogComponent::Infrastructure("NwsHttpClient"),
            "✅ {}: {} hourly periods, {} grid properties",
            location.name,
            bundle.hourly.len(),
            bundle.grid.len()
        );
        Ok(bundle)
    }
}
