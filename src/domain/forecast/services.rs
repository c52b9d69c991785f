use chrono::{DateTime, FixedOffset};

use super::daily::build_daily_forecast;
use super::entities::{ForecastBundle, LocationDataset};
use super::grid::HourlyGridBuilder;
use super::value_objects::Location;
use crate::domain::chart::compute_extents;
use crate::domain::config::DashboardConfig;
use crate::domain::logging::LogComponent;
use crate::log_info;

/// Turns one fetched bundle into the dataset the dashboard displays.
pub struct ForecastAssembler<'a> {
    config: &'a DashboardConfig,
}

impl<'a> ForecastAssembler<'a> {
    pub fn new(config: &'a DashboardConfig) -> Self {
        Self { config }
    }

    pub fn assemble(&self, location: &Location, bundle: &ForecastBundle, now: DateTime<FixedOffset>) -> LocationDataset {
        let builder = HourlyGridBuilder::new(self.config);
        let sources = builder.metric_sources(&bundle.grid);
        let grid = builder.build(&sources, &bundle.hourly, now);
        let extents = compute_extents(&grid.rows, &grid.metrics);

        log_info!(
            LogComponent::Domain("ForecastAssembler"),
            "📦 {}: {} hours, {} metrics, {} forecast periods",
            location.name,
            grid.rows.len(),
            grid.metrics.len(),
            bundle.periods.len()
        );

        LocationDataset {
            location: location.clone(),
            updated: bundle.updated.clone(),
            rows: grid.rows,
            metrics: grid.metrics,
            extents,
            daily: build_daily_forecast(&bundle.periods),
        }
    }
}
