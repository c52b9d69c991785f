use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, FixedOffset};
use futures::future::join_all;

use super::coordinator::DashboardController;
use crate::domain::config::DashboardConfig;
use crate::domain::errors::{AppError, DomainError};
use crate::domain::forecast::{ForecastAssembler, ForecastRepository, Location, LocationDataset};
use crate::domain::logging::LogComponent;
use crate::{log_error, log_info};

/// Use Case: fetch and assemble forecasts for the configured locations
pub struct LoadForecastsUseCase<R: ForecastRepository> {
    repository: R,
    config: DashboardConfig,
}

impl<R: ForecastRepository> LoadForecastsUseCase<R> {
    pub fn new(repository: R, config: DashboardConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn load_location(
        &self,
        location: &Location,
        now: DateTime<FixedOffset>,
    ) -> Result<LocationDataset, AppError> {
        if !location.is_valid() {
            return Err(DomainError::InvalidLocation(format!("{:?}", location)).into());
        }
        let bundle = self.repository.fetch_bundle(location).await?;
        Ok(ForecastAssembler::new(&self.config).assemble(location, &bundle, now))
    }

    /// All locations or nothing: one failure fails the whole refresh.
    pub async fn load_all(&self, now: DateTime<FixedOffset>) -> Result<Vec<LocationDataset>, AppError> {
        let results = join_all(self.config.locations.iter().map(|location| self.load_location(location, now))).await;
        results.into_iter().collect()
    }
}

/// One refresh cycle. On failure the controller keeps its previous data.
pub async fn refresh_dashboard<R: ForecastRepository>(
    controller: &Rc<RefCell<DashboardController>>,
    use_case: &LoadForecastsUseCase<R>,
    now: DateTime<FixedOffset>,
) -> Result<usize, AppError> {
    log_info!(LogComponent::Application("RefreshDashboard"), "⏳ Refreshing forecasts");
    match use_case.load_all(now).await {
        Ok(datasets) => {
            let count = datasets.len();
            controller.borrow_mut().replace_datasets(datasets, now);
            Ok(count)
        }
        Err(e) => {
            log_error!(
                LogComponent::Application("RefreshDashboard"),
                "❌ Refresh failed, keeping previous data: {}",
                e
            );
            Err(e)
        }
    }
}
