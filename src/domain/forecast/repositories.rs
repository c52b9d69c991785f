use super::entities::ForecastBundle;
use super::value_objects::Location;
use crate::domain::errors::InfrastructureError;

/// Source of raw forecast products for a location.
#[allow(async_fn_in_trait)]
pub trait ForecastRepository {
    async fn fetch_bundle(&self, location: &Location) -> Result<ForecastBundle, InfrastructureError>;
}
