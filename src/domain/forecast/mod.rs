//! Forecast aggregate: raw products in, dense hourly datasets out.

pub mod catalog;
pub mod daily;
pub mod entities;
pub mod grid;
pub mod intervals;
pub mod repositories;
pub mod services;
pub mod units;
pub mod value_objects;

pub use daily::*;
pub use entities::*;
pub use grid::{HourlyGrid, HourlyGridBuilder};
pub use intervals::*;
pub use repositories::*;
pub use services::*;
pub use units::*;
pub use value_objects::*;
