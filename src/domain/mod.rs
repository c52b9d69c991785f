pub mod chart;
pub mod config;
pub mod errors;
pub mod forecast;
pub mod logging;
