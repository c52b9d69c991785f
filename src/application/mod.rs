pub mod coordinator;
pub mod use_cases;
pub mod view_model;

pub use coordinator::*;
pub use use_cases::*;
pub use view_model::*;
