//! Chart aggregate: grouping, fixed extents and layout math.

pub mod extent;
pub mod grouping;
pub mod layout;
pub mod value_objects;
pub mod visibility;

pub use extent::*;
pub use grouping::*;
pub use value_objects::*;
pub use visibility::MetricVisibility;
