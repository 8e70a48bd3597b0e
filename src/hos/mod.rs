pub mod constants;
pub mod eld;
pub mod error;
pub mod events;
pub mod geomath;
pub mod itinerary;
pub mod planner;

pub use error::TransformError;
pub use itinerary::{transform, HosSummary, Itinerary};
