use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("route has no segments")]
    MissingSegments,

    #[error("route geometry is missing or failed to decode")]
    MissingGeometry,

    #[error("waypoint index {index} out of range for a polyline of {len} points")]
    WaypointOutOfRange { index: usize, len: usize },

    #[error("current, pickup, and dropoff locations must all be different")]
    DuplicateStop,
}
