use serde::{Deserialize, Serialize};

use crate::hos::error::TransformError;

use super::LatLng;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TripRequest {
    pub current_location: LatLng,
    pub pickup_location: LatLng,
    pub dropoff_location: LatLng,
    pub current_cycle_used_hours: f64,
}

impl TripRequest {
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.current_location == self.pickup_location
            || self.current_location == self.dropoff_location
            || self.pickup_location == self.dropoff_location
        {
            return Err(TransformError::DuplicateStop);
        }
        Ok(())
    }

    pub fn current_cycle_used_seconds(&self) -> f64 {
        self.current_cycle_used_hours * 3600.0
    }
}
