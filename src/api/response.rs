use serde::{Deserialize, Serialize};

use crate::hos::Itinerary;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    InvalidRequest,
    NoRouteFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TripResponse {
    pub fn ok(itinerary: Itinerary) -> Self {
        TripResponse { status: ResponseStatus::Ok, itinerary: Some(itinerary), error: None }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        TripResponse { status: ResponseStatus::InvalidRequest, itinerary: None, error: Some(message.into()) }
    }
}
