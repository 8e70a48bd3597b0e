use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::route::{decode_geometry, validate_waypoints, Route};

use super::constants::CYCLE_DURATION;
use super::eld::{split_into_daily_logs, EldLog};
use super::error::TransformError;
use super::events::{EventRecorder, HosEvent, Stop};
use super::planner::plan_steps;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HosSummary {
    pub original_travel_seconds: i64,
    pub added_stop_seconds: i64,
    pub total_itinerary_seconds: i64,
    pub total_distance: f64,
    pub cycles_used_end: f64,
    pub cycles_remaining: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub bbox: Vec<f64>,
    pub stops: Vec<Stop>,
    pub hos_events: Vec<HosEvent>,
    pub eld: Vec<EldLog>,
    pub itinerary_total_seconds: i64,
    pub hos_summary: HosSummary,
}

const NOTES: &str = "Stops are computed under 49 CFR 395 property-carrying driver rules: \
11h driving / 14h on-duty window, 30-min break after 8h driving, 70h/8-day cycle, \
and a 1,000-mile fueling interval. This itinerary does not account for adverse \
driving conditions or short-haul exceptions.";

pub fn transform(
    route: &Route,
    current_cycle_used_seconds: f64,
    trip_start: DateTime<Tz>,
) -> Result<Itinerary, TransformError> {
    route.validate_segments()?;
    let coords = decode_geometry(&route.geometry)?;
    validate_waypoints(route, &coords)?;

    let mut recorder = EventRecorder::new(current_cycle_used_seconds);
    plan_steps(route, &coords, &mut recorder);

    let eld = split_into_daily_logs(&recorder.hos_events, trip_start);

    let original_travel_seconds = route.summary.duration as i64;
    let added_stop_seconds: i64 = recorder.stops.iter().map(|s| s.duration_seconds).sum();
    let total_itinerary_seconds = original_travel_seconds + added_stop_seconds;

    Ok(Itinerary {
        bbox: route.bbox.clone(),
        stops: recorder.stops,
        hos_events: recorder.hos_events,
        eld,
        itinerary_total_seconds: total_itinerary_seconds,
        hos_summary: HosSummary {
            original_travel_seconds,
            added_stop_seconds,
            total_itinerary_seconds,
            total_distance: route.summary.distance,
            cycles_used_end: recorder.state.total_cycle_on_duty,
            cycles_remaining: CYCLE_DURATION - recorder.state.total_cycle_on_duty,
            notes: NOTES.to_string(),
        },
    })
}
