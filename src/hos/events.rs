use serde::{Deserialize, Serialize};

use super::geomath::LonLat;

#[derive(Debug, Clone, Default)]
pub struct DriverState {
    pub cumulative_driving: f64,
    pub consecutive_driving: f64,
    pub cumulative_on_duty: f64,
    pub total_cycle_on_duty: f64,
    pub cumulative_distance: f64,
    pub seconds_elapsed: f64,
}

impl DriverState {
    pub fn with_used_cycle_seconds(used_cycle_seconds: f64) -> Self {
        DriverState {
            total_cycle_on_duty: used_cycle_seconds,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Break,
    Rest,
    Fuel,
    Service,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HosEvent {
    Drive {
        duration_seconds: i64,
        time_from_start_seconds: i64,
        distance_meters: f64,
        segment_index: usize,
        step_index: usize,
        instruction: String,
    },
    Break {
        duration_seconds: i64,
        time_from_start_seconds: i64,
        reason: String,
        location: LonLat,
    },
    Rest {
        duration_seconds: i64,
        time_from_start_seconds: i64,
        reason: String,
        location: LonLat,
    },
    Fuel {
        duration_seconds: i64,
        time_from_start_seconds: i64,
        reason: String,
        location: LonLat,
    },
    Service {
        duration_seconds: i64,
        time_from_start_seconds: i64,
        reason: String,
        location: LonLat,
        segment_index: usize,
        step_index: usize,
    },
}

impl HosEvent {
    pub fn duration_seconds(&self) -> i64 {
        match self {
            HosEvent::Drive { duration_seconds, .. }
            | HosEvent::Break { duration_seconds, .. }
            | HosEvent::Rest { duration_seconds, .. }
            | HosEvent::Fuel { duration_seconds, .. }
            | HosEvent::Service { duration_seconds, .. } => *duration_seconds,
        }
    }

    pub fn time_from_start_seconds(&self) -> i64 {
        match self {
            HosEvent::Drive { time_from_start_seconds, .. }
            | HosEvent::Break { time_from_start_seconds, .. }
            | HosEvent::Rest { time_from_start_seconds, .. }
            | HosEvent::Fuel { time_from_start_seconds, .. }
            | HosEvent::Service { time_from_start_seconds, .. } => *time_from_start_seconds,
        }
    }

    pub fn stop_kind(&self) -> Option<StopKind> {
        match self {
            HosEvent::Drive { .. } => None,
            HosEvent::Break { .. } => Some(StopKind::Break),
            HosEvent::Rest { .. } => Some(StopKind::Rest),
            HosEvent::Fuel { .. } => Some(StopKind::Fuel),
            HosEvent::Service { .. } => Some(StopKind::Service),
        }
    }

    pub fn location(&self) -> Option<LonLat> {
        match self {
            HosEvent::Drive { .. } => None,
            HosEvent::Break { location, .. }
            | HosEvent::Rest { location, .. }
            | HosEvent::Fuel { location, .. }
            | HosEvent::Service { location, .. } => Some(*location),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    #[serde(rename = "type")]
    pub kind: StopKind,
    pub duration_seconds: i64,
    pub reason: String,
    pub location: LonLat,
    pub time_from_start_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

pub struct EventRecorder {
    pub state: DriverState,
    pub hos_events: Vec<HosEvent>,
    pub stops: Vec<Stop>,
}

impl EventRecorder {
    pub fn new(used_cycle_seconds: f64) -> Self {
        EventRecorder {
            state: DriverState::with_used_cycle_seconds(used_cycle_seconds),
            hos_events: Vec::new(),
            stops: Vec::new(),
        }
    }

    pub fn record_drive(
        &mut self,
        duration: f64,
        distance: f64,
        segment_index: usize,
        step_index: usize,
        instruction: String,
    ) {
        let whole_duration = duration as i64;
        self.hos_events.push(HosEvent::Drive {
            duration_seconds: whole_duration,
            time_from_start_seconds: self.state.seconds_elapsed as i64,
            distance_meters: distance,
            segment_index,
            step_index,
            instruction,
        });
        self.state.cumulative_driving += whole_duration as f64;
        self.state.consecutive_driving += whole_duration as f64;
        self.state.cumulative_on_duty += whole_duration as f64;
        self.state.total_cycle_on_duty += whole_duration as f64;
        self.state.cumulative_distance += distance;
        self.state.seconds_elapsed += duration;
    }

    pub fn record_stop(&mut self, coord: LonLat, kind: StopKind, duration: f64, reason: &str) {
        debug_assert!(matches!(kind, StopKind::Break | StopKind::Rest | StopKind::Fuel));
        let whole_duration = duration as i64;
        let location = coord.rounded();
        let offset = self.state.seconds_elapsed as i64;

        let event = match kind {
            StopKind::Break => HosEvent::Break {
                duration_seconds: whole_duration,
                time_from_start_seconds: offset,
                reason: reason.to_string(),
                location,
            },
            StopKind::Rest => HosEvent::Rest {
                duration_seconds: whole_duration,
                time_from_start_seconds: offset,
                reason: reason.to_string(),
                location,
            },
            StopKind::Fuel => HosEvent::Fuel {
                duration_seconds: whole_duration,
                time_from_start_seconds: offset,
                reason: reason.to_string(),
                location,
            },
            StopKind::Service => unreachable!("service stops go through record_service"),
        };
        self.hos_events.push(event);
        self.stops.push(Stop {
            kind,
            duration_seconds: whole_duration,
            reason: reason.to_string(),
            location,
            time_from_start_seconds: offset,
            address: None,
        });
        self.state.seconds_elapsed += duration;

        match kind {
            StopKind::Rest => {
                self.state.cumulative_driving = 0.0;
                self.state.cumulative_on_duty = 0.0;
                self.state.consecutive_driving = 0.0;
                if duration == super::constants::CYCLE_REST {
                    self.state.total_cycle_on_duty = 0.0;
                }
            }
            StopKind::Break => {
                self.state.consecutive_driving = 0.0;
            }
            StopKind::Fuel => {
                self.state.consecutive_driving = 0.0;
                self.state.cumulative_distance = 0.0;
                self.state.total_cycle_on_duty += duration;
            }
            StopKind::Service => unreachable!(),
        }
    }

    pub fn record_service(
        &mut self,
        coord: LonLat,
        segment_index: usize,
        step_index: usize,
        reason: &str,
    ) {
        let duration = super::constants::PICKUP_DROPOFF_SERVICE;
        let location = coord.rounded();
        let offset = self.state.seconds_elapsed as i64;

        self.hos_events.push(HosEvent::Service {
            duration_seconds: duration as i64,
            time_from_start_seconds: offset,
            reason: reason.to_string(),
            location,
            segment_index,
            step_index,
        });
        self.stops.push(Stop {
            kind: StopKind::Service,
            duration_seconds: duration as i64,
            reason: reason.to_string(),
            location,
            time_from_start_seconds: offset,
            address: None,
        });

        self.state.cumulative_on_duty += duration;
        self.state.total_cycle_on_duty += duration;
        self.state.seconds_elapsed += duration;
        self.state.consecutive_driving = 0.0;
    }
}
