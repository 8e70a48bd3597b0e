use log::{debug, trace};

use crate::route::Route;

use super::constants::*;
use super::events::{EventRecorder, StopKind};
use super::geomath::{point_along_line, LonLat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Cycle,
    Rest,
    Break,
}

fn next_trigger(needs_rest: bool, needs_break: bool, over_cycle: bool) -> Option<Trigger> {
    if over_cycle {
        Some(Trigger::Cycle)
    } else if needs_rest {
        Some(Trigger::Rest)
    } else if needs_break {
        Some(Trigger::Break)
    } else {
        None
    }
}

fn predict_distance(prev_duration: f64, prev_distance: f64, new_duration: f64) -> f64 {
    if prev_duration == 0.0 {
        0.0
    } else {
        (prev_distance * new_duration) / prev_duration
    }
}

fn predict_duration(prev_duration: f64, prev_distance: f64, new_distance: f64) -> f64 {
    if prev_distance == 0.0 {
        0.0
    } else {
        (new_distance * prev_duration) / prev_distance
    }
}

pub fn plan_steps(route: &Route, coords: &[LonLat], recorder: &mut EventRecorder) {
    for (seg_idx, segment) in route.segments.iter().enumerate() {
        for (step_idx, step) in segment.steps.iter().enumerate() {
            let mut step_distance = step.distance;
            let mut step_duration = step.duration;
            let [start_idx, end_idx] = step.way_points;

            if step_distance == 0.0 {
                let reason = if seg_idx == 0 { "Pickup Item" } else { "Dropoff Item" };
                trace!("segment {seg_idx} step {step_idx}: zero-distance, recording {reason}");
                recorder.record_service(coords[end_idx], seg_idx, step_idx, reason);
                continue;
            }

            let segment_coords = &coords[start_idx..=end_idx];
            let mut stop_coord = coords[start_idx];

            let needs_rest = recorder.state.cumulative_driving + step_duration >= DRIVE_LIMIT;
            let needs_break =
                recorder.state.consecutive_driving + step_duration >= BREAK_AFTER_DRIVE;
            let over_cycle = recorder.state.total_cycle_on_duty + step_duration >= CYCLE_DURATION;

            if let Some(trigger) = next_trigger(needs_rest, needs_break, over_cycle) {
                let remaining_time = match trigger {
                    Trigger::Cycle => CYCLE_DURATION - recorder.state.total_cycle_on_duty,
                    Trigger::Rest => DRIVE_LIMIT - recorder.state.cumulative_driving,
                    Trigger::Break => BREAK_AFTER_DRIVE - recorder.state.consecutive_driving,
                };

                if remaining_time > 0.0 {
                    let remaining_distance =
                        predict_distance(step_duration, step_distance, remaining_time);
                    let instruction = step.instruction.clone();
                    recorder.record_drive(
                        remaining_time,
                        remaining_distance,
                        seg_idx,
                        step_idx,
                        instruction,
                    );
                    step_duration -= remaining_time;
                    step_distance -= remaining_distance;
                    stop_coord = point_along_line(segment_coords, remaining_distance);
                }

                debug!("segment {seg_idx} step {step_idx}: inserting {trigger:?} stop");
                match trigger {
                    Trigger::Cycle => recorder.record_stop(
                        stop_coord,
                        StopKind::Rest,
                        CYCLE_REST,
                        "Weekly 70 hour limit reached",
                    ),
                    Trigger::Rest => recorder.record_stop(
                        stop_coord,
                        StopKind::Rest,
                        TEN_HOUR_REST,
                        "10-hour rest required (11h driving limit would be exceeded)",
                    ),
                    Trigger::Break => recorder.record_stop(
                        stop_coord,
                        StopKind::Break,
                        BREAK_DURATION,
                        "30-min break required (8h driving)",
                    ),
                }
            }

            let needs_fueling = recorder.state.cumulative_distance + step_distance >= DISTANCE_LIMIT;
            if needs_fueling {
                let remaining_distance = DISTANCE_LIMIT - recorder.state.cumulative_distance;
                if remaining_distance > 0.0 {
                    let remaining_time =
                        predict_duration(step_duration, step_distance, remaining_distance);
                    let instruction = step.instruction.clone();
                    recorder.record_drive(
                        remaining_time,
                        remaining_distance,
                        seg_idx,
                        step_idx,
                        instruction,
                    );
                    step_duration -= remaining_time;
                    step_distance -= remaining_distance;
                    stop_coord = point_along_line(segment_coords, remaining_distance);
                }
                debug!("segment {seg_idx} step {step_idx}: inserting fuel stop");
                recorder.record_stop(
                    stop_coord,
                    StopKind::Fuel,
                    BREAK_DURATION,
                    "1,000 miles has been reached, truck needs fueling",
                );
            }

            recorder.record_drive(
                step_duration,
                step_distance,
                seg_idx,
                step_idx,
                step.instruction.clone(),
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::route::{Segment, Step, Summary};

    fn fake_polyline() -> Vec<LonLat> {
        (0..200)
            .map(|i| LonLat::new(-122.0 + i as f64 * 0.001, 37.0 + i as f64 * 0.001))
            .collect()
    }

    fn route_from_steps(steps: Vec<Step>) -> Route {
        let distance: f64 = steps.iter().map(|s| s.distance).sum();
        let duration: f64 = steps.iter().map(|s| s.duration).sum();
        Route {
            summary: Summary { distance, duration },
            segments: vec![Segment { distance, duration, steps }],
            geometry: String::new(),
            way_points: vec![0],
            bbox: vec![],
        }
    }

    fn step(distance: f64, duration: f64, from: usize, to: usize) -> Step {
        Step {
            distance,
            duration,
            step_type: 1,
            instruction: format!("step {from}-{to}"),
            way_points: [from, to],
        }
    }

    #[test]
    fn short_route_needs_no_stops() {
        let route = route_from_steps(vec![step(1000.0, 1800.0, 0, 1), step(2000.0, 1800.0, 1, 2)]);
        let coords = fake_polyline();
        let mut recorder = EventRecorder::new(0.0);
        plan_steps(&route, &coords, &mut recorder);
        assert_eq!(recorder.stops.len(), 0);
        let drive_events = recorder
            .hos_events
            .iter()
            .filter(|e| e.stop_kind().is_none())
            .count();
        assert_eq!(drive_events, 2);
    }

    #[test]
    fn triggers_single_break_between_steps() {
        let route =
            route_from_steps(vec![step(100_000.0, 27_000.0, 0, 1), step(100_000.0, 3_600.0, 1, 2)]);
        let coords = fake_polyline();
        let mut recorder = EventRecorder::new(0.0);
        plan_steps(&route, &coords, &mut recorder);
        let breaks: Vec<_> = recorder.stops.iter().filter(|s| s.kind == StopKind::Break).collect();
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].duration_seconds, BREAK_DURATION as i64);
    }

    #[test]
    fn triggers_single_rest_between_steps() {
        let route =
            route_from_steps(vec![step(360_000.0, 36_000.0, 0, 1), step(72_000.0, 7_200.0, 1, 2)]);
        let coords = fake_polyline();
        let mut recorder = EventRecorder::new(0.0);
        plan_steps(&route, &coords, &mut recorder);
        let rests: Vec<_> = recorder.stops.iter().filter(|s| s.kind == StopKind::Rest).collect();
        assert_eq!(rests.len(), 1);
        assert_eq!(rests[0].duration_seconds, TEN_HOUR_REST as i64);
        // The step that busts the 11h limit is split around the rest, so its
        // 7200s is covered by two drive fragments, not one.
        let drive_total: i64 = recorder
            .hos_events
            .iter()
            .filter(|e| e.stop_kind().is_none())
            .map(|e| e.duration_seconds())
            .sum();
        assert_eq!(drive_total, 36_000 + 7_200);
        let offsets: Vec<i64> = recorder
            .hos_events
            .iter()
            .map(|e| e.time_from_start_seconds())
            .collect();
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn zero_distance_step_is_a_service_stop() {
        let route = route_from_steps(vec![
            step(5000.0, 1800.0, 0, 1),
            Step { distance: 0.0, duration: 0.0, step_type: 0, instruction: "Service".to_string(), way_points: [1, 1] },
            step(5000.0, 1800.0, 1, 2),
        ]);
        let coords = fake_polyline();
        let mut recorder = EventRecorder::new(0.0);
        plan_steps(&route, &coords, &mut recorder);
        let services: Vec<_> = recorder.stops.iter().filter(|s| s.kind == StopKind::Service).collect();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].duration_seconds, PICKUP_DROPOFF_SERVICE as i64);
    }

    #[test]
    fn degenerate_zero_duration_nonzero_distance_step_does_not_panic() {
        let route = route_from_steps(vec![step(1000.0, 0.0, 0, 1)]);
        let coords = fake_polyline();
        let mut recorder = EventRecorder::new(0.0);
        plan_steps(&route, &coords, &mut recorder);
        assert_eq!(recorder.hos_events.len(), 1);
        assert_eq!(recorder.hos_events[0].duration_seconds(), 0);
    }

    #[test]
    fn fueling_can_stack_with_an_hos_stop_in_the_same_step() {
        // Long step that both busts the 11h drive limit and crosses 1000 miles.
        let route = route_from_steps(vec![step(1_700_000.0, 40_000.0, 0, 1)]);
        let coords = fake_polyline();
        let mut recorder = EventRecorder::new(0.0);
        plan_steps(&route, &coords, &mut recorder);
        assert!(recorder.stops.iter().any(|s| s.kind == StopKind::Rest));
        assert!(recorder.stops.iter().any(|s| s.kind == StopKind::Fuel));
        // HOS stop ordering: whichever triggers, it is recorded before the fuel stop.
        let rest_pos = recorder.stops.iter().position(|s| s.kind == StopKind::Rest);
        let fuel_pos = recorder.stops.iter().position(|s| s.kind == StopKind::Fuel);
        assert!(rest_pos < fuel_pos);
    }
}
