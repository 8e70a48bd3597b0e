use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::Tz;
use log::debug;
use serde::{Deserialize, Serialize};

use super::events::HosEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EldEventType {
    Drive,
    OffDuty,
    OnDuty,
}

impl EldEventType {
    fn of(event: &HosEvent) -> EldEventType {
        match event {
            HosEvent::Drive { .. } => EldEventType::Drive,
            HosEvent::Break { .. } | HosEvent::Rest { .. } => EldEventType::OffDuty,
            HosEvent::Service { .. } | HosEvent::Fuel { .. } => EldEventType::OnDuty,
        }
    }
}

fn reason_of(event: &HosEvent) -> Option<String> {
    match event {
        HosEvent::Drive { .. } => None,
        HosEvent::Break { reason, .. }
        | HosEvent::Rest { reason, .. }
        | HosEvent::Fuel { reason, .. }
        | HosEvent::Service { reason, .. } => Some(reason.clone()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EldEvent {
    pub event_type: EldEventType,
    pub time_from_start_seconds: i64,
    pub duration_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EldLog {
    pub start_time: DateTime<Tz>,
    pub log_events: Vec<EldEvent>,
    pub total_driving: i64,
    pub total_off_duty: i64,
    pub total_on_duty: i64,
}

impl EldLog {
    fn new(start_time: DateTime<Tz>) -> Self {
        EldLog {
            start_time,
            log_events: Vec::new(),
            total_driving: 0,
            total_off_duty: 0,
            total_on_duty: 0,
        }
    }

    fn add_total(&mut self, event_type: EldEventType, duration_seconds: i64) {
        match event_type {
            EldEventType::Drive => self.total_driving += duration_seconds,
            EldEventType::OffDuty => self.total_off_duty += duration_seconds,
            EldEventType::OnDuty => self.total_on_duty += duration_seconds,
        }
    }
}

// Boundary is exclusive: a start exactly 30 minutes before midnight is left alone.
pub fn snap_to_next_day(dt: DateTime<Tz>) -> DateTime<Tz> {
    let next_midnight = next_midnight_after(dt);
    if next_midnight - dt < Duration::minutes(30) {
        next_midnight
    } else {
        dt
    }
}

fn next_midnight_after(dt: DateTime<Tz>) -> DateTime<Tz> {
    let next_date = dt.date_naive() + Duration::days(1);
    dt.timezone()
        .from_local_datetime(&next_date.and_hms_opt(0, 0, 0).unwrap())
        .single()
        .expect("midnight is unambiguous in all IANA timezones")
}

fn crosses_midnight(day_start: DateTime<Tz>, seconds_from_start: i64) -> bool {
    let end = day_start + Duration::seconds(seconds_from_start);
    day_start.date_naive() != end.date_naive()
}

fn seconds_until_midnight(day_start: DateTime<Tz>, cur_total: i64) -> i64 {
    let current = day_start + Duration::seconds(cur_total);
    (next_midnight_after(day_start) - current).num_seconds()
}

fn append_event(
    log_events: &mut Vec<EldEvent>,
    event_type: EldEventType,
    time_from_start: i64,
    duration_seconds: i64,
    remark: Option<String>,
) {
    if let Some(prev) = log_events.last_mut() {
        if prev.event_type == event_type {
            prev.duration_seconds += duration_seconds;
            return;
        }
    }
    log_events.push(EldEvent {
        event_type,
        time_from_start_seconds: time_from_start,
        duration_seconds,
        remark,
    });
}

pub fn split_into_daily_logs(events: &[HosEvent], trip_start: DateTime<Tz>) -> Vec<EldLog> {
    if events.is_empty() {
        return Vec::new();
    }

    let initial_time = snap_to_next_day(trip_start);
    if initial_time != trip_start {
        debug!("snapped trip start {trip_start} forward to midnight {initial_time}");
    }
    let mut logs = vec![EldLog::new(initial_time)];
    let mut cur_total: i64 = 0;

    for event in events {
        let event_type = EldEventType::of(event);
        let duration = event.duration_seconds();
        let reason = reason_of(event);
        let n = logs.len() - 1;

        if crosses_midnight(logs[n].start_time, cur_total + duration) {
            let splittable = seconds_until_midnight(logs[n].start_time, cur_total);
            let spills_over = duration > splittable;
            let new_start = next_midnight_after(logs[n].start_time);
            debug!("opening new ELD log at {new_start}");

            if spills_over {
                let remainder = duration - splittable;
                append_event(&mut logs[n].log_events, event_type, cur_total, splittable, reason.clone());
                logs[n].add_total(event_type, splittable);

                let mut new_log = EldLog::new(new_start);
                append_event(&mut new_log.log_events, event_type, 0, remainder, reason);
                new_log.add_total(event_type, remainder);
                logs.push(new_log);
                cur_total = remainder;
                continue;
            }

            logs.push(EldLog::new(new_start));
            cur_total = 0;
        }

        let n = logs.len() - 1;
        append_event(&mut logs[n].log_events, event_type, cur_total, duration, reason);
        logs[n].add_total(event_type, duration);
        cur_total += duration;
    }

    logs
}
