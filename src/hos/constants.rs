pub const METERS_PER_MILE: f64 = 1609.344;

pub const DRIVE_LIMIT: f64 = 11.0 * 3600.0;

pub const BREAK_AFTER_DRIVE: f64 = 8.0 * 3600.0;

pub const BREAK_DURATION: f64 = 30.0 * 60.0;

pub const TEN_HOUR_REST: f64 = 10.0 * 3600.0;

pub const PICKUP_DROPOFF_SERVICE: f64 = 3600.0;

pub const CYCLE_DURATION: f64 = 70.0 * 3600.0;

pub const CYCLE_REST: f64 = 34.0 * 3600.0;

pub const DISTANCE_LIMIT: f64 = 1_000.0 * METERS_PER_MILE;
