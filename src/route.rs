use serde::{Deserialize, Serialize};

use crate::hos::error::TransformError;
use crate::hos::geomath::LonLat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub distance: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub distance: f64,
    pub duration: f64,
    #[serde(rename = "type")]
    pub step_type: i64,
    pub instruction: String,
    pub way_points: [usize; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub distance: f64,
    pub duration: f64,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub summary: Summary,
    pub segments: Vec<Segment>,
    pub geometry: String,
    pub way_points: Vec<usize>,
    pub bbox: Vec<f64>,
}

impl Route {
    pub fn validate_segments(&self) -> Result<(), TransformError> {
        if self.segments.is_empty() {
            return Err(TransformError::MissingSegments);
        }
        Ok(())
    }
}

pub fn decode_geometry(geometry: &str) -> Result<Vec<LonLat>, TransformError> {
    if geometry.is_empty() {
        return Err(TransformError::MissingGeometry);
    }
    let line = polyline::decode_polyline(geometry, 5).map_err(|_| TransformError::MissingGeometry)?;
    Ok(line.0.iter().map(|c| LonLat::new(c.x, c.y)).collect())
}

pub fn validate_waypoints(route: &Route, coords: &[LonLat]) -> Result<(), TransformError> {
    for segment in &route.segments {
        for step in &segment.steps {
            for &idx in &step.way_points {
                if idx >= coords.len() {
                    return Err(TransformError::WaypointOutOfRange {
                        index: idx,
                        len: coords.len(),
                    });
                }
            }
        }
    }
    Ok(())
}
