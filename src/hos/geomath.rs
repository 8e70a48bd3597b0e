use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl From<[f64; 2]> for LonLat {
    fn from(pair: [f64; 2]) -> Self {
        LonLat { lon: pair[0], lat: pair[1] }
    }
}

impl Serialize for LonLat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.lon, self.lat].serialize(serializer)
    }
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        LonLat { lon, lat }
    }

    pub fn rounded(&self) -> LonLat {
        LonLat {
            lon: (self.lon * 1e6).round() / 1e6,
            lat: (self.lat * 1e6).round() / 1e6,
        }
    }

    fn distance_to(&self, other: &LonLat) -> f64 {
        ((self.lon - other.lon).powi(2) + (self.lat - other.lat).powi(2)).sqrt()
    }
}

pub fn point_along_line(coords: &[LonLat], target_m: f64) -> LonLat {
    assert!(!coords.is_empty(), "point_along_line: empty coordinate list");
    if coords.len() == 1 || target_m <= 0.0 {
        return coords[0];
    }

    let mut remaining = target_m;
    for pair in coords.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let segment_len = start.distance_to(&end);
        if segment_len == 0.0 {
            continue;
        }
        if remaining <= segment_len {
            let t = remaining / segment_len;
            return LonLat {
                lon: start.lon + (end.lon - start.lon) * t,
                lat: start.lat + (end.lat - start.lat) * t,
            };
        }
        remaining -= segment_len;
    }
    *coords.last().unwrap()
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::{point_along_line, LonLat};

    fn line() -> Vec<LonLat> {
        vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 1.0),
        ]
    }

    #[test]
    fn interpolates_within_first_segment() {
        let p = point_along_line(&line(), 0.5);
        assert_abs_diff_eq!(p.lon, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(p.lat, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn interpolates_into_second_segment() {
        let p = point_along_line(&line(), 1.25);
        assert_abs_diff_eq!(p.lon, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.lat, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn clamps_past_end() {
        let p = point_along_line(&line(), 100.0);
        assert_abs_diff_eq!(p.lon, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.lat, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_target_is_first_vertex() {
        let p = point_along_line(&line(), 0.0);
        assert_abs_diff_eq!(p.lon, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.lat, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn single_point_polyline_returns_that_point() {
        let p = point_along_line(&[LonLat::new(3.0, 4.0)], 10.0);
        assert_abs_diff_eq!(p.lon, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.lat, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn serializes_as_a_two_element_array() {
        let p = LonLat::new(-122.5, 37.25);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[-122.5,37.25]");
    }

    #[test]
    fn deserializes_from_a_two_element_array() {
        let p: LonLat = serde_json::from_str("[-122.5,37.25]").unwrap();
        assert_eq!(p, LonLat::new(-122.5, 37.25));
    }
}
