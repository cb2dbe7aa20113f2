//! Navigation helpers for positions and headings.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Heading: degrees (0-360, 0=north, 90=east)
//! - Distance: nautical miles (1 nm = 1852 meters)

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Earth's radius in nautical miles.
const EARTH_RADIUS_NM: f64 = 3440.065;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in nautical miles.
    pub fn distance_nm(&self, other: &GeoPoint) -> f64 {
        distance_nm(
            (self.latitude, self.longitude),
            (other.latitude, other.longitude),
        )
    }
}

/// Calculate the great-circle distance between two positions.
///
/// Uses the haversine formula for accuracy over short distances.
///
/// # Example
///
/// ```
/// use flightlog::geo::distance_nm;
///
/// // 1 degree of latitude is ~60nm
/// let dist = distance_nm((0.0, 0.0), (1.0, 0.0));
/// assert!((dist - 60.0).abs() < 0.5);
/// ```
pub fn distance_nm(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1 * DEG_TO_RAD;
    let lat2_rad = lat2 * DEG_TO_RAD;
    let delta_lat = (lat2 - lat1) * DEG_TO_RAD;
    let delta_lon = (lon2 - lon1) * DEG_TO_RAD;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_NM * c
}

/// Smallest angle between two headings, in degrees (0-180).
///
/// A turn through north (355° to 5°) is a 10° change, not 350°.
pub fn heading_delta(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_delta_simple() {
        assert_eq!(heading_delta(0.0, 15.0), 15.0);
        assert_eq!(heading_delta(90.0, 80.0), 10.0);
    }

    #[test]
    fn test_heading_delta_wraps_through_north() {
        assert!((heading_delta(355.0, 5.0) - 10.0).abs() < 1e-9);
        assert!((heading_delta(2.0, 358.0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_heading_delta_opposite() {
        assert_eq!(heading_delta(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_distance_between_airports() {
        // LFBO to LFPG is roughly 328nm
        let toulouse = GeoPoint::new(43.6294, 1.3678);
        let paris = GeoPoint::new(49.0097, 2.5479);
        let dist = toulouse.distance_nm(&paris);
        assert!(dist > 320.0 && dist < 335.0, "got {}", dist);
    }
}
