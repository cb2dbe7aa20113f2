//! Airport database read from X-Plane's `apt.dat`.
//!
//! Resolves the airport a flight departs from or arrives at by nearest
//! great-circle distance to the aircraft position.
//!
//! # Data Source
//!
//! X-Plane 12 ships the global airport set at
//! `{XPlane}/Global Scenery/Global Airports/Earth nav data/apt.dat`.
//! Gzip compressed copies (`apt.dat.gz`) are read transparently.
//!
//! # Example
//!
//! ```
//! use flightlog::airport::AirportIndex;
//! use flightlog::geo::GeoPoint;
//!
//! let apt_dat = "\
//! I
//! 1100 Version
//! 1 499 0 0 LFBO Toulouse-Blagnac
//! 1302 datum_lat 43.6294
//! 1302 datum_lon 1.3678
//! 99
//! ";
//! let index = AirportIndex::from_reader(apt_dat.as_bytes()).unwrap();
//! let (airport, distance) = index.nearest(GeoPoint::new(43.63, 1.37)).unwrap();
//! assert_eq!(airport.id, "LFBO");
//! assert!(distance < 1.0);
//! ```

mod index;
mod parser;

use serde::Serialize;

use crate::geo::GeoPoint;

pub use index::{AirportIndex, AirportIndexError};
pub use parser::{AptDatParser, ParseError};

/// An airport, seaplane base or heliport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    /// ICAO code, or the X-Plane identifier when the field has none.
    pub id: String,
    pub name: String,
    /// Reference point.
    pub position: GeoPoint,
    pub elevation_ft: f32,
}

impl Airport {
    pub fn new(id: &str, name: &str, position: GeoPoint, elevation_ft: f32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            position,
            elevation_ft,
        }
    }
}
