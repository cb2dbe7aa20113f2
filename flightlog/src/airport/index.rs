//! Airport index with identifier and nearest-position lookup.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use super::parser::{AptDatParser, ParseError};
use super::Airport;
use crate::geo::GeoPoint;

/// Error type for airport index operations.
#[derive(Debug, thiserror::Error)]
pub enum AirportIndexError {
    #[error("apt.dat not found at: {0}")]
    NotFound(PathBuf),
    #[error("Failed to parse apt.dat: {0}")]
    ParseError(#[from] ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory airport database.
///
/// Nearest lookups scan every airport; the global apt.dat holds roughly
/// 40k entries, which is fast enough at departure and arrival.
#[derive(Debug, Default)]
pub struct AirportIndex {
    airports: Vec<Airport>,
    by_id: HashMap<String, usize>,
}

impl AirportIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate and load the apt.dat of an X-Plane installation.
    ///
    /// Checks these locations in order:
    /// - `{xplane}/Global Scenery/Global Airports/Earth nav data/apt.dat`
    /// - the same with `.gz`
    /// - `{xplane}/Resources/default scenery/default apt dat/Earth nav data/apt.dat`
    pub fn from_xplane_path<P: AsRef<Path>>(xplane_path: P) -> Result<Self, AirportIndexError> {
        let root = xplane_path.as_ref();
        let global = root
            .join("Global Scenery")
            .join("Global Airports")
            .join("Earth nav data");
        let candidates = [
            global.join("apt.dat"),
            global.join("apt.dat.gz"),
            root.join("Resources")
                .join("default scenery")
                .join("default apt dat")
                .join("Earth nav data")
                .join("apt.dat"),
        ];

        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Self::from_apt_dat(path),
            None => Err(AirportIndexError::NotFound(candidates[0].clone())),
        }
    }

    /// Load an apt.dat file, gzip compressed when the extension is `.gz`.
    pub fn from_apt_dat<P: AsRef<Path>>(path: P) -> Result<Self, AirportIndexError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AirportIndexError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        if path.extension().is_some_and(|ext| ext == "gz") {
            tracing::debug!(path = %path.display(), "Loading gzip compressed apt.dat");
            Self::from_reader(BufReader::new(GzDecoder::new(file)))
        } else {
            Self::from_reader(BufReader::new(file))
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AirportIndexError> {
        let index: Self = AptDatParser::parse_all(reader)?.into_iter().collect();
        tracing::info!(count = index.len(), "Built airport index");
        Ok(index)
    }

    /// Add an airport. A later airport with the same identifier replaces
    /// the earlier one for identifier lookups.
    pub fn insert(&mut self, airport: Airport) {
        let key = airport.id.to_uppercase();
        self.by_id.insert(key, self.airports.len());
        self.airports.push(airport);
    }

    /// Look up an airport by identifier, case-insensitive.
    pub fn get(&self, id: &str) -> Option<&Airport> {
        self.by_id
            .get(&id.to_uppercase())
            .and_then(|&i| self.airports.get(i))
    }

    /// The airport closest to `position` and its distance in nautical miles.
    pub fn nearest(&self, position: GeoPoint) -> Option<(&Airport, f64)> {
        self.airports
            .iter()
            .map(|airport| (airport, airport.position.distance_nm(&position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }
}

impl FromIterator<Airport> for AirportIndex {
    fn from_iter<I: IntoIterator<Item = Airport>>(iter: I) -> Self {
        let mut index = Self::new();
        for airport in iter {
            index.insert(airport);
        }
        index
    }
}
