//! Streaming parser for X-Plane's apt.dat.
//!
//! Row codes read:
//! - `1`, `16`, `17`: land airport, seaplane base, heliport header
//!   (`<code> <elevation_ft> <deprecated> <deprecated> <id> <name...>`)
//! - `1302 datum_lat|datum_lon <value>`: reference point
//! - `100`, `101`, `102`: land runway, water runway, helipad; their first
//!   coordinate pair is the fallback reference point
//! - `99`: end of data
//!
//! Everything else (taxiways, frequencies, signs) is skipped.

use std::io::{BufRead, BufReader, Read};

use super::Airport;
use crate::geo::GeoPoint;

/// Error type for apt.dat parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid apt.dat format at line {line}: {message}")]
    InvalidFormat { line: usize, message: String },
}

/// Parser for X-Plane apt.dat format.
pub struct AptDatParser;

impl AptDatParser {
    /// Iterate over the airports of an apt.dat stream.
    ///
    /// Airports without a usable reference point are dropped. A malformed
    /// header yields an error for that airport only.
    pub fn parse<R: Read>(reader: R) -> impl Iterator<Item = Result<Airport, ParseError>> {
        Rows {
            reader: BufReader::new(reader),
            buffer: String::new(),
            line: 0,
            pending: None,
            done: false,
        }
    }

    /// Collect every airport, skipping those that fail to parse.
    ///
    /// Read errors abort the whole parse.
    pub fn parse_all<R: Read>(reader: R) -> Result<Vec<Airport>, ParseError> {
        let mut airports = Vec::new();
        for result in Self::parse(reader) {
            match result {
                Ok(airport) => airports.push(airport),
                Err(ParseError::Io(e)) => return Err(ParseError::Io(e)),
                Err(e) => tracing::warn!(error = %e, "Skipping airport"),
            }
        }
        Ok(airports)
    }
}

/// Airport whose rows are still being read.
struct Pending {
    id: String,
    name: String,
    elevation_ft: f32,
    datum: (Option<f64>, Option<f64>),
    fallback: Option<GeoPoint>,
}

impl Pending {
    fn from_header(fields: &[&str], line: usize) -> Result<Self, ParseError> {
        let invalid = |message: &str| ParseError::InvalidFormat {
            line,
            message: message.to_string(),
        };

        if fields.len() < 6 {
            return Err(invalid("airport header needs elevation, id and name"));
        }
        let elevation_ft = fields[1]
            .parse::<f32>()
            .map_err(|_| invalid("airport elevation is not a number"))?;

        Ok(Self {
            id: fields[4].to_string(),
            name: fields[5..].join(" "),
            elevation_ft,
            datum: (None, None),
            fallback: None,
        })
    }

    /// Record the first runway or helipad coordinate pair found.
    fn offer_fallback(&mut self, fields: &[&str], lat_index: usize) {
        if self.fallback.is_none() {
            self.fallback = coordinate(fields, lat_index);
        }
    }

    fn offer_metadata(&mut self, fields: &[&str]) {
        let (Some(key), Some(value)) = (fields.get(1), fields.get(2)) else {
            return;
        };
        let Ok(value) = value.parse::<f64>() else {
            return;
        };
        match *key {
            "datum_lat" if (-90.0..=90.0).contains(&value) => self.datum.0 = Some(value),
            "datum_lon" if (-180.0..=180.0).contains(&value) => self.datum.1 = Some(value),
            _ => {}
        }
    }

    /// Datum is preferred over runway coordinates.
    fn finish(self) -> Option<Airport> {
        let position = match self.datum {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon),
            _ => self.fallback?,
        };
        Some(Airport::new(&self.id, &self.name, position, self.elevation_ft))
    }
}

fn coordinate(fields: &[&str], lat_index: usize) -> Option<GeoPoint> {
    let lat = fields.get(lat_index)?.parse::<f64>().ok()?;
    let lon = fields.get(lat_index + 1)?.parse::<f64>().ok()?;
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Some(GeoPoint::new(lat, lon))
    } else {
        None
    }
}

struct Rows<R: BufRead> {
    reader: R,
    buffer: String,
    line: usize,
    pending: Option<Pending>,
    done: bool,
}

impl<R: BufRead> Rows<R> {
    /// Close the pending airport, if any.
    fn flush(&mut self) -> Option<Airport> {
        self.pending.take().and_then(Pending::finish)
    }
}

impl<R: BufRead> Iterator for Rows<R> {
    type Item = Result<Airport, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => {
                    self.done = true;
                    return self.flush().map(Ok);
                }
                Ok(_) => self.line += 1,
                Err(e) => {
                    self.done = true;
                    return Some(Err(ParseError::Io(e)));
                }
            }

            let fields: Vec<&str> = self.buffer.split_whitespace().collect();
            let Some(code) = fields.first() else {
                continue;
            };

            match *code {
                "1" | "16" | "17" => {
                    let finished = self.pending.take().and_then(Pending::finish);
                    match Pending::from_header(&fields, self.line) {
                        Ok(pending) => self.pending = Some(pending),
                        Err(e) => {
                            // The failed header's rows must not attach to
                            // the previous airport.
                            return Some(match finished {
                                Some(airport) => {
                                    tracing::warn!(error = %e, "Skipping airport");
                                    Ok(airport)
                                }
                                None => Err(e),
                            });
                        }
                    }
                    if let Some(airport) = finished {
                        return Some(Ok(airport));
                    }
                }
                // 100 <width> <surface> <shoulder> <smooth> <centre> <edge> <signs> <id> <lat> <lon> ...
                "100" => {
                    if let Some(p) = self.pending.as_mut() {
                        p.offer_fallback(&fields, 9);
                    }
                }
                // 101 <width> <buoys> <id> <lat> <lon> ...
                "101" => {
                    if let Some(p) = self.pending.as_mut() {
                        p.offer_fallback(&fields, 4);
                    }
                }
                // 102 <id> <lat> <lon> ...
                "102" => {
                    if let Some(p) = self.pending.as_mut() {
                        p.offer_fallback(&fields, 2);
                    }
                }
                "1302" => {
                    if let Some(p) = self.pending.as_mut() {
                        p.offer_metadata(&fields);
                    }
                }
                "99" => {
                    self.done = true;
                    return self.pending.take().and_then(Pending::finish).map(Ok);
                }
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(apt_dat: &str) -> Vec<Airport> {
        AptDatParser::parse_all(apt_dat.as_bytes()).unwrap()
    }

    #[test]
    fn test_datum_reference_point() {
        let airports = parse(
            r#"
I
1100 Version - generated

1 499 0 0 LFBO Toulouse-Blagnac
1302 datum_lat 43.6294
1302 datum_lon 1.3678
1302 icao_code LFBO
100 45.00 1 0 0.25 0 0 0 14 43.6100 1.3500 0 0 0 0 0 2 32 43.6400 1.3800 0 0 0 0 0 2

99
"#,
        );
        assert_eq!(airports.len(), 1);
        let lfbo = &airports[0];
        assert_eq!(lfbo.id, "LFBO");
        assert_eq!(lfbo.name, "Toulouse-Blagnac");
        assert!((lfbo.position.latitude - 43.6294).abs() < 1e-6);
        assert!((lfbo.position.longitude - 1.3678).abs() < 1e-6);
        assert!((lfbo.elevation_ft - 499.0).abs() < 0.1);
    }

    #[test]
    fn test_runway_fallback() {
        let airports = parse(
            r#"
1 13 0 0 KJFK John F Kennedy Intl
100 60.96 1 0 0.25 0 0 0 04L 40.6223 -73.7854 0 0 0 0 0 2 22R 40.6471 -73.7691 0 0 0 0 0 2
99
"#,
        );
        assert_eq!(airports.len(), 1);
        assert!((airports[0].position.latitude - 40.6223).abs() < 1e-6);
        assert!((airports[0].position.longitude - (-73.7854)).abs() < 1e-6);
    }

    #[test]
    fn test_helipad_and_seaplane_base() {
        let airports = parse(
            r#"
17 10 0 0 KJRB Downtown Manhattan Heliport
102 H1 40.7011 -74.0090 90.00 100 100 1 0 0 0.25 0

16 0 0 0 W55 Kenmore Air Harbor
101 30.48 0 N 47.6290 -122.3393 S 47.6215 -122.3380
99
"#,
        );
        let ids: Vec<_> = airports.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["KJRB", "W55"]);
        assert!((airports[1].position.latitude - 47.6290).abs() < 1e-6);
    }

    #[test]
    fn test_airport_without_position_dropped() {
        let airports = parse(
            r#"
1 1500 0 0 NOPOS No Position
1302 city Nowhere

1 1500 0 0 LFPG Paris Charles de Gaulle
1302 datum_lat 49.0097
1302 datum_lon 2.5479
"#,
        );
        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].id, "LFPG");
    }

    #[test]
    fn test_out_of_range_datum_uses_runway() {
        let airports = parse(
            r#"
1 100 0 0 TEST Test Field
1302 datum_lat 123.0
1302 datum_lon 8.5
100 45.00 1 0 0.25 0 0 0 09 47.4589 8.5373 0 0 0 0 0 2 27 47.4566 8.5704 0 0 0 0 0 2
"#,
        );
        assert!((airports[0].position.latitude - 47.4589).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_header_skipped() {
        let apt_dat = r#"
1 high 0 0 BAD Broken Elevation
1302 datum_lat 10.0
1302 datum_lon 10.0

1 13 0 0 GOOD Good Field
1302 datum_lat 20.0
1302 datum_lon 20.0
99
"#;
        let results: Vec<_> = AptDatParser::parse(apt_dat.as_bytes()).collect();
        assert!(matches!(
            results[0],
            Err(ParseError::InvalidFormat { line: 2, .. })
        ));

        let airports = parse(apt_dat);
        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].id, "GOOD");
        assert!((airports[0].position.latitude - 20.0).abs() < 1e-6);
    }
}
