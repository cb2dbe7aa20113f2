//! JSON-lines flight recording reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::telemetry::{SnapshotSource, TelemetrySnapshot};

/// Errors reading a flight recording.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Line {line} is not a JSON object")]
    NotAnObject { line: usize },
}

/// Streaming reader over a recording.
pub struct Recording<R> {
    reader: R,
    buffer: String,
    line: usize,
}

impl Recording<Box<dyn BufRead + Send>> {
    /// Open a recording file, gzip compressed when the extension is `.gz`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RecordingError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader: Box<dyn BufRead + Send> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        tracing::debug!(path = %path.display(), "Opened flight recording");
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> Recording<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    fn parse_line(&self, text: &str) -> Result<TelemetrySnapshot, RecordingError> {
        let line = self.line;
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|source| RecordingError::Json { line, source })?;
        if !value.is_object() {
            return Err(RecordingError::NotAnObject { line });
        }
        serde_json::from_value(value).map_err(|source| RecordingError::Json { line, source })
    }
}

impl<R: BufRead> Iterator for Recording<R> {
    type Item = Result<TelemetrySnapshot, RecordingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(RecordingError::Io(e))),
            }

            let text = self.buffer.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            return Some(self.parse_line(text));
        }
    }
}

impl<R: BufRead> SnapshotSource for Recording<R> {
    type Error = RecordingError;

    fn next_snapshot(&mut self) -> Option<Result<TelemetrySnapshot, Self::Error>> {
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{params, TelemetryValue};

    #[test]
    fn test_reads_snapshots_skipping_comments() {
        let text = r#"# header
{"ts": 1.0, "gs": 0, "on_ground": true, "sim/aircraft/view/acf_ICAO": "A320"}

{"ts": 2.5, "gs": 3.5, "on_ground": 1}
"#;
        let snapshots: Vec<_> = Recording::new(text.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].get(params::GROUND_SPEED), Some(&TelemetryValue::Int(0)));
        assert_eq!(snapshots[0].string(params::AIRCRAFT_ICAO).unwrap(), "A320");
        assert_eq!(snapshots[1].float(params::TIMESTAMP).unwrap(), 2.5);
        assert!(snapshots[1].bool(params::ON_GROUND).unwrap());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "{\"ts\": 1.0}\n{\"ts\": \n{\"ts\": 3.0}\n";
        let results: Vec<_> = Recording::new(text.as_bytes()).collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(RecordingError::Json { line: 2, .. })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_non_object_rejected() {
        let text = "# comment\n[1, 2, 3]\n";
        let results: Vec<_> = Recording::new(text.as_bytes()).collect();
        assert!(matches!(results[0], Err(RecordingError::NotAnObject { line: 2 })));
    }

    #[test]
    fn test_null_value_rejected() {
        let text = "{\"ts\": null}\n";
        let results: Vec<_> = Recording::new(text.as_bytes()).collect();
        assert!(matches!(results[0], Err(RecordingError::Json { line: 1, .. })));
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flight.jsonl");
        std::fs::write(&path, "{\"ts\": 1.0}\n{\"ts\": 2.0}\n").unwrap();

        let mut recording = Recording::open(&path).unwrap();
        assert!(recording.next_snapshot().unwrap().is_ok());
        assert!(recording.next_snapshot().unwrap().is_ok());
        assert!(recording.next_snapshot().is_none());
        assert_eq!(recording.line(), 2);
    }

    #[test]
    fn test_open_missing_file() {
        let result = Recording::open("/nonexistent/flight.jsonl");
        assert!(matches!(result, Err(RecordingError::Io(_))));
    }
}
