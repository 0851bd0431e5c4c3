use crate::analyzers::ClimateAnalyzer;
use crate::error::{ProcessingError, Result};
use crate::models::Observation;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, TDV_FIELD_COUNT};
use crate::utils::units::kelvin_to_fahrenheit;
use chrono::{DateTime, Utc};
use memmap2::Mmap;
use tracing::warn;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Decode an epoch-millisecond field, truncating to whole seconds
fn parse_epoch_millis(field: &str) -> Result<DateTime<Utc>> {
    let millis = field
        .parse::<i64>()
        .map_err(|_| ProcessingError::InvalidFormat(format!("Invalid timestamp: '{}'", field)))?;

    DateTime::from_timestamp(millis / 1000, 0).ok_or(ProcessingError::InvalidTimestamp(millis))
}

fn parse_measurement(field: &str, name: &str) -> Result<f32> {
    field
        .parse::<f32>()
        .map_err(|_| ProcessingError::InvalidFormat(format!("Invalid {}: '{}'", name, field)))
}

/// Per-file ingestion counters
#[derive(Debug, Clone, Default)]
pub struct IngestStats {
    /// Number of observations folded into the analyzer
    pub records_ingested: u64,
    /// Number of lines rejected by the parser
    pub malformed_lines: u64,
}

impl IngestStats {
    pub fn merge(&mut self, other: &IngestStats) {
        self.records_ingested += other.records_ingested;
        self.malformed_lines += other.malformed_lines;
    }
}

pub struct ObservationReader {
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Ingest every observation in a TDV file into the analyzer.
    ///
    /// Malformed lines are logged, counted, and skipped; only failures to
    /// read the file itself surface as errors.
    pub fn ingest_file(&self, path: &Path, analyzer: &mut ClimateAnalyzer) -> Result<IngestStats> {
        if self.use_mmap {
            self.ingest_mmap(path, analyzer)
        } else {
            self.ingest_buffered(path, analyzer)
        }
    }

    /// Ingest using buffered I/O
    fn ingest_buffered(&self, path: &Path, analyzer: &mut ClimateAnalyzer) -> Result<IngestStats> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut stats = IngestStats::default();
        let mut line_number = 0;

        for line_result in reader.lines() {
            let line = line_result?;
            line_number += 1;
            self.ingest_line(&line, line_number, path, analyzer, &mut stats);
        }

        Ok(stats)
    }

    /// Ingest using memory-mapped I/O for large files
    fn ingest_mmap(&self, path: &Path, analyzer: &mut ClimateAnalyzer) -> Result<IngestStats> {
        let file = File::open(path)?;

        // Zero-length files cannot be mapped portably
        if file.metadata()?.len() == 0 {
            return Ok(IngestStats::default());
        }

        let mmap = unsafe { Mmap::map(&file)? };
        let content = std::str::from_utf8(&mmap)
            .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid UTF-8: {}", e)))?;

        let mut stats = IngestStats::default();
        let mut line_number = 0;

        for line in content.lines() {
            line_number += 1;
            self.ingest_line(line, line_number, path, analyzer, &mut stats);
        }

        Ok(stats)
    }

    fn ingest_line(
        &self,
        line: &str,
        line_number: usize,
        path: &Path,
        analyzer: &mut ClimateAnalyzer,
        stats: &mut IngestStats,
    ) {
        // Skip empty lines
        if line.trim().is_empty() {
            return;
        }

        match self.parse_observation_line(line) {
            Ok(observation) => {
                analyzer.ingest(observation);
                stats.records_ingested += 1;
            }
            Err(e) => {
                stats.malformed_lines += 1;
                warn!(
                    "{}:{}: skipping malformed line: {}",
                    path.display(),
                    line_number,
                    e
                );
            }
        }
    }

    /// Parse a single TDV line into an observation
    pub fn parse_observation_line(&self, line: &str) -> Result<Observation> {
        // Expected format: STATE, TIMESTAMP_MS, GEOHASH, HUMIDITY, SNOW,
        // CLOUD_COVER, LIGHTNING, PRESSURE, TEMPERATURE_K
        let fields: Vec<&str> = line.split('\t').map(|s| s.trim()).collect();

        if fields.len() != TDV_FIELD_COUNT {
            return Err(ProcessingError::InvalidFormat(format!(
                "Expected {} fields, found {}",
                TDV_FIELD_COUNT,
                fields.len()
            )));
        }

        let region_code = fields[0];
        if region_code.is_empty() {
            return Err(ProcessingError::InvalidFormat(
                "Empty region code".to_string(),
            ));
        }

        let timestamp = parse_epoch_millis(fields[1])?;

        // Fields 2 (geohash) and 7 (station pressure) are carried in the
        // format but not aggregated
        let humidity = parse_measurement(fields[3], "humidity")?;
        let snow = parse_measurement(fields[4], "snow flag")? != 0.0;
        let cloud_cover = parse_measurement(fields[5], "cloud cover")?;
        let lightning = parse_measurement(fields[6], "lightning flag")? != 0.0;
        let kelvin = parse_measurement(fields[8], "temperature")?;

        Ok(Observation::new(
            region_code.to_string(),
            timestamp,
            humidity,
            snow,
            cloud_cover,
            lightning,
            kelvin_to_fahrenheit(kelvin),
        ))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
