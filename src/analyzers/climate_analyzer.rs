use crate::models::Observation;
use crate::utils::constants::REPORT_TIME_FORMAT;
use chrono::{DateTime, Local, Utc};
use std::collections::HashMap;

/// Render an observation time in the local calendar form used by the report
fn format_report_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(REPORT_TIME_FORMAT)
        .to_string()
}

/// Running statistics for one region, folded up record by record.
///
/// Sums are kept in f64 to bound drift over large record counts; averages
/// are derived at report time rather than stored.
#[derive(Debug, Clone)]
pub struct RegionStatistics {
    pub region_code: String,
    pub record_count: u64,
    pub sum_humidity: f64,
    pub sum_temperature: f64,
    pub sum_cloud_cover: f64,
    pub snow_records: u64,
    pub lightning_strikes: u64,
    pub max_temperature: f32,
    pub max_timestamp: DateTime<Utc>,
    pub min_temperature: f32,
    pub min_timestamp: DateTime<Utc>,
}

impl RegionStatistics {
    /// Seed an accumulator from the first observation of a region
    pub fn from_observation(observation: &Observation) -> Self {
        Self {
            region_code: observation.region_code.clone(),
            record_count: 1,
            sum_humidity: observation.humidity as f64,
            sum_temperature: observation.temperature as f64,
            sum_cloud_cover: observation.cloud_cover as f64,
            snow_records: if observation.snow { 1 } else { 0 },
            lightning_strikes: if observation.lightning { 1 } else { 0 },
            max_temperature: observation.temperature,
            max_timestamp: observation.timestamp,
            min_temperature: observation.temperature,
            min_timestamp: observation.timestamp,
        }
    }

    /// Fold one more observation into the running statistics
    pub fn add(&mut self, observation: &Observation) {
        self.record_count += 1;
        self.sum_humidity += observation.humidity as f64;
        self.sum_temperature += observation.temperature as f64;
        self.sum_cloud_cover += observation.cloud_cover as f64;

        if observation.snow {
            self.snow_records += 1;
        }
        if observation.lightning {
            self.lightning_strikes += 1;
        }

        // Strict comparisons: a tie keeps the earlier observation and its time
        if observation.temperature > self.max_temperature {
            self.max_temperature = observation.temperature;
            self.max_timestamp = observation.timestamp;
        }
        if observation.temperature < self.min_temperature {
            self.min_temperature = observation.temperature;
            self.min_timestamp = observation.timestamp;
        }
    }

    pub fn average_humidity(&self) -> f64 {
        self.sum_humidity / self.record_count as f64
    }

    pub fn average_temperature(&self) -> f64 {
        self.sum_temperature / self.record_count as f64
    }

    pub fn average_cloud_cover(&self) -> f64 {
        self.sum_cloud_cover / self.record_count as f64
    }

    pub fn summary(&self) -> String {
        format!(
            "-- State: {} --\n\
            Number of Records: {}\n\
            Average Humidity: {:.1}%\n\
            Average Temperature: {:.1}F\n\
            Max Temperature: {:.1}F\n\
            Max Temperature on: {}\n\
            Min Temperature: {:.1}F\n\
            Min Temperature on: {}\n\
            Lightning Strikes: {}\n\
            Records with Snow Cover: {}\n\
            Average Cloud Cover: {:.1}%",
            self.region_code,
            self.record_count,
            self.average_humidity(),
            self.average_temperature(),
            self.max_temperature,
            format_report_time(&self.max_timestamp),
            self.min_temperature,
            format_report_time(&self.min_timestamp),
            self.lightning_strikes,
            self.snow_records,
            self.average_cloud_cover(),
        )
    }
}

/// Single-pass aggregation store: one accumulator per region code,
/// created the first time a code is seen and updated on every record after.
pub struct ClimateAnalyzer {
    statistics: HashMap<String, RegionStatistics>,
    discovery_order: Vec<String>,
    total_records: u64,
}

impl ClimateAnalyzer {
    pub fn new() -> Self {
        Self {
            statistics: HashMap::new(),
            discovery_order: Vec::new(),
            total_records: 0,
        }
    }

    /// Route one observation to its region accumulator
    pub fn ingest(&mut self, observation: Observation) {
        self.total_records += 1;

        if let Some(statistics) = self.statistics.get_mut(&observation.region_code) {
            statistics.add(&observation);
        } else {
            self.discovery_order.push(observation.region_code.clone());
            self.statistics.insert(
                observation.region_code.clone(),
                RegionStatistics::from_observation(&observation),
            );
        }
    }

    pub fn region(&self, region_code: &str) -> Option<&RegionStatistics> {
        self.statistics.get(region_code)
    }

    /// Iterate accumulators in the order their regions were first seen
    pub fn regions(&self) -> impl Iterator<Item = &RegionStatistics> {
        self.discovery_order
            .iter()
            .filter_map(|code| self.statistics.get(code))
    }

    /// Region codes in discovery order
    pub fn region_codes(&self) -> &[String] {
        &self.discovery_order
    }

    pub fn region_count(&self) -> usize {
        self.discovery_order.len()
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn is_empty(&self) -> bool {
        self.statistics.is_empty()
    }

    /// Render the full run report: the region roster followed by one
    /// summary block per region, in discovery order
    pub fn report(&self) -> String {
        let mut report = format!("States found: {}\n", self.discovery_order.join(" "));

        for statistics in self.regions() {
            report.push_str(&statistics.summary());
            report.push('\n');
        }

        report
    }
}

impl Default for ClimateAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
