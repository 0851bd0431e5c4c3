use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single decoded TDV observation.
///
/// Carries the fields the aggregation pipeline consumes: the region code
/// used as the grouping key, the observation time (truncated to whole
/// seconds), and the retained surface measurements. Temperatures are held
/// in degrees Fahrenheit; the reader converts from the Kelvin values the
/// wire format carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub region_code: String,
    pub timestamp: DateTime<Utc>,
    pub humidity: f32,
    pub snow: bool,
    pub cloud_cover: f32,
    pub lightning: bool,
    pub temperature: f32,
}

impl Observation {
    pub fn new(
        region_code: String,
        timestamp: DateTime<Utc>,
        humidity: f32,
        snow: bool,
        cloud_cover: f32,
        lightning: bool,
        temperature: f32,
    ) -> Self {
        Self {
            region_code,
            timestamp,
            humidity,
            snow,
            cloud_cover,
            lightning,
            temperature,
        }
    }
}
