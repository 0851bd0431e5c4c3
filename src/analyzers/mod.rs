pub mod climate_analyzer;

pub use climate_analyzer::{ClimateAnalyzer, RegionStatistics};
