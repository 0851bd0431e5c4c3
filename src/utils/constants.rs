/// TDV record layout
pub const TDV_FIELD_COUNT: usize = 9;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Report formatting (ctime-style calendar form, e.g. "Mon Aug  3 11:00:00 2015")
pub const REPORT_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";
