pub mod constants;
pub mod progress;
pub mod units;

pub use constants::*;
pub use progress::ProgressReporter;
pub use units::{fahrenheit_to_kelvin, kelvin_to_fahrenheit};
