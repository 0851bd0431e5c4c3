/// Convert a temperature in Kelvin to degrees Fahrenheit
///
/// # Examples
/// ```
/// use tdv_processor::utils::kelvin_to_fahrenheit;
///
/// let fahrenheit = kelvin_to_fahrenheit(294.75);
/// assert!((fahrenheit - 70.88).abs() < 0.01);
/// ```
pub fn kelvin_to_fahrenheit(kelvin: f32) -> f32 {
    kelvin * 1.8 - 459.67
}

/// Convert a temperature in degrees Fahrenheit to Kelvin
pub fn fahrenheit_to_kelvin(fahrenheit: f32) -> f32 {
    (fahrenheit + 459.67) / 1.8
}
