/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Convert an absolute temperature in Kelvin to degrees Celsius.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Display policy for temperatures: two decimals.
pub fn format_celsius(celsius: f64) -> String {
    format!("{celsius:.2}")
}
