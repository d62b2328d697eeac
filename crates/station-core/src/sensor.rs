//! Onboard temperature sensing.
//!
//! The RP2040 exposes its die temperature on an internal ADC channel. The
//! dispatcher reads one raw 12-bit sample per `temp` command and converts
//! it with the linear formula from the RP2040 datasheet.

/// One-shot access to the internal temperature ADC channel.
pub trait TempSensor {
    /// Read one raw 12-bit conversion (0-4095).
    fn read_raw(&mut self) -> u16;
}

/// Convert a raw 12-bit ADC reading to degrees Celsius.
///
/// RP2040 datasheet, section 4.9.5: with a 3.3 V reference,
/// `T = 27 - (V_sense - 0.706) / 0.001721`.
///
/// # Example
///
/// ```
/// use station_core::sensor::temp_celsius;
///
/// // 0.706 V corresponds to 27 degrees.
/// let raw = (0.706 / (3.3 / 4096.0)) as u16;
/// assert!((temp_celsius(raw) - 27.0).abs() < 0.1);
/// ```
pub fn temp_celsius(raw: u16) -> f64 {
    const CONVERSION_FACTOR: f64 = 3.3 / 4096.0;
    27.0 - ((raw as f64 * CONVERSION_FACTOR) - 0.706) / 0.001721
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_point_is_27_degrees() {
        let raw = (0.706_f64 / (3.3 / 4096.0)).round() as u16;
        assert!((temp_celsius(raw) - 27.0).abs() < 0.1);
    }

    #[test]
    fn higher_reading_means_lower_temperature() {
        // Negative slope: more counts means a lower computed temperature.
        assert!(temp_celsius(1000) < temp_celsius(800));
    }

    #[test]
    fn zero_raw_is_hotter_than_full_scale() {
        assert!(temp_celsius(0) > temp_celsius(4095));
    }
}
