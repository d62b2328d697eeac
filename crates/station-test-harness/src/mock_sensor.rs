//! Mock temperature sensor returning a fixed raw reading.

use station_core::sensor::TempSensor;

/// A mock [`TempSensor`] with a programmable 12-bit reading.
#[derive(Debug)]
pub struct MockTempSensor {
    raw: u16,
    reads: usize,
}

impl MockTempSensor {
    /// Fix the raw conversion the sensor will report.
    pub fn with_raw(raw: u16) -> Self {
        MockTempSensor { raw, reads: 0 }
    }

    /// How many samples have been taken.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Default for MockTempSensor {
    fn default() -> Self {
        // Raw count for roughly 27 degrees on the RP2040 curve.
        MockTempSensor::with_raw(876)
    }
}

impl TempSensor for MockTempSensor {
    fn read_raw(&mut self) -> u16 {
        self.reads += 1;
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_fixed_raw_and_counts_reads() {
        let mut sensor = MockTempSensor::with_raw(1000);
        assert_eq!(sensor.read_raw(), 1000);
        assert_eq!(sensor.read_raw(), 1000);
        assert_eq!(sensor.reads(), 2);
    }
}
