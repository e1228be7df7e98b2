//! Provides constants for the library.

/// Sensor range used when none is configured
pub const DEFAULT_SENSOR_RANGE: i32 = 6;
