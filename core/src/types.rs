//! Shared primitive types used across the sampling engine.

/// Merchant category code, e.g. "5411" for grocery stores.
pub type Mcc = String;

/// Hours in a day; every hourly weight profile has exactly this many entries.
pub const HOURS_PER_DAY: usize = 24;

/// One weight per hour-of-day, index 0 = midnight.
pub type HourlyWeights = [f64; HOURS_PER_DAY];
