//! Normalizer configuration and location input.

use serde::{Deserialize, Serialize};

/// Meridian of the Korean standard zone (UTC+9), degrees east.
pub const KOREA_STANDARD_MERIDIAN: f64 = 135.0;

/// Zone used when no place or timezone can be resolved.
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// Toggles for each adjustment step. All on by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizerOptions {
    /// Longitude-based local mean time correction.
    pub use_local_time: bool,
    /// Modern DST from the tz database.
    #[serde(rename = "useDST")]
    pub use_dst: bool,
    /// Historical DST exception table.
    #[serde(rename = "useHistoricalDST")]
    pub use_historical_dst: bool,
    /// Shift from the zone's standard offset to the reference meridian.
    pub use_standard_time_zone: bool,
    /// Second-level local mean time and rounding to the minute.
    pub use_seconds_precision: bool,
    /// Reference meridian, degrees east.
    pub reference_standard_meridian: f64,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            use_local_time: true,
            use_dst: true,
            use_historical_dst: true,
            use_standard_time_zone: true,
            use_seconds_precision: true,
            reference_standard_meridian: KOREA_STANDARD_MERIDIAN,
        }
    }
}

impl NormalizerOptions {
    /// Every adjustment disabled; normalization returns its input unchanged.
    pub fn disabled() -> Self {
        Self {
            use_local_time: false,
            use_dst: false,
            use_historical_dst: false,
            use_standard_time_zone: false,
            use_seconds_precision: false,
            ..Self::default()
        }
    }

    /// Reference offset from UTC implied by the reference meridian, minutes.
    pub fn reference_offset_minutes(&self) -> i32 {
        (self.reference_standard_meridian * 4.0).round() as i32
    }
}

/// Where the person was born.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    /// Place name looked up in the directory.
    Named(String),
    /// Coordinates with an explicit timezone.
    Detailed {
        latitude: f64,
        longitude: f64,
        timezone: String,
        #[serde(default)]
        name: Option<String>,
    },
    /// Bare coordinates; the timezone comes from the nearest known place.
    Coordinates { latitude: f64, longitude: f64 },
}

impl Location {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates {
            latitude,
            longitude,
        }
    }

    /// Display name, if the location carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(n) => Some(n),
            Self::Detailed { name, .. } => name.as_deref(),
            Self::Coordinates { .. } => None,
        }
    }
}
