//! Calculator configuration.

use saju_time::{KOREA_STANDARD_MERIDIAN, NormalizerMode, NormalizerOptions};
use serde::{Deserialize, Serialize};

use crate::error::SajuError;

/// Flat options record. Every toggle is on by default except the
/// international mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorOptions {
    pub use_local_time: bool,
    #[serde(rename = "useDST")]
    pub use_dst: bool,
    #[serde(rename = "useHistoricalDST")]
    pub use_historical_dst: bool,
    pub use_standard_time_zone: bool,
    /// Measure against the birth zone's own meridian instead of the reference.
    pub use_international_mode: bool,
    pub use_seconds_precision: bool,
    pub reference_standard_meridian: f64,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            use_local_time: true,
            use_dst: true,
            use_historical_dst: true,
            use_standard_time_zone: true,
            use_international_mode: false,
            use_seconds_precision: true,
            reference_standard_meridian: KOREA_STANDARD_MERIDIAN,
        }
    }
}

impl CalculatorOptions {
    /// Every adjustment off, domestic mode.
    pub fn disabled() -> Self {
        Self {
            use_local_time: false,
            use_dst: false,
            use_historical_dst: false,
            use_standard_time_zone: false,
            use_international_mode: false,
            use_seconds_precision: false,
            reference_standard_meridian: KOREA_STANDARD_MERIDIAN,
        }
    }

    pub fn mode(&self) -> NormalizerMode {
        if self.use_international_mode {
            NormalizerMode::International
        } else {
            NormalizerMode::Domestic
        }
    }

    pub fn normalizer_options(&self) -> NormalizerOptions {
        NormalizerOptions {
            use_local_time: self.use_local_time,
            use_dst: self.use_dst,
            use_historical_dst: self.use_historical_dst,
            use_standard_time_zone: self.use_standard_time_zone,
            use_seconds_precision: self.use_seconds_precision,
            reference_standard_meridian: self.reference_standard_meridian,
        }
    }

    /// Apply a partial update.
    pub fn apply(&mut self, patch: &OptionsPatch) {
        macro_rules! take {
            ($field:ident) => {
                if let Some(v) = patch.$field {
                    self.$field = v;
                }
            };
        }
        take!(use_local_time);
        take!(use_dst);
        take!(use_historical_dst);
        take!(use_standard_time_zone);
        take!(use_international_mode);
        take!(use_seconds_precision);
        take!(reference_standard_meridian);
    }
}

/// Partial update of [`CalculatorOptions`]. Unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPatch {
    pub use_local_time: Option<bool>,
    #[serde(rename = "useDST")]
    pub use_dst: Option<bool>,
    #[serde(rename = "useHistoricalDST")]
    pub use_historical_dst: Option<bool>,
    pub use_standard_time_zone: Option<bool>,
    pub use_international_mode: Option<bool>,
    pub use_seconds_precision: Option<bool>,
    pub reference_standard_meridian: Option<f64>,
}

impl OptionsPatch {
    pub fn from_json(json: &str) -> Result<Self, SajuError> {
        serde_json::from_str(json).map_err(|e| SajuError::Table(format!("options: {e}")))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
