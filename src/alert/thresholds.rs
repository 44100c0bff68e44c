//! Water quality index bands and flood status codes.
//!
//! Both are pure lookups with fixed thresholds. The WQI bands are inclusive
//! at their lower bound:
//!
//!   Poor < 40 <= Moderate < 75 <= Good

use std::fmt;

/// Lower bound of the Good band.
pub const WQI_GOOD_MIN: f64 = 75.0;

/// Lower bound of the Moderate band.
pub const WQI_MODERATE_MIN: f64 = 40.0;

/// Water quality categories, in ascending order of quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WaterQualityStatus {
    Poor,
    Moderate,
    Good,
}

impl WaterQualityStatus {
    pub fn label(self) -> &'static str {
        match self {
            WaterQualityStatus::Poor => "Poor",
            WaterQualityStatus::Moderate => "Moderate",
            WaterQualityStatus::Good => "Good",
        }
    }
}

impl fmt::Display for WaterQualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a water quality index.
///
/// Total over every `f64`: values above 100 are Good, negative values and
/// NaN are Poor. There is no out-of-range error.
pub fn classify(wqi: f64) -> WaterQualityStatus {
    if wqi >= WQI_GOOD_MIN {
        WaterQualityStatus::Good
    } else if wqi >= WQI_MODERATE_MIN {
        WaterQualityStatus::Moderate
    } else {
        WaterQualityStatus::Poor
    }
}

/// Label for a flood observatory status code.
pub fn flood_status_label(code: i64) -> &'static str {
    match code {
        1 => "Low",
        2 => "Normal flow",
        3 => "Moderate flow",
        4 => "Major flow",
        _ => "Unknown status",
    }
}
