use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the angles read from a TLE reach the trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleConvention {
    /// Degree values are fed straight into `sin`/`cos` for the rotation matrix and Kepler's
    /// equation is iterated in degrees. Kept for compatibility with older outputs.
    LegacyDegrees,
    #[default]
    Radians,
}

/// Mapping of the two-digit TLE epoch year to a full year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenturyRule {
    /// Always `2000 + yy`.
    Legacy2000,
    /// `yy >= 57` is 19yy, anything else 20yy.
    #[default]
    Norad1957,
}

impl CenturyRule {
    pub fn full_year(&self, two_digit_year: u32) -> i32 {
        let yy = two_digit_year as i32;
        match self {
            CenturyRule::Legacy2000 => 2000 + yy,
            CenturyRule::Norad1957 if yy >= 57 => 1900 + yy,
            CenturyRule::Norad1957 => 2000 + yy,
        }
    }
}

/// Approximation used to go from the Earth-fixed frame to the inertial-like output frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InertialFrame {
    /// Position unchanged, Earth's rotational velocity removed from the velocity.
    #[default]
    RotationRateOnly,
    /// `RotationRateOnly`, then rotated about the pole by the Earth Rotation Angle at epoch.
    SiderealRotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub angles: AngleConvention,
    pub century: CenturyRule,
    pub frame: InertialFrame,
}

impl ConversionConfig {
    /// Degree-valued trig and `2000 + yy` epochs, as the historical script did.
    pub fn legacy() -> Self {
        ConversionConfig {
            angles: AngleConvention::LegacyDegrees,
            century: CenturyRule::Legacy2000,
            frame: InertialFrame::RotationRateOnly,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
