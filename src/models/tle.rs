use crate::config::conversion::CenturyRule;
use crate::constants::SECONDS_PER_DAY;
use crate::errors::{ConversionError, Result};
use hifitime::{Duration, Epoch};

/// The three raw lines of a NORAD two-line element set, name line included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TleRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl TleRecord {
    /// Splits a name + two data line block. Surrounding whitespace on every line and blank
    /// lines are dropped; anything other than exactly three remaining lines is rejected.
    pub fn from_text(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.len() != 3 {
            return Err(ConversionError::Format(format!(
                "Expected a name line and two data lines, got {} lines",
                lines.len()
            )));
        }

        let record = TleRecord {
            name: lines[0].to_string(),
            line1: lines[1].to_string(),
            line2: lines[2].to_string(),
        };
        record.check_line_numbers()?;
        Ok(record)
    }

    fn check_line_numbers(&self) -> Result<()> {
        for (expected, line) in [('1', &self.line1), ('2', &self.line2)] {
            let mut chars = line.chars();
            if chars.next() != Some(expected) || chars.next() != Some(' ') {
                return Err(ConversionError::Format(format!(
                    "Line {} must start with \"{} \", got {:?}",
                    expected, expected, line
                )));
            }
        }
        Ok(())
    }

    /// NORAD catalog number from line 2.
    pub fn catalog_number(&self) -> Option<u32> {
        self.line2.get(2..7)?.trim().parse().ok()
    }
}

/// Epoch fields of line 1: two-digit year and fractional day of year (1.0 is Jan 1st 00:00).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TleEpoch {
    pub two_digit_year: u32,
    pub day_of_year: f64,
}

impl TleEpoch {
    pub fn year(&self, rule: CenturyRule) -> i32 {
        rule.full_year(self.two_digit_year)
    }

    pub fn to_epoch(&self, rule: CenturyRule) -> Epoch {
        let new_year = Epoch::from_gregorian_utc(self.year(rule), 1, 1, 0, 0, 0, 0);
        new_year + Duration::from_seconds((self.day_of_year - 1.0) * SECONDS_PER_DAY)
    }
}

/// Mean elements as read from line 2. Angles stay in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion_rev_per_day: f64,
    pub epoch: TleEpoch,
}
