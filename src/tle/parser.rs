use crate::constants::TLE_LINE_LENGTH;
use crate::errors::{ConversionError, Result};
use crate::models::tle::{OrbitalElements, TleEpoch, TleRecord};
use log::{debug, warn};
use std::ops::Range;
use std::str::FromStr;

// NORAD column ranges, zero based and end exclusive.
const EPOCH_YEAR: Range<usize> = 18..20;
const EPOCH_DAY: Range<usize> = 20..32;
const INCLINATION: Range<usize> = 8..16;
const RAAN: Range<usize> = 17..25;
const ECCENTRICITY: Range<usize> = 26..33;
const ARG_PERIGEE: Range<usize> = 34..42;
const MEAN_ANOMALY: Range<usize> = 43..51;
const MEAN_MOTION: Range<usize> = 52..63;

/// Parse a name + two line block into the raw record and its mean elements.
pub fn parse_tle(text: &str) -> Result<(TleRecord, OrbitalElements)> {
    let record = TleRecord::from_text(text)?;
    let elements = parse_elements(&record)?;
    Ok((record, elements))
}

pub fn parse_elements(record: &TleRecord) -> Result<OrbitalElements> {
    for (n, line) in [(1, &record.line1), (2, &record.line2)] {
        if line.len() != TLE_LINE_LENGTH {
            warn!(
                "{}: line {} is {} characters long, expected {}",
                record.name,
                n,
                line.len(),
                TLE_LINE_LENGTH
            );
        }
    }

    let line1 = record.line1.as_str();
    let line2 = record.line2.as_str();

    let epoch = TleEpoch {
        two_digit_year: field(line1, EPOCH_YEAR, "epoch year")?,
        day_of_year: field(line1, EPOCH_DAY, "epoch day of year")?,
    };
    if !(1.0..367.0).contains(&epoch.day_of_year) {
        return Err(ConversionError::parse(
            "epoch day of year",
            columns(line1, EPOCH_DAY, "epoch day of year")?,
        ));
    }

    let elements = OrbitalElements {
        inclination_deg: field(line2, INCLINATION, "inclination")?,
        raan_deg: field(line2, RAAN, "raan")?,
        eccentricity: eccentricity(line2)?,
        arg_perigee_deg: field(line2, ARG_PERIGEE, "argument of perigee")?,
        mean_anomaly_deg: field(line2, MEAN_ANOMALY, "mean anomaly")?,
        mean_motion_rev_per_day: field(line2, MEAN_MOTION, "mean motion")?,
        epoch,
    };

    debug!("{}: inclination {} deg", record.name, elements.inclination_deg);
    debug!("{}: raan {} deg", record.name, elements.raan_deg);
    debug!("{}: eccentricity {}", record.name, elements.eccentricity);
    debug!(
        "{}: argument of perigee {} deg",
        record.name, elements.arg_perigee_deg
    );
    debug!("{}: mean anomaly {} deg", record.name, elements.mean_anomaly_deg);
    debug!(
        "{}: mean motion {} rev/day",
        record.name, elements.mean_motion_rev_per_day
    );
    debug!(
        "{}: epoch year {:02} day {}",
        record.name, epoch.two_digit_year, epoch.day_of_year
    );

    Ok(elements)
}

/// Eccentricity is written without its leading "0.", so "0002445" means 0.0002445.
fn eccentricity(line: &str) -> Result<f64> {
    let raw = columns(line, ECCENTRICITY, "eccentricity")?;
    let digits = raw.trim();
    if digits.is_empty() || digits.starts_with(['-', '+']) {
        return Err(ConversionError::parse("eccentricity", raw));
    }

    let text = if digits.contains('.') {
        digits.to_string()
    } else {
        format!("0.{}", digits)
    };
    text.parse()
        .map_err(|_| ConversionError::parse("eccentricity", raw))
}

fn columns<'a>(line: &'a str, range: Range<usize>, name: &'static str) -> Result<&'a str> {
    line.get(range)
        .ok_or_else(|| ConversionError::parse(name, line))
}

fn field<T: FromStr>(line: &str, range: Range<usize>, name: &'static str) -> Result<T> {
    let raw = columns(line, range, name)?;
    raw.trim()
        .parse()
        .map_err(|_| ConversionError::parse(name, raw))
}
