//! Two-body conversion of NORAD two-line element sets into Cartesian position and velocity
//! at the TLE epoch.
pub mod config;
pub mod constants;
pub mod conversion;
pub mod coordinates;
pub mod errors;
pub mod models;
pub mod output;
pub mod physics;
pub mod tle;

pub use config::conversion::{AngleConvention, CenturyRule, ConversionConfig, InertialFrame};
pub use conversion::{convert, tle_to_cartesian, Conversion, TleConverter};
pub use errors::{ConversionError, Result};
pub use models::CartesianRecord;
