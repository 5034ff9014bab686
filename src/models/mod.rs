pub mod state_vector;
pub mod tle;

pub use state_vector::{CartesianRecord, StateVector};
pub use tle::{OrbitalElements, TleEpoch, TleRecord};
