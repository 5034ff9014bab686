use crate::constants::R_EARTH;
use hifitime::Epoch;
use nalgebra as na;
use serde::Serialize;
use std::fmt;

/// Position and velocity in SI units (m, m/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: na::Vector3<f64>,
    pub velocity: na::Vector3<f64>,
}

impl StateVector {
    pub fn new(position: na::Vector3<f64>, velocity: na::Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }
}

/// Final output of a conversion, in kilometers and kilometers per second.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianRecord {
    pub satellite_name: String,
    pub epoch: Epoch,
    pub position_km: na::Vector3<f64>,
    pub velocity_km_s: na::Vector3<f64>,
}

impl CartesianRecord {
    pub fn from_state(satellite_name: &str, epoch: Epoch, state: &StateVector) -> Self {
        CartesianRecord {
            satellite_name: satellite_name.to_string(),
            epoch,
            position_km: state.position / 1000.0,
            velocity_km_s: state.velocity / 1000.0,
        }
    }

    pub fn radius_km(&self) -> f64 {
        self.position_km.magnitude()
    }

    pub fn speed_km_s(&self) -> f64 {
        self.velocity_km_s.magnitude()
    }

    /// Height above the equatorial radius, not a geodetic altitude.
    pub fn altitude_km(&self) -> f64 {
        self.radius_km() - R_EARTH / 1000.0
    }

    pub fn to_row(&self) -> CartesianRow<'_> {
        CartesianRow {
            satellite_name: &self.satellite_name,
            epoch: self.epoch.to_string(),
            x_km: self.position_km.x,
            y_km: self.position_km.y,
            z_km: self.position_km.z,
            vx_km_s: self.velocity_km_s.x,
            vy_km_s: self.velocity_km_s.y,
            vz_km_s: self.velocity_km_s.z,
        }
    }
}

/// Key-value text layout consumed by the plotting scripts.
impl fmt::Display for CartesianRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SATNAME: {}", self.satellite_name)?;
        writeln!(f, "X: {:.6}", self.position_km.x)?;
        writeln!(f, "Y: {:.6}", self.position_km.y)?;
        writeln!(f, "Z: {:.6}", self.position_km.z)?;
        writeln!(f, "VX: {:.6}", self.velocity_km_s.x)?;
        writeln!(f, "VY: {:.6}", self.velocity_km_s.y)?;
        writeln!(f, "VZ: {:.6}", self.velocity_km_s.z)
    }
}

/// Flat CSV row for a `CartesianRecord`.
#[derive(Debug, Serialize)]
pub struct CartesianRow<'a> {
    pub satellite_name: &'a str,
    pub epoch: String,
    pub x_km: f64,
    pub y_km: f64,
    pub z_km: f64,
    pub vx_km_s: f64,
    pub vy_km_s: f64,
    pub vz_km_s: f64,
}
