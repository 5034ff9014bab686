use crate::config::conversion::{ConversionConfig, InertialFrame};
use crate::coordinates::frame_transformation::{
    earth_fixed_to_pseudo_inertial, earth_rotation_angle, perifocal_to_earth_fixed,
    rotate_about_pole, to_earth_fixed,
};
use crate::errors::Result;
use crate::models::{CartesianRecord, StateVector};
use crate::physics::orbital::{OrbitSolution, OrbitalMechanics};
use crate::tle::parse_tle;
use log::{debug, info};

/// Everything computed along the way for one TLE, for callers that want more than the record.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub record: CartesianRecord,
    pub orbit: OrbitSolution,
    pub earth_fixed: StateVector,
    pub inertial: StateVector,
}

/// Convert a name + two line TLE block to a Cartesian state at its epoch.
pub fn tle_to_cartesian(text: &str, config: &ConversionConfig) -> Result<CartesianRecord> {
    convert(text, config).map(|c| c.record)
}

pub fn convert(text: &str, config: &ConversionConfig) -> Result<Conversion> {
    let (tle, elements) = parse_tle(text)?;
    let orbit = OrbitalMechanics::solve(&elements, config)?;

    let q = perifocal_to_earth_fixed(
        elements.arg_perigee_deg,
        elements.inclination_deg,
        elements.raan_deg,
        config.angles,
    );
    let earth_fixed = to_earth_fixed(&q, &orbit.plane);

    let epoch = elements.epoch.to_epoch(config.century);
    let inertial = match config.frame {
        InertialFrame::RotationRateOnly => earth_fixed_to_pseudo_inertial(&earth_fixed),
        InertialFrame::SiderealRotation => {
            let theta = earth_rotation_angle(&epoch);
            debug!("{}: Earth Rotation Angle {} rad", tle.name, theta);
            rotate_about_pole(&earth_fixed_to_pseudo_inertial(&earth_fixed), theta)
        }
    };

    let record = CartesianRecord::from_state(&tle.name, epoch, &inertial);
    info!(
        "{}: r = {:.3} km, |v| = {:.6} km/s at {}",
        record.satellite_name,
        record.radius_km(),
        record.speed_km_s(),
        record.epoch
    );

    Ok(Conversion {
        record,
        orbit,
        earth_fixed,
        inertial,
    })
}

/// A conversion configuration bound once and reused.
#[derive(Debug, Clone, Copy, Default)]
pub struct TleConverter {
    config: ConversionConfig,
}

impl TleConverter {
    pub fn new(config: ConversionConfig) -> Self {
        TleConverter { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn convert(&self, text: &str) -> Result<CartesianRecord> {
        tle_to_cartesian(text, &self.config)
    }
}
