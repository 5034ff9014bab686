pub const MU_EARTH: f64 = 3.986004418e14; // Earth's gravitational parameter (m³/s²)
pub const R_EARTH: f64 = 6378137.0; // WGS84 equatorial radius (m)
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.2921150e-5; // Earth's rotation rate (rad/s)
// No J2: the propagator is pure two-body.

pub const SECONDS_PER_DAY: f64 = 86_400.0;

// Kepler solver
pub const KEPLER_TOLERANCE: f64 = 1e-8;
pub const KEPLER_MAX_ITERATIONS: u32 = 100;

// NORAD two-line element format
pub const TLE_LINE_LENGTH: usize = 69;

// Math
pub const PI: f64 = std::f64::consts::PI;
