use crate::config::conversion::{AngleConvention, CenturyRule, ConversionConfig};
use crate::constants::{KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE, MU_EARTH, PI, SECONDS_PER_DAY};
use crate::errors::{ConversionError, Result};
use crate::models::tle::OrbitalElements;
use log::{debug, warn};
use nalgebra as na;

/// Converged root of Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly [rad], not wrapped.
    pub eccentric_anomaly: f64,
    pub iterations: u32,
}

/// Orbital-plane (perifocal) quantities; `z` of both vectors is always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneGeometry {
    pub semi_latus_rectum: f64,
    pub radius: f64,
    pub position: na::Vector3<f64>,
    pub velocity: na::Vector3<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSolution {
    pub semi_major_axis: f64,
    pub period: f64,
    pub year: i32,
    pub seconds_since_reference: f64,
    pub mean_anomaly_deg: f64,
    pub kepler: KeplerSolution,
    pub plane: PlaneGeometry,
}

pub struct OrbitalMechanics;

#[allow(non_snake_case)]
impl OrbitalMechanics {
    /// Runs the whole solver stage for one element set.
    pub fn solve(elements: &OrbitalElements, config: &ConversionConfig) -> Result<OrbitSolution> {
        Self::validate(elements)?;

        let n = elements.mean_motion_rev_per_day;
        let e = elements.eccentricity;

        let a = Self::semi_major_axis(n);
        if !a.is_finite() || a <= 0.0 {
            return Err(ConversionError::Domain(format!(
                "semi-major axis must be positive, got {} m",
                a
            )));
        }
        let T = Self::orbital_period(a);

        let year = elements.epoch.year(config.century);
        if config.century == CenturyRule::Legacy2000 && elements.epoch.two_digit_year >= 57 {
            warn!(
                "epoch year {:02} read as {}, most likely a 19xx epoch",
                elements.epoch.two_digit_year, year
            );
        }
        let seconds = Self::seconds_since_reference(year, elements.epoch.day_of_year);
        let M = Self::mean_anomaly_at_epoch(elements.mean_anomaly_deg, n, seconds, T);
        debug!("a = {} m, T = {} s, year = {}, M = {} deg", a, T, year, M);

        let kepler = Self::solve_kepler(M, e, config.angles)?;
        if kepler.iterations > KEPLER_MAX_ITERATIONS / 2 {
            warn!(
                "Kepler's equation needed {} iterations (e = {})",
                kepler.iterations, e
            );
        }
        debug!(
            "E = {} rad after {} iterations",
            kepler.eccentric_anomaly, kepler.iterations
        );

        Ok(OrbitSolution {
            semi_major_axis: a,
            period: T,
            year,
            seconds_since_reference: seconds,
            mean_anomaly_deg: M,
            kepler,
            plane: Self::plane_state(a, e, kepler.eccentric_anomaly),
        })
    }

    pub fn validate(elements: &OrbitalElements) -> Result<()> {
        let e = elements.eccentricity;
        if !(0.0..1.0).contains(&e) {
            return Err(ConversionError::Domain(format!(
                "eccentricity must be in [0, 1), got {}",
                e
            )));
        }

        let n = elements.mean_motion_rev_per_day;
        if !n.is_finite() || n <= 0.0 {
            return Err(ConversionError::Domain(format!(
                "mean motion must be positive, got {} rev/day",
                n
            )));
        }
        Ok(())
    }

    /// Semi-major axis [m] from mean motion [rev/day], through Kepler's third law.
    pub fn semi_major_axis(mean_motion: f64) -> f64 {
        let period = SECONDS_PER_DAY / mean_motion;
        (MU_EARTH * period * period / (4.0 * PI * PI)).cbrt()
    }

    pub fn orbital_period(a: f64) -> f64 {
        2.0 * PI * (a.powi(3) / MU_EARTH).sqrt()
    }

    /// Seconds between 2000-01-01 and the epoch, with one leap day every fourth year.
    /// Not calendar accurate (2100 is counted as a leap year).
    pub fn seconds_since_reference(year: i32, day_of_year: f64) -> f64 {
        let years = (year - 2000) as f64;
        (365.0 * years + (years / 4.0).floor() + day_of_year - 1.0) * SECONDS_PER_DAY
    }

    /// Mean anomaly [deg] advanced from the TLE value, wrapped to [0, 360).
    pub fn mean_anomaly_at_epoch(
        mean_anomaly: f64,
        mean_motion: f64,
        seconds: f64,
        T: f64,
    ) -> f64 {
        (mean_anomaly + mean_motion * 360.0 * seconds / T).rem_euclid(360.0)
    }

    /// Newton iteration on `E - e sin E = M`, stopping once successive iterates are closer
    /// than `KEPLER_TOLERANCE`. `M` is in degrees.
    ///
    /// `LegacyDegrees` starts from `E = M` with no safeguard. `Radians` wraps `M` into
    /// [0, 2π), starts from `E = M` (or `E = π` above e = 0.8) and keeps every iterate
    /// inside `[M - e, M + e]`, falling back to bisection when a Newton step leaves it.
    pub fn solve_kepler(M: f64, e: f64, convention: AngleConvention) -> Result<KeplerSolution> {
        match convention {
            AngleConvention::LegacyDegrees => {
                // Iterates in degrees, only the trig arguments are converted.
                let (E, iterations) = Self::iterate_kepler_degrees(M, e)?;
                Ok(KeplerSolution {
                    eccentric_anomaly: E.to_radians(),
                    iterations,
                })
            }
            AngleConvention::Radians => {
                let M = M.to_radians().rem_euclid(2.0 * PI);
                let (E, iterations) = Self::bracketed_kepler(M, e)?;
                Ok(KeplerSolution {
                    eccentric_anomaly: E,
                    iterations,
                })
            }
        }
    }

    fn iterate_kepler_degrees(M: f64, e: f64) -> Result<(f64, u32)> {
        let mut E = M;
        let mut residual = f64::NAN;

        for iteration in 1..=KEPLER_MAX_ITERATIONS {
            let angle = E.to_radians();
            let E_next = E + (M + e * angle.sin() - E) / (1.0 - e * angle.cos());
            residual = (E_next - E).abs();
            E = E_next;
            if residual < KEPLER_TOLERANCE {
                return Ok((E, iteration));
            }
        }

        Err(ConversionError::Convergence {
            iterations: KEPLER_MAX_ITERATIONS,
            residual,
        })
    }

    /// The root of `f(E) = E - e sin E - M` always lies in `[M - e, M + e]`, and `f` is
    /// non-decreasing, so the sign of `f` at each iterate narrows that bracket.
    fn bracketed_kepler(M: f64, e: f64) -> Result<(f64, u32)> {
        let (mut lo, mut hi) = (M - e, M + e);
        let mut E = if e > 0.8 { PI.max(lo).min(hi) } else { M };
        let mut residual = f64::NAN;

        for iteration in 1..=KEPLER_MAX_ITERATIONS {
            let (sin_E, cos_E) = E.sin_cos();
            if E - e * sin_E - M < 0.0 {
                lo = E;
            } else {
                hi = E;
            }

            let E_next = E + (M + e * sin_E - E) / (1.0 - e * cos_E);
            if (lo..=hi).contains(&E_next) {
                residual = (E_next - E).abs();
                E = E_next;
                if residual < KEPLER_TOLERANCE {
                    return Ok((E, iteration));
                }
            } else {
                // Only a Newton step may end the iteration.
                E = 0.5 * (lo + hi);
            }
        }

        Err(ConversionError::Convergence {
            iterations: KEPLER_MAX_ITERATIONS,
            residual,
        })
    }

    /// Position [m] and velocity [m/s] in the orbital plane for eccentric anomaly `E` [rad].
    pub fn plane_state(a: f64, e: f64, E: f64) -> PlaneGeometry {
        let (sin_E, cos_E) = E.sin_cos();

        let p = a * (1.0 - e * e);
        let r = p / (1.0 + e * cos_E);
        let v = (MU_EARTH * p).sqrt() / r;

        PlaneGeometry {
            semi_latus_rectum: p,
            radius: r,
            position: na::Vector3::new(r * cos_E, r * sin_E, 0.0),
            velocity: na::Vector3::new(-v * sin_E, v * (e + cos_E), 0.0),
        }
    }
}
