use crate::config::conversion::AngleConvention;
use crate::constants::{EARTH_ANGULAR_VELOCITY, PI};
use crate::models::state_vector::StateVector;
use crate::physics::orbital::PlaneGeometry;
use hifitime::Epoch;
use nalgebra as na;

fn trig_angle(degrees: f64, convention: AngleConvention) -> f64 {
    match convention {
        AngleConvention::LegacyDegrees => degrees,
        AngleConvention::Radians => degrees.to_radians(),
    }
}

/// Frame rotation (not a vector rotation) by `angle` about `axis`.
fn frame_rotation(axis: &na::Unit<na::Vector3<f64>>, angle: f64) -> na::Rotation3<f64> {
    na::Rotation3::from_axis_angle(axis, -angle)
}

/// Perifocal to Earth-fixed transform `Q = R3(ω) · R1(i) · R3(Ω)`. Angles are given in
/// degrees and reach the trig functions according to `convention`.
pub fn perifocal_to_earth_fixed(
    arg_perigee: f64,
    inclination: f64,
    raan: f64,
    convention: AngleConvention,
) -> na::Matrix3<f64> {
    let rot_omega = frame_rotation(&na::Vector3::z_axis(), trig_angle(arg_perigee, convention));
    let rot_i = frame_rotation(&na::Vector3::x_axis(), trig_angle(inclination, convention));
    let rot_omega_cap = frame_rotation(&na::Vector3::z_axis(), trig_angle(raan, convention));

    (rot_omega * rot_i * rot_omega_cap).into_inner()
}

pub fn to_earth_fixed(q: &na::Matrix3<f64>, plane: &PlaneGeometry) -> StateVector {
    StateVector::new(q * plane.position, q * plane.velocity)
}

/// Strips Earth's rotation from the velocity: `v - ω × r`. Position is left untouched, so
/// the result is only an approximation of an inertial state.
pub fn earth_fixed_to_pseudo_inertial(state: &StateVector) -> StateVector {
    let omega = na::Vector3::new(0.0, 0.0, EARTH_ANGULAR_VELOCITY);
    StateVector::new(state.position, state.velocity - omega.cross(&state.position))
}

/// Earth Rotation Angle [rad] in [0, 2π), with UT1 taken as UTC.
pub fn earth_rotation_angle(epoch: &Epoch) -> f64 {
    let jd = epoch.to_jde_utc_days();
    let theta = 2.0 * PI * (0.7790572732640 + 1.00273781191135448 * (jd - 2451545.0));
    theta.rem_euclid(2.0 * PI)
}

/// Rotates both vectors about the polar axis by `theta` [rad].
pub fn rotate_about_pole(state: &StateVector, theta: f64) -> StateVector {
    let rotation = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), theta);
    StateVector::new(rotation * state.position, rotation * state.velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(AngleConvention::Radians; "radians")]
    #[test_case(AngleConvention::LegacyDegrees; "legacy degrees")]
    fn transform_is_orthonormal(convention: AngleConvention) {
        let angles = [0.0, 13.7, 51.6447, 90.0, 179.9, 205.0635, 319.1422, 359.0];
        for &w in &angles {
            for &i in &angles[..5] {
                for &raan in &angles {
                    let q = perifocal_to_earth_fixed(w, i, raan, convention);
                    let product = q.transpose() * q;
                    assert_abs_diff_eq!(product, na::Matrix3::identity(), epsilon = 1e-12);
                    assert_abs_diff_eq!(q.determinant(), 1.0, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn zero_angles_give_identity() {
        let q = perifocal_to_earth_fixed(0.0, 0.0, 0.0, AngleConvention::Radians);
        assert_abs_diff_eq!(q, na::Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn matches_explicit_matrices() {
        let (w, i, raan) = (30.0_f64, 60.0_f64, 45.0_f64);
        let q = perifocal_to_earth_fixed(w, i, raan, AngleConvention::Radians);

        let (w, i, raan) = (w.to_radians(), i.to_radians(), raan.to_radians());
        let rot1 = na::Matrix3::new(w.cos(), w.sin(), 0.0, -w.sin(), w.cos(), 0.0, 0.0, 0.0, 1.0);
        let rot2 = na::Matrix3::new(1.0, 0.0, 0.0, 0.0, i.cos(), i.sin(), 0.0, -i.sin(), i.cos());
        let rot3 = na::Matrix3::new(
            raan.cos(),
            raan.sin(),
            0.0,
            -raan.sin(),
            raan.cos(),
            0.0,
            0.0,
            0.0,
            1.0,
        );
        assert_abs_diff_eq!(q, rot1 * rot2 * rot3, epsilon = 1e-12);
    }

    #[test]
    fn legacy_feeds_degrees_to_trig() {
        let q = perifocal_to_earth_fixed(1.0, 0.0, 0.0, AngleConvention::LegacyDegrees);
        assert_abs_diff_eq!(q[(0, 0)], 1.0_f64.cos(), epsilon = 1e-15);
        assert_abs_diff_eq!(q[(0, 1)], 1.0_f64.sin(), epsilon = 1e-15);
    }

    #[test]
    fn rotation_preserves_radius() {
        let plane = PlaneGeometry {
            semi_latus_rectum: 7.0e6,
            radius: 7.0e6,
            position: na::Vector3::new(4.2e6, 5.6e6, 0.0),
            velocity: na::Vector3::new(-6.0e3, 4.5e3, 0.0),
        };
        let q = perifocal_to_earth_fixed(319.1422, 51.6447, 205.0635, AngleConvention::Radians);
        let state = to_earth_fixed(&q, &plane);
        assert_abs_diff_eq!(state.position.magnitude(), 7.0e6, epsilon = 1e-6);
        assert_abs_diff_eq!(state.velocity.magnitude(), 7.5e3, epsilon = 1e-9);
    }

    #[test]
    fn pseudo_inertial_only_touches_velocity() {
        let state = StateVector::new(na::Vector3::new(7.0e6, 0.0, 1.0e6), na::Vector3::zeros());
        let inertial = earth_fixed_to_pseudo_inertial(&state);
        assert_eq!(inertial.position, state.position);
        assert_abs_diff_eq!(
            inertial.velocity,
            na::Vector3::new(0.0, -EARTH_ANGULAR_VELOCITY * 7.0e6, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn rotation_angle_at_j2000() {
        let epoch = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);
        assert_abs_diff_eq!(
            earth_rotation_angle(&epoch),
            2.0 * PI * 0.7790572732640,
            epsilon = 1e-6
        );
    }

    #[test]
    fn rotation_angle_repeats_each_stellar_day() {
        let epoch = Epoch::from_gregorian_utc(2021, 2, 26, 6, 38, 34, 0);
        let later = epoch + hifitime::Duration::from_seconds(86_164.0989);
        let diff = (earth_rotation_angle(&later) - earth_rotation_angle(&epoch)).abs();
        assert!(diff < 1e-5 || (2.0 * PI - diff) < 1e-5, "{diff}");
    }

    #[test]
    fn pole_rotation_keeps_z_and_norm() {
        let state = StateVector::new(
            na::Vector3::new(1.0, 2.0, 3.0),
            na::Vector3::new(-4.0, 5.0, 6.0),
        );
        let rotated = rotate_about_pole(&state, PI / 2.0);
        let expected = na::Vector3::new(-2.0, 1.0, 3.0);
        assert_abs_diff_eq!(rotated.position, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(
            rotated.velocity.magnitude(),
            state.velocity.magnitude(),
            epsilon = 1e-12
        );
    }
}
