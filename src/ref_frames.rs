use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Radian, DPI};

/// A position/velocity state vector.
///
/// The units are contextual (meters and m/s for terrestrial station vectors,
/// au and au/day for barycentric ephemerides); each function documents the
/// units it expects. Value semantics: copies are cheap and nothing shares
/// mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PvVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl PvVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        PvVector { position, velocity }
    }
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// This function builds a [`nalgebra::Matrix3`] representing an **active rotation**
/// of a 3D vector by an angle `alpha` around the chosen axis, in the direct
/// (trigonometric) sense.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians**.
/// * `k` - Index of the axis of rotation: `0` → X, `1` → Y, `2` → Z.
///
/// # Returns
///
/// A 3×3 rotation matrix `R` such that the rotated vector is `x' = R · x`.
///
/// # Remarks
///
/// * The returned matrix is orthonormal and satisfies `R.transpose() == R.inverse()`.
/// * A **frame rotation** by `psi` (expressing a fixed vector in a frame rotated
///   by `+psi`) is `rotmt(-psi, k)`; the astrometric context builders compose
///   their frame chains through that identity.
///
/// # Panics
///
/// Panics if `k > 2`, as only axes 0-2 are valid.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Normalize an angle into the range [0, 2π).
pub fn anp(a: Radian) -> Radian {
    let w = a % DPI;
    if w < 0.0 {
        w + DPI
    } else {
        w
    }
}

/// Normalize an angle into the range (-π, +π].
pub fn anpm(a: Radian) -> Radian {
    let mut w = a % DPI;
    if w.abs() >= std::f64::consts::PI {
        w -= DPI.copysign(a);
    }
    w
}

/// Unit vector from spherical coordinates (longitude `theta`, latitude `phi`).
pub fn s2c(theta: Radian, phi: Radian) -> Vector3<f64> {
    let cp = phi.cos();
    Vector3::new(theta.cos() * cp, theta.sin() * cp, phi.sin())
}

/// Spherical coordinates (longitude, latitude) of a direction vector.
///
/// A null vector maps to (0, 0) rather than failing.
pub fn c2s(p: &Vector3<f64>) -> (Radian, Radian) {
    let d2 = p.x * p.x + p.y * p.y;
    let theta = if d2 == 0.0 { 0.0 } else { p.y.atan2(p.x) };
    let phi = if p.z == 0.0 { 0.0 } else { p.z.atan2(d2.sqrt()) };
    (theta, phi)
}

/// Direction and magnitude of a vector; a null vector yields a null direction
/// and zero magnitude.
pub fn unit_and_norm(p: &Vector3<f64>) -> (Vector3<f64>, f64) {
    let r = p.norm();
    if r == 0.0 {
        (Vector3::zeros(), 0.0)
    } else {
        (p / r, r)
    }
}

#[cfg(test)]
mod ref_frames_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotmt_orthonormal() {
        for k in 0..3 {
            let r = rotmt(0.7, k);
            let prod = r * r.transpose();
            assert_relative_eq!(prod, Matrix3::identity(), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_anp_anpm() {
        assert_relative_eq!(anp(-0.1), DPI - 0.1, epsilon = 1e-15);
        assert_relative_eq!(anp(DPI + 0.25), 0.25, epsilon = 1e-12);
        assert_relative_eq!(anpm(DPI - 0.1), -0.1, epsilon = 1e-12);
        assert_relative_eq!(anpm(-4.0), DPI - 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_spherical_round_trip() {
        let v = s2c(2.1, -0.4);
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-15);
        let (theta, phi) = c2s(&v);
        assert_relative_eq!(theta, 2.1, epsilon = 1e-14);
        assert_relative_eq!(phi, -0.4, epsilon = 1e-14);
    }

    #[test]
    fn test_c2s_null_vector() {
        let (theta, phi) = c2s(&Vector3::zeros());
        assert_eq!(theta, 0.0);
        assert_eq!(phi, 0.0);
    }
}
