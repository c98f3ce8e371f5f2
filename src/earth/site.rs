//! Terrestrial station geometry: geodetic coordinates, polar motion and the
//! observer's geocentric position and velocity.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{
    Meter, Radian, DPI, EARTH_FLATTENING, EARTH_MAJOR_AXIS, EARTH_ROTATION_RATE, SECONDS_PER_DAY,
};
use crate::ref_frames::{rotmt, PvVector};

/// A ground station: geodetic longitude (east positive), geodetic latitude
/// and height above the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservingSite {
    pub elong: Radian,
    pub phi: Radian,
    pub height: Meter,
}

impl ObservingSite {
    pub fn new(elong: Radian, phi: Radian, height: Meter) -> Self {
        ObservingSite { elong, phi, height }
    }
}

/// Geodetic to geocentric Cartesian coordinates on the WGS84 ellipsoid.
///
/// Arguments
/// ---------
/// * `elong`: geodetic longitude, radians, east positive.
/// * `phi`: geodetic latitude, radians.
/// * `height`: height above the ellipsoid, meters.
///
/// Returns
/// --------
/// * Geocentric position in meters, ITRS axes.
pub fn geodetic_to_geocentric(elong: Radian, phi: Radian, height: Meter) -> Vector3<f64> {
    let sp = phi.sin();
    let cp = phi.cos();
    let w = (1.0 - EARTH_FLATTENING) * (1.0 - EARTH_FLATTENING);
    let d = cp * cp + w * sp * sp;
    let ac = EARTH_MAJOR_AXIS / d.sqrt();
    let als = w * ac;

    let r = (ac + height) * cp;
    Vector3::new(r * elong.cos(), r * elong.sin(), (als + height) * sp)
}

/// Polar-motion matrix: ITRS to the terrestrial intermediate frame.
///
/// `xp`, `yp` are the pole coordinates (radians) and `sp` the TIO locator
/// s′.
pub fn polar_motion_matrix(xp: Radian, yp: Radian, sp: Radian) -> Matrix3<f64> {
    rotmt(yp, 0) * rotmt(xp, 1) * rotmt(-sp, 2)
}

/// Geocentric position and velocity of a terrestrial station, CIRS axes.
///
/// Arguments
/// ---------
/// * `site`: station geodetic coordinates.
/// * `xp`, `yp`: pole coordinates, radians.
/// * `sp`: TIO locator s′, radians.
/// * `theta`: Earth rotation angle, radians.
///
/// Returns
/// --------
/// * Position in meters and velocity in meters per second.
pub fn observer_pv(
    site: &ObservingSite,
    xp: Radian,
    yp: Radian,
    sp: Radian,
    theta: Radian,
) -> PvVector {
    // Mean angular velocity of the Earth, radians per SI second.
    let om = EARTH_ROTATION_RATE * DPI / SECONDS_PER_DAY;

    let xyzm = geodetic_to_geocentric(site.elong, site.phi, site.height);

    // Undo polar motion to reach the intermediate frame of date.
    let xyz = polar_motion_matrix(xp, yp, sp).transpose() * xyzm;
    let (x, y, z) = (xyz[0], xyz[1], xyz[2]);

    // Spin by the Earth rotation angle.
    let s = theta.sin();
    let c = theta.cos();
    PvVector::new(
        Vector3::new(c * x - s * y, s * x + c * y, z),
        Vector3::new(om * (-s * x - c * y), om * (c * x - s * y), 0.0),
    )
}

#[cfg(test)]
mod site_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_geodetic_to_geocentric() {
        let xyz = geodetic_to_geocentric(3.1, -0.5, 2500.0);
        assert_relative_eq!(xyz[0], -5599000.5577049947, epsilon = 1e-7);
        assert_relative_eq!(xyz[1], 233011.67223479203, epsilon = 1e-7);
        assert_relative_eq!(xyz[2], -3040909.4706983363, epsilon = 1e-7);
    }

    #[test]
    fn test_polar_motion_matrix() {
        let xp = 2.55060238e-7;
        let yp = 1.860359247e-6;
        let sp = -0.1367174580728891460e-10;
        let rpom = polar_motion_matrix(xp, yp, sp);

        let expected = Matrix3::new(
            0.9999999999999674721,
            -0.1367174580728846989e-10,
            0.2550602379999972345e-6,
            0.1414624947957029801e-10,
            0.9999999999982695317,
            -0.1860359246998866389e-5,
            -0.2550602379741215021e-6,
            0.1860359247002414021e-5,
            0.9999999999982370039,
        );
        assert_relative_eq!(rpom, expected, epsilon = 1e-15);
    }

    #[test]
    fn test_observer_pv() {
        let site = ObservingSite::new(2.0, 0.5, 3000.0);
        let pv = observer_pv(&site, 1e-6, -0.5e-6, 1e-8, 5.0);

        assert_relative_eq!(pv.position[0], 4225081.367071159207, epsilon = 1e-5);
        assert_relative_eq!(pv.position[1], 3681943.215856198144, epsilon = 1e-5);
        assert_relative_eq!(pv.position[2], 3041149.399241260785, epsilon = 1e-5);
        assert_relative_eq!(pv.velocity[0], -268.4915389365998787, epsilon = 1e-9);
        assert_relative_eq!(pv.velocity[1], 308.0977983288903123, epsilon = 1e-9);
        assert_relative_eq!(pv.velocity[2], 0.0, epsilon = 1e-12);
    }
}
