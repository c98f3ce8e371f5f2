//! Earth rotation angle and the CIO-based intermediate frame.

use nalgebra::Matrix3;

use crate::constants::{Radian, DJ00, DJC, DPI, RADSEC};
use crate::ref_frames::{anp, rotmt};

/// Earth rotation angle, IAU 2000 model.
///
/// Arguments
/// ---------
/// * `dj1`, `dj2`: UT1 as a two-part Julian Date.
///
/// Returns
/// --------
/// * Earth rotation angle in radians, in [0, 2π).
///
/// The split of the UT1 epoch is free, but precision is best when `dj1` is
/// the half-integral day count: the fractional parts of the two components
/// are summed separately from the whole days before entering the linear
/// model, so the sub-microarcsecond terms survive.
pub fn era00(dj1: f64, dj2: f64) -> Radian {
    let (d1, d2) = if dj1 < dj2 { (dj1, dj2) } else { (dj2, dj1) };

    // Days since the fundamental epoch.
    let t = d1 + (d2 - DJ00);

    // Fractional part of T, in days.
    let f = (d1 % 1.0) + (d2 % 1.0);

    anp(DPI * (f + 0.7790572732640 + 0.00273781191135448 * t))
}

/// The TIO locator s′, positioning the Terrestrial Intermediate Origin on
/// the equator of the Celestial Intermediate Pole.
///
/// Arguments
/// ---------
/// * `date1`, `date2`: TT as a two-part Julian Date.
///
/// Returns
/// --------
/// * s′ in radians. The model is the secular -47 μas/century drift; the
///   neglected terms are below 1 μas over the next century.
pub fn sp00(date1: f64, date2: f64) -> Radian {
    let t = ((date1 - DJ00) + date2) / DJC;
    -47e-6 * t * RADSEC
}

/// Equation of the origins, given the classical NPB matrix and the CIO
/// locator s.
///
/// The result is the ERA minus Greenwich apparent sidereal time, or
/// equivalently the CIO right ascension of the true equinox of date.
pub fn eors(rnpb: &Matrix3<f64>, s: Radian) -> Radian {
    let x = rnpb[(2, 0)];
    let ax = x / (1.0 + rnpb[(2, 2)]);
    let xs = 1.0 - ax * x;
    let ys = -ax * rnpb[(2, 1)];
    let zs = -x;
    let p = rnpb[(0, 0)] * xs + rnpb[(0, 1)] * ys + rnpb[(0, 2)] * zs;
    let q = rnpb[(1, 0)] * xs + rnpb[(1, 1)] * ys + rnpb[(1, 2)] * zs;

    if p != 0.0 || q != 0.0 {
        s - q.atan2(p)
    } else {
        s
    }
}

/// Celestial-to-intermediate matrix from the CIP coordinates `(x, y)` and
/// the CIO locator `s`.
///
/// `v_cirs = M · v_gcrs`.
pub fn cirs_matrix(x: f64, y: f64, s: Radian) -> Matrix3<f64> {
    let r2 = x * x + y * y;
    let e = if r2 > 0.0 { y.atan2(x) } else { 0.0 };
    let d = (r2 / (1.0 - r2)).sqrt().atan();

    // Spherical construction: rotate the CIP into place, then position the
    // origin with E + s.
    rotmt(e + s, 2) * rotmt(-d, 1) * rotmt(-e, 2)
}

#[cfg(test)]
mod rotation_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_era00() {
        let theta = era00(2400000.5, 54388.0);
        assert_relative_eq!(theta, 0.4022837240028158102, epsilon = 1e-12);
    }

    #[test]
    fn test_era00_split_free() {
        let a = era00(2400000.5, 54388.0);
        let b = era00(2454388.0, 0.5);
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn test_sp00() {
        assert_relative_eq!(
            sp00(2400000.5, 52541.0),
            -0.6216698469981019309e-11,
            epsilon = 1e-22
        );
    }

    #[test]
    fn test_eors() {
        let rnpb = Matrix3::new(
            0.9999989440476103608,
            -0.1332881761240011518e-2,
            -0.5790767434730085097e-3,
            0.1332858254308954453e-2,
            0.9999991109044505944,
            -0.4097782710401555759e-4,
            0.5791308472168153320e-3,
            0.4020595661593994396e-4,
            0.9999998314954572365,
        );
        let s = -0.1220040848472271978e-7;
        assert_relative_eq!(eors(&rnpb, s), -0.1332882715130744606e-2, epsilon = 1e-14);
    }

    #[test]
    fn test_cirs_matrix() {
        let x = 0.5791308486706011000e-3;
        let y = 0.4020579816732961219e-4;
        let s = -0.1220040848472271978e-7;
        let m = cirs_matrix(x, y, s);

        let expected = Matrix3::new(
            0.9999998323037157138,
            0.5581984869168499149e-9,
            -0.5791308491611282180e-3,
            -0.2384261642670440317e-7,
            0.9999999991917468964,
            -0.4020579110169668931e-4,
            0.5791308486706011000e-3,
            0.4020579816732961219e-4,
            0.9999998314954627590,
        );
        assert_relative_eq!(m, expected, epsilon = 1e-12);

        let should_be_eye = m * m.transpose();
        assert_relative_eq!(should_be_eye, Matrix3::identity(), epsilon = 1e-12);
    }
}
