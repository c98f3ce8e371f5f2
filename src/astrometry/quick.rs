//! Quick transformations reusing a prepared astrometry context.
//!
//! Once an [`Astrom`] has been built, these routines carry individual
//! coordinates through the chain at a cost of a few vector operations per
//! star, with no date or ephemeris work.

use nalgebra::Vector3;

use crate::constants::{Radian, SUN_SCHWARZSCHILD};
use crate::deflection::ldsun;
use crate::ref_frames::{anp, c2s, s2c};
use crate::star::{pmpx, CatalogStar};

use super::Astrom;

/// Smallest allowed sine of the observed zenith distance in the refraction
/// step, and smallest allowed cosine.
const CELMIN: f64 = 1e-6;
const SELMIN: f64 = 0.05;

/// Coordinate kinds accepted by the observed-to-intermediate direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedCoord {
    /// Right ascension and declination.
    RaDec,
    /// Hour angle and declination.
    HaDec,
    /// Azimuth (north through east) and zenith distance.
    AzZd,
}

/// A fully reduced observed place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedPlace {
    /// Observed azimuth, radians, north through east.
    pub azimuth: Radian,
    /// Observed zenith distance, radians.
    pub zenith_distance: Radian,
    /// Observed hour angle, radians.
    pub hour_angle: Radian,
    /// Observed declination, radians.
    pub dec: Radian,
    /// Observed right ascension, radians, CIO-based.
    pub ra: Radian,
}

/// Apply stellar aberration to a natural direction.
///
/// Arguments
/// ---------
/// * `pnat`: natural direction, unit vector.
/// * `v`: observer barycentric velocity in units of c.
/// * `s`: Sun-observer distance, au.
/// * `bm1`: reciprocal of the Lorenz factor, `sqrt(1 - |v|^2)`.
///
/// The classical relativistic formula is augmented with the light-bending
/// energy term, so an aberrated then un-aberrated direction closes to
/// well under a microarcsecond.
pub fn ab(pnat: &Vector3<f64>, v: &Vector3<f64>, s: f64, bm1: f64) -> Vector3<f64> {
    let pdv = pnat.dot(v);
    let w1 = 1.0 + pdv / (1.0 + bm1);
    let w2 = SUN_SCHWARZSCHILD / s;

    let p = pnat * bm1 + w1 * v + w2 * (v - pdv * pnat);
    p.normalize()
}

/// Catalog (ICRS, epoch J2000.0) to CIRS using a prepared context.
///
/// Returns the CIRS right ascension and declination, radians.
pub fn atciq(star: &CatalogStar, astrom: &Astrom) -> (Radian, Radian) {
    // Proper motion and parallax, giving the BCRS coordinate direction.
    let pco = pmpx(star, astrom.pmt, &astrom.eb);

    // Light deflection by the Sun, giving the natural direction.
    let pnat = ldsun(&pco, &astrom.eh, astrom.em);

    // Aberration, giving the proper direction.
    let ppr = ab(&pnat, &astrom.v, astrom.em, astrom.bm1);

    // Bias-precession-nutation, giving the CIRS direction.
    let pi = astrom.bpn * ppr;

    let (w, di) = c2s(&pi);
    (anp(w), di)
}

/// CIRS to ICRS astrometric place, the inverse of [`atciq`] for a star
/// with zero catalog motion.
pub fn aticq(ri: Radian, di: Radian, astrom: &Astrom) -> (Radian, Radian) {
    let pi = s2c(ri, di);

    // CIRS to GCRS.
    let ppr = astrom.bpn.transpose() * pi;

    // Remove aberration, iteratively.
    let mut d = Vector3::zeros();
    for _ in 0..2 {
        let before = (ppr - d).normalize();
        let after = ab(&before, &astrom.v, astrom.em, astrom.bm1);
        d = after - before;
    }
    let pnat = (ppr - d).normalize();

    // Remove light deflection, iteratively.
    let mut d = Vector3::zeros();
    for _ in 0..5 {
        let before = (pnat - d).normalize();
        let after = ldsun(&before, &astrom.eh, astrom.em);
        d = after - before;
    }
    let pco = (pnat - d).normalize();

    let (w, dec) = c2s(&pco);
    (anp(w), dec)
}

/// CIRS to observed place using a prepared context.
///
/// The refraction model is accurate to a few arcseconds at large zenith
/// distances and is held finite below the horizon.
pub fn atioq(ri: Radian, di: Radian, astrom: &Astrom) -> ObservedPlace {
    // CIRS to hour angle and declination, as a vector.
    let v = s2c(ri - astrom.eral, di);
    let (x, y, z) = (v[0], v[1], v[2]);

    // Polar motion.
    let sx = astrom.xpl.sin();
    let cx = astrom.xpl.cos();
    let sy = astrom.ypl.sin();
    let cy = astrom.ypl.cos();
    let xhd = cx * x + sx * z;
    let yhd = sx * sy * x + cy * y - cx * sy * z;
    let zhd = -sx * cy * x + sy * y + cx * cy * z;

    // Diurnal aberration.
    let f = 1.0 - astrom.diurab * yhd;
    let xhdt = f * xhd;
    let yhdt = f * (yhd + astrom.diurab);
    let zhdt = f * zhd;

    // To the Cartesian -azimuth, elevation frame.
    let xaet = astrom.sphi * xhdt - astrom.cphi * zhdt;
    let yaet = yhdt;
    let zaet = astrom.cphi * xhdt + astrom.sphi * zhdt;

    // Azimuth, not affected by refraction.
    let azobs = if xaet != 0.0 || yaet != 0.0 {
        yaet.atan2(-xaet)
    } else {
        0.0
    };

    // Refraction, with the A tan z + B tan^3 z model stretched near the
    // zenith and held bounded near the horizon.
    let r = (xaet * xaet + yaet * yaet).sqrt().max(CELMIN);
    let z = zaet.max(SELMIN);
    let tz = r / z;
    let w = astrom.refb * tz * tz;
    let del = (astrom.refa + w) * tz / (1.0 + (astrom.refa + 3.0 * w) / (z * z));

    // Apply the change, with a small-angle rotation of the vector.
    let cosdel = 1.0 - del * del / 2.0;
    let f = cosdel - del * z / r;
    let xaeo = xaet * f;
    let yaeo = yaet * f;
    let zaeo = cosdel * zaet + del * r;

    let zdobs = (xaeo * xaeo + yaeo * yaeo).sqrt().atan2(zaeo);

    // Back to hour angle and declination.
    let v0 = astrom.sphi * xaeo + astrom.cphi * zaeo;
    let v1 = yaeo;
    let v2 = -astrom.cphi * xaeo + astrom.sphi * zaeo;
    let hmobs = if v0 != 0.0 || v1 != 0.0 {
        v1.atan2(v0)
    } else {
        0.0
    };
    let dcobs = v2.atan2((v0 * v0 + v1 * v1).sqrt());

    ObservedPlace {
        azimuth: anp(azobs),
        zenith_distance: zdobs,
        hour_angle: -hmobs,
        dec: dcobs,
        ra: anp(astrom.eral + hmobs),
    }
}

/// Observed place to CIRS using a prepared context, the approximate
/// inverse of [`atioq`].
pub fn atoiq(kind: ObservedCoord, ob1: f64, ob2: f64, astrom: &Astrom) -> (Radian, Radian) {
    let sphi = astrom.sphi;
    let cphi = astrom.cphi;

    // To the Cartesian -azimuth, elevation frame, whatever was supplied.
    let (xaeo, yaeo, zaeo) = match kind {
        ObservedCoord::AzZd => {
            let sz = ob2.sin();
            (-ob1.cos() * sz, ob1.sin() * sz, ob2.cos())
        }
        ObservedCoord::RaDec | ObservedCoord::HaDec => {
            let c1 = if kind == ObservedCoord::RaDec {
                astrom.eral - ob1
            } else {
                ob1
            };
            let v = s2c(-c1, ob2);
            (
                sphi * v[0] - cphi * v[2],
                v[1],
                cphi * v[0] + sphi * v[2],
            )
        }
    };

    // Observed azimuth and zenith distance.
    let az = if xaeo != 0.0 || yaeo != 0.0 {
        yaeo.atan2(xaeo)
    } else {
        0.0
    };
    let sz = (xaeo * xaeo + yaeo * yaeo).sqrt();
    let zdo = sz.atan2(zaeo);

    // Remove refraction.
    let tz = sz / zaeo.max(SELMIN);
    let dref = (astrom.refa + astrom.refb * tz * tz) * tz;
    let zdt = zdo + dref;

    // Back to the Cartesian frame, then to hour angle and declination.
    let (ce, se) = (zdt.cos(), zdt.sin());
    let xaet = az.cos() * se;
    let yaet = az.sin() * se;
    let zaet = ce;
    let xmhda = sphi * xaet + cphi * zaet;
    let ymhda = yaet;
    let zmhda = -cphi * xaet + sphi * zaet;

    // Remove diurnal aberration.
    let f = 1.0 + astrom.diurab * ymhda;
    let xhd = f * xmhda;
    let yhd = f * (ymhda - astrom.diurab);
    let zhd = f * zmhda;

    // Remove polar motion.
    let sx = astrom.xpl.sin();
    let cx = astrom.xpl.cos();
    let sy = astrom.ypl.sin();
    let cy = astrom.ypl.cos();
    let v = Vector3::new(
        cx * xhd + sx * sy * yhd - sx * cy * zhd,
        cy * yhd + sy * zhd,
        sx * xhd - cx * sy * yhd + cx * cy * zhd,
    );

    let (hma, di) = c2s(&v);
    (anp(astrom.eral + hma), di)
}

#[cfg(test)]
mod quick_test {
    use super::*;
    use crate::astrometry::context::apio13;
    use crate::earth::site::ObservingSite;
    use crate::refraction::Weather;
    use crate::time::leap_seconds::LeapSecondTable;
    use approx::assert_relative_eq;

    fn observed_context() -> Astrom {
        let table = LeapSecondTable::builtin();
        let site = ObservingSite::new(-0.527800806, -1.2345856, 2738.0);
        let weather = Weather::new(731.0, 12.8, 0.59, 0.55);
        let (astrom, _) = apio13(
            &table,
            2456384.5,
            0.969254051,
            0.1550675,
            &site,
            2.47230737e-7,
            1.82640464e-6,
            &weather,
        )
        .unwrap();
        astrom
    }

    #[test]
    fn test_ab() {
        let pnat = Vector3::new(
            -0.76321968546737951,
            -0.60869453983060384,
            -0.21676408580639883,
        );
        let v = Vector3::new(
            2.1044018893653786e-5,
            -8.9108923304429319e-5,
            -3.8633714797716569e-5,
        );

        let ppr = ab(&pnat, &v, 0.99980921395708788, 0.99999999506209258);

        assert_relative_eq!(ppr[0], -0.7631631094219556269, epsilon = 1e-12);
        assert_relative_eq!(ppr[1], -0.6087553082505590832, epsilon = 1e-12);
        assert_relative_eq!(ppr[2], -0.2167926269368471279, epsilon = 1e-12);
    }

    #[test]
    fn test_atioq() {
        let astrom = observed_context();

        let obs = atioq(2.710121572969038991, 0.1729371367218230438, &astrom);

        assert_relative_eq!(obs.azimuth, 0.9233952224895122499e-1, epsilon = 1e-12);
        assert_relative_eq!(obs.zenith_distance, 1.407758704513549991, epsilon = 1e-12);
        assert_relative_eq!(obs.hour_angle, -0.9247619879881698140e-1, epsilon = 1e-12);
        assert_relative_eq!(obs.dec, 0.1717653435756234676, epsilon = 1e-12);
        assert_relative_eq!(obs.ra, 2.710085107988480746, epsilon = 1e-12);
    }

    #[test]
    fn test_atoiq() {
        let astrom = observed_context();

        let (ri, di) = atoiq(
            ObservedCoord::RaDec,
            2.710085107986886201,
            0.1717653435758265198,
            &astrom,
        );
        assert_relative_eq!(ri, 2.710121574447540810, epsilon = 1e-12);
        assert_relative_eq!(di, 0.17293718391166087785, epsilon = 1e-12);

        let (ri, di) = atoiq(
            ObservedCoord::HaDec,
            -0.09247619879782006106,
            0.1717653435758265198,
            &astrom,
        );
        assert_relative_eq!(ri, 2.710121574448138676, epsilon = 1e-12);
        assert_relative_eq!(di, 0.1729371839116608781, epsilon = 1e-12);

        let (ri, di) = atoiq(
            ObservedCoord::AzZd,
            0.09233952224794989993,
            1.407758704513722461,
            &astrom,
        );
        assert_relative_eq!(ri, 2.710121574448138676, epsilon = 1e-12);
        assert_relative_eq!(di, 0.1729371839116608781, epsilon = 1e-12);
    }

    #[test]
    fn aberration_round_trip() {
        let v: Vector3<f64> = Vector3::new(1e-4, -0.5e-4, 0.2e-4);
        let bm1 = (1.0 - v.norm_squared()).sqrt();
        let pnat = Vector3::new(0.3, -0.7, 0.648074069840786).normalize();

        let ppr = ab(&pnat, &v, 1.0, bm1);

        // Undo with the same two-pass scheme used for the inverse chain.
        let mut d = Vector3::zeros();
        for _ in 0..2 {
            let before = (ppr - d).normalize();
            let after = ab(&before, &v, 1.0, bm1);
            d = after - before;
        }
        let back = (ppr - d).normalize();

        assert_relative_eq!(back[0], pnat[0], epsilon = 1e-12);
        assert_relative_eq!(back[1], pnat[1], epsilon = 1e-12);
        assert_relative_eq!(back[2], pnat[2], epsilon = 1e-12);
    }
}
