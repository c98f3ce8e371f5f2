//! Precession, nutation and the precession-nutation provider.
//!
//! The classical models here are the IAU 1976 precession and the IAU 1980
//! (Wahr) nutation theory. They feed the default [`PrecessionNutation`]
//! provider, which delivers the combined NPB matrix and the CIO locator s
//! to the astrometric context builders. Frame bias and the IAU 2000A
//! corrections are omitted, so the celestial pole carried by the default
//! provider is good to roughly 25 mas; exact-value work injects a provider
//! backed by externally computed matrices.

use nalgebra::Matrix3;

use crate::constants::{ArcSec, Radian, DJC, DPI, JDTOMJD, MJD, RADEG, RADSEC, T2000};
use crate::ref_frames::rotmt;

/// Mean obliquity of the ecliptic, IAU 1976 polynomial.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity in radians.
pub fn obleq(tjm: MJD) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / DJC;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Nutation angles from the IAU 1980 (Wahr) theory.
///
/// The series depends on the five Delaunay arguments (mean anomalies of
/// Moon and Sun, argument of latitude, mean elongation, node longitude),
/// each a cubic in Julian centuries of TT since J2000. The compound sines
/// and cosines below are built once by angle-addition rather than per term.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * `(Δψ, Δε)`: nutation in longitude and in obliquity, both in
///   arcseconds.
pub fn nutn80(tjm: MJD) -> (ArcSec, ArcSec) {
    let t = (tjm - T2000) / DJC;
    let t2 = t * t;
    let t3 = t2 * t;

    // Delaunay arguments, arcseconds to radians.
    let dl = (485866.733 + 1717915922.633 * t + 31.310 * t2 + 0.064 * t3) * RADSEC;
    let dp = (1287099.804 + 129596581.224 * t - 0.577 * t2 - 0.012 * t3) * RADSEC;
    let df = (335778.877 + 1739527263.137 * t - 13.257 * t2 + 0.011 * t3) * RADSEC;
    let dd = (1072261.307 + 1602961601.328 * t - 6.891 * t2 + 0.019 * t3) * RADSEC;
    let dn = (450160.280 - 6962890.539 * t + 7.455 * t2 + 0.008 * t3) * RADSEC;

    let l = dl % DPI;
    let p = dp % DPI;
    let x = df % DPI * 2.0;
    let d = dd % DPI;
    let n = dn % DPI;

    let sin_cos = |a: f64| -> (f64, f64) { (a.cos(), a.sin()) };

    let (cl, sl) = sin_cos(l);
    let (cp, sp) = sin_cos(p);
    let (cx, sx) = sin_cos(x);
    let (cd, sd) = sin_cos(d);
    let (cn, sn) = sin_cos(n);

    let cp2 = 2.0 * cp * cp - 1.0;
    let sp2 = 2.0 * sp * cp;
    let cd2 = 2.0 * cd * cd - 1.0;
    let sd2 = 2.0 * sd * cd;
    let cn2 = 2.0 * cn * cn - 1.0;
    let sn2 = 2.0 * sn * cn;
    let cl2 = 2.0 * cl * cl - 1.0;
    let sl2 = 2.0 * sl * cl;

    let ca = cx * cd2 + sx * sd2;
    let sa = sx * cd2 - cx * sd2;
    let cb = ca * cn - sa * sn;
    let sb = sa * cn + ca * sn;
    let cc = cb * cn - sb * sn;
    let sc = sb * cn + cb * sn;

    let cv = cx * cd2 - sx * sd2;
    let sv = sx * cd2 + cx * sd2;
    let ce = cv * cn - sv * sn;
    let se = sv * cn + cv * sn;
    let cf = ce * cn - se * sn;
    let sf = se * cn + ce * sn;

    let cg = cl * cd2 + sl * sd2;
    let sg = sl * cd2 - cl * sd2;
    let ch = cx * cn2 - sx * sn2;
    let sh = sx * cn2 + cx * sn2;
    let cj = ch * cl - sh * sl;
    let sj = sh * cl + ch * sl;

    let ck = cj * cl - sj * sl;
    let sk = sj * cl + cj * sl;
    let cm = cx * cl2 + sx * sl2;
    let sm = sx * cl2 - cx * sl2;
    let cq = cl * cd + sl * sd;
    let sq = sl * cd - cl * sd;

    let cr = 2.0 * cq * cq - 1.0;
    let sr = 2.0 * sq * cq;
    let cs = cx * cn - sx * sn;
    let ss = sx * cn + cx * sn;
    let ct = cs * cl - ss * sl;
    let st = ss * cl + cs * sl;

    let cu = cf * cl + sf * sl;
    let su = sf * cl - cf * sl;
    let cw = cp * cg - sp * sg;
    let sw = sp * cg + cp * sg;

    // Nutation in longitude, units of 0.0001 arcsecond.
    let mut dpsi =
        -(171996.0 + 174.2 * t) * sn + (2062.0 + 0.2 * t) * sn2 + 46.0 * (sm * cn + cm * sn)
            - 11.0 * sm
            - 3.0 * (sm * cn2 + cm * sn2)
            - 3.0 * (sq * cp - cq * sp)
            - 2.0 * (sb * cp2 - cb * sp2)
            + (sn * cm - cn * sm)
            - (13187.0 + 1.6 * t) * sc
            + (1426.0 - 3.4 * t) * sp
            - (517.0 - 1.2 * t) * (sc * cp + cc * sp)
            + (217.0 - 0.5 * t) * (sc * cp - cc * sp)
            + (129.0 + 0.1 * t) * sb
            + 48.0 * sr
            - 22.0 * sa
            + (17.0 - 0.1 * t) * sp2
            - 15.0 * (sp * cn + cp * sn)
            - (16.0 - 0.1 * t) * (sc * cp2 + cc * sp2)
            - 12.0 * (sn * cp - cn * sp);

    dpsi += -6.0 * (sn * cr - cn * sr) - 5.0 * (sb * cp - cb * sp)
        + 4.0 * (sr * cn + cr * sn)
        + 4.0 * (sb * cp + cb * sp)
        - 4.0 * sq
        + (sr * cp + cr * sp)
        + (sn * ca - cn * sa)
        - (sp * ca - cp * sa)
        + (sp * cn2 + cp * sn2)
        + (sn * cq - cn * sq)
        - (sp * ca + cp * sa)
        - (2274.0 + 0.2 * t) * sh
        + (712.0 + 0.1 * t) * sl
        - (386.0 + 0.4 * t) * ss
        - 301.0 * sj
        - 158.0 * sg
        + 123.0 * (sh * cl - ch * sl)
        + 63.0 * sd2
        + (63.0 + 0.1 * t) * (sl * cn + cl * sn)
        - (58.0 + 0.1 * t) * (sn * cl - cn * sl)
        - 59.0 * su
        - 51.0 * st
        - 38.0 * sf
        + 29.0 * sl2;

    dpsi += 29.0 * (sc * cl + cc * sl) - 31.0 * sk
        + 26.0 * sx
        + 21.0 * (ss * cl - cs * sl)
        + 16.0 * (sn * cg - cn * sg)
        - 13.0 * (sn * cg + cn * sg)
        - 10.0 * (se * cl - ce * sl)
        - 7.0 * (sg * cp + cg * sp)
        + 7.0 * (sh * cp + ch * sp)
        - 7.0 * (sh * cp - ch * sp)
        - 8.0 * (sf * cl + cf * sl)
        + 6.0 * (sl * cd2 + cl * sd2)
        + 6.0 * (sc * cl2 + cc * sl2)
        - 6.0 * (sn * cd2 + cn * sd2)
        - 7.0 * se
        + 6.0 * (sb * cl + cb * sl)
        - 5.0 * (sn * cd2 - cn * sd2)
        + 5.0 * (sl * cp - cl * sp)
        - 5.0 * (ss * cl2 + cs * sl2)
        - 4.0 * (sp * cd2 - cp * sd2);

    dpsi += 4.0 * (sl * cx - cl * sx) - 4.0 * sd - 3.0 * (sl * cp + cl * sp)
        + 3.0 * (sl * cx + cl * sx)
        - 3.0 * (sj * cp - cj * sp)
        - 3.0 * (su * cp - cu * sp)
        - 2.0 * (sn * cl2 - cn * sl2)
        - 3.0 * (sk * cl + ck * sl)
        - 3.0 * (sf * cp - cf * sp)
        + 2.0 * (sj * cp + cj * sp)
        - 2.0 * (sb * cl - cb * sl);

    dpsi += 2.0 * (sn * cl2 + cn * sl2) - 2.0 * (sl * cn2 + cl * sn2)
        + 2.0 * (sl * cl2 + cl * sl2)
        + 2.0 * (sh * cd + ch * sd)
        + (sn2 * cl - cn2 * sl)
        - (sg * cd2 - cg * sd2)
        + (sf * cl2 - cf * sl2)
        - 2.0 * (su * cd2 + cu * sd2)
        - (sr * cd2 - cr * sd2)
        + (sw * ch + cw * sh)
        - (sl * ce + cl * se)
        - (sf * cr - cf * sr)
        + (su * ca + cu * sa)
        + (sg * cp - cg * sp)
        + (sb * cl2 + cb * sl2)
        - (sf * cl2 + cf * sl2)
        - (st * ca - ct * sa)
        + (sc * cx + cc * sx)
        + (sj * cr + cj * sr)
        - (sg * cx + cg * sx);

    dpsi += (sp * cs + cp * ss) + (sn * cw - cn * sw)
        - (sn * cx - cn * sx)
        - (sh * cd - ch * sd)
        - (sp * cd2 + cp * sd2)
        - (sl * cv - cl * sv)
        - (ss * cp - cs * sp)
        - (sw * cn + cw * sn)
        - (sl * ca - cl * sa)
        + (sl2 * cd2 + cl2 * sd2)
        - (sf * cd2 + cf * sd2)
        + (sp * cd + cp * sd);

    // Nutation in obliquity, units of 0.0001 arcsecond.
    let mut deps = (92025.0 + 8.9 * t) * cn - (895.0 - 0.5 * t) * cn2 - 24.0 * (cm * cn - sm * sn)
        + (cm * cn2 - sm * sn2)
        + (cb * cp2 + sb * sp2)
        + (5736.0 - 3.1 * t) * cc
        + (54.0 - 0.1 * t) * cp
        + (224.0 - 0.6 * t) * (cc * cp - sc * sp)
        - (95.0 - 0.3 * t) * (cc * cp + sc * sp)
        - 70.0 * cb
        + cr
        + 9.0 * (cp * cn - sp * sn)
        + 7.0 * (cc * cp2 - sc * sp2)
        + 6.0 * (cn * cp + sn * sp)
        + 3.0 * (cn * cr + sn * sr)
        + 3.0 * (cb * cp + sb * sp)
        - 2.0 * (cr * cn - sr * sn)
        - 2.0 * (cb * cp - sb * sp);

    deps += (977.0 - 0.5 * t) * ch - 7.0 * cl + 200.0 * cs + (129.0 - 0.1 * t) * cj
        - cg
        - 53.0 * (ch * cl + sh * sl)
        - 2.0 * cd2
        - 33.0 * (cl * cn - sl * sn)
        + 32.0 * (cn * cl + sn * sl)
        + 26.0 * cu
        + 27.0 * ct
        + 16.0 * cf
        - cl2
        - 12.0 * (cc * cl - sc * sl)
        + 13.0 * ck
        - cx
        - 10.0 * (cs * cl + ss * sl)
        - 8.0 * (cn * cg + sn * sg)
        + 7.0 * (cn * cg - sn * sg)
        + 5.0 * (ce * cl + se * sl)
        - 3.0 * (ch * cp - sh * sp)
        + 3.0 * (ch * cp + sh * sp)
        + 3.0 * (cf * cl - sf * sl)
        - 3.0 * (cc * cl2 - sc * sl2)
        + 3.0 * (cn * cd2 - sn * sd2)
        + 3.0 * ce
        - 3.0 * (cb * cl - sb * sl)
        + 3.0 * (cn * cd2 + sn * sd2)
        + 3.0 * (cs * cl2 - ss * sl2)
        + (cj * cp + sj * sp)
        + (cu * cp + su * sp)
        + (cn * cl2 + sn * sl2)
        + (ck * cl - sk * sl)
        + (cf * cp + sf * sp)
        - (cj * cp - sj * sp)
        + (cb * cl + sb * sl)
        - (cn * cl2 - sn * sl2)
        + (cl * cn2 - sl * sn2)
        - (ch * cd - sh * sd)
        - (cn2 * cl + sn2 * sl)
        - (cf * cl2 + sf * sl2)
        + (cu * cd2 - su * sd2)
        - (cw * ch - sw * sh)
        + (cl * ce - sl * se)
        + (cf * cr + sf * sr)
        - (cb * cl2 - sb * sl2);

    (dpsi * 1e-4, deps * 1e-4)
}

/// Nutation matrix, IAU 1980: `v_true = N · v_mean`.
pub fn rnut80(tjm: MJD) -> Matrix3<f64> {
    let epsm = obleq(tjm);
    let (dpsi_as, deps_as) = nutn80(tjm);

    let dpsi = dpsi_as * RADSEC;
    let epst = epsm + deps_as * RADSEC;

    // Tip to the ecliptic, rotate by the nutation in longitude, tip back
    // through the true obliquity.
    let r1 = rotmt(epst, 0);
    let r2 = rotmt(dpsi, 2);
    let r3 = rotmt(-epsm, 0);

    (r1 * r2) * r3
}

/// Precession matrix, IAU 1976: `v_mean(tjm) = P · v_J2000`.
///
/// The equatorial precession angles ζ, z, θ are the Astronomical Almanac
/// polynomials in Julian centuries since J2000, valid within a few
/// centuries of the epoch.
pub fn prec(tjm: MJD) -> Matrix3<f64> {
    let zed = 0.6406161 * RADEG;
    let zd = 0.6406161 * RADEG;
    let thd = 0.5567530 * RADEG;

    let zedd = 0.0000839 * RADEG;
    let zdd = 0.0003041 * RADEG;
    let thdd = -0.0001185 * RADEG;

    let zeddd = 0.0000050 * RADEG;
    let zddd = 0.0000051 * RADEG;
    let thddd = -0.0000116 * RADEG;

    let t = (tjm - T2000) / DJC;

    let zeta = ((zeddd * t + zedd) * t + zed) * t;
    let z = ((zddd * t + zdd) * t + zd) * t;
    let theta = ((thddd * t + thdd) * t + thd) * t;

    let r1 = rotmt(z, 2);
    let r2 = rotmt(-theta, 1);
    let r3 = rotmt(zeta, 2);

    (r1 * r2) * r3
}

/// CIO locator s from the CIP coordinates and the secular plus leading
/// periodic terms of the IAU series.
fn cio_locator_s(tjm: MJD, x: f64, y: f64) -> Radian {
    let t = (tjm - T2000) / DJC;
    let t2 = t * t;
    let t3 = t2 * t;

    // Delaunay arguments entering the retained periodic terms.
    let f = ((335778.877 + 1739527263.137 * t - 13.257 * t2 + 0.011 * t3) * RADSEC) % DPI;
    let d = ((1072261.307 + 1602961601.328 * t - 6.891 * t2 + 0.019 * t3) * RADSEC) % DPI;
    let om = ((450160.280 - 6962890.539 * t + 7.455 * t2 + 0.008 * t3) * RADSEC) % DPI;

    // Polynomial part plus the eight periodic terms above 1 microarcsecond
    // at epoch, all in microarcseconds.
    let poly = 94.00 + 3808.65 * t - 122.68 * t2 - 72574.11 * t3
        + 27.98 * t2 * t2
        + 15.62 * t2 * t3;
    let periodic = -2640.73 * om.sin() - 63.53 * (2.0 * om).sin()
        - 11.75 * (2.0 * f - 2.0 * d + 3.0 * om).sin()
        - 11.21 * (2.0 * f - 2.0 * d + om).sin()
        + 4.57 * (2.0 * f - 2.0 * d + 2.0 * om).sin()
        - 2.02 * (2.0 * f + 3.0 * om).sin()
        - 1.98 * (2.0 * f + om).sin()
        + 1.72 * (3.0 * om).sin();

    -x * y / 2.0 + (poly + periodic) * 1e-6 * RADSEC
}

/// Source of the precession-nutation quantities consumed by the context
/// builders: the combined NPB matrix (`v_true = M · v_icrs`) and the CIO
/// locator s for the same epoch.
///
/// The pole model is a caller concern; injecting a provider backed by a
/// modern series (or by tabulated values) upgrades every downstream
/// transformation without touching the pipeline.
pub trait PrecessionNutation {
    /// NPB matrix and CIO locator s for a TT epoch given as a two-part
    /// Julian Date.
    fn npb_and_s(&self, tt1: f64, tt2: f64) -> (Matrix3<f64>, Radian);
}

/// Default provider: IAU 1976 precession with IAU 1980 nutation.
///
/// Omits frame bias and the 2000A corrections; the celestial pole is good
/// to about 25 mas over a few centuries around J2000.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iau80Npb;

impl PrecessionNutation for Iau80Npb {
    fn npb_and_s(&self, tt1: f64, tt2: f64) -> (Matrix3<f64>, Radian) {
        let tjm = (tt1 - JDTOMJD) + tt2;
        let npb = rnut80(tjm) * prec(tjm);
        let x = npb[(2, 0)];
        let y = npb[(2, 1)];
        (npb, cio_locator_s(tjm, x, y))
    }
}
