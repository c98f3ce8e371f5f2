//! Catalog stars and their space motion.
//!
//! A catalog record carries ICRS coordinates at the catalog epoch, proper
//! motions, parallax and radial velocity. [`starpv`] expands the record
//! into a barycentric position-velocity vector (au, au/day) including the
//! special-relativistic mapping from observed to inertial radial velocity;
//! [`pvstar`] is its exact inverse. [`pmpx`] applies proper motion and
//! parallax directly on the unit sphere, which is what the per-star
//! transforms use.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ArcSec, Radian, ARCSEC_PER_RAD, AU_LIGHT_TIME, AU_M, DJY, RADSEC, SECONDS_PER_DAY, VLIGHT_AU,
};
use crate::errors::SidereaError;
use crate::ref_frames::{anp, unit_and_norm, PvVector};

/// Parallax floor in arcseconds: below this the star is treated as sitting
/// on a sphere of about 10 megaparsecs.
const PXMIN: ArcSec = 1e-7;

/// Largest allowed speed as a fraction of c before the velocity is
/// discarded as non-physical catalog data.
const VMAX: f64 = 0.5;

/// Iteration cap for the observed-to-inertial velocity fixed point.
const IMAX: usize = 100;

/// An ICRS catalog record.
///
/// Proper motion in right ascension is dRA/dt (not its cos δ projection),
/// in radians per Julian year; parallax is in arcseconds; radial velocity
/// in km/s, positive receding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogStar {
    pub ra: Radian,
    pub dec: Radian,
    pub pm_ra: f64,
    pub pm_dec: f64,
    pub parallax: ArcSec,
    pub rv: f64,
}

/// Conditions encountered while expanding a catalog record; the result is
/// still usable, these record where the model floored or gave up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarMotionFlags {
    /// Parallax was below [`PXMIN`] and has been floored.
    pub parallax_floored: bool,
    /// Speed exceeded [`VMAX`] of c and the velocity was zeroed.
    pub speed_capped: bool,
    /// The observed-to-inertial iteration hit its cap.
    pub not_converged: bool,
}

impl StarMotionFlags {
    pub fn is_clean(&self) -> bool {
        !(self.parallax_floored || self.speed_capped || self.not_converged)
    }
}

/// Spherical coordinates and their rates to a pv-vector.
fn s2pv(theta: f64, phi: f64, r: f64, td: f64, pd: f64, rd: f64) -> PvVector {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    let rcp = r * cp;
    let x = rcp * ct;
    let y = rcp * st;

    let rpd = r * pd;
    let w = rpd * sp - cp * rd;

    PvVector::new(
        Vector3::new(x, y, r * sp),
        Vector3::new(-y * td - w * ct, x * td - w * st, rpd * cp + sp * rd),
    )
}

/// Pv-vector to spherical coordinates and their rates.
fn pv2s(pv: &PvVector) -> (f64, f64, f64, f64, f64, f64) {
    let (mut x, mut y, mut z) = (pv.position[0], pv.position[1], pv.position[2]);
    let (xd, yd, zd) = (pv.velocity[0], pv.velocity[1], pv.velocity[2]);

    let mut rxy2 = x * x + y * y;
    let mut r2 = rxy2 + z * z;
    let rtrue = r2.sqrt();

    // A null position takes its direction from the velocity.
    let mut rw = rtrue;
    if rtrue == 0.0 {
        x = xd;
        y = yd;
        z = zd;
        rxy2 = x * x + y * y;
        r2 = rxy2 + z * z;
        rw = r2.sqrt();
    }

    let rxy = rxy2.sqrt();
    let xyp = x * xd + y * yd;
    let (theta, phi, td, pd) = if rxy2 != 0.0 {
        (
            y.atan2(x),
            z.atan2(rxy),
            (x * yd - y * xd) / rxy2,
            (zd * rxy2 - z * xyp) / (r2 * rxy),
        )
    } else {
        let phi = if z != 0.0 { z.atan2(rxy) } else { 0.0 };
        (0.0, phi, 0.0, 0.0)
    };

    let rd = if rw != 0.0 { (xyp + z * zd) / rw } else { 0.0 };
    (theta, phi, rtrue, td, pd, rd)
}

/// Expand a catalog record into a barycentric pv-vector, au and au/day.
///
/// The catalog radial velocity is an observed (Doppler) value; the
/// returned velocity is the inertial one, recovered by iterating the
/// special-relativistic correction to a fixed point.
pub fn starpv(star: &CatalogStar) -> (PvVector, StarMotionFlags) {
    let mut flags = StarMotionFlags::default();

    // Distance in au from (floored) parallax.
    let mut w = star.parallax;
    if w < PXMIN {
        w = PXMIN;
        flags.parallax_floored = true;
    }
    let r = ARCSEC_PER_RAD / w;

    // Radial velocity to au/day, proper motions to radians/day.
    let rd = SECONDS_PER_DAY * star.rv * 1e3 / AU_M;
    let rad = star.pm_ra / DJY;
    let decd = star.pm_dec / DJY;

    let mut pv = s2pv(star.ra, star.dec, r, rad, decd, rd);

    // A superluminal-ish velocity is catalog garbage; drop it.
    if pv.velocity.norm() / VLIGHT_AU > VMAX {
        pv.velocity = Vector3::zeros();
        flags.speed_capped = true;
    }

    // Split into radial and transverse components.
    let (x, _) = unit_and_norm(&pv.position);
    let vsr = x.dot(&pv.velocity);
    let usr = vsr * x;
    let ust = pv.velocity - usr;
    let vst = ust.norm();

    // Observed-to-inertial: iterate the aberration of the space motion.
    let betsr = vsr / VLIGHT_AU;
    let betst = vst / VLIGHT_AU;
    let mut betr = betsr;
    let mut bett = betst;

    let mut d = 1.0;
    let mut del = 0.0;
    let (mut od, mut odel) = (0.0, 0.0);
    let (mut odd, mut oddel) = (0.0, 0.0);
    let mut converged = false;
    for i in 0..IMAX {
        d = 1.0 + betr;
        let w2 = betr * betr + bett * bett;
        del = -w2 / ((1.0 - w2).sqrt() + 1.0);
        betr = d * betsr + del;
        bett = d * betst;
        if i > 0 {
            let dd = (betr - od).abs();
            let ddel = (del - odel).abs();
            // Stop once the updates stop shrinking.
            if i > 1 && dd >= odd && ddel >= oddel {
                converged = true;
                break;
            }
            odd = dd;
            oddel = ddel;
        }
        od = betr;
        odel = del;
    }
    if !converged {
        flags.not_converged = true;
    }

    // Scale the observed components into the inertial velocity.
    let w = if betsr != 0.0 { d + del / betsr } else { 1.0 };
    pv.velocity = w * usr + d * ust;

    (pv, flags)
}

/// Contract a barycentric pv-vector back into a catalog record.
///
/// Exact inverse of [`starpv`] (the relativistic velocity mapping inverts
/// in closed form). Fails on a null position or a space velocity at or
/// above c.
pub fn pvstar(pv: &PvVector) -> Result<CatalogStar, SidereaError> {
    let (x, r) = unit_and_norm(&pv.position);
    if r == 0.0 {
        return Err(SidereaError::NonPhysicalStar);
    }

    // Inertial radial and transverse components.
    let vr = x.dot(&pv.velocity);
    let ur = vr * x;
    let ut = pv.velocity - ur;
    let vt = ut.norm();

    let betr = vr / VLIGHT_AU;
    let bett = vt / VLIGHT_AU;

    let d = 1.0 + betr;
    let w = betr * betr + bett * bett;
    if d == 0.0 || w >= 1.0 {
        return Err(SidereaError::NonPhysicalStar);
    }
    let del = -w / ((1.0 - w).sqrt() + 1.0);

    // Observed velocity components.
    let ust = ut / d;
    let usr = VLIGHT_AU * (betr - del) / d * x;
    let obs = PvVector::new(pv.position, usr + ust);

    let (a, dec, r, rad, decd, rd) = pv2s(&obs);
    if r == 0.0 {
        return Err(SidereaError::NonPhysicalStar);
    }

    Ok(CatalogStar {
        ra: anp(a),
        dec,
        pm_ra: rad * DJY,
        pm_dec: decd * DJY,
        parallax: ARCSEC_PER_RAD / r,
        rv: 1e-3 * rd * AU_M / SECONDS_PER_DAY,
    })
}

/// Proper motion and parallax, applied on the unit sphere.
///
/// Arguments
/// ---------
/// * `star`: the catalog record.
/// * `pmt`: proper-motion interval since the catalog epoch, Julian years.
/// * `pob`: observer barycentric position, au.
///
/// Returns
/// --------
/// * The coordinate direction as a BCRS unit vector.
pub fn pmpx(star: &CatalogStar, pmt: f64, pob: &Vector3<f64>) -> Vector3<f64> {
    // Km/s to au/Julian-year, and light time per au in Julian years.
    const VF: f64 = SECONDS_PER_DAY * DJY * 1e3 / AU_M;
    const AULTY: f64 = AU_LIGHT_TIME / SECONDS_PER_DAY / DJY;

    let (sr, cr) = star.ra.sin_cos();
    let (sd, cd) = star.dec.sin_cos();
    let x = cr * cd;
    let y = sr * cd;
    let z = sd;
    let p = Vector3::new(x, y, z);

    // Proper-motion interval includes the Roemer delay toward the star.
    let dt = pmt + p.dot(pob) * AULTY;

    // Space motion in au/year on the unit sphere, radial term from rv.
    let pxr = star.parallax * RADSEC;
    let w = VF * star.rv * pxr;
    let pdz = star.pm_dec * z;
    let pm = Vector3::new(
        -star.pm_ra * y - pdz * cr + w * x,
        star.pm_ra * x - pdz * sr + w * y,
        star.pm_dec * cd + w * z,
    );

    let (u, _) = unit_and_norm(&(p + dt * pm - pxr * pob));
    u
}
