//! Builders for the star-independent astrometry context.
//!
//! The low-level builders ([`apcs`], [`apco`], [`apio`]) take every model
//! quantity as an argument and are exactly reproducible; the `*13` builders
//! assemble those quantities from a UTC epoch, the leap-second table, the
//! site and weather records and the injected Earth/precession-nutation
//! providers.

use nalgebra::{Matrix3, Vector3};

use crate::constants::{AU_LIGHT_TIME, AU_M, DJ00, DJY, Radian, SECONDS_PER_DAY, VLIGHT_MS};
use crate::earth::ephemeris::EarthEphemeris;
use crate::earth::orientation::PrecessionNutation;
use crate::earth::rotation::{cirs_matrix, eors, era00, sp00};
use crate::earth::site::{observer_pv, ObservingSite};
use crate::errors::{SidereaError, TimeStatus};
use crate::ref_frames::{anpm, rotmt, unit_and_norm, PvVector};
use crate::refraction::{refco, Weather};
use crate::time::leap_seconds::LeapSecondTable;
use crate::time::scales::{tai_to_tt, utc_to_tai, utc_to_ut1};

use super::Astrom;

/// Context for a deep-space observer: proper-motion interval, barycentric
/// and heliocentric observer state and the aberration parameters. The
/// frame matrix is left at the identity and the site block untouched.
///
/// Arguments
/// ---------
/// * `date1`, `date2`: TDB (TT acceptable) as a two-part Julian Date.
/// * `pv`: observer geocentric position and velocity, m and m/s, GCRS.
/// * `ebpv`: Earth barycentric position and velocity, au and au/day.
/// * `ehp`: Earth heliocentric position, au.
pub fn apcs(
    date1: f64,
    date2: f64,
    pv: &PvVector,
    ebpv: &PvVector,
    ehp: &Vector3<f64>,
) -> Astrom {
    // au/day to m/s.
    const AUDMS: f64 = AU_M / SECONDS_PER_DAY;

    let mut astrom = Astrom::default();

    // Time since the reference epoch, years, for proper motion and
    // parallax.
    astrom.pmt = ((date1 - DJ00) + date2) / DJY;

    // Adjust Earth ephemeris to the observer.
    let dp = pv.position / AU_M;
    let dv = pv.velocity / AUDMS;
    let pb = ebpv.position + dp;
    let vb = ebpv.velocity + dv;
    let ph = ehp + dp;

    astrom.eb = pb;
    let (eh, em) = unit_and_norm(&ph);
    astrom.eh = eh;
    astrom.em = em;

    // Barycentric observer velocity in units of c.
    astrom.v = vb * (AU_LIGHT_TIME / SECONDS_PER_DAY);
    astrom.bm1 = (1.0 - astrom.v.norm_squared()).sqrt();

    astrom
}

/// The local rotation: CIRS to the apparent [-HA, Dec] frame of the site.
fn cirs_to_hadec(theta: Radian, sp: Radian, elong: Radian, xp: Radian, yp: Radian) -> Matrix3<f64> {
    rotmt(-elong, 2) * rotmt(yp, 0) * rotmt(xp, 1) * rotmt(-(theta + sp), 2)
}

/// Extract the local Earth rotation angle and the meridian-relative polar
/// motion from the CIRS-to-hour-angle matrix, then fill the site block of
/// the context.
fn fill_site_block(
    astrom: &mut Astrom,
    r: &Matrix3<f64>,
    theta: Radian,
    phi: Radian,
    refa: Radian,
    refb: Radian,
) {
    let a = r[(0, 0)];
    let b = r[(0, 1)];
    let eral = if a != 0.0 || b != 0.0 {
        b.atan2(a)
    } else {
        0.0
    };
    astrom.eral = eral;

    // Polar motion [X, Y] with respect to the local meridian.
    let c = r[(0, 2)];
    astrom.xpl = c.atan2((a * a + b * b).sqrt());
    let a = r[(1, 2)];
    let b = r[(2, 2)];
    astrom.ypl = if a != 0.0 || b != 0.0 {
        -a.atan2(b)
    } else {
        0.0
    };

    astrom.along = anpm(eral - theta);
    astrom.sphi = phi.sin();
    astrom.cphi = phi.cos();

    astrom.refa = refa;
    astrom.refb = refb;
}

/// Context for a terrestrial observer, all model quantities supplied by
/// the caller.
///
/// Arguments
/// ---------
/// * `date1`, `date2`: TDB (TT acceptable) as a two-part Julian Date.
/// * `ebpv`, `ehp`: Earth ephemeris as for [`apcs`].
/// * `x`, `y`, `s`: CIP coordinates and the CIO locator.
/// * `theta`: Earth rotation angle.
/// * `site`: station geodetic coordinates.
/// * `xp`, `yp`, `sp`: pole coordinates and the TIO locator s′.
/// * `refa`, `refb`: refraction constants.
#[allow(clippy::too_many_arguments)]
pub fn apco(
    date1: f64,
    date2: f64,
    ebpv: &PvVector,
    ehp: &Vector3<f64>,
    x: f64,
    y: f64,
    s: Radian,
    theta: Radian,
    site: &ObservingSite,
    xp: Radian,
    yp: Radian,
    sp: Radian,
    refa: Radian,
    refb: Radian,
) -> Astrom {
    let bpn = cirs_matrix(x, y, s);

    // Observer geocentric state, rotated from CIRS to GCRS.
    let pvc = observer_pv(site, xp, yp, sp, theta);
    let pv = PvVector::new(bpn.transpose() * pvc.position, bpn.transpose() * pvc.velocity);

    let mut astrom = apcs(date1, date2, &pv, ebpv, ehp);

    let r = cirs_to_hadec(theta, sp, site.elong, xp, yp);
    fill_site_block(&mut astrom, &r, theta, site.phi, refa, refb);

    // The diurnal aberration is already carried by the observer velocity
    // in the barycentric block, so the observed-place correction stays
    // disabled.
    astrom.diurab = 0.0;

    astrom.bpn = bpn;
    astrom
}

/// Context for observed-place work only: the site block including diurnal
/// aberration, no barycentric quantities.
pub fn apio(
    sp: Radian,
    theta: Radian,
    site: &ObservingSite,
    xp: Radian,
    yp: Radian,
    refa: Radian,
    refb: Radian,
) -> Astrom {
    let r = cirs_to_hadec(theta, sp, site.elong, xp, yp);

    let mut astrom = Astrom::default();
    fill_site_block(&mut astrom, &r, theta, site.phi, refa, refb);

    // Observer velocity sets the diurnal aberration directly.
    let pv = observer_pv(site, xp, yp, sp, theta);
    astrom.diurab = (pv.velocity[0] * pv.velocity[0] + pv.velocity[1] * pv.velocity[1]).sqrt()
        / VLIGHT_MS;

    astrom
}

/// Observed-place context from a UTC epoch, IERS quantities and weather.
///
/// Needs no ephemeris or precession-nutation provider, so the result is
/// exactly reproducible from the inputs.
#[allow(clippy::too_many_arguments)]
pub fn apio13(
    table: &LeapSecondTable,
    utc1: f64,
    utc2: f64,
    dut1: f64,
    site: &ObservingSite,
    xp: Radian,
    yp: Radian,
    weather: &Weather,
) -> Result<(Astrom, TimeStatus), SidereaError> {
    let (tai1, tai2, s1) = utc_to_tai(table, utc1, utc2)?;
    let (tt1, tt2) = tai_to_tt(tai1, tai2);
    let (ut11, ut12, s2) = utc_to_ut1(table, utc1, utc2, dut1)?;

    let sp = sp00(tt1, tt2);
    let theta = era00(ut11, ut12);
    let (refa, refb) = refco(weather);

    let astrom = apio(sp, theta, site, xp, yp, refa, refb);
    Ok((astrom, s1.combine(s2)))
}

/// Full terrestrial context from a UTC epoch, with the Earth ephemeris and
/// precession-nutation model injected.
///
/// Returns the context, the equation of the origins (for converting the
/// CIRS right ascensions to equinox-based ones) and the combined status.
#[allow(clippy::too_many_arguments)]
pub fn apco13<E, P>(
    table: &LeapSecondTable,
    utc1: f64,
    utc2: f64,
    dut1: f64,
    site: &ObservingSite,
    xp: Radian,
    yp: Radian,
    weather: &Weather,
    ephemeris: &E,
    pn: &P,
) -> Result<(Astrom, Radian, TimeStatus), SidereaError>
where
    E: EarthEphemeris + ?Sized,
    P: PrecessionNutation + ?Sized,
{
    let (tai1, tai2, s1) = utc_to_tai(table, utc1, utc2)?;
    let (tt1, tt2) = tai_to_tt(tai1, tai2);
    let (ut11, ut12, s2) = utc_to_ut1(table, utc1, utc2, dut1)?;

    let (earth, s3) = ephemeris.earth_pv(tt1, tt2);
    let (npb, s) = pn.npb_and_s(tt1, tt2);
    let x = npb[(2, 0)];
    let y = npb[(2, 1)];

    let theta = era00(ut11, ut12);
    let sp = sp00(tt1, tt2);
    let (refa, refb) = refco(weather);

    let astrom = apco(
        tt1,
        tt2,
        &earth.barycentric,
        &earth.heliocentric,
        x,
        y,
        s,
        theta,
        site,
        xp,
        yp,
        sp,
        refa,
        refb,
    );
    let eo = eors(&npb, s);

    Ok((astrom, eo, s1.combine(s2).combine(s3)))
}
