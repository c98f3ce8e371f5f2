//! Earth ephemeris provider.
//!
//! The astrometric context builders only need the Earth's barycentric
//! position and velocity plus its heliocentric position, so they take them
//! through the [`EarthEphemeris`] trait. The built-in implementation is a
//! Keplerian mean-element model of the Earth-Moon barycenter, accurate to
//! the arcminute level in the resulting aberration and deflection; callers
//! with a planetary ephemeris at hand inject their own provider.

use nalgebra::Vector3;

use crate::constants::{Radian, DJ00, DJC, GAUSS_GRAV, T2000};
use crate::earth::orientation::obleq;
use crate::errors::TimeStatus;
use crate::ref_frames::{anpm, rotmt, PvVector};

/// Earth state vectors for one epoch: barycentric position and velocity in
/// au and au/day, heliocentric position in au, all on ICRS axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthState {
    pub barycentric: PvVector,
    pub heliocentric: Vector3<f64>,
}

/// Source of Earth state vectors for the astrometric context builders.
pub trait EarthEphemeris {
    /// Earth state for a TDB epoch (TT is close enough here) given as a
    /// two-part Julian Date, with a status that warns when the epoch is
    /// outside the model's validity range.
    fn earth_pv(&self, tt1: f64, tt2: f64) -> (EarthState, TimeStatus);
}

/// Keplerian mean-element model of the Earth-Moon barycenter.
///
/// Elements are the JPL 1800-2050 mean elements referred to the mean
/// ecliptic and equinox of J2000. The Sun is taken to sit at the solar
/// system barycenter, so the barycentric and heliocentric vectors coincide;
/// together with the neglected Moon offset this bounds the model at the
/// arcminute level, which the annual-aberration and deflection consumers
/// tolerate.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeplerianEphemeris;

/// Newton iteration on Kepler's equation.
///
/// Converges in a handful of steps at Earth eccentricity; the cap is a
/// safety net and the caller is told when it was hit.
fn solve_kepler(m: Radian, ecc: f64) -> (Radian, bool) {
    let mut ea = m + ecc * m.sin();
    for _ in 0..10 {
        let delta = (ea - ecc * ea.sin() - m) / (1.0 - ecc * ea.cos());
        ea -= delta;
        if delta.abs() < 1e-14 {
            return (ea, true);
        }
    }
    (ea, false)
}

impl EarthEphemeris for KeplerianEphemeris {
    fn earth_pv(&self, tt1: f64, tt2: f64) -> (EarthState, TimeStatus) {
        let t = ((tt1 - DJ00) + tt2) / DJC;

        // Mean elements of the Earth-Moon barycenter.
        let a = 1.00000261 + 0.00000562 * t;
        let ecc = 0.01671123 - 0.00004392 * t;
        let incl = (-0.00001531 - 0.01294668 * t).to_radians();
        let ml = (100.46457166 + 35999.37244981 * t).to_radians();
        let lp = (102.93768193 + 0.32327364 * t).to_radians();

        // Argument of perihelion (node is zero for these elements) and
        // mean anomaly.
        let argp = lp;
        let ma = anpm(ml - lp);

        let (ea, converged) = solve_kepler(ma, ecc);
        let mut status = if converged {
            TimeStatus::Ok
        } else {
            TimeStatus::DubiousYear
        };
        // The element fit covers 1800-2050.
        if !(-2.0..=0.5).contains(&t) {
            status = status.combine(TimeStatus::DubiousYear);
        }

        // Orbital-plane coordinates and velocities.
        let (se, ce) = ea.sin_cos();
        let root = (1.0 - ecc * ecc).sqrt();
        let xo = a * (ce - ecc);
        let yo = a * root * se;

        // Mean motion in radians per day, and dE/dt from Kepler.
        let n = GAUSS_GRAV / (a * a.sqrt());
        let edot = n / (1.0 - ecc * ce);
        let vxo = -a * se * edot;
        let vyo = a * root * ce * edot;

        // Orbital plane to ecliptic to ICRS equatorial axes.
        let r = rotmt(obleq(T2000), 0) * rotmt(incl, 0) * rotmt(argp, 2);
        let pos = r * Vector3::new(xo, yo, 0.0);
        let vel = r * Vector3::new(vxo, vyo, 0.0);

        (
            EarthState {
                barycentric: PvVector::new(pos, vel),
                heliocentric: pos,
            },
            status,
        )
    }
}

/// Provider returning one fixed state regardless of epoch; carries
/// externally computed vectors into the context builders.
#[derive(Debug, Clone, Copy)]
pub struct FixedEarth(pub EarthState);

impl EarthEphemeris for FixedEarth {
    fn earth_pv(&self, _tt1: f64, _tt2: f64) -> (EarthState, TimeStatus) {
        (self.0, TimeStatus::Ok)
    }
}
