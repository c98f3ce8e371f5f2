//! Star-independent astrometry contexts and the per-star transforms.
//!
//! The expensive epoch-dependent quantities (observer state, light
//! deflection geometry, aberration velocity, frame matrices, refraction
//! constants) are computed once into an [`Astrom`] value; the per-star
//! transforms in [`quick`] then reuse it for any number of stars at that
//! epoch. [`context`] holds the builders, [`pipeline`] the one-call
//! orchestrators.

pub mod context;
pub mod pipeline;
pub mod quick;

use nalgebra::{Matrix3, Vector3};

use crate::constants::Radian;

pub use context::{apco, apco13, apcs, apio, apio13};
pub use pipeline::{atco13, atoi13};
pub use quick::{ab, atciq, aticq, atioq, atoiq, ObservedCoord, ObservedPlace};

/// Star-independent astrometry parameters for one epoch and observer.
///
/// Built by the `ap*` context builders; immutable thereafter and shared
/// freely across stars and threads. Which fields are meaningful depends on
/// the builder: the geocentric/barycentric block is untouched by [`apio`],
/// the site block by [`apcs`].
#[derive(Debug, Clone, PartialEq)]
pub struct Astrom {
    /// Proper-motion interval since the catalog epoch, Julian years.
    pub pmt: f64,
    /// Solar-system barycenter to observer, au.
    pub eb: Vector3<f64>,
    /// Sun to observer, unit vector.
    pub eh: Vector3<f64>,
    /// Sun-observer distance, au.
    pub em: f64,
    /// Barycentric observer velocity in units of c.
    pub v: Vector3<f64>,
    /// Reciprocal of the Lorentz factor, √(1−|v|²).
    pub bm1: f64,
    /// Bias-precession-nutation matrix, GCRS to CIRS.
    pub bpn: Matrix3<f64>,
    /// Adjusted longitude of the site, radians.
    pub along: Radian,
    /// Polar motion with respect to the local meridian, radians.
    pub xpl: Radian,
    pub ypl: Radian,
    /// Sine and cosine of the geodetic latitude.
    pub sphi: f64,
    pub cphi: f64,
    /// Magnitude of the diurnal aberration vector, units of c.
    pub diurab: f64,
    /// Local Earth rotation angle, radians.
    pub eral: Radian,
    /// Refraction constants for the tanZ + tan³Z model, radians.
    pub refa: Radian,
    pub refb: Radian,
}

impl Default for Astrom {
    fn default() -> Self {
        Astrom {
            pmt: 0.0,
            eb: Vector3::zeros(),
            eh: Vector3::zeros(),
            em: 1.0,
            v: Vector3::zeros(),
            bm1: 1.0,
            bpn: Matrix3::identity(),
            along: 0.0,
            xpl: 0.0,
            ypl: 0.0,
            sphi: 0.0,
            cphi: 1.0,
            diurab: 0.0,
            eral: 0.0,
            refa: 0.0,
            refb: 0.0,
        }
    }
}
