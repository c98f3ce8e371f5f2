//! Gravitational light deflection.
//!
//! All directions here are unit vectors in BCRS axes; masses are in solar
//! masses and distances in au. The single-body formula is post-Newtonian
//! with a caller-supplied limiter that stops the deflection blowing up for
//! rays through the body.

use nalgebra::Vector3;

use crate::constants::{AU_LIGHT_TIME, SECONDS_PER_DAY, SUN_SCHWARZSCHILD};
use crate::ref_frames::{unit_and_norm, PvVector};

/// One deflecting body for [`ldn`]: mass in solar masses, a deflection
/// limiter (the minimum allowed value of the q·(q+e) geometry factor) and
/// its barycentric state in au and au/day.
///
/// Lists are ordered by decreasing distance of the body from the observer,
/// so the deflections compose in the order the light actually passed the
/// bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LdBody {
    pub mass: f64,
    pub deflection_limit: f64,
    pub pv: PvVector,
}

/// Deflection of a light ray by one solar-system body.
///
/// Arguments
/// ---------
/// * `bm`: mass of the body in solar masses.
/// * `p`: direction from observer to source, unit vector.
/// * `q`: direction from body to source, unit vector.
/// * `e`: direction from body to observer, unit vector.
/// * `em`: body-observer distance, au.
/// * `dlim`: deflection limiter, floors `q·(q+e)`.
///
/// Returns
/// --------
/// * The deflected direction. The correction is applied unnormalized; for
///   unit `p` the result is within the model accuracy of a unit vector.
pub fn ld(
    bm: f64,
    p: &Vector3<f64>,
    q: &Vector3<f64>,
    e: &Vector3<f64>,
    em: f64,
    dlim: f64,
) -> Vector3<f64> {
    let qpe = q + e;
    let qdqpe = q.dot(&qpe);

    // 2·G·M·c⁻²·au⁻¹ scaled by mass, distance and the limited geometry.
    let w = bm * SUN_SCHWARZSCHILD / em / qdqpe.max(dlim);

    let eq = e.cross(q);
    let peq = p.cross(&eq);
    p + w * peq
}

/// Deflection of a light ray by a list of bodies, applied in list order.
///
/// Arguments
/// ---------
/// * `bodies`: deflectors, ordered by decreasing observer distance.
/// * `ob`: barycentric position of the observer, au.
/// * `sc`: observer-to-source direction, unit vector.
///
/// For each body the light-time-retarded body position is used: the body is
/// evaluated where it was when the ray passed it, never at a future
/// position (the retardation is clamped at zero for bodies behind the
/// observer).
pub fn ldn(bodies: &[LdBody], ob: &Vector3<f64>, sc: &Vector3<f64>) -> Vector3<f64> {
    // Light time per au, in days.
    const CR: f64 = AU_LIGHT_TIME / SECONDS_PER_DAY;

    let mut sn = *sc;
    for body in bodies {
        let v = ob - body.pv.position;
        let dt = (sn.dot(&v) * CR).min(0.0);
        let ev = v - dt * body.pv.velocity;
        let (e, em) = unit_and_norm(&ev);
        sn = ld(body.mass, &sn, &sn, &e, em, body.deflection_limit);
    }
    sn
}

/// Solar deflection for a source at effectively infinite distance.
///
/// The limiter scales with the inverse square of the Sun-observer distance
/// so that rays grazing the solar surface stay finite wherever the
/// observer is.
pub fn ldsun(p: &Vector3<f64>, e: &Vector3<f64>, em: f64) -> Vector3<f64> {
    let em2 = (em * em).max(1.0);
    ld(1.0, p, p, e, em, 1e-6 / em2)
}

#[cfg(test)]
mod deflection_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ld() {
        let bm = 0.00028574;
        let p = Vector3::new(-0.763276255, -0.608633767, -0.216735543);
        let q = p;
        let e = Vector3::new(0.76700421, 0.605629598, 0.211937094);
        let em = 8.91276983;
        let dlim = 3e-10;

        let p1 = ld(bm, &p, &q, &e, em, dlim);
        assert_relative_eq!(p1[0], -0.7632762548968159627, epsilon = 1e-12);
        assert_relative_eq!(p1[1], -0.6086337670823762701, epsilon = 1e-12);
        assert_relative_eq!(p1[2], -0.2167355431320546947, epsilon = 1e-12);
    }

    #[test]
    fn test_ldn() {
        let bodies = [
            LdBody {
                mass: 0.00028574,
                deflection_limit: 3e-10,
                pv: PvVector::new(
                    Vector3::new(-7.81014427, -5.60956681, -1.98079819),
                    Vector3::new(0.0030723249, -0.00406995477, -0.00181335842),
                ),
            },
            LdBody {
                mass: 0.00095435,
                deflection_limit: 3e-9,
                pv: PvVector::new(
                    Vector3::new(0.738098796, 4.63658692, 1.9693136),
                    Vector3::new(-0.00755816922, 0.00126913722, 0.000727999001),
                ),
            },
            LdBody {
                mass: 1.0,
                deflection_limit: 6e-6,
                pv: PvVector::new(
                    Vector3::new(-0.000712174377, -0.00230478303, -0.00105865966),
                    Vector3::new(6.29235213e-6, -3.30888387e-7, -2.96486623e-7),
                ),
            },
        ];
        let ob = Vector3::new(-0.974170437, -0.2115201, -0.0917583114);
        let sc = Vector3::new(-0.763276255, -0.608633767, -0.216735543);

        let sn = ldn(&bodies, &ob, &sc);
        assert_relative_eq!(sn[0], -0.7632762579693333866, epsilon = 1e-12);
        assert_relative_eq!(sn[1], -0.6086337636093002660, epsilon = 1e-12);
        assert_relative_eq!(sn[2], -0.2167355420646328159, epsilon = 1e-12);
    }

    #[test]
    fn test_ldsun() {
        let p = Vector3::new(-0.763276255, -0.608633767, -0.216735543);
        let e = Vector3::new(-0.973644023, -0.20925523, -0.0907169552);
        let em = 0.999809214;

        let p1 = ldsun(&p, &e, em);
        assert_relative_eq!(p1[0], -0.7632762580731413169, epsilon = 1e-12);
        assert_relative_eq!(p1[1], -0.6086337635262647900, epsilon = 1e-12);
        assert_relative_eq!(p1[2], -0.2167355419322321302, epsilon = 1e-12);
    }

    #[test]
    fn test_ld_limiter_caps_grazing_ray() {
        // A ray passing almost through the body: the limiter keeps the
        // deflection finite.
        let p = Vector3::new(1.0, 0.0, 0.0);
        let q = Vector3::new(1.0, 1e-9, 0.0).normalize();
        let e = Vector3::new(-1.0, 0.0, 0.0);
        let deflected = ld(1.0, &p, &q, &e, 1.0, 1e-6);
        assert!((deflected - p).norm() < 1e-1);
        assert!(deflected[0].is_finite() && deflected[1].is_finite());
    }
}
