//! One-call reductions: catalog to observed and observed to CIRS.
//!
//! These wrap the context builders and the quick transformations for the
//! single-star case. When many stars share an epoch and site, build the
//! context once with [`apco13`](super::context::apco13) or
//! [`apio13`](super::context::apio13) and call the quick routines instead.

use crate::constants::Radian;
use crate::earth::ephemeris::EarthEphemeris;
use crate::earth::orientation::PrecessionNutation;
use crate::earth::site::ObservingSite;
use crate::errors::{SidereaError, TimeStatus};
use crate::refraction::Weather;
use crate::star::CatalogStar;
use crate::time::leap_seconds::LeapSecondTable;

use super::context::{apco13, apio13};
use super::quick::{atciq, atioq, atoiq, ObservedCoord, ObservedPlace};

/// Catalog (ICRS, epoch J2000.0) to observed place in one call.
///
/// Returns the observed place, the equation of the origins and the
/// combined status of the time and ephemeris steps.
#[allow(clippy::too_many_arguments)]
pub fn atco13<E, P>(
    table: &LeapSecondTable,
    star: &CatalogStar,
    utc1: f64,
    utc2: f64,
    dut1: f64,
    site: &ObservingSite,
    xp: Radian,
    yp: Radian,
    weather: &Weather,
    ephemeris: &E,
    pn: &P,
) -> Result<(ObservedPlace, Radian, TimeStatus), SidereaError>
where
    E: EarthEphemeris + ?Sized,
    P: PrecessionNutation + ?Sized,
{
    let (astrom, eo, status) = apco13(
        table, utc1, utc2, dut1, site, xp, yp, weather, ephemeris, pn,
    )?;
    let (ri, di) = atciq(star, &astrom);
    Ok((atioq(ri, di, &astrom), eo, status))
}

/// Observed place to CIRS in one call.
///
/// `ob1` and `ob2` are the observed coordinate pair named by `kind`.
#[allow(clippy::too_many_arguments)]
pub fn atoi13(
    table: &LeapSecondTable,
    kind: ObservedCoord,
    ob1: f64,
    ob2: f64,
    utc1: f64,
    utc2: f64,
    dut1: f64,
    site: &ObservingSite,
    xp: Radian,
    yp: Radian,
    weather: &Weather,
) -> Result<(Radian, Radian, TimeStatus), SidereaError> {
    let (astrom, status) = apio13(table, utc1, utc2, dut1, site, xp, yp, weather)?;
    let (ri, di) = atoiq(kind, ob1, ob2, &astrom);
    Ok((ri, di, status))
}
