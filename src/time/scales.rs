//! Conversions between the UTC, TAI, TT and UT1 time scales.
//!
//! Every function takes and returns a two-part Julian Date and preserves the
//! caller's split: the part that was the big one on the way in is the big
//! one on the way out. UTC legs need the leap-second table; UT1 legs need a
//! caller-supplied offset (UT1-TAI or UT1-UTC) since Earth rotation is
//! observed, not computed.

use crate::constants::{SECONDS_PER_DAY, TTMTAI};
use crate::errors::{SidereaError, TimeStatus};
use crate::time::calendar::{cal2jd, jd2cal};
use crate::time::leap_seconds::LeapSecondTable;

/// UTC to TAI.
///
/// The UTC two-part JD follows the quasi-JD convention in which leap-second
/// days have 86401 (or 86399) seconds spread over the usual fraction range.
pub fn utc_to_tai(
    table: &LeapSecondTable,
    utc1: f64,
    utc2: f64,
) -> Result<(f64, f64, TimeStatus), SidereaError> {
    // Work big-first, restore the caller's order at the end.
    let big1 = utc1.abs() >= utc2.abs();
    let (u1, u2) = if big1 { (utc1, utc2) } else { (utc2, utc1) };

    let (iy, im, id, mut fd) = jd2cal(u1, u2)?;

    let (dat0, s0) = table.delta_at(iy, im, id, 0.0)?;
    let (dat12, s12) = table.delta_at(iy, im, id, 0.5)?;
    let (iy2, im2, id2, _) = jd2cal(u1 + 1.5, u2 - fd)?;
    let (dat24, s24) = table.delta_at(iy2, im2, id2, 0.0)?;
    let status = s0.combine(s12).combine(s24);

    // Separate the drift (pre-1972 rate) from any leap-second jump.
    let dlod = 2.0 * (dat12 - dat0);
    let dleap = dat24 - (dat0 + dlod);

    // Remove the scaling applied by the quasi-JD convention.
    fd *= (SECONDS_PER_DAY + dleap) / SECONDS_PER_DAY;
    fd *= (SECONDS_PER_DAY + dlod) / SECONDS_PER_DAY;

    let (z1, z2) = cal2jd(iy, im, id)?;
    let a2 = z1 - u1 + z2 + fd + dat0 / SECONDS_PER_DAY;

    if big1 {
        Ok((u1, a2, status))
    } else {
        Ok((a2, u1, status))
    }
}

/// TAI to UTC.
///
/// Inverts [`utc_to_tai`] by Newton iteration; three rounds suffice at
/// double precision even across a leap second.
pub fn tai_to_utc(
    table: &LeapSecondTable,
    tai1: f64,
    tai2: f64,
) -> Result<(f64, f64, TimeStatus), SidereaError> {
    let big1 = tai1.abs() >= tai2.abs();
    let (a1, a2) = if big1 { (tai1, tai2) } else { (tai2, tai1) };

    let u1 = a1;
    let mut u2 = a2;
    let mut status = TimeStatus::Ok;
    for _ in 0..3 {
        let (g1, g2, s) = utc_to_tai(table, u1, u2)?;
        status = s;
        u2 += a1 - g1;
        u2 += a2 - g2;
    }

    if big1 {
        Ok((u1, u2, status))
    } else {
        Ok((u2, u1, status))
    }
}

/// TAI to TT: a fixed 32.184 s offset, added into the smaller part.
pub fn tai_to_tt(tai1: f64, tai2: f64) -> (f64, f64) {
    let dtat = TTMTAI / SECONDS_PER_DAY;
    if tai1.abs() > tai2.abs() {
        (tai1, tai2 + dtat)
    } else {
        (tai1 + dtat, tai2)
    }
}

/// TT to TAI.
pub fn tt_to_tai(tt1: f64, tt2: f64) -> (f64, f64) {
    let dtat = TTMTAI / SECONDS_PER_DAY;
    if tt1.abs() > tt2.abs() {
        (tt1, tt2 - dtat)
    } else {
        (tt1 - dtat, tt2)
    }
}

/// UT1 to TAI, given `dta` = UT1-TAI in seconds (about -32.6 s in the
/// modern era, available from IERS tables).
pub fn ut1_to_tai(ut11: f64, ut12: f64, dta: f64) -> (f64, f64) {
    let dtad = dta / SECONDS_PER_DAY;
    if ut11.abs() > ut12.abs() {
        (ut11, ut12 - dtad)
    } else {
        (ut11 - dtad, ut12)
    }
}

/// TAI to UT1, given `dta` = UT1-TAI in seconds.
pub fn tai_to_ut1(tai1: f64, tai2: f64, dta: f64) -> (f64, f64) {
    let dtad = dta / SECONDS_PER_DAY;
    if tai1.abs() > tai2.abs() {
        (tai1, tai2 + dtad)
    } else {
        (tai1 + dtad, tai2)
    }
}

/// UTC to UT1, given `dut1` = UT1-UTC in seconds (the broadcast value,
/// within +-0.9 s).
pub fn utc_to_ut1(
    table: &LeapSecondTable,
    utc1: f64,
    utc2: f64,
    dut1: f64,
) -> Result<(f64, f64, TimeStatus), SidereaError> {
    let (iy, im, id, _) = jd2cal(utc1, utc2)?;
    let (dat, _) = table.delta_at(iy, im, id, 0.0)?;

    // UT1-TAI assembled from UT1-UTC and TAI-UTC.
    let dta = dut1 - dat;

    let (tai1, tai2, status) = utc_to_tai(table, utc1, utc2)?;
    let (ut11, ut12) = tai_to_ut1(tai1, tai2, dta);
    Ok((ut11, ut12, status))
}

/// UT1 to UTC, given `dut1` = UT1-UTC in seconds.
///
/// Near a leap second the value of UT1-UTC changes discontinuously; the
/// day-by-day scan below picks the announcement that governs the given
/// instant, mirroring the forward conversion.
pub fn ut1_to_utc(
    table: &LeapSecondTable,
    ut11: f64,
    ut12: f64,
    dut1: f64,
) -> Result<(f64, f64, TimeStatus), SidereaError> {
    let big1 = ut11.abs() >= ut12.abs();
    let (u1, mut u2) = if big1 { (ut11, ut12) } else { (ut12, ut11) };

    let mut duts = dut1;
    let mut status = TimeStatus::Ok;

    // Scan from the day before to three days after for a leap second; a
    // jump of 0.5 s or more in TAI-UTC between consecutive days marks one.
    let mut dats_prev = 0.0;
    for i in -1..=3 {
        let d2 = u2 + f64::from(i);
        let (iy, im, id, _) = jd2cal(u1, d2)?;
        let (dats, s) = table.delta_at(iy, im, id, 0.0)?;
        status = status.combine(s);
        if i == -1 {
            dats_prev = dats;
        }
        let ddats = dats - dats_prev;
        if ddats.abs() >= 0.5 {
            // Ensure UT1-UTC is the pre-leap value, then ramp it across
            // the leap day so the quasi-JD convention is restored.
            if ddats * duts >= 0.0 {
                duts -= ddats;
            }
            let (us1, us2_base) = cal2jd(iy, im, id)?;
            let us2 = us2_base - 1.0 + duts / SECONDS_PER_DAY;
            let du = (u1 - us1) + (u2 - us2);
            if du > 0.0 {
                let fd = du * SECONDS_PER_DAY / (SECONDS_PER_DAY + ddats);
                duts += ddats * if fd <= 1.0 { fd } else { 1.0 };
            }
            break;
        }
        dats_prev = dats;
    }

    u2 -= duts / SECONDS_PER_DAY;

    if big1 {
        Ok((u1, u2, status))
    } else {
        Ok((u2, u1, status))
    }
}

#[cfg(test)]
mod scales_test {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_utc_to_tai() {
        let table = LeapSecondTable::builtin();
        let (a1, a2, status) = utc_to_tai(&table, 2453750.5, 0.892100694).unwrap();
        assert_eq!(a1, 2453750.5);
        assert_relative_eq!(a2, 0.8924826384444444444, epsilon = EPS);
        assert_eq!(status, TimeStatus::Ok);
    }

    #[test]
    fn test_tai_to_utc() {
        let table = LeapSecondTable::builtin();
        let (u1, u2, _) = tai_to_utc(&table, 2453750.5, 0.892482639).unwrap();
        assert_eq!(u1, 2453750.5);
        assert_relative_eq!(u2, 0.8921006945555555556, epsilon = EPS);
    }

    #[test]
    fn test_tai_tt() {
        let (t1, t2) = tai_to_tt(2453750.5, 0.892482639);
        assert_eq!(t1, 2453750.5);
        assert_relative_eq!(t2, 0.892855139, epsilon = EPS);

        let (a1, a2) = tt_to_tai(2453750.5, 0.892482639);
        assert_eq!(a1, 2453750.5);
        assert_relative_eq!(a2, 0.892110139, epsilon = EPS);
    }

    #[test]
    fn test_tai_ut1() {
        let (a1, a2) = ut1_to_tai(2453750.5, 0.892104561, -32.6659);
        assert_eq!(a1, 2453750.5);
        assert_relative_eq!(a2, 0.8924826385462962963, epsilon = EPS);

        let (u1, u2) = tai_to_ut1(2453750.5, 0.892482639, -32.6659);
        assert_eq!(u1, 2453750.5);
        assert_relative_eq!(u2, 0.8921045614537037037, epsilon = EPS);
    }

    #[test]
    fn test_utc_ut1() {
        let table = LeapSecondTable::builtin();
        let (u1, u2, _) = utc_to_ut1(&table, 2453750.5, 0.892100694, 0.3341).unwrap();
        assert_eq!(u1, 2453750.5);
        assert_relative_eq!(u2, 0.8921045608981481481, epsilon = EPS);

        let (v1, v2, _) = ut1_to_utc(&table, 2453750.5, 0.892104561, 0.3341).unwrap();
        assert_eq!(v1, 2453750.5);
        assert_relative_eq!(v2, 0.8921006941018518519, epsilon = EPS);
    }

    #[test]
    fn test_split_order_preserved() {
        let table = LeapSecondTable::builtin();
        // Fraction-first call returns fraction-first.
        let (a1, a2, _) = utc_to_tai(&table, 0.892100694, 2453750.5).unwrap();
        assert_eq!(a2, 2453750.5);
        assert_relative_eq!(a1, 0.8924826384444444444, epsilon = EPS);
    }

    #[test]
    fn test_utc_tai_round_trip_across_leap() {
        let table = LeapSecondTable::builtin();
        // Mid leap second at the end of 2016-12-31.
        let (u1, u2) = (2457754.0, 0.499997);
        let (a1, a2, _) = utc_to_tai(&table, u1, u2).unwrap();
        let (b1, b2, _) = tai_to_utc(&table, a1, a2).unwrap();
        assert_eq!(b1, u1);
        assert_relative_eq!(b2, u2, epsilon = EPS);
    }

    #[test]
    fn test_utc_tai_round_trip_in_drift_era() {
        let table = LeapSecondTable::builtin();
        // 1965 sits in the rubber-second era, where TAI-UTC has a rate term.
        let (u1, u2) = (2438921.5, 0.25);
        let (a1, a2, _) = utc_to_tai(&table, u1, u2).unwrap();
        let (b1, b2, _) = tai_to_utc(&table, a1, a2).unwrap();
        assert_eq!(b1, u1);
        assert_relative_eq!(b2, u2, epsilon = EPS);
    }
}
