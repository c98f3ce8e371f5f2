use crate::constants::JDTOMJD;
use crate::errors::SidereaError;

/// Lengths of the months of a non-leap Gregorian year.
const MTAB: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Earliest year supported by the Gregorian-proleptic algorithm.
const YEAR_MIN: i32 = -4799;

/// Gregorian leap-year rule (proleptic).
fn is_leap(iy: i32) -> bool {
    iy % 4 == 0 && (iy % 100 != 0 || iy % 400 == 0)
}

/// Convert a Gregorian calendar date to a two-part Julian Date.
///
/// Arguments
/// ---------
/// * `iy`, `im`, `id`: year, month (1-12) and day of month.
///
/// Return
/// ------
/// * `(djm0, djm)`: the MJD zero-point (always 2400000.5) and the Modified
///   Julian Date for 0ʰ on the given day; their sum is the Julian Date.
///
/// Remarks
/// -------
/// * Day-of-month validity is **advisory**: an out-of-range day yields
///   [`SidereaError::BadDay`], but the error carries the Julian Date computed
///   for the nominal fields so callers that tolerate sloppy dates can still
///   use it. Bad years and months fail without a result.
/// * Uses the standard integer formula for the Gregorian proleptic calendar,
///   valid from year -4799 onward.
pub fn cal2jd(iy: i32, im: i32, id: i32) -> Result<(f64, f64), SidereaError> {
    if iy < YEAR_MIN {
        return Err(SidereaError::BadYear(iy));
    }
    if !(1..=12).contains(&im) {
        return Err(SidereaError::BadMonth(im));
    }

    // Integer Gregorian formula; truncating division throughout.
    let my = (im - 14) / 12;
    let iypmy = (iy + my) as i64;
    let djm0 = JDTOMJD;
    let djm = ((1461 * (iypmy + 4800)) / 4 + (367 * (im - 2 - 12 * my) as i64) / 12
        - (3 * ((iypmy + 4900) / 100)) / 4
        + id as i64
        - 2432076) as f64;

    let leap_day = if im == 2 && is_leap(iy) { 1 } else { 0 };
    if id < 1 || id > MTAB[(im - 1) as usize] + leap_day {
        return Err(SidereaError::BadDay {
            day: id,
            jd: (djm0, djm),
        });
    }

    Ok((djm0, djm))
}

/// Convert a two-part Julian Date to Gregorian calendar date and time of day.
///
/// Arguments
/// ---------
/// * `dj1`, `dj2`: the two-part Julian Date; the split between the parts is
///   arbitrary and any two splits of the same instant produce the same output.
///
/// Return
/// ------
/// * `(year, month, day, fraction_of_day)` with `fraction_of_day` in [0,1).
///
/// Remarks
/// -------
/// * Each part is separated into integer day and fractional remainder
///   **independently** (rounding to nearest, remainder in [-0.5, 0.5)), and
///   the two remainders are then summed with compensated (Kahan-Neumaier)
///   summation before the final re-split. Summing the parts first and
///   splitting once loses precision for dates far from both parts' epochs.
pub fn jd2cal(dj1: f64, dj2: f64) -> Result<(i32, i32, i32, f64), SidereaError> {
    let dj = dj1 + dj2;
    if !(-68569.5..=1e9).contains(&dj) {
        return Err(SidereaError::DateOutOfRange(dj));
    }

    // Integer day count and per-part fractional remainders.
    let d1 = dj1.round();
    let f1 = dj1 - d1;
    let d2 = dj2.round();
    let f2 = dj2 - d2;
    let mut jd = d1 as i64 + d2 as i64;

    // f1 + f2 + 0.5 by compensated summation; the 0.5 moves the origin from
    // noon to midnight.
    let mut s = 0.0_f64;
    let mut cs = 0.0_f64;
    for x in [f1, f2, 0.5] {
        let t = s + x;
        cs += if s.abs() >= x.abs() {
            (s - t) + x
        } else {
            (x - t) + s
        };
        s = t;
    }
    let mut f = s + cs;
    if f < 0.0 {
        f += 1.0;
        jd -= 1;
    }
    if f >= 1.0 {
        f -= 1.0;
        jd += 1;
    }

    // Gregorian calendar from the Julian Day number (Hatcher's algorithm).
    let mut l = jd + 68569;
    let n = (4 * l) / 146097;
    l -= (146097 * n + 3) / 4;
    let i = (4000 * (l + 1)) / 1461001;
    l -= (1461 * i) / 4 - 31;
    let k = (80 * l) / 2447;
    let id = (l - (2447 * k) / 80) as i32;
    let l2 = k / 11;
    let im = (k + 2 - 12 * l2) as i32;
    let iy = (100 * (n - 49) + i + l2) as i32;

    Ok((iy, im, id, f))
}
