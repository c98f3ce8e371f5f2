//! Clock-field codecs: calendar plus hour/minute/second to two-part Julian
//! Date and back, with UTC leap-second days stretched or shrunk as the
//! leap-second table dictates.

use crate::constants::SECONDS_PER_DAY;
use crate::errors::{SidereaError, TimeStatus};
use crate::time::calendar::{cal2jd, jd2cal};
use crate::time::leap_seconds::LeapSecondTable;
use crate::time::TimeScale;

/// Decompose a fraction of day into hours, minutes, seconds and fraction,
/// rounded to `ndp` digits of the seconds field.
///
/// A negative `ndp` rounds to a coarser unit: -1 deci-minutes of a sort,
/// -2 minutes, -4 hours.
///
/// Returns the sign character and `[ihr, imn, isec, frac]` where `frac` is
/// the fractional seconds scaled by `10^ndp`.
pub fn d2tf(ndp: i32, days: f64) -> (char, [i32; 4]) {
    let sign = if days >= 0.0 { '+' } else { '-' };

    let mut a = SECONDS_PER_DAY * days.abs();

    // Coarse rounding happens in the field units themselves.
    if ndp < 0 {
        let mut nrs: i64 = 1;
        for n in 1..=(-ndp) {
            nrs *= if n == 2 || n == 4 { 6 } else { 10 };
        }
        let rs = nrs as f64;
        a = rs * (a / rs).round();
    }

    let nrs = 10_i64.pow(ndp.max(0) as u32);
    let rs = nrs as f64;
    let rm = rs * 60.0;
    let rh = rm * 60.0;

    a = (rs * a).round();

    let ah = (a / rh).trunc();
    a -= ah * rh;
    let am = (a / rm).trunc();
    a -= am * rm;
    let asec = (a / rs).trunc();
    let af = a - asec * rs;

    (sign, [ah as i32, am as i32, asec as i32, af as i32])
}

/// Encode calendar date and clock time into a two-part Julian Date.
///
/// On a UTC leap-second day the final minute runs long (or short) and a
/// second count of 60.x is legal; the day length used to scale the clock
/// fields is adjusted accordingly. In any scale a time at or past the end of
/// the (possibly stretched) day is still encoded but flagged
/// [`TimeStatus::TimeAfterEndOfDay`].
///
/// Returns `(d1, d2, status)` with `d1` the half-integral epoch part and
/// `d2` the day-plus-fraction part.
pub fn dtf2d(
    table: &LeapSecondTable,
    scale: TimeScale,
    iy: i32,
    im: i32,
    id: i32,
    ihr: i32,
    imn: i32,
    sec: f64,
) -> Result<(f64, f64, TimeStatus), SidereaError> {
    let (djm0, djm) = cal2jd(iy, im, id)?;
    let dj = djm0 + djm;

    let mut day = SECONDS_PER_DAY;
    let mut seclim = 60.0;
    let mut status = TimeStatus::Ok;

    if scale == TimeScale::Utc {
        // TAI-UTC at 0h today, 12h today and 0h tomorrow tells leap from
        // drift: dleap is the jump left after removing the linear trend.
        let (dat0, s0) = table.delta_at(iy, im, id, 0.0)?;
        let (dat12, s12) = table.delta_at(iy, im, id, 0.5)?;
        let (iy2, im2, id2, _) = jd2cal(dj, 1.5)?;
        let (dat24, s24) = table.delta_at(iy2, im2, id2, 0.0)?;
        status = s0.combine(s12).combine(s24);

        let dleap = dat24 - (2.0 * dat12 - dat0);
        day += dleap;
        if ihr == 23 && imn == 59 {
            seclim += dleap;
        }
    }

    if !(0..=23).contains(&ihr) {
        return Err(SidereaError::BadHour(ihr));
    }
    if !(0..=59).contains(&imn) {
        return Err(SidereaError::BadMinute(imn));
    }
    if sec < 0.0 {
        return Err(SidereaError::BadSecond(sec));
    }
    if sec >= seclim {
        status = status.combine(TimeStatus::TimeAfterEndOfDay);
    }

    let time = (60.0 * f64::from(60 * ihr + imn) + sec) / day;

    Ok((djm0, djm + time, status))
}

/// Decode a two-part Julian Date into calendar date and clock fields,
/// rounded to `ndp` digits of seconds.
///
/// In UTC the seconds field can legitimately read 60 during a leap second,
/// and rounding never carries past the end of a leap-second day into a
/// spurious 24:00:00.
///
/// Returns `(iy, im, id, [ihr, imn, isec, frac], status)`.
pub fn d2dtf(
    table: &LeapSecondTable,
    scale: TimeScale,
    ndp: i32,
    d1: f64,
    d2: f64,
) -> Result<(i32, i32, i32, [i32; 4], TimeStatus), SidereaError> {
    // Provisional calendar date, before leap handling.
    let (mut iy, mut im, mut id, mut fd) = jd2cal(d1, d2)?;

    let mut leap = false;
    let mut status = TimeStatus::Ok;
    if scale == TimeScale::Utc {
        let (dat0, s0) = table.delta_at(iy, im, id, 0.0)?;
        let (dat12, s12) = table.delta_at(iy, im, id, 0.5)?;
        let (iy2, im2, id2, _) = jd2cal(d1 + 1.5, d2 - fd)?;
        let (dat24, s24) = table.delta_at(iy2, im2, id2, 0.0)?;
        status = s0.combine(s12).combine(s24);

        let dleap = dat24 - (2.0 * dat12 - dat0);
        leap = dleap.abs() > 0.5;

        // On a leap day the fraction is of a non-86400 s day; rescale so
        // that the clock fields read in SI seconds.
        if leap {
            fd += fd * dleap / SECONDS_PER_DAY;
        }
    }

    let (_, mut hmsf) = d2tf(ndp, fd);

    // Rounding may have pushed the time past 24h.
    if hmsf[0] > 23 {
        let (iy2, im2, id2, _) = jd2cal(d1 + 1.5, d2 - fd)?;
        if !leap {
            iy = iy2;
            im = im2;
            id = id2;
            hmsf[0] = 0;
            hmsf[1] = 0;
            hmsf[2] = 0;
        } else {
            if hmsf[2] > 0 {
                // Past the leap second itself: next day, keep the fraction.
                iy = iy2;
                im = im2;
                id = id2;
                hmsf[0] = 0;
                hmsf[1] = 0;
                hmsf[2] = 0;
            } else {
                hmsf[0] = 23;
                hmsf[1] = 59;
                hmsf[2] = 60;
            }
            if ndp < 0 && hmsf[2] == 60 {
                iy = iy2;
                im = im2;
                id = id2;
                hmsf[0] = 0;
                hmsf[1] = 0;
                hmsf[2] = 0;
            }
        }
    }

    Ok((iy, im, id, hmsf, status))
}
