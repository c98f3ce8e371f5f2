use approx::assert_relative_eq;
use siderea::time::fields::{d2dtf, dtf2d};
use siderea::time::leap_seconds::LeapSecondTable;
use siderea::time::scales::{tai_to_tt, utc_to_tai};
use siderea::time::TimeScale;
use siderea::TimeStatus;

#[test]
fn leap_second_day_from_fields_to_tt() {
    let table = LeapSecondTable::builtin();

    // The last second of 2016 was a leap second, so 23:59:60.5 is a
    // valid time on that day.
    let (d1, d2, status) = dtf2d(&table, TimeScale::Utc, 2016, 12, 31, 23, 59, 60.5).unwrap();
    assert_eq!(status, TimeStatus::Ok);

    // 61.0 s is past even the stretched day.
    let (_, _, status) = dtf2d(&table, TimeScale::Utc, 2016, 12, 31, 23, 59, 61.0).unwrap();
    assert_eq!(status, TimeStatus::TimeAfterEndOfDay);

    let (tai1, tai2, _) = utc_to_tai(&table, d1, d2).unwrap();
    let (tt1, tt2) = tai_to_tt(tai1, tai2);

    // TAI-UTC was 36 s before the step and the instant sits 86400.5 SI
    // seconds into a stretched 86401 s day, so against the quasi-JD the
    // difference is 86400 + 36 + 32.184 - 86400 * 86400.5 / 86401 s.
    let delta = ((tt1 - d1) + (tt2 - d2)) * 86400.0;
    assert_relative_eq!(delta, 69.183994, epsilon = 1e-5);

    // The fields survive the trip back through the leap-second logic.
    let (iy, im, id, hmsf, _) = d2dtf(&table, TimeScale::Utc, 3, d1, d2).unwrap();
    assert_eq!((iy, im, id), (2016, 12, 31));
    assert_eq!(hmsf, [23, 59, 60, 500]);
}

#[test]
fn utc_rendering_across_midnight() {
    let table = LeapSecondTable::builtin();

    let (d1, d2, status) = dtf2d(&table, TimeScale::Utc, 2023, 3, 1, 0, 0, 0.0).unwrap();
    assert_eq!(status, TimeStatus::Ok);

    let (iy, im, id, hmsf, _) = d2dtf(&table, TimeScale::Utc, 4, d1, d2).unwrap();
    assert_eq!((iy, im, id), (2023, 3, 1));
    assert_eq!(hmsf, [0, 0, 0, 0]);
}
