use crate::errors::{SidereaError, TimeStatus};
use crate::time::calendar::cal2jd;

/// Release year of the built-in table; dates more than five years past it
/// earn a [`TimeStatus::DubiousYear`] warning.
const RELEASE_YEAR: i32 = 2023;

struct DriftEntry {
    year: i32,
    month: i32,
    /// TAI-UTC at the reference epoch, seconds.
    offset: f64,
    /// Reference MJD of the drift term.
    mjd_ref: f64,
    /// Drift rate, seconds per day.
    rate: f64,
}

struct StepEntry {
    year: i32,
    month: i32,
    /// TAI-UTC from this date on, seconds.
    delat: f64,
}

/// Values of TAI-UTC prior to 1972: an offset plus a rate times the elapsed
/// days since a reference MJD. The rate changes produce the historical
/// "mini-leap" discontinuities of a few tenths of a second.
const DRIFT: [DriftEntry; 14] = [
    DriftEntry { year: 1960, month: 1, offset: 1.417818, mjd_ref: 37300.0, rate: 0.001296 },
    DriftEntry { year: 1961, month: 1, offset: 1.422818, mjd_ref: 37300.0, rate: 0.001296 },
    DriftEntry { year: 1961, month: 8, offset: 1.372818, mjd_ref: 37300.0, rate: 0.001296 },
    DriftEntry { year: 1962, month: 1, offset: 1.845858, mjd_ref: 37665.0, rate: 0.0011232 },
    DriftEntry { year: 1963, month: 11, offset: 1.945858, mjd_ref: 37665.0, rate: 0.0011232 },
    DriftEntry { year: 1964, month: 1, offset: 3.24013, mjd_ref: 38761.0, rate: 0.001296 },
    DriftEntry { year: 1964, month: 4, offset: 3.34013, mjd_ref: 38761.0, rate: 0.001296 },
    DriftEntry { year: 1964, month: 9, offset: 3.44013, mjd_ref: 38761.0, rate: 0.001296 },
    DriftEntry { year: 1965, month: 1, offset: 3.54013, mjd_ref: 38761.0, rate: 0.001296 },
    DriftEntry { year: 1965, month: 3, offset: 3.64013, mjd_ref: 38761.0, rate: 0.001296 },
    DriftEntry { year: 1965, month: 7, offset: 3.74013, mjd_ref: 38761.0, rate: 0.001296 },
    DriftEntry { year: 1965, month: 9, offset: 3.84013, mjd_ref: 38761.0, rate: 0.001296 },
    DriftEntry { year: 1966, month: 1, offset: 4.31317, mjd_ref: 39126.0, rate: 0.002592 },
    DriftEntry { year: 1968, month: 2, offset: 4.21317, mjd_ref: 39126.0, rate: 0.002592 },
];

/// Integer leap-second steps since the 1972 reform.
const STEPS: [StepEntry; 28] = [
    StepEntry { year: 1972, month: 1, delat: 10.0 },
    StepEntry { year: 1972, month: 7, delat: 11.0 },
    StepEntry { year: 1973, month: 1, delat: 12.0 },
    StepEntry { year: 1974, month: 1, delat: 13.0 },
    StepEntry { year: 1975, month: 1, delat: 14.0 },
    StepEntry { year: 1976, month: 1, delat: 15.0 },
    StepEntry { year: 1977, month: 1, delat: 16.0 },
    StepEntry { year: 1978, month: 1, delat: 17.0 },
    StepEntry { year: 1979, month: 1, delat: 18.0 },
    StepEntry { year: 1980, month: 1, delat: 19.0 },
    StepEntry { year: 1981, month: 7, delat: 20.0 },
    StepEntry { year: 1982, month: 7, delat: 21.0 },
    StepEntry { year: 1983, month: 7, delat: 22.0 },
    StepEntry { year: 1985, month: 7, delat: 23.0 },
    StepEntry { year: 1988, month: 1, delat: 24.0 },
    StepEntry { year: 1990, month: 1, delat: 25.0 },
    StepEntry { year: 1991, month: 1, delat: 26.0 },
    StepEntry { year: 1992, month: 7, delat: 27.0 },
    StepEntry { year: 1993, month: 7, delat: 28.0 },
    StepEntry { year: 1994, month: 7, delat: 29.0 },
    StepEntry { year: 1996, month: 1, delat: 30.0 },
    StepEntry { year: 1997, month: 7, delat: 31.0 },
    StepEntry { year: 1999, month: 1, delat: 32.0 },
    StepEntry { year: 2006, month: 1, delat: 33.0 },
    StepEntry { year: 2009, month: 1, delat: 34.0 },
    StepEntry { year: 2012, month: 7, delat: 35.0 },
    StepEntry { year: 2015, month: 7, delat: 36.0 },
    StepEntry { year: 2017, month: 1, delat: 37.0 },
];

/// The table of TAI-UTC offsets.
///
/// Loaded once at process start and passed **by reference** into every
/// UTC-involving conversion; it is read-only at runtime and safe to share
/// across threads.
///
/// Callers needing leap-second detection must sample this table at exactly
/// the three canonical points (0ʰ today, 12ʰ today and 0ʰ tomorrow); the
/// 12ʰ sample is what distinguishes a pre-1972 drift from a genuine jump.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeapSecondTable;

impl LeapSecondTable {
    /// The built-in IERS table, current through the 2017 leap second.
    pub fn builtin() -> Self {
        LeapSecondTable
    }

    /// TAI-UTC in seconds for a given calendar date and fraction of day.
    ///
    /// Arguments
    /// ---------
    /// * `iy`, `im`, `id`: Gregorian calendar date.
    /// * `fd`: fraction of day in [0,1]; only matters during the pre-1972
    ///   drift era.
    ///
    /// Return
    /// ------
    /// * `(delta_at, status)` where `status` is [`TimeStatus::DubiousYear`]
    ///   for dates before 1960 (result 0.0) or suspiciously far past the
    ///   table's release, and [`TimeStatus::Ok`] otherwise.
    pub fn delta_at(
        &self,
        iy: i32,
        im: i32,
        id: i32,
        fd: f64,
    ) -> Result<(f64, TimeStatus), SidereaError> {
        if !(0.0..=1.0).contains(&fd) {
            return Err(SidereaError::BadFraction(fd));
        }

        // Validates the calendar fields and yields the MJD for drift terms.
        let (_, djm) = cal2jd(iy, im, id)?;

        // Before the UTC era there is no TAI-UTC to speak of.
        if iy < DRIFT[0].year {
            return Ok((0.0, TimeStatus::DubiousYear));
        }
        let status = if iy > RELEASE_YEAR + 5 {
            TimeStatus::DubiousYear
        } else {
            TimeStatus::Ok
        };

        // Date-ordered key used to find the governing entry.
        let m = 12 * iy + im;

        for entry in STEPS.iter().rev() {
            if m >= 12 * entry.year + entry.month {
                return Ok((entry.delat, status));
            }
        }
        for entry in DRIFT.iter().rev() {
            if m >= 12 * entry.year + entry.month {
                let da = entry.offset + (djm + fd - entry.mjd_ref) * entry.rate;
                return Ok((da, status));
            }
        }

        // Unreachable: the pre-1960 case already returned.
        Err(SidereaError::UnacceptableDate)
    }
}

#[cfg(test)]
mod leap_seconds_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_delta_at_modern() {
        let table = LeapSecondTable::builtin();
        assert_eq!(table.delta_at(2003, 6, 1, 0.0).unwrap(), (32.0, TimeStatus::Ok));
        assert_eq!(table.delta_at(2008, 1, 17, 0.0).unwrap(), (33.0, TimeStatus::Ok));
        assert_eq!(table.delta_at(2017, 9, 1, 0.0).unwrap(), (37.0, TimeStatus::Ok));
    }

    #[test]
    fn test_delta_at_step_boundary() {
        let table = LeapSecondTable::builtin();
        // 2016-12-31 was a leap-second day: 36 s before, 37 s after.
        assert_eq!(table.delta_at(2016, 12, 31, 0.0).unwrap().0, 36.0);
        assert_eq!(table.delta_at(2017, 1, 1, 0.0).unwrap().0, 37.0);
    }

    #[test]
    fn test_delta_at_drift_era() {
        let table = LeapSecondTable::builtin();
        // 1961-01-01 is MJD 37300, the reference of its own drift entry.
        let (da, status) = table.delta_at(1961, 1, 1, 0.0).unwrap();
        assert_relative_eq!(da, 1.422818, epsilon = 1e-12);
        assert_eq!(status, TimeStatus::Ok);

        // The fraction of day matters during the drift era.
        let (da_noon, _) = table.delta_at(1961, 1, 1, 0.5).unwrap();
        assert_relative_eq!(da_noon - da, 0.5 * 0.001296, epsilon = 1e-15);
    }

    #[test]
    fn test_delta_at_statuses() {
        let table = LeapSecondTable::builtin();
        assert_eq!(table.delta_at(1955, 1, 1, 0.0).unwrap(), (0.0, TimeStatus::DubiousYear));
        assert_eq!(table.delta_at(2100, 1, 1, 0.0).unwrap().1, TimeStatus::DubiousYear);
        assert!(matches!(
            table.delta_at(2000, 1, 1, 1.5),
            Err(SidereaError::BadFraction(_))
        ));
        assert!(matches!(
            table.delta_at(2000, 13, 1, 0.0),
            Err(SidereaError::BadMonth(13))
        ));
    }
}
