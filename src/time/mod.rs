//! Time-scale codecs and converters.
//!
//! All instants are carried as **two-part Julian Dates**: an ordered pair of
//! doubles whose sum is the Julian Date. The split is caller-chosen
//! (whole-day/fraction, epoch/offset, ...) and is preserved through every
//! conversion so that precision is never sacrificed to a fixed convention.
//! No function in this module assumes a particular split.

pub mod calendar;
pub mod fields;
pub mod leap_seconds;
pub mod scales;

pub use calendar::{cal2jd, jd2cal};
pub use fields::{d2dtf, dtf2d};
pub use leap_seconds::LeapSecondTable;
pub use scales::{
    tai_to_tt, tai_to_ut1, tai_to_utc, tt_to_tai, ut1_to_tai, ut1_to_utc, utc_to_tai, utc_to_ut1,
};

/// The time scale a set of calendar/clock fields is expressed in.
///
/// Only UTC carries leap-second semantics; the other scales are uniform and
/// use a fixed 86400 s day in the field codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeScale {
    Utc,
    Tai,
    Tt,
    Ut1,
}
