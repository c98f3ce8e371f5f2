use thiserror::Error;

/// Hard failures raised by the time-scale codecs and the astrometric pipeline.
///
/// Every variant is a specific input-range or propagation failure; plausibility
/// conditions that do not block the computation are reported through
/// [`TimeStatus`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SidereaError {
    #[error("year {0} is earlier than -4799, outside the supported calendar")]
    BadYear(i32),

    #[error("month {0} is outside 1-12")]
    BadMonth(i32),

    /// Day-of-month validity is advisory: the Julian Date is still computed
    /// and carried in the error payload.
    #[error("day {day} is outside the range of the month")]
    BadDay { day: i32, jd: (f64, f64) },

    #[error("hour {0} is outside 0-23")]
    BadHour(i32),

    #[error("minute {0} is outside 0-59")]
    BadMinute(i32),

    #[error("seconds value {0} is negative")]
    BadSecond(f64),

    #[error("fraction of day {0} is outside [0,1]")]
    BadFraction(f64),

    #[error("Julian Date {0} is outside the representable range")]
    DateOutOfRange(f64),

    /// An orchestrated conversion received a date its nested time-scale
    /// conversions cannot handle; further pipeline stages are not run.
    #[error("date unusable by a nested time-scale conversion")]
    UnacceptableDate,

    #[error("star state vector is not physical (superluminal velocity or null position)")]
    NonPhysicalStar,
}

/// Non-fatal conditions surfaced alongside a computed result.
///
/// Statuses compose by "worst wins": combining any two keeps the variant with
/// the higher precedence, `Ok < DubiousYear < TimeAfterEndOfDay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TimeStatus {
    /// No warning.
    #[default]
    Ok,
    /// The date falls before the UTC era or suspiciously far beyond the end
    /// of the known leap-second table.
    DubiousYear,
    /// The time-of-day field is at or past the (possibly leap-extended) end
    /// of the day; the encoded value is still returned.
    TimeAfterEndOfDay,
}

impl TimeStatus {
    /// Merge two statuses, keeping the most severe one.
    pub fn combine(self, other: TimeStatus) -> TimeStatus {
        self.max(other)
    }

    /// True when any warning condition is present.
    pub fn is_warning(self) -> bool {
        self != TimeStatus::Ok
    }
}

#[cfg(test)]
mod errors_test {
    use super::*;

    #[test]
    fn test_status_precedence() {
        assert_eq!(TimeStatus::Ok.combine(TimeStatus::DubiousYear), TimeStatus::DubiousYear);
        assert_eq!(
            TimeStatus::DubiousYear.combine(TimeStatus::TimeAfterEndOfDay),
            TimeStatus::TimeAfterEndOfDay
        );
        assert_eq!(
            TimeStatus::TimeAfterEndOfDay.combine(TimeStatus::Ok),
            TimeStatus::TimeAfterEndOfDay
        );
        assert!(!TimeStatus::Ok.is_warning());
        assert!(TimeStatus::DubiousYear.is_warning());
    }
}
