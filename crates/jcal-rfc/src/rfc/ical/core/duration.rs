//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;

/// DURATION value (RFC 5545 §3.3.6).
///
/// Either week-based (`P2W`) or day/time-based (`P1DT2H30M`). Years and
/// months are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    pub negative: bool,
    /// Weeks; a non-zero value excludes every other component.
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    #[must_use]
    pub const fn weeks(weeks: u32) -> Self {
        Self { weeks, ..Self::zero() }
    }

    #[must_use]
    pub const fn days(days: u32) -> Self {
        Self { days, ..Self::zero() }
    }

    #[must_use]
    pub const fn hours(hours: u32) -> Self {
        Self { hours, ..Self::zero() }
    }

    #[must_use]
    pub const fn minutes(minutes: u32) -> Self {
        Self { minutes, ..Self::zero() }
    }

    /// Day/time-based duration from its components.
    #[must_use]
    pub const fn dhms(days: u32, hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
            ..Self::zero()
        }
    }

    #[must_use]
    pub const fn negate(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    /// Returns the signed length in seconds.
    #[must_use]
    pub const fn as_seconds(&self) -> i64 {
        let total = self.weeks as i64 * 7 * 86_400
            + self.days as i64 * 86_400
            + self.hours as i64 * 3600
            + self.minutes as i64 * 60
            + self.seconds as i64;
        if self.negative { -total } else { total }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;

        if self.weeks > 0 {
            return write!(f, "{}W", self.weeks);
        }

        let has_time = self.hours > 0 || self.minutes > 0 || self.seconds > 0;
        if self.days > 0 || !has_time {
            write!(f, "{}D", self.days)?;
        }
        if has_time {
            f.write_str("T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}
