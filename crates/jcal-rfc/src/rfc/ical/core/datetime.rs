//! iCalendar DATE, TIME, DATE-TIME and UTC-OFFSET value types
//! (RFC 5545 §3.3.4, §3.3.5, §3.3.12, §3.3.14).

use std::fmt;

/// DATE value (RFC 5545 §3.3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
}

impl Date {
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Builds a date from calendar fields, rejecting days that do not exist.
    #[must_use]
    pub fn checked(year: i32, month: u32, day: u32) -> Option<Self> {
        chrono::NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self {
            year: u16::try_from(year).ok()?,
            month: u8::try_from(month).ok()?,
            day: u8::try_from(day).ok()?,
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// TIME value (RFC 5545 §3.3.12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    /// Second (0-60, 60 for a leap second).
    pub second: u8,
    /// Whether the time carried a `Z` suffix.
    pub is_utc: bool,
}

impl Time {
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8, is_utc: bool) -> Self {
        Self {
            hour,
            minute,
            second,
            is_utc,
        }
    }

    #[must_use]
    pub const fn utc(hour: u8, minute: u8, second: u8) -> Self {
        Self::new(hour, minute, second, true)
    }

    #[must_use]
    pub const fn local(hour: u8, minute: u8, second: u8) -> Self {
        Self::new(hour, minute, second, false)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.is_utc {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// Form of a DATE-TIME value (RFC 5545 §3.3.5).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateTimeForm {
    /// Same wall-clock time in every zone: `19980118T230000`.
    Floating,
    /// Absolute instant: `19980119T070000Z`.
    Utc,
    /// Local time in a named zone: `TZID=America/New_York:19980119T020000`.
    Zoned { tzid: String },
}

/// DATE-TIME value (RFC 5545 §3.3.5).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub date: Date,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub form: DateTimeForm,
}

impl DateTime {
    /// Combines a date and a time of day.
    ///
    /// A UTC time wins over `tzid`; without either the result is floating.
    #[must_use]
    pub fn new(date: Date, time: Time, tzid: Option<&str>) -> Self {
        let form = match tzid {
            _ if time.is_utc => DateTimeForm::Utc,
            Some(tzid) => DateTimeForm::Zoned {
                tzid: tzid.to_string(),
            },
            None => DateTimeForm::Floating,
        };
        Self {
            date,
            hour: time.hour,
            minute: time.minute,
            second: time.second,
            form,
        }
    }

    #[must_use]
    pub fn floating(date: Date, hour: u8, minute: u8, second: u8) -> Self {
        Self::new(date, Time::local(hour, minute, second), None)
    }

    #[must_use]
    pub fn utc(date: Date, hour: u8, minute: u8, second: u8) -> Self {
        Self::new(date, Time::utc(hour, minute, second), None)
    }

    #[must_use]
    pub fn zoned(date: Date, hour: u8, minute: u8, second: u8, tzid: &str) -> Self {
        Self::new(date, Time::local(hour, minute, second), Some(tzid))
    }

    /// Returns the time-of-day part.
    #[must_use]
    pub fn time(&self) -> Time {
        Time::new(self.hour, self.minute, self.second, self.is_utc())
    }

    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self.form, DateTimeForm::Floating)
    }

    /// Returns the zone identifier of a zoned value.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            DateTimeForm::Floating | DateTimeForm::Utc => None,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time())
    }
}

/// UTC-OFFSET value (RFC 5545 §3.3.14), stored as signed seconds east of UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset {
    seconds: i32,
}

impl UtcOffset {
    pub const UTC: Self = Self { seconds: 0 };

    /// Builds an offset from its sign and unsigned components.
    #[must_use]
    pub const fn from_parts(negative: bool, hours: u8, minutes: u8, seconds: u8) -> Self {
        let total = hours as i32 * 3600 + minutes as i32 * 60 + seconds as i32;
        Self {
            seconds: if negative { -total } else { total },
        }
    }

    #[must_use]
    pub const fn as_seconds(self) -> i32 {
        self.seconds
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// Returns the unsigned `(hours, minutes, seconds)` components.
    #[must_use]
    pub const fn parts(self) -> (u32, u32, u32) {
        let abs = self.seconds.unsigned_abs();
        (abs / 3600, (abs % 3600) / 60, abs % 60)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { '-' } else { '+' };
        let (hours, minutes, seconds) = self.parts();
        write!(f, "{sign}{hours:02}{minutes:02}")?;
        if seconds != 0 {
            write!(f, "{seconds:02}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_date_rejects_missing_days() {
        assert_eq!(Date::checked(2024, 2, 29), Some(Date::new(2024, 2, 29)));
        assert_eq!(Date::checked(2023, 2, 29), None);
        assert_eq!(Date::checked(2024, 13, 1), None);
    }

    #[test]
    fn utc_offset_display() {
        assert_eq!(UtcOffset::from_parts(false, 5, 30, 0).to_string(), "+0530");
        assert_eq!(UtcOffset::from_parts(true, 8, 0, 0).to_string(), "-0800");
        assert_eq!(UtcOffset::from_parts(false, 0, 19, 32).to_string(), "+001932");
        assert_eq!(UtcOffset::UTC.to_string(), "+0000");
    }

    #[test]
    fn datetime_forms() {
        let date = Date::new(2026, 1, 23);
        assert_eq!(DateTime::utc(date, 12, 0, 0).to_string(), "20260123T120000Z");
        assert_eq!(
            DateTime::floating(date, 12, 0, 0).to_string(),
            "20260123T120000"
        );

        let zoned = DateTime::zoned(date, 9, 30, 0, "Europe/Berlin");
        assert_eq!(zoned.tzid(), Some("Europe/Berlin"));
        assert_eq!(zoned.to_string(), "20260123T093000");
    }

    #[test]
    fn utc_time_ignores_tzid() {
        let dt = DateTime::new(Date::new(2026, 1, 1), Time::utc(0, 0, 0), Some("Europe/Paris"));
        assert!(dt.is_utc());
        assert_eq!(dt.tzid(), None);
    }
}
