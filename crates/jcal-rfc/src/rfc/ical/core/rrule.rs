//! iCalendar RECUR value type (RFC 5545 §3.3.10).

use std::fmt;

use super::{Date, DateTime};

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        [
            Self::Secondly,
            Self::Minutely,
            Self::Hourly,
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Yearly,
        ]
        .into_iter()
        .find(|freq| freq.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        [
            Self::Sunday,
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
        ]
        .into_iter()
        .find(|day| day.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BYDAY entry: a weekday with an optional ordinal (`MO`, `1MO`, `-1FR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayNum {
    /// Occurrence within the period (-53..=53, never 0).
    pub ordinal: Option<i8>,
    pub weekday: Weekday,
}

impl WeekdayNum {
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    #[must_use]
    pub const fn nth(ordinal: i8, weekday: Weekday) -> Self {
        Self {
            ordinal: Some(ordinal),
            weekday,
        }
    }

    /// Parses `[+/-]NN` followed by a weekday abbreviation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let split = s.len().checked_sub(2)?;
        if !s.is_char_boundary(split) {
            return None;
        }
        let (ordinal, day) = s.split_at(split);
        let weekday = Weekday::parse(day)?;
        let ordinal = match ordinal {
            "" => None,
            n => Some(n.parse::<i8>().ok().filter(|n| *n != 0 && (-53..=53).contains(n))?),
        };
        Some(Self { ordinal, weekday })
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// UNTIL boundary: DATE or DATE-TIME.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RRuleUntil {
    Date(Date),
    DateTime(DateTime),
}

impl fmt::Display for RRuleUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

/// Recurrence rule (RFC 5545 §3.3.10).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RRule {
    pub freq: Option<Frequency>,
    pub until: Option<RRuleUntil>,
    pub count: Option<u32>,
    pub interval: Option<u32>,
    pub by_second: Vec<u8>,
    pub by_minute: Vec<u8>,
    pub by_hour: Vec<u8>,
    pub by_day: Vec<WeekdayNum>,
    pub by_monthday: Vec<i8>,
    pub by_yearday: Vec<i16>,
    pub by_weekno: Vec<i8>,
    pub by_month: Vec<u8>,
    pub by_setpos: Vec<i16>,
    pub wkst: Option<Weekday>,
    /// Rule parts this model has no field for (`RSCALE`, `SKIP`, x-names),
    /// in order of appearance, names upper-cased.
    pub extensions: Vec<(String, Vec<String>)>,
}

impl RRule {
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq: Some(freq),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn with_by_day(mut self, days: Vec<WeekdayNum>) -> Self {
        self.by_day = days;
        self
    }

    #[must_use]
    pub fn with_wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = Some(wkst);
        self
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(freq) = self.freq {
            parts.push(format!("FREQ={freq}"));
        }
        if let Some(until) = &self.until {
            parts.push(format!("UNTIL={until}"));
        }
        if let Some(count) = self.count {
            parts.push(format!("COUNT={count}"));
        }
        if let Some(interval) = self.interval {
            parts.push(format!("INTERVAL={interval}"));
        }

        let lists = [
            ("BYSECOND", join(&self.by_second)),
            ("BYMINUTE", join(&self.by_minute)),
            ("BYHOUR", join(&self.by_hour)),
            ("BYDAY", join(&self.by_day)),
            ("BYMONTHDAY", join(&self.by_monthday)),
            ("BYYEARDAY", join(&self.by_yearday)),
            ("BYWEEKNO", join(&self.by_weekno)),
            ("BYMONTH", join(&self.by_month)),
            ("BYSETPOS", join(&self.by_setpos)),
        ];
        parts.extend(
            lists
                .into_iter()
                .filter(|(_, joined)| !joined.is_empty())
                .map(|(name, joined)| format!("{name}={joined}")),
        );

        if let Some(wkst) = self.wkst {
            parts.push(format!("WKST={wkst}"));
        }
        parts.extend(
            self.extensions
                .iter()
                .map(|(name, values)| format!("{name}={}", values.join(","))),
        );

        f.write_str(&parts.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_basic() {
        let rrule = RRule::new(Frequency::Daily).with_count(10);
        assert_eq!(rrule.to_string(), "FREQ=DAILY;COUNT=10");
    }

    #[test]
    fn display_byday_and_wkst() {
        let rrule = RRule::new(Frequency::Weekly)
            .with_interval(2)
            .with_by_day(vec![
                WeekdayNum::every(Weekday::Monday),
                WeekdayNum::nth(-1, Weekday::Friday),
            ])
            .with_wkst(Weekday::Sunday);
        assert_eq!(
            rrule.to_string(),
            "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,-1FR;WKST=SU"
        );
    }

    #[test]
    fn display_extensions_last() {
        let mut rrule = RRule::new(Frequency::Yearly);
        rrule
            .extensions
            .push(("RSCALE".to_string(), vec!["CHINESE".to_string()]));
        assert_eq!(rrule.to_string(), "FREQ=YEARLY;RSCALE=CHINESE");
    }

    #[test]
    fn weekday_num_parse() {
        assert_eq!(
            WeekdayNum::parse("-1fr"),
            Some(WeekdayNum::nth(-1, Weekday::Friday))
        );
        assert_eq!(
            WeekdayNum::parse("+2TU"),
            Some(WeekdayNum::nth(2, Weekday::Tuesday))
        );
        assert_eq!(WeekdayNum::parse("MO"), Some(WeekdayNum::every(Weekday::Monday)));
        assert_eq!(WeekdayNum::parse("0MO"), None);
        assert_eq!(WeekdayNum::parse("XX"), None);
    }

    #[test]
    fn frequency_parse() {
        assert_eq!(Frequency::parse("weekly"), Some(Frequency::Weekly));
        assert_eq!(Frequency::parse("FORTNIGHTLY"), None);
    }
}
