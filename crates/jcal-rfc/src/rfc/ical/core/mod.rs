//! iCalendar core models (RFC 5545).
//!
//! These types are designed for:
//! - Round-trip fidelity: unknown properties, parameters and values survive
//! - Order preservation: properties and sub-components keep their positions
//! - Type safety: every value is one variant of a closed [`Value`] enum

mod component;
mod datetime;
mod duration;
mod parameter;
mod property;
mod rrule;
mod value;
mod value_type;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{Date, DateTime, DateTimeForm, Time, UtcOffset};
pub use duration::Duration;
pub use parameter::{Parameter, names as param_names};
pub use property::{ContentLine, Property};
pub use rrule::{Frequency, RRule, RRuleUntil, Weekday, WeekdayNum};
pub use value::{Period, Value};
pub use value_type::{DEFAULT_VALUE_TYPES, ValueType, default_value_type, is_multi_valued};
