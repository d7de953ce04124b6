//! iCalendar parsing primitives (RFC 5545).
//!
//! - Lexer: content line splitting, unfolding and tokenizing
//! - Values: value type parsing (DATE, DATE-TIME, DURATION, ...)
//! - Parser: full document parsing into typed structures

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines, split_unescaped};
pub use parser::{parse, parse_components};
pub use values::{
    parse_binary, parse_boolean, parse_date, parse_datetime, parse_duration, parse_float,
    parse_integer, parse_period, parse_rrule, parse_time, parse_utc_offset, unescape_text,
};
