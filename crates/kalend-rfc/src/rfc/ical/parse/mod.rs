//! iCalendar parsing helpers.
//!
//! Only the pieces the engine consumes are parsed here: RRULE values and
//! escaped TEXT values.

mod error;
mod rrule;
mod text;

pub use error::RRuleError;
pub use rrule::{parse_rrule, validate_rrule};
pub use text::unescape_text;
