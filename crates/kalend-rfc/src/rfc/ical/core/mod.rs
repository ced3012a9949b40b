//! iCalendar core models (RFC 5545).
//!
//! Value types shared by the parser, the serializer and the expander, plus
//! the plain records callers hand to the engine:
//! - [`RecurrenceSpec`](crate::rfc::ical::expand::RecurrenceSpec) inputs are parsed into
//!   [`LocalDateTime`] and [`RRule`]
//! - [`EventRecord`] and [`CalendarMetadata`] are turned into a [`Component`]
//!   tree before serialization

mod calendar;
mod component;
mod datetime;
mod duration;
mod event;
mod parameter;
mod property;
mod rrule;

pub use calendar::CalendarMetadata;
pub use component::{Component, ComponentKind};
pub use datetime::{LocalDateTime, format_utc, utc_from_micros};
pub use duration::Duration;
pub use event::{EventRecord, EventStatus, RecurrenceId};
pub use parameter::Parameter;
pub use property::{Property, Value};
pub use rrule::{Frequency, RRule, RRuleUntil, RecurrenceBound, Weekday, WeekdayNum};
