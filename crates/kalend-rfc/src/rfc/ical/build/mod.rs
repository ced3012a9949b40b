//! ICS serialization (RFC 5545 §3.1, §3.3.11).

mod escape;
mod fold;
mod ics;
mod serializer;

pub use escape::{escape_param_value, escape_text};
pub use fold::{MAX_LINE_OCTETS, fold_line};
pub use ics::{IcsOptions, IcsSerializer, serialize_calendar, serialize_event};
pub use serializer::{serialize_component, serialize_parameter, serialize_property};
