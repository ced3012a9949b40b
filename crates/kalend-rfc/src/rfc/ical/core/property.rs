//! iCalendar properties and their typed values (RFC 5545 §3.3, §3.8).

use chrono::{DateTime, Utc};

use super::{Duration, LocalDateTime, Parameter, format_utc};

/// A property value before wire encoding.
///
/// Only [`Value::Text`] is escaped on output; every other variant is
/// emitted in its iCalendar literal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// TEXT value (unescaped).
    Text(String),
    /// INTEGER value.
    Integer(i64),
    /// One or more local DATE or DATE-TIME values.
    Local(Vec<LocalDateTime>),
    /// UTC DATE-TIME value.
    Utc(DateTime<Utc>),
    /// DURATION value.
    Duration(Duration),
    /// RECUR value, kept as written.
    Recur(String),
    /// URI value, never escaped.
    Uri(String),
}

impl Value {
    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Formats non-text values in iCalendar form. Text is returned as-is.
    #[must_use]
    pub fn to_ical(&self) -> String {
        match self {
            Self::Text(s) | Self::Recur(s) | Self::Uri(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Local(values) => values
                .iter()
                .map(LocalDateTime::to_ical)
                .collect::<Vec<_>>()
                .join(","),
            Self::Utc(instant) => format_utc(instant),
            Self::Duration(duration) => duration.to_string(),
        }
    }
}

/// A single iCalendar property: name, parameters and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of insertion.
    pub params: Vec<Parameter>,
    pub value: Value,
}

impl Property {
    fn with_value(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value,
        }
    }

    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(name, Value::Text(value.into()))
    }

    /// Creates a property with an integer value.
    #[must_use]
    pub fn integer(name: impl Into<String>, value: i64) -> Self {
        Self::with_value(name, Value::Integer(value))
    }

    /// Creates a property with a UTC date-time value.
    #[must_use]
    pub fn utc(name: impl Into<String>, instant: DateTime<Utc>) -> Self {
        Self::with_value(name, Value::Utc(instant))
    }

    /// Creates a property with a duration value.
    #[must_use]
    pub fn duration(name: impl Into<String>, duration: Duration) -> Self {
        Self::with_value(name, Value::Duration(duration))
    }

    /// Creates a RECUR property such as `RRULE`.
    #[must_use]
    pub fn recur(name: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::with_value(name, Value::Recur(rule.into()))
    }

    /// Creates a property with a URI value.
    #[must_use]
    pub fn uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::with_value(name, Value::Uri(uri.into()))
    }

    /// Creates a property holding local date or date-time values.
    ///
    /// DATE values get `VALUE=DATE` and never a `TZID`; DATE-TIME values get
    /// `TZID` when one is given and are floating otherwise. The form of the
    /// first value decides for the whole list.
    #[must_use]
    pub fn local(name: impl Into<String>, values: Vec<LocalDateTime>, tzid: Option<&str>) -> Self {
        let all_day = values.first().is_some_and(LocalDateTime::is_all_day);
        let mut prop = Self::with_value(name, Value::Local(values));
        if all_day {
            prop.params.push(Parameter::value_type("DATE"));
        } else if let Some(tzid) = tzid {
            prop.params.push(Parameter::tzid(tzid));
        }
        prop
    }

    /// Adds a parameter to this property.
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}
