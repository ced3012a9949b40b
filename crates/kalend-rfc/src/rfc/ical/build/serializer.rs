//! iCalendar serializer (RFC 5545).
//!
//! Serializes a [`Component`] tree to text. Properties and child
//! components are emitted in a canonical order so that the same input
//! always produces byte-identical output.

use std::cmp::Ordering;

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::rfc::ical::core::{Component, ComponentKind, Parameter, Property, Value};

const CALENDAR_ORDER: &[&str] = &[
    "VERSION",
    "PRODID",
    "CALSCALE",
    "METHOD",
    "NAME",
    "X-WR-CALNAME",
    "DESCRIPTION",
    "X-WR-CALDESC",
    "X-WR-TIMEZONE",
    "COLOR",
    "URL",
    "REFRESH-INTERVAL",
    "X-PUBLISHED-TTL",
];

const EVENT_ORDER: &[&str] = &[
    "UID",
    "DTSTAMP",
    "DTSTART",
    "DTEND",
    "DURATION",
    "RRULE",
    "RDATE",
    "EXDATE",
    "RECURRENCE-ID",
    "SUMMARY",
    "DESCRIPTION",
    "LOCATION",
    "STATUS",
    "URL",
    "IMAGE",
    "CREATED",
    "LAST-MODIFIED",
    "SEQUENCE",
];

const PARAM_ORDER: &[&str] = &["VALUE", "TZID"];

/// Serializes a component, its properties and its children.
#[must_use]
pub fn serialize_component(component: &Component) -> String {
    let mut result = String::new();

    result.push_str(&fold_line(&format!("BEGIN:{}", component.kind)));

    for prop in canonical_property_order(&component.properties, component.kind) {
        result.push_str(&serialize_property(prop));
    }

    let mut children: Vec<&Component> = component.children.iter().collect();
    children.sort_by(|a, b| cmp_by_uid_recurrence(a, b));
    for child in children {
        result.push_str(&serialize_component(child));
    }

    result.push_str(&fold_line(&format!("END:{}", component.kind)));

    result
}

/// Serializes one property as a folded, CRLF-terminated content line.
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();

    for param in canonical_param_order(&prop.params) {
        line.push(';');
        line.push_str(&serialize_parameter(param));
    }

    line.push(':');
    match &prop.value {
        Value::Text(text) => line.push_str(&escape_text(text)),
        other => line.push_str(&other.to_ical()),
    }

    fold_line(&line)
}

#[must_use]
pub fn serialize_parameter(param: &Parameter) -> String {
    let values: Vec<String> = param
        .values
        .iter()
        .map(|v| escape_param_value(v))
        .collect();
    format!("{}={}", param.name, values.join(","))
}

/// Known properties first in their fixed order, then the rest as inserted.
fn canonical_property_order(props: &[Property], kind: ComponentKind) -> Vec<&Property> {
    let order = match kind {
        ComponentKind::Calendar => CALENDAR_ORDER,
        ComponentKind::Event => EVENT_ORDER,
    };
    ordered_by_name(props, order, |p| p.name.as_str())
}

fn canonical_param_order(params: &[Parameter]) -> Vec<&Parameter> {
    ordered_by_name(params, PARAM_ORDER, |p| p.name.as_str())
}

fn ordered_by_name<'a, T>(
    items: &'a [T],
    order: &[&str],
    name: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    let rank = |item: &T| {
        order
            .iter()
            .position(|n| name(item).eq_ignore_ascii_case(n))
            .unwrap_or(order.len())
    };
    let mut ordered: Vec<&T> = items.iter().collect();
    // Stable sort keeps insertion order within the same rank.
    ordered.sort_by_key(|&item| rank(item));
    ordered
}

/// Compares components by UID, then by RECURRENCE-ID.
fn cmp_by_uid_recurrence(a: &Component, b: &Component) -> Ordering {
    let recurrence = |c: &Component| {
        c.get_property("RECURRENCE-ID")
            .map(|p| p.value.to_ical())
            .unwrap_or_default()
    };

    a.uid()
        .unwrap_or("")
        .cmp(b.uid().unwrap_or(""))
        .then_with(|| recurrence(a).cmp(&recurrence(b)))
}
