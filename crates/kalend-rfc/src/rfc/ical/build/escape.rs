//! TEXT and parameter escaping (RFC 5545 §3.3.11, RFC 6868).

/// Escapes text for iCalendar TEXT values.
///
/// Backslash, semicolon and comma get a leading backslash. `\n` and
/// `\r\n` both become a literal `\n`; any other `\r` is dropped.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + s.len() / 8);

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a parameter value, quoting it when it holds `:`, `;` or `,`.
///
/// Quotes and line breaks inside the value use caret encoding.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    if !s.contains([':', ';', ',', '"', '\n', '^']) {
        return s.to_string();
    }

    let encoded: String = s
        .chars()
        .map(|c| match c {
            '^' => "^^".to_string(),
            '\n' => "^n".to_string(),
            '"' => "^'".to_string(),
            other => other.to_string(),
        })
        .collect();
    format!("\"{encoded}\"")
}
