//! Content line folding (RFC 5545 §3.1).

/// Maximum octets per physical line, excluding the CRLF.
pub const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line and terminates it with CRLF.
///
/// Continuation lines start with a single space, which counts toward the
/// limit. Breaks only fall between characters, so multi-byte UTF-8
/// sequences are never split.
#[must_use]
pub fn fold_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len() + 3 * (line.len() / MAX_LINE_OCTETS + 1));
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;

    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > budget {
            result.push_str("\r\n ");
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        result.push(c);
        used += width;
    }

    result.push_str("\r\n");
    result
}
