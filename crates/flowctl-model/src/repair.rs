//! Heuristic JSON repair pass (spec §4.3, parser stage 2).
//!
//! Closes unbalanced braces/brackets, strips trailing commas, quotes
//! bare object keys, and normalizes single-quoted strings to
//! double-quoted. Best-effort: it does not attempt to fully re-derive
//! grammar, only to recover the common shapes hand-edited JSON breaks.

use regex::Regex;
use std::sync::LazyLock;

static BARE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*:)"#).expect("valid regex"));

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#",(\s*[}\]])"#).expect("valid regex"));

/// Applies the full repair pipeline and returns the best-effort result.
/// Callers reparse the output; repair never itself validates JSON-ness.
pub fn repair_json(raw: &str) -> String {
    let quoted_keys = BARE_KEY_RE.replace_all(raw, "$1\"$2\"$3");
    let normalized_quotes = normalize_quotes(&quoted_keys);
    let no_trailing_commas = TRAILING_COMMA_RE.replace_all(&normalized_quotes, "$1");
    balance_brackets(&no_trailing_commas)
}

/// Converts single-quoted string literals to double-quoted, skipping
/// content already inside double-quoted strings.
fn normalize_quotes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_double = false;
    while let Some(c) = chars.next() {
        match c {
            '"' if !in_double => {
                in_double = true;
                out.push(c);
            }
            '"' if in_double => {
                in_double = false;
                out.push(c);
            }
            '\\' if in_double => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '\'' if !in_double => {
                // Treat as a single-quoted string: replace with a
                // double-quoted one, escaping any embedded `"`.
                out.push('"');
                for next in chars.by_ref() {
                    if next == '\'' {
                        break;
                    }
                    if next == '"' {
                        out.push('\\');
                    }
                    out.push(next);
                }
                out.push('"');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Appends closing brackets/braces for any left unterminated, respecting
/// string boundaries so braces inside string values aren't miscounted.
fn balance_brackets(input: &str) -> String {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => in_string = !in_string,
            '\\' if in_string => {
                chars.next();
            }
            '{' if !in_string => stack.push('}'),
            '[' if !in_string => stack.push(']'),
            '}' | ']' if !in_string => {
                stack.pop();
            }
            _ => {}
        }
    }
    let mut out = input.trim_end().to_string();
    if in_string {
        out.push('"');
    }
    while let Some(closer) = stack.pop() {
        out.push(closer);
    }
    out
}
