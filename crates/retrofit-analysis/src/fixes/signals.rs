//! Textual signals over a method body.
//!
//! Each predicate answers one question about the raw body text, so the
//! classifier reads as a combination of named heuristics.

use std::sync::LazyLock;

use regex::Regex;

/// `{ key: {`, a nested object literal.
static NESTED_OBJECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\s*\w+\s*:\s*\{").ok());

/// A `//` comment that ends at a newline.
static TRAILING_COMMENT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"//.*\n").ok());

/// `this.props.x ===` or `=== this.props.x`.
static PROPS_COMPARISON: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"this\.props\.\w+\s*(!==|===|!=|==)|(!==|===|!=|==)\s*this\.props\.\w+").ok()
});

fn is_match(regex: &LazyLock<Option<Regex>>, text: &str) -> bool {
    regex.as_ref().is_some_and(|r| r.is_match(text))
}

const SET_STATE_CALL: &str = "this.setState";

pub fn calls_set_state(body: &str) -> bool {
    body.contains(SET_STATE_CALL)
}

/// Any mention of `setState`, including aliased or destructured calls.
pub fn mentions_set_state(body: &str) -> bool {
    body.contains("setState")
}

/// A state update whose argument holds a nested object literal.
pub fn has_nested_state_object(body: &str) -> bool {
    calls_set_state(body) && is_match(&NESTED_OBJECT, body)
}

/// A state update alongside a line comment.
pub fn has_inline_comment(body: &str) -> bool {
    calls_set_state(body) && body.contains("//") && is_match(&TRAILING_COMMENT, body)
}

pub fn has_async_marker(body: &str) -> bool {
    ["async", "fetch", "axios", ".then", "Promise"]
        .iter()
        .any(|marker| body.contains(marker))
}

/// Printing, returns, branches, loops, or more than two statements.
pub fn has_other_work(body: &str, statements: usize) -> bool {
    ["console.", "return", "if (", "for "]
        .iter()
        .any(|marker| body.contains(marker))
        || statements > 2
}

pub fn logs_or_breaks(body: &str) -> bool {
    body.contains("console.log") || body.contains("debugger")
}

pub fn compares_props(body: &str) -> bool {
    is_match(&PROPS_COMPARISON, body)
}

/// Touches `document`, `window.`, or string refs.
pub fn touches_dom(body: &str) -> bool {
    body.contains("document") || body.contains("window.") || body.contains("refs")
}
