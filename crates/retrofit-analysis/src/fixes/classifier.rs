//! Lifecycle body classification.

use crate::parsers::MethodBody;

use super::signals;
use super::types::Pattern;

const UNSAFE_PREFIX: &str = "UNSAFE_";

/// Longest body, braces included, still treated as a trivial side effect.
const SIMPLE_BODY_MAX_LEN: usize = 150;

/// Classify a method body by name and shape.
///
/// An absent or statement-free body is `Empty`; otherwise an `UNSAFE_`
/// name is `UnsafePrefix`. The three legacy hooks get dedicated rules and
/// every other name is `Complex`. Pure and deterministic.
pub fn classify(name: &str, body: Option<&MethodBody>) -> Pattern {
    let Some(body) = body.filter(|b| b.statement_count() > 0) else {
        return Pattern::Empty;
    };
    if name.starts_with(UNSAFE_PREFIX) {
        return Pattern::UnsafePrefix;
    }

    match name {
        "componentWillMount" => classify_will_mount(&body.text, body.statement_count()),
        "componentWillReceiveProps" => classify_will_receive_props(&body.text, body.statement_count()),
        "componentWillUpdate" => classify_will_update(&body.text, body.statement_count()),
        _ => Pattern::Complex,
    }
}

fn classify_will_mount(text: &str, statements: usize) -> Pattern {
    if signals::has_nested_state_object(text) || signals::has_inline_comment(text) {
        return Pattern::Complex;
    }

    let has_async = signals::has_async_marker(text);
    let has_set_state = signals::calls_set_state(text);
    if has_set_state && !signals::has_other_work(text, statements) {
        return Pattern::SetStateOnly;
    }

    let simple_side_effect =
        statements <= 2 && !has_set_state && !has_async && text.len() < SIMPLE_BODY_MAX_LEN;
    if has_async || simple_side_effect {
        return Pattern::Async;
    }
    Pattern::Complex
}

fn classify_will_receive_props(text: &str, statements: usize) -> Pattern {
    // Prop-driven state updates are never auto-fixed.
    if statements <= 3
        && signals::logs_or_breaks(text)
        && !signals::mentions_set_state(text)
        && !signals::compares_props(text)
    {
        Pattern::SimpleLogging
    } else {
        Pattern::Complex
    }
}

fn classify_will_update(text: &str, statements: usize) -> Pattern {
    if statements <= 3 && !signals::touches_dom(text) && !signals::mentions_set_state(text) {
        Pattern::SimpleSideEffect
    } else {
        Pattern::Complex
    }
}
