//! Method renames onto the post-commit hooks.

use crate::parsers::MethodDecl;

pub const DID_MOUNT: &str = "componentDidMount";
pub const DID_UPDATE: &str = "componentDidUpdate";

/// Post-commit hook that replaces a legacy pre-render hook.
pub fn modern_hook_name(name: &str) -> &'static str {
    if name.contains("ReceiveProps") || name.contains("Update") {
        DID_UPDATE
    } else {
        DID_MOUNT
    }
}

/// Method text with its name token replaced by `new_name`.
///
/// Renaming onto `componentDidUpdate` also rewrites `nextProps` and
/// `nextState` to `prevProps` and `prevState` when they are the method's
/// first and second parameters.
pub fn renamed_method_text(method: &MethodDecl, new_name: &str) -> String {
    let offset = method.name_span.start.saturating_sub(method.span.start);
    let end = offset + method.name_span.len();
    let mut text = match (method.text.get(..offset), method.text.get(end..)) {
        (Some(head), Some(tail)) => format!("{head}{new_name}{tail}"),
        _ => method.text.replacen(&method.name, new_name, 1),
    };

    if new_name == DID_UPDATE {
        let param = |i: usize| method.params.get(i).map(|p| p.name.as_str());
        if param(0) == Some("nextProps") {
            text = rename_identifier(&text, "nextProps", "prevProps");
        }
        if param(1) == Some("nextState") {
            text = rename_identifier(&text, "nextState", "prevState");
        }
    }
    text
}

/// Replace whole-word occurrences of `from` in code positions.
///
/// Occurrences inside strings and comments, property names after `.`,
/// and longer identifiers containing `from` are left alone.
pub fn rename_identifier(text: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return text.to_string();
    }
    let mask = code_mask(text);
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (idx, _) in text.match_indices(from) {
        let end = idx + from.len();
        let before_ok = idx == 0 || {
            let b = bytes[idx - 1];
            b != b'.' && !is_ident_byte(b)
        };
        let after_ok = bytes.get(end).map_or(true, |&b| !is_ident_byte(b));
        if mask[idx] && before_ok && after_ok {
            out.push_str(&text[last..idx]);
            out.push_str(to);
            last = end;
        }
    }
    out.push_str(&text[last..]);
    out
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

#[derive(Clone, Copy, PartialEq)]
enum LexState {
    Code,
    Str(u8),
    Template,
    LineComment,
    BlockComment,
}

/// Per-byte flag: `true` where the byte is code rather than string or
/// comment text. Template substitutions (`${ ... }`) count as code.
pub fn code_mask(text: &str) -> Vec<bool> {
    let bytes = text.as_bytes();
    let mut mask = vec![false; bytes.len()];
    let mut state = LexState::Code;
    // Brace depth of each open `${` substitution.
    let mut substitutions: Vec<usize> = Vec::new();
    let mut depth = 0usize;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            LexState::Code => match b {
                b'/' if next == Some(b'/') => {
                    state = LexState::LineComment;
                    i += 1;
                }
                b'/' if next == Some(b'*') => {
                    state = LexState::BlockComment;
                    i += 1;
                }
                b'\'' | b'"' => state = LexState::Str(b),
                b'`' => state = LexState::Template,
                b'{' => {
                    depth += 1;
                    mask[i] = true;
                }
                b'}' => {
                    if substitutions.last() == Some(&depth) {
                        substitutions.pop();
                        state = LexState::Template;
                    } else {
                        mask[i] = true;
                    }
                    depth = depth.saturating_sub(1);
                }
                _ => mask[i] = true,
            },
            LexState::Str(quote) => {
                if b == b'\\' {
                    i += 1;
                } else if b == quote || b == b'\n' {
                    state = LexState::Code;
                }
            }
            LexState::Template => {
                if b == b'\\' {
                    i += 1;
                } else if b == b'`' {
                    state = LexState::Code;
                } else if b == b'$' && next == Some(b'{') {
                    depth += 1;
                    substitutions.push(depth);
                    state = LexState::Code;
                    i += 1;
                }
            }
            LexState::LineComment => {
                if b == b'\n' {
                    state = LexState::Code;
                    mask[i] = true;
                }
            }
            LexState::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    state = LexState::Code;
                    i += 1;
                }
            }
        }
        i += 1;
    }
    mask
}
