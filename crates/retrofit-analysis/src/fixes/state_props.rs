//! State-literal extraction, merging and formatting.
//!
//! Object literals are split at top-level commas only: brackets, strings
//! and comments are tracked so `a: [1, 2]` or `b: f(x, y)` stay whole.
//! Values are kept verbatim; nothing here evaluates JavaScript.

use crate::parsers::{MethodDecl, SourceTree};

const SET_STATE_CALLEE: &str = "this.setState";

/// One `key: value` entry. Shorthand and spread entries keep their whole
/// text in `key` and leave `value` empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub key: String,
    pub value: String,
    /// Trailing comment that followed the entry on its line.
    pub comment: Option<String>,
}

impl StateEntry {
    fn render(&self) -> String {
        if self.value.is_empty() {
            self.key.clone()
        } else {
            format!("{}: {}", self.key, self.value)
        }
    }
}

/// Ordered property map. Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateProps {
    entries: Vec<StateEntry>,
}

impl StateProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn entries(&self) -> &[StateEntry] {
        &self.entries
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert_entry(StateEntry {
            key: key.into(),
            value: value.into(),
            comment: None,
        });
    }

    pub fn insert_entry(&mut self, entry: StateEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Overlay `other`: its values win, first positions are kept.
    pub fn extend(&mut self, other: StateProps) {
        for entry in other.entries {
            self.insert_entry(entry);
        }
    }

    /// Combine freshly extracted state with an existing initializer.
    /// On a key collision the existing value wins.
    pub fn merged_with_existing(&self, existing: &StateProps) -> StateProps {
        let mut merged = self.clone();
        merged.extend(existing.clone());
        merged
    }

    fn has_comments(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.comment.is_some() || e.value.contains("//"))
    }

    /// Format for a statement indented by two spaces.
    pub fn format(&self) -> String {
        self.format_indented("  ")
    }

    /// Single-line `{a: 1, b: 2}`, or one entry per line when any entry
    /// carries a comment. `indent` is the indentation of the line the
    /// literal starts on.
    pub fn format_indented(&self, indent: &str) -> String {
        self.format_nested(indent, "  ")
    }

    /// Like `format_indented`, nesting multi-line entries by `unit`.
    pub fn format_nested(&self, indent: &str, unit: &str) -> String {
        if self.entries.is_empty() {
            return "{}".to_string();
        }
        if !self.has_comments() {
            let entries: Vec<String> = self.entries.iter().map(StateEntry::render).collect();
            return format!("{{{}}}", entries.join(", "));
        }

        let last = self.entries.len() - 1;
        let mut out = String::from("{\n");
        for (i, entry) in self.entries.iter().enumerate() {
            out.push_str(indent);
            out.push_str(unit);
            out.push_str(&entry.render());
            if i != last {
                out.push(',');
            }
            if let Some(comment) = &entry.comment {
                out.push(' ');
                out.push_str(comment);
            }
            out.push('\n');
        }
        out.push_str(indent);
        out.push('}');
        out
    }
}

/// Parse an object literal (`{ a: 1, b }`, optionally followed by `;`).
/// Text that is not brace-delimited is treated as the literal's interior.
pub fn parse_object_literal(text: &str) -> StateProps {
    let trimmed = text.trim().trim_end_matches(';').trim_end();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .unwrap_or(trimmed);

    let mut props = StateProps::new();
    for raw in split_entries(inner) {
        if let Some(entry) = parse_entry(raw) {
            props.insert_entry(entry);
        }
    }
    props
}

/// Collect state from the `this.setState({...})` statements of `method`.
///
/// Only calls that are statements of the body itself count; updates inside
/// callbacks or branches run later or conditionally and are ignored. Later
/// calls override earlier values for the same key. `None` when no call
/// passes an object literal with at least one entry.
pub fn extract_state_props(tree: &SourceTree, method: &MethodDecl) -> Option<StateProps> {
    let body = method.body.as_ref()?;
    let mut props = StateProps::new();
    for call in tree.calls.iter().filter(|c| {
        c.callee == SET_STATE_CALLEE
            && body.statements.iter().any(|s| s.span.start == c.span.start)
    }) {
        let Some(arg) = call.arguments.first() else { continue };
        if arg.trim_start().starts_with('{') {
            props.extend(parse_object_literal(arg));
        }
    }
    (!props.is_empty()).then_some(props)
}

/// Raw entry text plus a trailing comment, before key/value separation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub text: String,
    pub comment: Option<String>,
}

/// Split an object literal's interior at top-level commas.
///
/// Comments inside nested brackets stay in the entry text. At the top
/// level, a comment on the same line as an entry attaches to it, and a
/// comment on a line of its own is dropped.
pub fn split_entries(inner: &str) -> Vec<RawEntry> {
    let chars: Vec<char> = inner.chars().collect();
    let mut entries: Vec<RawEntry> = Vec::new();
    let mut current = String::new();
    let mut comment: Option<String> = None;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    // Whether a newline separates the cursor from the last top-level comma.
    let mut line_broken = true;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if let Some(q) = quote {
            current.push(c);
            if c == '\\' {
                if let Some(&next) = chars.get(i + 1) {
                    current.push(next);
                    i += 1;
                }
            } else if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        if c == '/' && matches!(chars.get(i + 1), Some('/') | Some('*')) {
            let end = comment_end(&chars, i);
            let text: String = chars[i..end].iter().collect();
            let text = text.trim_end().to_string();
            if depth > 0 {
                current.push_str(&text);
            } else if !current.trim().is_empty() {
                attach(&mut comment, text);
            } else if !line_broken {
                if let Some(last) = entries.last_mut() {
                    attach(&mut last.comment, text);
                }
            }
            i = end;
            continue;
        }

        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                current.push(c);
            }
            '{' | '[' | '(' => {
                depth += 1;
                current.push(c);
            }
            '}' | ']' | ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                finish(&mut entries, &mut current, &mut comment);
                line_broken = false;
            }
            '\n' => {
                if depth == 0 {
                    line_broken = true;
                }
                current.push(c);
            }
            _ => current.push(c),
        }
        i += 1;
    }
    finish(&mut entries, &mut current, &mut comment);
    entries
}

fn comment_end(chars: &[char], start: usize) -> usize {
    if chars.get(start + 1) == Some(&'*') {
        let mut j = start + 2;
        while j + 1 < chars.len() {
            if chars[j] == '*' && chars[j + 1] == '/' {
                return j + 2;
            }
            j += 1;
        }
        chars.len()
    } else {
        chars[start..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(chars.len(), |p| start + p)
    }
}

fn attach(slot: &mut Option<String>, text: String) {
    match slot {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(&text);
        }
        None => *slot = Some(text),
    }
}

fn finish(entries: &mut Vec<RawEntry>, current: &mut String, comment: &mut Option<String>) {
    let text = current.trim();
    if !text.is_empty() {
        entries.push(RawEntry {
            text: text.to_string(),
            comment: comment.take(),
        });
    }
    current.clear();
    *comment = None;
}

fn parse_entry(raw: RawEntry) -> Option<StateEntry> {
    let (key, value) = match top_level_colon(&raw.text) {
        Some(idx) => {
            let key = raw.text[..idx].trim();
            let value = raw.text[idx + 1..].trim().trim_end_matches(';').trim_end();
            if value.is_empty() {
                return None;
            }
            (key, value)
        }
        None => (raw.text.as_str(), ""),
    };
    if key.is_empty() {
        return None;
    }
    Some(StateEntry {
        key: key.to_string(),
        value: value.to_string(),
        comment: raw.comment,
    })
}

/// Byte offset of the first `:` outside brackets and strings.
fn top_level_colon(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::typescript::parse_source;
    use crate::scanner::Language;
    use proptest::prelude::*;
    use std::path::Path;

    fn pairs(props: &StateProps) -> Vec<(&str, &str)> {
        props
            .entries()
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
            .collect()
    }

    fn extract(source: &str) -> Option<StateProps> {
        let tree = parse_source(Path::new("A.tsx"), source, Language::Tsx).unwrap();
        let method = tree.classes[0].method("componentWillMount").unwrap();
        extract_state_props(&tree, method)
    }

    #[test]
    fn extracts_top_level_updates_in_order() {
        let props = extract(
            "class A {\n  componentWillMount() {\n    this.setState({ a: 1, b: 2 });\n    this.setState({ a: 3, c: 4 });\n  }\n}\n",
        )
        .unwrap();
        assert_eq!(props.format(), "{a: 3, b: 2, c: 4}");
    }

    #[test]
    fn deferred_updates_are_not_extracted() {
        let props = extract(
            "class A {\n  componentWillMount() {\n    fetch('/x').then(data => this.setState({ data }));\n  }\n}\n",
        );
        assert!(props.is_none());
    }

    #[test]
    fn non_literal_argument_is_ignored() {
        let props = extract(
            "class A {\n  componentWillMount() {\n    this.setState(initial);\n  }\n}\n",
        );
        assert!(props.is_none());
    }

    #[test]
    fn parses_simple_literal() {
        let props = parse_object_literal("{ loading: true, count: 0 }");
        assert_eq!(pairs(&props), vec![("loading", "true"), ("count", "0")]);
        assert_eq!(props.format(), "{loading: true, count: 0}");
    }

    #[test]
    fn nested_values_stay_whole() {
        let props = parse_object_literal(
            "{ items: [1, 2, 3], user: { name: 'a', tags: ['x', 'y'] }, label: fmt(a, b), }",
        );
        assert_eq!(
            pairs(&props),
            vec![
                ("items", "[1, 2, 3]"),
                ("user", "{ name: 'a', tags: ['x', 'y'] }"),
                ("label", "fmt(a, b)"),
            ]
        );
    }

    #[test]
    fn strings_with_separators_stay_whole() {
        let props = parse_object_literal(r#"{ title: "a, b: c", path: 'x\'s, y', tpl: `${a}, ${b}` }"#);
        assert_eq!(
            pairs(&props),
            vec![("title", "\"a, b: c\""), ("path", r"'x\'s, y'"), ("tpl", "`${a}, ${b}`")]
        );
    }

    #[test]
    fn comment_lines_are_skipped_trailing_comments_attach() {
        let props = parse_object_literal(
            "{\n  // loading flag\n  loading: true, // until fetched\n  error: null\n}",
        );
        assert_eq!(pairs(&props), vec![("loading", "true"), ("error", "null")]);
        assert_eq!(props.entries()[0].comment.as_deref(), Some("// until fetched"));
        assert_eq!(props.entries()[1].comment, None);
    }

    #[test]
    fn comment_after_last_entry_without_comma() {
        let props = parse_object_literal("{\n  a: 1,\n  b: 2 // last\n}");
        assert_eq!(pairs(&props), vec![("a", "1"), ("b", "2")]);
        assert_eq!(props.entries()[1].comment.as_deref(), Some("// last"));
    }

    #[test]
    fn shorthand_and_spread_are_kept_verbatim() {
        let props = parse_object_literal("{ ...defaults, items, count: 1 }");
        assert_eq!(pairs(&props), vec![("...defaults", ""), ("items", ""), ("count", "1")]);
        assert_eq!(props.format(), "{...defaults, items, count: 1}");
    }

    #[test]
    fn quoted_and_computed_keys() {
        let props = parse_object_literal("{ 'data-id': 1, [KEY]: 2 }");
        assert_eq!(pairs(&props), vec![("'data-id'", "1"), ("[KEY]", "2")]);
    }

    #[test]
    fn merge_existing_wins() {
        let existing = parse_object_literal("{ a: 1 }");
        let fresh = parse_object_literal("{ a: 2, b: 3 }");
        let merged = fresh.merged_with_existing(&existing);
        assert_eq!(merged.format(), "{a: 1, b: 3}");
    }

    #[test]
    fn extend_overrides_in_place() {
        let mut props = parse_object_literal("{ a: 1, b: 2 }");
        props.extend(parse_object_literal("{ c: 3, a: 4 }"));
        assert_eq!(props.format(), "{a: 4, b: 2, c: 3}");
    }

    #[test]
    fn multiline_format_when_comments_present() {
        let props = parse_object_literal("{\n  a: 1, // first\n  b: 2\n}");
        assert_eq!(props.format(), "{\n    a: 1, // first\n    b: 2\n  }");
        assert_eq!(props.format_indented(""), "{\n  a: 1, // first\n  b: 2\n}");
        assert_eq!(props.format_nested("\t", "\t"), "{\n\t\ta: 1, // first\n\t\tb: 2\n\t}");
    }

    #[test]
    fn empty_literal() {
        let props = parse_object_literal("{}");
        assert!(props.is_empty());
        assert_eq!(props.format(), "{}");
    }

    #[test]
    fn trailing_semicolon_is_ignored() {
        let props = parse_object_literal("{ ready: false };");
        assert_eq!(props.get("ready"), Some("false"));
    }

    fn value_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[0-9]{1,4}".prop_map(|s| s),
            "[a-z]{1,6}".prop_map(|s| s),
            "[a-z ,:]{0,8}".prop_map(|s| format!("'{s}'")),
            ("[a-z]{1,4}", "[0-9]{1,3}").prop_map(|(a, b)| format!("[{a}, {b}]")),
            ("[a-z]{1,4}", "[0-9]{1,3}").prop_map(|(k, v)| format!("{{ {k}: {v}, n: [1, 2] }}")),
            ("[a-z]{1,4}", "[a-z]{1,4}").prop_map(|(a, b)| format!("f({a}, {b})")),
        ]
    }

    proptest! {
        #[test]
        fn split_respects_nesting(
            entries in proptest::collection::vec(("[a-z][a-zA-Z0-9]{0,6}", value_strategy()), 1..8)
        ) {
            let mut expected = StateProps::new();
            for (k, v) in &entries {
                expected.insert(k.clone(), v.clone());
            }
            let body = entries
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join(",\n  ");
            let parsed = parse_object_literal(&format!("{{\n  {body},\n}}"));
            prop_assert_eq!(&parsed, &expected);

            let reparsed = parse_object_literal(&parsed.format());
            prop_assert_eq!(&reparsed, &expected);
        }
    }
}
