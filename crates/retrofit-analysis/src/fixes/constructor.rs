//! Constructor synthesis and state-initializer merging.

use retrofit_core::errors::ApplyError;

use crate::parsers::{ClassDecl, SourceTree, Span, TextEdit};
use crate::parsers::types::Statement;
use crate::scanner::Language;

use super::state_props::{parse_object_literal, StateProps};

const DEFAULT_INDENT_UNIT: &str = "  ";

/// Standalone constructor shown as a fix preview.
pub fn constructor_preview(props: &StateProps) -> String {
    constructor_block(props, false, "", DEFAULT_INDENT_UNIT)
        .trim_matches('\n')
        .to_string()
}

/// A constructor member indented by `indent`, surrounded by newlines.
/// `typed` annotates the parameter for TypeScript sources; `unit` is one
/// nesting level.
pub fn constructor_block(props: &StateProps, typed: bool, indent: &str, unit: &str) -> String {
    let param = if typed { "props: any" } else { "props" };
    let inner = format!("{indent}{unit}");
    format!(
        "\n{indent}constructor({param}) {{\n{inner}super(props);\n{inner}this.state = {};\n{indent}}}\n",
        props.format_nested(&inner, unit)
    )
}

/// One nesting level as written in `class`: how far its first indented
/// method statement sits beyond `member_indent`. Two spaces when no
/// statement shows it.
pub fn indent_unit<'a>(source: &'a str, class: &ClassDecl, member_indent: &str) -> &'a str {
    class
        .methods
        .iter()
        .filter_map(|m| m.body.as_ref())
        .flat_map(|body| body.statements.iter())
        .find_map(|s| {
            line_indent(source, s.span.start)
                .strip_prefix(member_indent)
                .filter(|unit| !unit.is_empty())
        })
        .unwrap_or(DEFAULT_INDENT_UNIT)
}

/// The edit that initializes `props` as `class`'s state.
///
/// An existing `this.state = {...}` is merged, existing values winning.
/// Otherwise the assignment goes right after `super(...)`, then before the
/// first statement, and a class without a constructor gets one as its first
/// member. `member_indent` is the indentation of the class's members.
pub fn state_edit(
    tree: &SourceTree,
    class: &ClassDecl,
    props: &StateProps,
    member_indent: &str,
) -> Result<TextEdit, ApplyError> {
    let source = tree.source.as_str();
    let unit = indent_unit(source, class, member_indent);

    let Some(body) = class.constructor().and_then(|c| c.body.as_ref()) else {
        if class.body_span.is_empty() {
            return Err(ApplyError::MissingClassBody {
                line: class.span.line,
            });
        }
        let typed = matches!(tree.language, Language::TypeScript | Language::Tsx);
        return Ok(TextEdit::insert(
            class.body_span.start + 1,
            constructor_block(props, typed, member_indent, unit),
        ));
    };

    if let Some((statement, rhs)) = body
        .statements
        .iter()
        .find_map(|s| state_assignment(&s.text).map(|rhs| (s, rhs)))
    {
        if !rhs.starts_with('{') {
            return Err(ApplyError::UnmergeableState {
                line: statement.span.line,
            });
        }
        let merged = props.merged_with_existing(&parse_object_literal(rhs));
        let indent = line_indent(source, statement.span.start);
        return Ok(TextEdit::replace(
            statement.span.start,
            statement.span.end,
            format!("this.state = {};", merged.format_nested(indent, unit)),
        ));
    }

    if let Some(call) = body.statements.iter().find(|s| is_super_call(s)) {
        let indent = line_indent(source, call.span.start);
        return Ok(TextEdit::insert(
            call.span.end,
            format!("\n{indent}this.state = {};", props.format_nested(indent, unit)),
        ));
    }

    if let Some(first) = body.statements.first() {
        let indent = line_indent(source, first.span.start);
        return Ok(TextEdit::insert(
            first.span.start,
            format!("this.state = {};\n{indent}", props.format_nested(indent, unit)),
        ));
    }

    let inner = format!("{member_indent}{unit}");
    Ok(TextEdit::replace(
        body.span.start,
        body.span.end,
        format!(
            "{{\n{inner}this.state = {};\n{member_indent}}}",
            props.format_nested(&inner, unit)
        ),
    ))
}

/// Whether a constructor's `this.state` initializer, if any, is an object
/// literal that new state can be merged into.
pub fn existing_state_is_mergeable(class: &ClassDecl) -> bool {
    class
        .constructor()
        .and_then(|c| c.body.as_ref())
        .and_then(|body| body.statements.iter().find_map(|s| state_assignment(&s.text)))
        .map_or(true, |rhs| rhs.starts_with('{'))
}

/// The edit removing `span`, taking its whole lines when nothing else
/// shares them. A blank line left after a blank line or an opening brace
/// goes too.
pub fn removal_edit(source: &str, span: Span) -> TextEdit {
    let (start, end) = line_extent(source, span);
    TextEdit::delete(start, end)
}

fn line_extent(source: &str, span: Span) -> (usize, usize) {
    let line_start = source[..span.start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[span.end..]
        .find('\n')
        .map_or(source.len(), |i| span.end + i + 1);
    let alone = source[line_start..span.start].trim().is_empty()
        && source[span.end..line_end].trim().is_empty();
    if alone {
        (line_start, trailing_blank_end(source, line_start, line_end).unwrap_or(line_end))
    } else {
        (span.start, span.end)
    }
}

/// End of the blank line at `line_end` when the line before `line_start`
/// is blank or opens a block.
fn trailing_blank_end(source: &str, line_start: usize, line_end: usize) -> Option<usize> {
    let before = source[..line_start].strip_suffix('\n')?;
    let previous = before[before.rfind('\n').map_or(0, |i| i + 1)..].trim();
    if !(previous.is_empty() || previous.ends_with('{')) {
        return None;
    }
    let rest = &source[line_end..];
    let next = rest.find('\n')? + 1;
    rest[..next].trim().is_empty().then_some(line_end + next)
}

/// Leading whitespace of the line containing `offset`.
pub fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line = &source[line_start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

/// Right-hand side of `this.state = ...;`.
fn state_assignment(statement: &str) -> Option<&str> {
    let rest = statement.trim_start().strip_prefix("this.state")?.trim_start();
    let rhs = rest.strip_prefix('=')?;
    if rhs.starts_with('=') {
        return None;
    }
    Some(rhs.trim().trim_end_matches(';').trim_end())
}

fn is_super_call(statement: &Statement) -> bool {
    statement.text.trim_start().starts_with("super(")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::apply_edits;
    use crate::parsers::typescript::parse_source;
    use std::path::Path;

    fn rewrite(source: &str, path: &str, language: Language, props: &str) -> Result<String, ApplyError> {
        let tree = parse_source(Path::new(path), source, language).unwrap();
        let edit = state_edit(&tree, &tree.classes[0], &parse_object_literal(props), "  ")?;
        apply_edits(source, &[edit])
    }

    #[test]
    fn inserts_constructor_when_missing() {
        let src = "class A extends React.Component {\n  render() { return null; }\n}\n";
        let out = rewrite(src, "a.jsx", Language::JavaScript, "{ loading: true }").unwrap();
        assert_eq!(
            out,
            "class A extends React.Component {\n  constructor(props) {\n    super(props);\n    this.state = {loading: true};\n  }\n\n  render() { return null; }\n}\n"
        );
    }

    #[test]
    fn typescript_constructor_is_annotated() {
        let src = "class A extends React.Component {\n  render() { return null; }\n}\n";
        let out = rewrite(src, "a.tsx", Language::Tsx, "{ a: 1 }").unwrap();
        assert!(out.contains("constructor(props: any) {"));
    }

    #[test]
    fn merges_existing_state_existing_wins() {
        let src = "class A extends React.Component {\n  constructor(props) {\n    super(props);\n    this.state = { a: 1 };\n  }\n}\n";
        let out = rewrite(src, "a.jsx", Language::JavaScript, "{ a: 2, b: 3 }").unwrap();
        assert!(out.contains("    this.state = {a: 1, b: 3};\n"), "{out}");
        assert_eq!(out.matches("this.state").count(), 1);
    }

    #[test]
    fn inserts_after_super_when_no_state() {
        let src = "class A extends React.Component {\n  constructor(props) {\n    super(props);\n    this.x = 1;\n  }\n}\n";
        let out = rewrite(src, "a.jsx", Language::JavaScript, "{ a: 1 }").unwrap();
        assert!(out.contains("    super(props);\n    this.state = {a: 1};\n    this.x = 1;"), "{out}");
    }

    #[test]
    fn fills_empty_constructor() {
        let src = "class A {\n  constructor() {}\n}\n";
        let out = rewrite(src, "a.js", Language::JavaScript, "{ a: 1 }").unwrap();
        assert_eq!(out, "class A {\n  constructor() {\n    this.state = {a: 1};\n  }\n}\n");
    }

    #[test]
    fn non_literal_state_is_unmergeable() {
        let src = "class A extends React.Component {\n  constructor(props) {\n    super(props);\n    this.state = initial(props);\n  }\n}\n";
        let err = rewrite(src, "a.jsx", Language::JavaScript, "{ a: 1 }").unwrap_err();
        assert!(matches!(err, ApplyError::UnmergeableState { line: 4 }));

        let tree = parse_source(Path::new("a.jsx"), src, Language::JavaScript).unwrap();
        assert!(!existing_state_is_mergeable(&tree.classes[0]));
    }

    #[test]
    fn removal_takes_whole_lines() {
        let src = "a\n  foo() {}\nb\n";
        let start = src.find("foo").unwrap();
        let span = Span { start, end: start + "foo() {}".len(), ..Span::default() };
        let out = apply_edits(src, &[removal_edit(src, span)]).unwrap();
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn removal_keeps_shared_lines() {
        let src = "x; foo() {} y;\n";
        let start = src.find("foo").unwrap();
        let span = Span { start, end: start + "foo() {}".len(), ..Span::default() };
        let out = apply_edits(src, &[removal_edit(src, span)]).unwrap();
        assert_eq!(out, "x;  y;\n");
    }

    #[test]
    fn nesting_follows_the_source_indent() {
        let src = "class A extends React.Component {\n    render() {\n        return null;\n    }\n}\n";
        let tree = parse_source(Path::new("a.jsx"), src, Language::JavaScript).unwrap();
        assert_eq!(indent_unit(src, &tree.classes[0], "    "), "    ");

        let edit = state_edit(&tree, &tree.classes[0], &parse_object_literal("{ a: 1 }"), "    ").unwrap();
        let out = apply_edits(src, &[edit]).unwrap();
        assert!(
            out.starts_with("class A extends React.Component {\n    constructor(props) {\n        super(props);\n        this.state = {a: 1};\n    }\n\n    render() {"),
            "{out}"
        );
    }

    #[test]
    fn tab_indented_constructor_is_filled_with_tabs() {
        let src = "class A {\n\tconstructor() {}\n\tfoo() {\n\t\tbar();\n\t}\n}\n";
        let tree = parse_source(Path::new("a.js"), src, Language::JavaScript).unwrap();
        let edit = state_edit(&tree, &tree.classes[0], &parse_object_literal("{ a: 1 }"), "\t").unwrap();
        let out = apply_edits(src, &[edit]).unwrap();
        assert!(out.contains("\tconstructor() {\n\t\tthis.state = {a: 1};\n\t}\n"), "{out}");
    }

    #[test]
    fn removal_between_blank_lines_leaves_one() {
        let src = "class A {\n  a() {}\n\n  b() {}\n\n  c() {}\n}\n";
        let start = src.find("b()").unwrap();
        let span = Span { start, end: start + "b() {}".len(), ..Span::default() };
        let out = apply_edits(src, &[removal_edit(src, span)]).unwrap();
        assert_eq!(out, "class A {\n  a() {}\n\n  c() {}\n}\n");
    }

    #[test]
    fn removing_first_member_drops_the_gap_after_it() {
        let src = "class A {\n  a() {}\n\n  b() {}\n}\n";
        let start = src.find("a()").unwrap();
        let span = Span { start, end: start + "a() {}".len(), ..Span::default() };
        let out = apply_edits(src, &[removal_edit(src, span)]).unwrap();
        assert_eq!(out, "class A {\n  b() {}\n}\n");
    }

    #[test]
    fn preview_shape() {
        let preview = constructor_preview(&parse_object_literal("{ loading: true }"));
        assert_eq!(
            preview,
            "constructor(props) {\n  super(props);\n  this.state = {loading: true};\n}"
        );
    }
}
