//! Owned syntax snapshot produced by a `SyntaxProvider`.
//!
//! Everything here is plain data: scanners and the fix engine never touch
//! tree-sitter directly, so an alternate provider only has to fill these in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scanner::Language;

/// Byte range plus 1-based start position. `column` counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
}

impl Span {
    pub fn from_ts_node(node: &tree_sitter::Node, src: &[u8]) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        // tree-sitter columns are byte offsets into the line.
        let line_start = node.start_byte().saturating_sub(start.column);
        let column = src
            .get(line_start..node.start_byte())
            .and_then(|prefix| std::str::from_utf8(prefix).ok())
            .map_or(start.column, |prefix| prefix.chars().count());
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
            line: start.row as u32 + 1,
            column: column as u32 + 1,
            end_line: end.row as u32 + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub span: Span,
}

/// One top-level statement of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
    pub span: Span,
}

/// A `{ ... }` block. Comments are not statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBody {
    /// Block text including both braces.
    pub text: String,
    pub span: Span,
    pub statements: Vec<Statement>,
}

impl MethodBody {
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    /// Text between the braces.
    pub fn inner_text(&self) -> &str {
        let trimmed = self.text.strip_prefix('{').unwrap_or(&self.text);
        trimmed.strip_suffix('}').unwrap_or(trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub is_static: bool,
    pub is_async: bool,
    pub params: Vec<Param>,
    /// `None` for overload signatures and abstract members.
    pub body: Option<MethodBody>,
    /// Span of the name token, used for renames.
    pub name_span: Span,
    pub text: String,
    pub span: Span,
}

impl MethodDecl {
    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn statement_count(&self) -> usize {
        self.body.as_ref().map_or(0, MethodBody::statement_count)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == "constructor"
    }
}

/// A class field, static or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    pub is_static: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// `None` for anonymous class expressions.
    pub name: Option<String>,
    pub methods: Vec<MethodDecl>,
    pub properties: Vec<PropertyDecl>,
    /// The `{ ... }` class body.
    pub body_span: Span,
    pub span: Span,
}

impl ClassDecl {
    /// Methods in source order, excluding the constructor.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| !m.is_constructor())
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods().find(|m| m.name == name)
    }

    pub fn constructor(&self) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.is_constructor() && m.body.is_some())
    }

    pub fn static_property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|p| p.is_static && p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsxAttrValue {
    /// Quoted literal, quotes stripped.
    String(String),
    /// `{...}` container, braces included.
    Expression(String),
    /// A nested element used as a value.
    Element(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsxAttribute {
    pub name: String,
    /// `None` for boolean shorthand (`<input disabled />`).
    pub value: Option<JsxAttrValue>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsxElement {
    /// Tag name; empty for fragments.
    pub name: String,
    pub self_closing: bool,
    pub attributes: Vec<JsxAttribute>,
    pub span: Span,
}

impl JsxElement {
    pub fn attribute(&self, name: &str) -> Option<&JsxAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallExpr {
    /// Full callee expression text, e.g. `ReactDOM.render`.
    pub callee: String,
    pub arguments: Vec<String>,
    pub span: Span,
}

/// Property access `object.property`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberExpr {
    pub object: String,
    pub property: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentExpr {
    pub left: String,
    /// `=` or a compound operator such as `+=`.
    pub operator: String,
    pub right: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// Module specifier with quotes stripped.
    pub specifier: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionKind {
    Declaration,
    Arrow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Declared name, or the binding an arrow function is assigned to.
    pub name: Option<String>,
    pub kind: FunctionKind,
    pub span: Span,
}

/// Borrowed view of one extracted construct, for exhaustive matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxNode<'a> {
    Class(&'a ClassDecl),
    Jsx(&'a JsxElement),
    Call(&'a CallExpr),
    Member(&'a MemberExpr),
    Assignment(&'a AssignmentExpr),
    Import(&'a ImportDecl),
    Function(&'a FunctionDecl),
}

impl SyntaxNode<'_> {
    pub fn span(&self) -> Span {
        match self {
            SyntaxNode::Class(n) => n.span,
            SyntaxNode::Jsx(n) => n.span,
            SyntaxNode::Call(n) => n.span,
            SyntaxNode::Member(n) => n.span,
            SyntaxNode::Assignment(n) => n.span,
            SyntaxNode::Import(n) => n.span,
            SyntaxNode::Function(n) => n.span,
        }
    }
}

/// Parsed file: the source text plus every construct the scanners query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTree {
    pub path: PathBuf,
    pub language: Language,
    pub source: String,
    pub classes: Vec<ClassDecl>,
    pub jsx_elements: Vec<JsxElement>,
    pub calls: Vec<CallExpr>,
    pub members: Vec<MemberExpr>,
    pub assignments: Vec<AssignmentExpr>,
    pub imports: Vec<ImportDecl>,
    pub functions: Vec<FunctionDecl>,
    /// ERROR and MISSING nodes tolerated while parsing.
    pub error_count: u32,
}

impl SourceTree {
    pub fn empty(path: &Path, language: Language, source: String) -> Self {
        Self {
            path: path.to_path_buf(),
            language,
            source,
            classes: Vec::new(),
            jsx_elements: Vec::new(),
            calls: Vec::new(),
            members: Vec::new(),
            assignments: Vec::new(),
            imports: Vec::new(),
            functions: Vec::new(),
            error_count: 0,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn text(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or("")
    }

    /// Every extracted construct in source order.
    pub fn nodes(&self) -> Vec<SyntaxNode<'_>> {
        let mut nodes: Vec<SyntaxNode<'_>> = Vec::with_capacity(
            self.classes.len()
                + self.jsx_elements.len()
                + self.calls.len()
                + self.members.len()
                + self.assignments.len()
                + self.imports.len()
                + self.functions.len(),
        );
        nodes.extend(self.classes.iter().map(SyntaxNode::Class));
        nodes.extend(self.jsx_elements.iter().map(SyntaxNode::Jsx));
        nodes.extend(self.calls.iter().map(SyntaxNode::Call));
        nodes.extend(self.members.iter().map(SyntaxNode::Member));
        nodes.extend(self.assignments.iter().map(SyntaxNode::Assignment));
        nodes.extend(self.imports.iter().map(SyntaxNode::Import));
        nodes.extend(self.functions.iter().map(SyntaxNode::Function));
        nodes.sort_by_key(|n| n.span().start);
        nodes
    }

    pub fn class_named(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|c| c.name.as_deref() == Some(name))
    }

    /// Re-locate a method by exact name and starting line.
    pub fn find_method(&self, name: &str, line: u32) -> Option<(&ClassDecl, &MethodDecl)> {
        self.classes.iter().find_map(|class| {
            class
                .methods()
                .find(|m| m.name == name && m.line() == line)
                .map(|m| (class, m))
        })
    }
}
