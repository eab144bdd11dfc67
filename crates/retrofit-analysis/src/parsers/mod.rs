//! Syntax tree provider — tree-sitter grammars behind a narrow trait.

pub mod edits;
pub mod error_tolerant;
pub mod provider;
pub mod types;
pub mod typescript;

pub use edits::{apply_edits, TextEdit};
pub use provider::{SyntaxProvider, TreeSitterProvider};
pub use types::{
    ClassDecl, JsxAttrValue, MethodBody, MethodDecl, SourceTree, Span, SyntaxNode,
};
