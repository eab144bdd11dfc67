//! Scanner trait — one implementation per deprecated-API category.

use std::path::Path;

use crate::catalog::{Category, RuleCatalog};
use crate::parsers::{SourceTree, SyntaxNode};

use super::types::Issue;

/// Everything a scanner may look at for one file.
pub struct ScanContext<'a> {
    pub file: &'a Path,
    pub tree: &'a SourceTree,
    pub catalog: &'a RuleCatalog,
    /// `tree.nodes()`, computed once per file.
    pub nodes: &'a [SyntaxNode<'a>],
}

/// A pure query over one file's tree plus the catalog.
pub trait DeprecationScanner {
    fn id(&self) -> &'static str;

    fn category(&self) -> Category;

    /// Issues in source order.
    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<Issue>;
}
