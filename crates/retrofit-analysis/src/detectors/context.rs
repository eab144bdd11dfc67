//! Legacy context API on classes.

use crate::catalog::Category;
use crate::parsers::SyntaxNode;

use super::traits::{DeprecationScanner, ScanContext};
use super::types::Issue;

pub struct LegacyContextScanner;

impl DeprecationScanner for LegacyContextScanner {
    fn id(&self) -> &'static str {
        "legacy-context"
    }

    fn category(&self) -> Category {
        Category::Context
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let Some(rule) = ctx.catalog.primary(self.category()) else {
            return Vec::new();
        };

        let mut issues = Vec::new();
        for node in ctx.nodes {
            let SyntaxNode::Class(class) = node else { continue };

            let mut found = Vec::with_capacity(3);
            if let Some(method) = class.method("getChildContext") {
                found.push(("getChildContext", method.span));
            }
            for name in ["childContextTypes", "contextTypes"] {
                if let Some(prop) = class.static_property(name) {
                    found.push((name, prop.span));
                }
            }

            for (api, span) in found {
                issues.push(Issue::from_rule(
                    rule,
                    self.category(),
                    api,
                    ctx.file,
                    span,
                    format!("Deprecated: Legacy Context API ({api})"),
                ));
            }
        }
        issues
    }
}
