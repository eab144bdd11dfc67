//! Deprecated class lifecycle methods.

use crate::catalog::Category;
use crate::parsers::SyntaxNode;

use super::traits::{DeprecationScanner, ScanContext};
use super::types::Issue;

pub struct LifecycleScanner;

impl DeprecationScanner for LifecycleScanner {
    fn id(&self) -> &'static str {
        "lifecycle-methods"
    }

    fn category(&self) -> Category {
        Category::LifecycleMethods
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for node in ctx.nodes {
            let SyntaxNode::Class(class) = node else { continue };
            for method in class.methods() {
                let Some(rule) = ctx.catalog.find(self.category(), &method.name) else {
                    continue;
                };
                issues.push(Issue::from_rule(
                    rule,
                    self.category(),
                    &method.name,
                    ctx.file,
                    method.span,
                    format!("Deprecated LifeCycle Api {}", method.name),
                ));
            }
        }
        issues
    }
}
