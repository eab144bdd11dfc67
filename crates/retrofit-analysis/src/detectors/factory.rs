//! `createFactory` calls.

use crate::catalog::Category;
use crate::parsers::SyntaxNode;

use super::traits::{DeprecationScanner, ScanContext};
use super::types::Issue;

const FACTORY_RULE: &str = "createFactory";

pub struct CreateFactoryScanner;

impl DeprecationScanner for CreateFactoryScanner {
    fn id(&self) -> &'static str {
        "create-factory"
    }

    fn category(&self) -> Category {
        Category::Factory
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for node in ctx.nodes {
            let SyntaxNode::Call(call) = node else { continue };
            if !call.callee.contains(FACTORY_RULE) {
                continue;
            }
            // Absent from the catalog means the check is switched off.
            let Some(rule) = ctx.catalog.find(self.category(), FACTORY_RULE) else {
                continue;
            };
            issues.push(Issue::from_rule(
                rule,
                self.category(),
                "React.createFactory",
                ctx.file,
                call.span,
                "Deprecated: React.createFactory()",
            ));
        }
        issues
    }
}
