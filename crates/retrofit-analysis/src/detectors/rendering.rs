//! Legacy top-level `ReactDOM.*` render APIs.

use crate::catalog::Category;
use crate::parsers::SyntaxNode;

use super::traits::{DeprecationScanner, ScanContext};
use super::types::Issue;

pub struct RenderApiScanner;

impl DeprecationScanner for RenderApiScanner {
    fn id(&self) -> &'static str {
        "render-apis"
    }

    fn category(&self) -> Category {
        Category::Rendering
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let rules: Vec<_> = ctx
            .catalog
            .rules(self.category())
            .iter()
            .filter_map(|rule| Some((rule, format!("ReactDOM.{}", rule.member_suffix()?))))
            .collect();

        let mut issues = Vec::new();
        for node in ctx.nodes {
            let SyntaxNode::Call(call) = node else { continue };
            for (rule, needle) in &rules {
                if call.callee.contains(needle.as_str()) {
                    issues.push(Issue::from_rule(
                        rule,
                        self.category(),
                        &rule.name,
                        ctx.file,
                        call.span,
                        format!("Deprecated: {}", rule.name),
                    ));
                }
            }
        }
        issues
    }
}
