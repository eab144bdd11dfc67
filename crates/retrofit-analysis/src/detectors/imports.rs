//! Imports of deprecated testing utilities.

use crate::catalog::Category;
use crate::parsers::SyntaxNode;

use super::traits::{DeprecationScanner, ScanContext};
use super::types::Issue;

pub struct TestUtilsImportScanner;

impl DeprecationScanner for TestUtilsImportScanner {
    fn id(&self) -> &'static str {
        "test-utils-imports"
    }

    fn category(&self) -> Category {
        Category::Testing
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let rules: Vec<_> = ctx
            .catalog
            .rules(self.category())
            .iter()
            .filter_map(|rule| Some((rule, rule.module_fragment()?)))
            .collect();

        let mut issues = Vec::new();
        for node in ctx.nodes {
            let SyntaxNode::Import(import) = node else { continue };
            for (rule, fragment) in &rules {
                if import.specifier.contains(fragment) {
                    issues.push(Issue::from_rule(
                        rule,
                        self.category(),
                        &rule.name,
                        ctx.file,
                        import.span,
                        format!("Deprecated import: {}", rule.name),
                    ));
                }
            }
        }
        issues
    }
}
