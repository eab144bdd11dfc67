//! `findDOMNode` calls, matched on callee text.

use crate::catalog::Category;
use crate::parsers::SyntaxNode;

use super::traits::{DeprecationScanner, ScanContext};
use super::types::Issue;

pub struct FindDomNodeScanner;

impl DeprecationScanner for FindDomNodeScanner {
    fn id(&self) -> &'static str {
        "find-dom-node"
    }

    fn category(&self) -> Category {
        Category::DomMethods
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let Some(rule) = ctx.catalog.primary(self.category()) else {
            return Vec::new();
        };
        ctx.nodes
            .iter()
            .filter_map(|node| match node {
                SyntaxNode::Call(call) if call.callee.contains("findDOMNode") => Some(call),
                _ => None,
            })
            .map(|call| {
                Issue::from_rule(
                    rule,
                    self.category(),
                    "findDOMNode",
                    ctx.file,
                    call.span,
                    "Deprecated: ReactDOM.findDOMNode()",
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::scan_tsx;

    #[test]
    fn substring_match_on_callee() {
        let issues = scan_tsx(
            &FindDomNodeScanner,
            "ReactDOM.findDOMNode(this); findDOMNode(x); myfindDOMNodeHelper(); find(x);",
        );
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.api == "findDOMNode"));
    }
}
