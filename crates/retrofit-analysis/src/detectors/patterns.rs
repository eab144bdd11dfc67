//! `defaultProps` assigned to function components.

use crate::catalog::Category;
use crate::parsers::SyntaxNode;

use super::traits::{DeprecationScanner, ScanContext};
use super::types::Issue;

pub struct DefaultPropsScanner;

impl DeprecationScanner for DefaultPropsScanner {
    fn id(&self) -> &'static str {
        "default-props-on-functions"
    }

    fn category(&self) -> Category {
        Category::Patterns
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let Some(rule) = ctx.catalog.primary(self.category()) else {
            return Vec::new();
        };

        let mut issues = Vec::new();
        for node in ctx.nodes {
            let SyntaxNode::Assignment(assign) = node else { continue };
            if assign.operator != "=" || !assign.left.contains(".defaultProps") {
                continue;
            }
            let component = assign.left.split('.').next().unwrap_or_default();
            // Only classes declared in this file are visible here.
            if ctx.tree.class_named(component).is_some() {
                continue;
            }
            issues.push(Issue::from_rule(
                rule,
                self.category(),
                "defaultProps on function component",
                ctx.file,
                assign.span,
                format!("Deprecated: {component}.defaultProps on function component"),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::scan_tsx;

    #[test]
    fn function_components_are_flagged_classes_are_not() {
        let issues = scan_tsx(
            &DefaultPropsScanner,
            r#"
function Button(props) { return <button />; }
Button.defaultProps = { size: 'md' };
const Card = () => null;
Card.defaultProps = {};
class Panel extends React.Component {}
Panel.defaultProps = { open: false };
Button.defaultProps ||= {};
"#,
        );
        let messages: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Deprecated: Button.defaultProps on function component",
                "Deprecated: Card.defaultProps on function component",
            ]
        );
        assert_eq!(issues[0].line, 3);
    }
}
