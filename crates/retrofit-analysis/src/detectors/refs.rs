//! String refs and `this.refs` access.

use crate::catalog::Category;
use crate::parsers::{JsxAttrValue, SyntaxNode};

use super::traits::{DeprecationScanner, ScanContext};
use super::types::Issue;

pub struct StringRefScanner;

impl DeprecationScanner for StringRefScanner {
    fn id(&self) -> &'static str {
        "string-refs"
    }

    fn category(&self) -> Category {
        Category::Refs
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let Some(rule) = ctx.catalog.primary(self.category()) else {
            return Vec::new();
        };

        let mut issues = Vec::new();
        for node in ctx.nodes {
            match node {
                SyntaxNode::Jsx(element) => {
                    let Some(attr) = element.attribute("ref") else { continue };
                    if let Some(JsxAttrValue::String(name)) = &attr.value {
                        issues.push(Issue::from_rule(
                            rule,
                            self.category(),
                            "String ref",
                            ctx.file,
                            attr.span,
                            format!("Deprecated: String ref \"{name}\""),
                        ));
                    }
                }
                SyntaxNode::Member(member) if member.object == "this" && member.property == "refs" => {
                    issues.push(Issue::from_rule(
                        rule,
                        self.category(),
                        "this.refs",
                        ctx.file,
                        member.span,
                        "Deprecated: this.refs access",
                    ));
                }
                _ => {}
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::scan_tsx;

    #[test]
    fn literal_ref_is_flagged_expression_ref_is_not() {
        let issues = scan_tsx(&StringRefScanner, r#"const a = <input ref="x" />;"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].api, "String ref");
        assert_eq!(issues[0].message, "Deprecated: String ref \"x\"");
        assert_eq!(issues[0].category, Category::Refs);

        let issues = scan_tsx(&StringRefScanner, "const a = <input ref={x} />;");
        assert!(issues.is_empty());
    }

    #[test]
    fn this_refs_access_is_a_separate_issue() {
        let issues = scan_tsx(
            &StringRefScanner,
            r#"
class A extends React.Component {
  focus() { this.refs.input.focus(); }
  render() { return <input ref="input" />; }
}
"#,
        );
        let apis: Vec<_> = issues.iter().map(|i| i.api.as_str()).collect();
        assert_eq!(apis, vec!["this.refs", "String ref"]);
    }

    #[test]
    fn other_refs_members_are_ignored() {
        let issues = scan_tsx(&StringRefScanner, "props.refs; this.ref; that.refs;");
        assert!(issues.is_empty());
    }
}
