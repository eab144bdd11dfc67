//! TS/TSX/JS/JSX extraction over a tree-sitter tree.
//!
//! One preorder walk collects every construct kind, so each list on the
//! resulting `SourceTree` is already in source order.

use std::path::Path;

use retrofit_core::errors::ParseError;
use tree_sitter::{Node, Parser};

use super::error_tolerant::count_errors;
use super::types::{
    AssignmentExpr, CallExpr, ClassDecl, FunctionDecl, FunctionKind, ImportDecl, JsxAttrValue,
    JsxAttribute, JsxElement, MemberExpr, MethodBody, MethodDecl, Param, PropertyDecl, SourceTree,
    Span, Statement,
};
use crate::scanner::Language;

/// Parse `source` with the grammar for `language` and extract a snapshot.
pub fn parse_source(path: &Path, source: &str, language: Language) -> Result<SourceTree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.ts_language())
        .map_err(|e| ParseError::GrammarNotLoaded {
            language: language.name().to_string(),
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::NoTree {
            path: path.to_path_buf(),
        })?;

    let root = tree.root_node();
    let mut out = SourceTree::empty(path, language, source.to_string());
    let (error_count, _) = count_errors(root, source.as_bytes());
    out.error_count = error_count;

    let mut extractor = Extractor {
        src: source.as_bytes(),
        out: &mut out,
    };
    extractor.walk(root);
    Ok(out)
}

struct Extractor<'s, 'o> {
    src: &'s [u8],
    out: &'o mut SourceTree,
}

impl Extractor<'_, '_> {
    fn walk(&mut self, root: Node) {
        let mut cursor = root.walk();
        loop {
            self.visit(cursor.node());
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    fn visit(&mut self, node: Node) {
        match node.kind() {
            // `class` is also the kind of the anonymous keyword token.
            "class_declaration" | "abstract_class_declaration" | "class" if node.is_named() => {
                let class = self.class(node);
                self.out.classes.push(class);
            }
            "jsx_self_closing_element" | "jsx_opening_element" => {
                let element = self.jsx_element(node);
                self.out.jsx_elements.push(element);
            }
            "call_expression" => {
                if let Some(call) = self.call(node) {
                    self.out.calls.push(call);
                }
            }
            "member_expression" => {
                if let Some(member) = self.member(node) {
                    self.out.members.push(member);
                }
            }
            "assignment_expression" | "augmented_assignment_expression" => {
                if let Some(assignment) = self.assignment(node) {
                    self.out.assignments.push(assignment);
                }
            }
            "import_statement" => {
                if let Some(import) = self.import(node) {
                    self.out.imports.push(import);
                }
            }
            "function_declaration" | "generator_function_declaration" => {
                self.out.functions.push(FunctionDecl {
                    name: self.field_text(node, "name"),
                    kind: FunctionKind::Declaration,
                    span: Span::from_ts_node(&node, self.src),
                });
            }
            "arrow_function" => {
                let name = node
                    .parent()
                    .filter(|p| p.kind() == "variable_declarator")
                    .and_then(|p| self.field_text(p, "name"));
                self.out.functions.push(FunctionDecl {
                    name,
                    kind: FunctionKind::Arrow,
                    span: Span::from_ts_node(&node, self.src),
                });
            }
            _ => {}
        }
    }

    fn class(&self, node: Node) -> ClassDecl {
        let mut methods = Vec::new();
        let mut properties = Vec::new();
        let body = node.child_by_field_name("body");

        if let Some(body) = body {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                match member.kind() {
                    "method_definition" => methods.push(self.method(member)),
                    "public_field_definition" | "field_definition" => {
                        if let Some(property) = self.property(member) {
                            properties.push(property);
                        }
                    }
                    _ => {}
                }
            }
        }

        ClassDecl {
            name: self.field_text(node, "name"),
            methods,
            properties,
            body_span: body.map(|b| Span::from_ts_node(&b, self.src)).unwrap_or_default(),
            span: Span::from_ts_node(&node, self.src),
        }
    }

    fn method(&self, node: Node) -> MethodDecl {
        let name_node = node.child_by_field_name("name");
        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.params(p))
            .unwrap_or_default();
        let body = node
            .child_by_field_name("body")
            .filter(|b| b.kind() == "statement_block")
            .map(|b| self.block(b));

        MethodDecl {
            name: name_node.map(|n| self.text(n).to_string()).unwrap_or_default(),
            is_static: has_token(node, "static"),
            is_async: has_token(node, "async"),
            params,
            body,
            name_span: name_node.map(|n| Span::from_ts_node(&n, self.src)).unwrap_or_default(),
            text: self.text(node).to_string(),
            span: Span::from_ts_node(&node, self.src),
        }
    }

    fn params(&self, node: Node) -> Vec<Param> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|p| p.kind() != "comment")
            .map(|p| {
                // TS wraps each parameter; JS defaults wrap the binding.
                let binding = p
                    .child_by_field_name("pattern")
                    .or_else(|| p.child_by_field_name("left"))
                    .unwrap_or(p);
                Param {
                    name: self.text(binding).to_string(),
                    span: Span::from_ts_node(&binding, self.src),
                }
            })
            .collect()
    }

    fn block(&self, node: Node) -> MethodBody {
        let mut cursor = node.walk();
        let statements = node
            .named_children(&mut cursor)
            .filter(|s| s.kind() != "comment")
            .map(|s| Statement {
                text: self.text(s).to_string(),
                span: Span::from_ts_node(&s, self.src),
            })
            .collect();
        MethodBody {
            text: self.text(node).to_string(),
            span: Span::from_ts_node(&node, self.src),
            statements,
        }
    }

    fn property(&self, node: Node) -> Option<PropertyDecl> {
        let name = node
            .child_by_field_name("name")
            .or_else(|| node.child_by_field_name("property"))?;
        Some(PropertyDecl {
            name: self.text(name).to_string(),
            is_static: has_token(node, "static"),
            span: Span::from_ts_node(&node, self.src),
        })
    }

    fn jsx_element(&self, node: Node) -> JsxElement {
        let mut attributes = Vec::new();
        let mut cursor = node.walk();
        for attr in node.named_children(&mut cursor) {
            if attr.kind() != "jsx_attribute" {
                continue;
            }
            let mut inner = attr.walk();
            let mut parts = attr.named_children(&mut inner);
            let Some(name) = parts.next() else { continue };
            let value = parts.next().map(|v| match v.kind() {
                "string" => JsxAttrValue::String(unquote(self.text(v)).to_string()),
                "jsx_expression" => JsxAttrValue::Expression(self.text(v).to_string()),
                _ => JsxAttrValue::Element(self.text(v).to_string()),
            });
            attributes.push(JsxAttribute {
                name: self.text(name).to_string(),
                value,
                span: Span::from_ts_node(&attr, self.src),
            });
        }

        JsxElement {
            name: self.field_text(node, "name").unwrap_or_default(),
            self_closing: node.kind() == "jsx_self_closing_element",
            attributes,
            span: Span::from_ts_node(&node, self.src),
        }
    }

    fn call(&self, node: Node) -> Option<CallExpr> {
        let callee = node.child_by_field_name("function")?;
        let arguments = node
            .child_by_field_name("arguments")
            .map(|args| {
                let mut cursor = args.walk();
                args.named_children(&mut cursor)
                    .filter(|a| a.kind() != "comment")
                    .map(|a| self.text(a).to_string())
                    .collect()
            })
            .unwrap_or_default();
        Some(CallExpr {
            callee: self.text(callee).to_string(),
            arguments,
            span: Span::from_ts_node(&node, self.src),
        })
    }

    fn member(&self, node: Node) -> Option<MemberExpr> {
        Some(MemberExpr {
            object: self.field_text(node, "object")?,
            property: self.field_text(node, "property")?,
            span: Span::from_ts_node(&node, self.src),
        })
    }

    fn assignment(&self, node: Node) -> Option<AssignmentExpr> {
        let operator = if node.kind() == "assignment_expression" {
            "=".to_string()
        } else {
            self.field_text(node, "operator")?
        };
        Some(AssignmentExpr {
            left: self.field_text(node, "left")?,
            operator,
            right: self.field_text(node, "right")?,
            span: Span::from_ts_node(&node, self.src),
        })
    }

    fn import(&self, node: Node) -> Option<ImportDecl> {
        let source = node.child_by_field_name("source").or_else(|| {
            // TS `import x = require('m')`
            let mut cursor = node.walk();
            let clause = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "import_require_clause");
            clause.and_then(|c| c.child_by_field_name("source"))
        })?;
        Some(ImportDecl {
            specifier: unquote(self.text(source)).to_string(),
            span: Span::from_ts_node(&node, self.src),
        })
    }

    fn field_text(&self, node: Node, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|n| self.text(n).to_string())
    }

    fn text(&self, node: Node) -> &str {
        node.utf8_text(self.src).unwrap_or("")
    }
}

/// True when `node` has a direct anonymous child token of `kind`.
fn has_token(node: Node, kind: &str) -> bool {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .any(|c| !c.is_named() && c.kind() == kind)
}

fn unquote(text: &str) -> &str {
    let trimmed = text.trim();
    for quote in ['\'', '"', '`'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|t| t.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::types::SyntaxNode;

    fn tsx(source: &str) -> SourceTree {
        parse_source(Path::new("App.tsx"), source, Language::Tsx).unwrap()
    }

    #[test]
    fn extracts_class_members() {
        let tree = tsx(r#"
class Legacy extends React.Component {
  static contextTypes = { theme: PropTypes.object };
  state = {};
  constructor(props) {
    super(props);
  }
  componentWillReceiveProps(nextProps) {
    // comments are not statements
    console.log(nextProps);
  }
  async load() {}
}
"#);
        let class = &tree.classes[0];
        assert_eq!(class.name.as_deref(), Some("Legacy"));
        assert!(class.static_property("contextTypes").is_some());
        assert!(class.static_property("state").is_none());
        assert!(class.constructor().is_some());

        let names: Vec<_> = class.methods().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["componentWillReceiveProps", "load"]);

        let cwrp = class.method("componentWillReceiveProps").unwrap();
        assert_eq!(cwrp.line(), 8);
        assert_eq!(cwrp.span.column, 3);
        assert_eq!(cwrp.params[0].name, "nextProps");
        assert_eq!(cwrp.statement_count(), 1);
        assert!(class.method("load").unwrap().is_async);
    }

    #[test]
    fn typescript_parameters_drop_annotations() {
        let tree = parse_source(
            Path::new("a.ts"),
            "class A { componentWillUpdate(nextProps: Props, nextState?: State) {} }",
            Language::TypeScript,
        )
        .unwrap();
        let method = tree.classes[0].method("componentWillUpdate").unwrap();
        let params: Vec<_> = method.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["nextProps", "nextState"]);
    }

    #[test]
    fn jsx_attribute_values_are_classified() {
        let tree = tsx(r#"const a = <div><input ref="x" /><input ref={x} disabled /></div>;"#);
        let inputs: Vec<_> = tree.jsx_elements.iter().filter(|e| e.name == "input").collect();
        assert_eq!(inputs.len(), 2);
        assert_eq!(
            inputs[0].attribute("ref").unwrap().value,
            Some(JsxAttrValue::String("x".to_string()))
        );
        assert!(matches!(
            inputs[1].attribute("ref").unwrap().value,
            Some(JsxAttrValue::Expression(_))
        ));
        assert_eq!(inputs[1].attribute("disabled").unwrap().value, None);
    }

    #[test]
    fn javascript_grammar_handles_jsx_and_fields() {
        let tree = parse_source(
            Path::new("a.jsx"),
            "class A extends Component { static childContextTypes = {}; render() { return <b ref='n' />; } }",
            Language::JavaScript,
        )
        .unwrap();
        assert!(tree.classes[0].static_property("childContextTypes").is_some());
        assert_eq!(tree.jsx_elements.len(), 1);
        assert_eq!(tree.error_count, 0);
    }

    #[test]
    fn expressions_and_imports() {
        let tree = tsx(r#"
import { act } from 'react-dom/test-utils';
function Button() { return null; }
const Card = () => null;
Button.defaultProps = { size: 1 };
count += 1;
ReactDOM.render(<App />, root);
"#);
        assert_eq!(tree.imports[0].specifier, "react-dom/test-utils");
        assert_eq!(tree.functions.len(), 2);
        assert_eq!(tree.functions[1].name.as_deref(), Some("Card"));
        assert_eq!(tree.assignments[0].left, "Button.defaultProps");
        assert_eq!(tree.assignments[0].operator, "=");
        assert_eq!(tree.assignments[1].operator, "+=");
        let render = tree.calls.iter().find(|c| c.callee == "ReactDOM.render").unwrap();
        assert_eq!(render.arguments.len(), 2);
        assert_eq!(render.span.line, 7);
    }

    #[test]
    fn nodes_are_in_source_order() {
        let tree = tsx("foo(); class A {} this.refs.x; bar();");
        let kinds: Vec<_> = tree
            .nodes()
            .into_iter()
            .map(|n| match n {
                SyntaxNode::Call(c) => c.callee.clone(),
                SyntaxNode::Class(_) => "class".to_string(),
                SyntaxNode::Member(m) => format!("{}.{}", m.object, m.property),
                _ => String::new(),
            })
            .collect();
        assert_eq!(kinds, vec!["foo", "class", "this.refs.x", "this.refs", "bar"]);
    }

    #[test]
    fn each_class_is_recorded_once() {
        let tree = tsx("class A {}\nconst B = class { render() {} };");
        assert_eq!(tree.classes.len(), 2);
        assert_eq!(tree.classes[0].name.as_deref(), Some("A"));
        assert!(tree.classes[1].method("render").is_some());
        assert!(tree.classes.iter().all(|c| !c.body_span.is_empty()));
    }

    #[test]
    fn columns_count_characters() {
        let tree = tsx("const s = \"éü\"; foo();");
        let call = tree.calls.iter().find(|c| c.callee == "foo").unwrap();
        assert_eq!(call.span.start, 18);
        assert_eq!(call.span.column, 17);
    }

    #[test]
    fn tolerates_syntax_errors() {
        let tree = tsx("class A { componentWillMount() { this.setState({ a: ) } }\nfoo();");
        assert!(tree.has_errors());
    }
}
