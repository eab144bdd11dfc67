//! Catalog types: categories, rules, and the immutable catalog value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Deprecated-API grouping shared by rules and issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "lifecycleMethods")]
    LifecycleMethods,
    #[serde(rename = "refs")]
    Refs,
    #[serde(rename = "context")]
    Context,
    #[serde(rename = "domMethods")]
    DomMethods,
    #[serde(rename = "rendering")]
    Rendering,
    #[serde(rename = "factory")]
    Factory,
    #[serde(rename = "patterns")]
    Patterns,
    #[serde(rename = "testing")]
    Testing,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::LifecycleMethods,
        Category::Refs,
        Category::Context,
        Category::DomMethods,
        Category::Rendering,
        Category::Factory,
        Category::Patterns,
        Category::Testing,
    ];

    /// Name used on issues and in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LifecycleMethods => "lifecycleMethods",
            Self::Refs => "refs",
            Self::Context => "context",
            Self::DomMethods => "domMethods",
            Self::Rendering => "rendering",
            Self::Factory => "factory",
            Self::Patterns => "patterns",
            Self::Testing => "testing",
        }
    }

    /// Section key used in the catalog JSON file.
    pub fn catalog_key(&self) -> &'static str {
        match self {
            Self::Factory => "factory / legacyComponentCreation",
            Self::Testing => "others",
            other => other.name(),
        }
    }

    pub fn from_catalog_key(key: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.catalog_key() == key)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity of a deprecated API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Error,
    Warning,
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// One deprecated construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecatedApiRule {
    pub name: String,
    #[serde(rename = "deprecatedInVersion", alias = "deprecatedIn")]
    pub deprecated_in: String,
    #[serde(
        rename = "removedInVersion",
        alias = "removedIn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub removed_in: Option<String>,
    pub alternative: String,
    pub severity: RuleSeverity,
    /// Quoted module-specifier fragment; only testing utilities carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl DeprecatedApiRule {
    /// The module specifier fragment quoted inside `pattern`, e.g.
    /// `react-dom/test-utils` from `import { act } from 'react-dom/test-utils'`.
    pub fn module_fragment(&self) -> Option<&str> {
        let pattern = self.pattern.as_deref()?;
        let quote = pattern.find(['\'', '"'])?;
        let quote_char = pattern[quote..].chars().next()?;
        let rest = &pattern[quote + 1..];
        let end = rest.find(quote_char)?;
        let fragment = &rest[..end];
        (!fragment.is_empty()).then_some(fragment)
    }

    /// Method part of a module-qualified name: `render` from `ReactDOM.render`.
    pub fn member_suffix(&self) -> Option<&str> {
        self.name.split('.').nth(1).filter(|s| !s.is_empty())
    }
}

/// Immutable rule table, grouped by category.
///
/// Constructed once and passed into the detector; lookups never fail, a
/// missing category or rule is simply absent.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    sections: [Vec<DeprecatedApiRule>; 8],
}

impl RuleCatalog {
    pub fn from_sections(sections: impl IntoIterator<Item = (Category, Vec<DeprecatedApiRule>)>) -> Self {
        let mut catalog = Self::default();
        for (category, rules) in sections {
            catalog.sections[category.index()].extend(rules);
        }
        catalog
    }

    /// Rules of a category, in catalog order.
    pub fn rules(&self, category: Category) -> &[DeprecatedApiRule] {
        &self.sections[category.index()]
    }

    /// Exact-name lookup within a category.
    pub fn find(&self, category: Category, name: &str) -> Option<&DeprecatedApiRule> {
        self.rules(category).iter().find(|r| r.name == name)
    }

    /// The canonical rule of a single-entry category (refs, context, DOM methods, patterns).
    pub fn primary(&self, category: Category) -> Option<&DeprecatedApiRule> {
        self.rules(category).first()
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
