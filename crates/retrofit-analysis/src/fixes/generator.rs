//! Fix generation: issue → re-located method → pattern → fix.

use std::path::Path;

use retrofit_core::errors::PipelineResult;
use rustc_hash::FxHashMap;

use crate::detectors::Issue;
use crate::parsers::{ClassDecl, MethodDecl, SourceTree, SyntaxProvider, TreeSitterProvider};

use super::classifier::classify;
use super::constructor::{constructor_preview, existing_state_is_mergeable};
use super::rename::{modern_hook_name, renamed_method_text};
use super::state_props::extract_state_props;
use super::types::{Confidence, Fix, FixType, Pattern, Urgency};

const MIGRATION_GUIDE: &str = "https://react.dev/reference/react/Component";

/// Builds one fix per locatable issue. Never writes to disk.
pub struct FixGenerator<P: SyntaxProvider = TreeSitterProvider> {
    provider: P,
}

impl FixGenerator<TreeSitterProvider> {
    pub fn new() -> Self {
        Self::with_provider(TreeSitterProvider::default())
    }
}

impl Default for FixGenerator<TreeSitterProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SyntaxProvider> FixGenerator<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Generate fixes for `issues`, file by file in first-seen order.
    ///
    /// A file that can no longer be loaded contributes no fixes and an
    /// error on the result.
    pub fn generate(&self, issues: &[Issue]) -> PipelineResult<Vec<Fix>> {
        let mut result = PipelineResult::<Vec<Fix>>::default();

        for (file, file_issues) in group_by_file(issues) {
            let tree = match self.provider.load(file) {
                Ok(tree) => tree,
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "cannot generate fixes");
                    result.add_error(e.into());
                    continue;
                }
            };
            result.data.extend(generate_for_tree(&tree, file_issues));
        }

        tracing::info!(
            issues = issues.len(),
            fixes = result.data.len(),
            "fix generation complete"
        );
        result
    }
}

fn group_by_file(issues: &[Issue]) -> Vec<(&Path, Vec<&Issue>)> {
    let mut index: FxHashMap<&Path, usize> = FxHashMap::default();
    let mut groups: Vec<(&Path, Vec<&Issue>)> = Vec::new();
    for issue in issues {
        let slot = *index.entry(issue.file.as_path()).or_insert_with(|| {
            groups.push((issue.file.as_path(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(issue);
    }
    groups
}

/// Fixes for issues in one parsed file.
///
/// Issues whose method cannot be found by name and starting line yield
/// nothing, as do `setState-only` bodies with no extractable state.
pub fn generate_for_tree<'a>(
    tree: &SourceTree,
    issues: impl IntoIterator<Item = &'a Issue>,
) -> Vec<Fix> {
    let mut fixes = Vec::new();
    // Rename targets already taken, keyed by class start offset.
    let mut claimed: Vec<(usize, &'static str)> = Vec::new();
    for issue in issues {
        let Some((class, method)) = tree.find_method(&issue.api, issue.line) else {
            tracing::debug!(api = %issue.api, line = issue.line, "no method at issue position");
            continue;
        };
        let pattern = classify(&method.name, method.body.as_ref());
        if let Some(fix) = create_fix(tree, issue, class, method, pattern, &mut claimed) {
            tracing::debug!(api = %fix.api, line = fix.line, pattern = %pattern, kind = %fix.fix_type, "fix");
            fixes.push(fix);
        }
    }
    fixes
}

fn create_fix(
    tree: &SourceTree,
    issue: &Issue,
    class: &ClassDecl,
    method: &MethodDecl,
    pattern: Pattern,
    claimed: &mut Vec<(usize, &'static str)>,
) -> Option<Fix> {
    let name = method.name.as_str();
    let fix = |fix_type, confidence, description: String, after: String| Fix {
        api: name.to_string(),
        file: issue.file.clone(),
        line: issue.line,
        category: issue.category,
        pattern,
        description,
        before: method.text.clone(),
        after,
        fix_type,
        confidence,
        urgency: None,
    };

    match pattern {
        Pattern::Empty => Some(fix(
            FixType::Remove,
            Confidence::High,
            format!("Remove empty {name}"),
            format!("// Removed empty {name}"),
        )),
        Pattern::Async | Pattern::SimpleLogging | Pattern::SimpleSideEffect => {
            let target = modern_hook_name(name);
            let claim = (class.span.start, target);
            if class.method(target).is_some() || claimed.contains(&claim) {
                return Some(fix(
                    FixType::ManualReview,
                    Confidence::Medium,
                    format!("{target} already exists; merge {name} into it by hand"),
                    renamed_method_text(method, target),
                ));
            }
            claimed.push(claim);
            Some(fix(
                FixType::Rename,
                Confidence::High,
                format!("Rename {name} to {target}"),
                renamed_method_text(method, target),
            ))
        }
        Pattern::SetStateOnly => {
            let props = extract_state_props(tree, method)?;
            if !existing_state_is_mergeable(class) {
                return Some(fix(
                    FixType::ManualReview,
                    Confidence::Medium,
                    format!("Constructor state is not an object literal; move state from {name} by hand"),
                    constructor_preview(&props),
                ));
            }
            Some(fix(
                FixType::MoveToConstructor,
                Confidence::High,
                format!("Move state initialization from {name} into the constructor"),
                constructor_preview(&props),
            ))
        }
        Pattern::UnsafePrefix => Some(Fix {
            urgency: Some(Urgency::High),
            ..fix(
                FixType::ManualReview,
                Confidence::Low,
                format!("{name} will be removed in a future React version"),
                format!(
                    "// URGENT: Remove {name} - will be removed in future React versions\n{}",
                    method.text
                ),
            )
        }),
        Pattern::Complex => Some(fix(
            FixType::ManualReview,
            Confidence::Low,
            format!("Complex {name} requires manual migration"),
            format!(
                "// MANUAL REVIEW: Complex {name} requires careful migration\n// See: {MIGRATION_GUIDE}#{}",
                name.to_lowercase()
            ),
        )),
    }
}
