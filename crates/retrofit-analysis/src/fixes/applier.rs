//! Fix application: every edit for a file is computed against one parse of
//! its current text, then the file is written once.

use std::path::{Path, PathBuf};

use retrofit_core::errors::PipelineError;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::parsers::{apply_edits, ClassDecl, SourceTree, SyntaxProvider, TextEdit, TreeSitterProvider};

use super::constructor::{line_indent, removal_edit, state_edit};
use super::rename::{modern_hook_name, renamed_method_text};
use super::state_props::{extract_state_props, StateProps};
use super::types::{ApplyReport, FileFailure, Fix, FixType};

type FileFixes<'a> = SmallVec<[&'a Fix; 4]>;

/// Applies high-confidence fixes with per-file failure isolation.
pub struct FixApplier<P: SyntaxProvider = TreeSitterProvider> {
    provider: P,
}

impl FixApplier<TreeSitterProvider> {
    pub fn new() -> Self {
        Self::with_provider(TreeSitterProvider::default())
    }
}

impl Default for FixApplier<TreeSitterProvider> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewritten text for one file, before it is persisted.
struct FileRewrite {
    /// `None` when no fix produced an edit.
    contents: Option<String>,
    applied: usize,
    stale: usize,
}

/// State headed for one class's constructor.
struct PendingState<'t> {
    class: &'t ClassDecl,
    member_indent: &'t str,
    props: StateProps,
}

impl<P: SyntaxProvider> FixApplier<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Apply every high-confidence fix in `fixes`.
    ///
    /// Files are rewritten independently; a file that fails to load, edit
    /// or persist is reported in `failed` and left untouched. Files are
    /// persisted only after every file has been processed.
    pub fn apply(&self, fixes: &[Fix]) -> ApplyReport {
        let mut report = ApplyReport {
            manual_review: fixes.iter().filter(|f| !f.is_auto_applicable()).count(),
            ..Default::default()
        };

        let groups = group_auto_applicable(fixes);
        tracing::info!(
            fixes = groups.iter().map(|(_, f)| f.len()).sum::<usize>(),
            files = groups.len(),
            "applying high-confidence fixes"
        );

        let mut pending: Vec<(PathBuf, String, usize)> = Vec::new();
        for (file, file_fixes) in groups {
            match self.rewrite_file(file, &file_fixes) {
                Ok(rewrite) => {
                    report.skipped_stale += rewrite.stale;
                    if let Some(contents) = rewrite.contents {
                        pending.push((file.to_path_buf(), contents, rewrite.applied));
                    }
                }
                Err(error) => {
                    tracing::warn!(path = %file.display(), error = %error, "fix application failed");
                    report.failed.push(FileFailure {
                        file: file.to_path_buf(),
                        error,
                    });
                }
            }
        }

        for (file, contents, applied) in pending {
            match self.provider.persist(&file, &contents) {
                Ok(()) => {
                    tracing::debug!(path = %file.display(), applied, "rewritten");
                    report.applied += applied;
                    report.succeeded.push(file);
                }
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "could not save");
                    report.failed.push(FileFailure {
                        file,
                        error: e.into(),
                    });
                }
            }
        }

        tracing::info!(
            files = report.succeeded.len(),
            failed = report.failed.len(),
            applied = report.applied,
            stale = report.skipped_stale,
            manual_review = report.manual_review,
            "apply complete"
        );
        report
    }

    fn rewrite_file(&self, file: &Path, fixes: &[&Fix]) -> Result<FileRewrite, PipelineError> {
        let tree = self.provider.load(file)?;
        let mut edits: Vec<TextEdit> = Vec::new();
        let mut states: Vec<PendingState<'_>> = Vec::new();
        let mut applied = 0;
        let mut stale = 0;

        for fix in fixes {
            let located = tree
                .find_method(&fix.api, fix.line)
                .filter(|(_, method)| method.text == fix.before);
            let Some((class, method)) = located else {
                tracing::debug!(api = %fix.api, line = fix.line, "stale fix skipped");
                stale += 1;
                continue;
            };

            match fix.fix_type {
                FixType::Remove => edits.push(removal_edit(&tree.source, method.span)),
                FixType::Rename => {
                    let renamed = renamed_method_text(method, modern_hook_name(&method.name));
                    edits.push(TextEdit::replace(method.span.start, method.span.end, renamed));
                }
                FixType::MoveToConstructor => {
                    let Some(props) = extract_state_props(&tree, method) else {
                        stale += 1;
                        continue;
                    };
                    queue_state(&mut states, &tree, class, method.span.start, props);
                    edits.push(removal_edit(&tree.source, method.span));
                }
                FixType::ManualReview => continue,
            }
            applied += 1;
        }

        for state in &states {
            edits.push(state_edit(&tree, state.class, &state.props, state.member_indent)?);
        }

        let contents = if edits.is_empty() {
            None
        } else {
            Some(apply_edits(&tree.source, &edits)?)
        };
        Ok(FileRewrite {
            contents,
            applied,
            stale,
        })
    }
}

/// Merge `props` into the state queued for `class`; later values win.
fn queue_state<'t>(
    states: &mut Vec<PendingState<'t>>,
    tree: &'t SourceTree,
    class: &'t ClassDecl,
    member_offset: usize,
    props: StateProps,
) {
    match states
        .iter_mut()
        .find(|s| s.class.span.start == class.span.start)
    {
        Some(pending) => pending.props.extend(props),
        None => states.push(PendingState {
            class,
            member_indent: line_indent(&tree.source, member_offset),
            props,
        }),
    }
}

fn group_auto_applicable(fixes: &[Fix]) -> Vec<(&Path, FileFixes<'_>)> {
    let mut index: FxHashMap<&Path, usize> = FxHashMap::default();
    let mut groups: Vec<(&Path, FileFixes<'_>)> = Vec::new();
    for fix in fixes.iter().filter(|f| f.is_auto_applicable()) {
        let slot = *index.entry(fix.file.as_path()).or_insert_with(|| {
            groups.push((fix.file.as_path(), SmallVec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(fix);
    }
    groups
}
