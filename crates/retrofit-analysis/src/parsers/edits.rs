//! Textual edits against one snapshot of a file.

use retrofit_core::errors::ApplyError;

/// Replace `source[start..end]` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at, at, text)
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::replace(start, end, String::new())
    }
}

/// Apply all edits to `source` in one pass.
///
/// Edits may be given in any order. Two edits whose ranges overlap are
/// rejected; touching ranges are fine. Insertions at the same offset keep
/// their given order.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String, ApplyError> {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.start, e.end));

    for edit in &ordered {
        if edit.start > edit.end
            || edit.end > source.len()
            || !source.is_char_boundary(edit.start)
            || !source.is_char_boundary(edit.end)
        {
            return Err(ApplyError::OutOfBounds {
                start: edit.start,
                end: edit.end,
                len: source.len(),
            });
        }
    }
    for pair in ordered.windows(2) {
        if pair[1].start < pair[0].end {
            return Err(ApplyError::OverlappingEdits {
                first_end: pair[0].end,
                second_start: pair[1].start,
            });
        }
    }

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in ordered {
        out.push_str(&source[cursor..edit.start]);
        out.push_str(&edit.replacement);
        cursor = edit.end;
    }
    out.push_str(&source[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn applies_out_of_order_edits() {
        let out = apply_edits(
            "hello brave world",
            &[TextEdit::replace(12, 17, "there"), TextEdit::delete(5, 11)],
        )
        .unwrap();
        assert_eq!(out, "hello there");
    }

    #[test]
    fn insertions_at_same_offset_keep_order() {
        let out = apply_edits("ab", &[TextEdit::insert(1, "1"), TextEdit::insert(1, "2")]).unwrap();
        assert_eq!(out, "a12b");
    }

    #[test]
    fn rejects_overlap() {
        let err = apply_edits("abcdef", &[TextEdit::delete(0, 4), TextEdit::delete(2, 5)]).unwrap_err();
        assert!(matches!(err, ApplyError::OverlappingEdits { first_end: 4, second_start: 2 }));
    }

    #[test]
    fn rejects_out_of_bounds() {
        let err = apply_edits("abc", &[TextEdit::delete(1, 9)]).unwrap_err();
        assert!(matches!(err, ApplyError::OutOfBounds { len: 3, .. }));
    }

    proptest! {
        #[test]
        fn deleting_disjoint_ranges_shrinks_by_their_total(
            source in "[a-z]{0,40}",
            cuts in proptest::collection::vec((0usize..40, 0usize..5), 0..6),
        ) {
            let mut edits = Vec::new();
            let mut last_end = 0;
            let mut removed = 0;
            let mut sorted = cuts.clone();
            sorted.sort();
            for (start, len) in sorted {
                let start = start.max(last_end);
                let end = (start + len).min(source.len());
                if start > source.len() {
                    break;
                }
                removed += end - start;
                edits.push(TextEdit::delete(start, end));
                last_end = end;
            }
            let out = apply_edits(&source, &edits).unwrap();
            prop_assert_eq!(out.len(), source.len() - removed);
        }
    }
}
