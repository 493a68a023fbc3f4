use similar::{Algorithm, DiffOp, capture_diff_slices};

/// One word-granular edit operation transforming a before-text into an
/// after-text. Each op carries a maximal run of tokens with the same fate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOp {
    /// Present in both texts
    Unchanged(String),
    /// Present only in the after-text
    Inserted(String),
    /// Present only in the before-text
    Deleted(String),
}

impl EditOp {
    pub fn text(&self) -> &str {
        match self {
            EditOp::Unchanged(t) | EditOp::Inserted(t) | EditOp::Deleted(t) => t,
        }
    }
}

/// Word-granular diff between two full-document snapshots.
///
/// Pure and deterministic. The concatenation of Unchanged+Deleted op text
/// reconstructs `before`; Unchanged+Inserted reconstructs `after`.
///
/// Tokens split at word boundaries: maximal runs of identifier characters
/// (alphanumeric or `_`) alternate with runs of everything else, so typing
/// over `count` in `count()` changes exactly one token. This reruns on every
/// keystroke while a session is open, hence similar's LCS-family Myers
/// algorithm over the token slices rather than any quadratic scan.
pub fn diff(before: &str, after: &str) -> Vec<EditOp> {
    let before_tokens = tokenize(before);
    let after_tokens = tokenize(after);
    let ops = capture_diff_slices(Algorithm::Myers, &before_tokens, &after_tokens);

    let mut edits = Vec::with_capacity(ops.len());
    let concat = |tokens: &[&str], index: usize, len: usize| tokens[index..index + len].concat();
    for op in ops {
        match op {
            DiffOp::Equal {
                old_index, len, ..
            } => edits.push(EditOp::Unchanged(concat(&before_tokens, old_index, len))),
            DiffOp::Delete {
                old_index, old_len, ..
            } => edits.push(EditOp::Deleted(concat(&before_tokens, old_index, old_len))),
            DiffOp::Insert {
                new_index, new_len, ..
            } => edits.push(EditOp::Inserted(concat(&after_tokens, new_index, new_len))),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                edits.push(EditOp::Deleted(concat(&before_tokens, old_index, old_len)));
                edits.push(EditOp::Inserted(concat(&after_tokens, new_index, new_len)));
            }
        }
    }
    edits
}

/// Split text into word and non-word tokens. Concatenating the tokens
/// reconstructs the input byte-for-byte.
fn tokenize(text: &str) -> Vec<&str> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_word = None;
    for (i, c) in text.char_indices() {
        let word = is_word(c);
        if let Some(previous) = in_word
            && previous != word
        {
            tokens.push(&text[start..i]);
            start = i;
        }
        in_word = Some(word);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reconstruct_before(ops: &[EditOp]) -> String {
        ops.iter()
            .filter(|op| !matches!(op, EditOp::Inserted(_)))
            .map(EditOp::text)
            .collect()
    }

    fn reconstruct_after(ops: &[EditOp]) -> String {
        ops.iter()
            .filter(|op| !matches!(op, EditOp::Deleted(_)))
            .map(EditOp::text)
            .collect()
    }

    #[rstest]
    #[case("foo bar foo", "baz bar baz")]
    #[case("", "hello")]
    #[case("hello", "")]
    #[case("let x = compute();", "let result = compute();")]
    #[case("a b c", "a b c")]
    #[case("one\ntwo\nthree", "one\ntwo point five\nthree")]
    #[case("trailing space ", "trailing space  more")]
    #[case("naïve café", "naïve ☕ café")]
    fn reconstructs_both_sides(#[case] before: &str, #[case] after: &str) {
        let ops = diff(before, after);
        assert_eq!(reconstruct_before(&ops), before);
        assert_eq!(reconstruct_after(&ops), after);
    }

    #[test]
    fn identical_texts_yield_single_unchanged_run() {
        let ops = diff("foo bar", "foo bar");
        assert_eq!(ops, vec![EditOp::Unchanged("foo bar".to_string())]);
    }

    #[test]
    fn word_replacement_pairs_delete_with_insert() {
        let ops = diff("foo bar foo", "baz bar baz");
        assert!(ops.contains(&EditOp::Deleted("foo".to_string())));
        assert!(ops.contains(&EditOp::Inserted("baz".to_string())));
        // Both occurrences change, separated by the unchanged middle.
        let inserted: Vec<_> = ops
            .iter()
            .filter(|op| matches!(op, EditOp::Inserted(_)))
            .collect();
        assert_eq!(inserted.len(), 2);
    }

    #[test]
    fn identifier_and_adjacent_punctuation_are_separate_tokens() {
        // Only the identifier changes; the call syntax around it does not.
        let ops = diff("count();", "tally();");
        assert_eq!(
            ops,
            vec![
                EditOp::Deleted("count".to_string()),
                EditOp::Inserted("tally".to_string()),
                EditOp::Unchanged("();".to_string()),
            ]
        );
    }

    #[test]
    fn pure_insertion_has_no_deleted_ops() {
        let ops = diff("foo bar", "foo extra bar");
        assert!(!ops.iter().any(|op| matches!(op, EditOp::Deleted(_))));
    }

    #[test]
    fn insert_runs_are_maximal() {
        let ops = diff("keep", "keep two new words");
        let inserted: Vec<_> = ops
            .iter()
            .filter(|op| matches!(op, EditOp::Inserted(_)))
            .collect();
        assert_eq!(inserted.len(), 1, "insert run should merge: {ops:?}");
        assert_eq!(inserted[0].text(), " two new words");
    }

    #[test]
    fn underscored_identifiers_are_single_tokens() {
        let ops = diff("old_name_here", "new_name_there");
        assert_eq!(
            ops,
            vec![
                EditOp::Deleted("old_name_here".to_string()),
                EditOp::Inserted("new_name_there".to_string()),
            ]
        );
    }

    #[test]
    fn deterministic_across_calls() {
        let before = "alpha beta gamma delta";
        let after = "alpha BETA gamma DELTA epsilon";
        assert_eq!(diff(before, after), diff(before, after));
    }

    #[test]
    fn handles_large_documents() {
        let before: String = (0..20_000).map(|i| format!("word{i} ")).collect();
        let mut after = before.clone();
        after.push_str("appended tail");
        let ops = diff(&before, &after);
        assert_eq!(reconstruct_before(&ops), before);
        assert_eq!(reconstruct_after(&ops), after);
    }

    #[test]
    fn tokenize_alternates_word_and_nonword_runs() {
        assert_eq!(tokenize("fn foo() {}"), vec!["fn", " ", "foo", "() {}"]);
        assert_eq!(tokenize(""), Vec::<&str>::new());
        assert_eq!(tokenize("   "), vec!["   "]);
    }
}
