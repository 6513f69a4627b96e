use crate::normalize::{normalize_loose, normalize_strict, words};

/// A rule word paired with what the user typed at the same position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordDiff {
    Correct { word: String },
    /// `typed` is empty when the answer ran out of words
    Incorrect { typed: String, expected: String },
}

impl WordDiff {
    pub fn is_correct(&self) -> bool {
        matches!(self, WordDiff::Correct { .. })
    }
}

/// Align the answer with the rule word by word for the review screen.
/// One entry per rule word; surplus answer words are dropped.
pub fn render_diff(input: &str, rule: &str) -> Vec<WordDiff> {
    let input = normalize_loose(input);
    let rule = normalize_loose(rule);
    let typed_words = words(&input);

    words(&rule)
        .into_iter()
        .enumerate()
        .map(|(i, expected)| {
            let typed = typed_words.get(i).copied().unwrap_or("");
            if normalize_strict(typed) == normalize_strict(expected) {
                WordDiff::Correct {
                    word: expected.to_string(),
                }
            } else {
                WordDiff::Incorrect {
                    typed: typed.to_string(),
                    expected: expected.to_string(),
                }
            }
        })
        .collect()
}
