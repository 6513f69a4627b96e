use crate::normalize::{normalize_strict, words};

/// Outcome of one submitted attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeResult {
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub total_words: usize,
    /// Rounded percentage, 0 when the rule has no words
    pub accuracy: u32,
    pub points: usize,
}

pub const POINTS_PER_WORD: usize = 10;

/// Score an answer word by word against the rule.
///
/// Both sides are strictly normalized first, so case and punctuation never
/// matter. Words are compared positionally; words typed past the end of the
/// rule are neither rewarded nor penalized.
pub fn score_answer(input: &str, target: &str) -> PracticeResult {
    let input = normalize_strict(input);
    let target = normalize_strict(target);
    let input_words = words(&input);
    let target_words = words(&target);

    let correct_count = input_words
        .iter()
        .zip(target_words.iter())
        .filter(|(typed, expected)| typed == expected)
        .count();

    let total_words = target_words.len();
    let accuracy = if total_words > 0 {
        ((correct_count as f64 / total_words as f64) * 100.0).round() as u32
    } else {
        0
    };

    PracticeResult {
        correct_count,
        incorrect_count: total_words.saturating_sub(correct_count),
        total_words,
        accuracy,
        points: correct_count * POINTS_PER_WORD,
    }
}
