use clap::ValueEnum;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Placeholder drawn in place of a hidden character.
pub const MASK_GLYPH: char = '·';

/// How much of the rule is revealed while practicing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum HintLevel {
    #[default]
    #[strum(serialize = "Pierwsze Litery")]
    FirstLetter,
    #[strum(serialize = "Co Drugie Słowo")]
    EveryOther,
    #[strum(serialize = "Losowe Luki")]
    Gaps,
    #[strum(serialize = "Tylko Kształt")]
    Shape,
    #[strum(serialize = "Tryb Zen")]
    Zen,
}

impl HintLevel {
    pub const ALL: [HintLevel; 5] = [
        HintLevel::FirstLetter,
        HintLevel::EveryOther,
        HintLevel::Gaps,
        HintLevel::Shape,
        HintLevel::Zen,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

fn mask(word: &str) -> String {
    std::iter::repeat(MASK_GLYPH)
        .take(word.chars().count())
        .collect()
}

/// Render the obscured version of a loose-normalized rule.
///
/// The output keeps the rule's shape character for character so it can be
/// overlaid on the untyped remainder. `Zen` yields an empty string, which
/// consumers treat as "draw nothing". Only `Gaps` draws from `rng`.
pub fn generate_hint<R: Rng + ?Sized>(text: &str, level: HintLevel, rng: &mut R) -> String {
    if text.is_empty() {
        return String::new();
    }

    let words = text.split(' ');
    match level {
        HintLevel::FirstLetter => words
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => std::iter::once(first)
                        .chain(chars.map(|_| MASK_GLYPH))
                        .collect(),
                    None => String::new(),
                }
            })
            .join(" "),
        HintLevel::EveryOther => words
            .enumerate()
            .map(|(i, word)| if i % 2 == 0 { word.to_string() } else { mask(word) })
            .join(" "),
        HintLevel::Gaps => words
            .enumerate()
            .map(|(i, word)| {
                if i > 0 && rng.gen_bool(0.5) {
                    mask(word)
                } else {
                    word.to_string()
                }
            })
            .join(" "),
        HintLevel::Shape => text
            .chars()
            .map(|c| if c.is_whitespace() { c } else { MASK_GLYPH })
            .collect(),
        HintLevel::Zen => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn hint(text: &str, level: HintLevel) -> String {
        generate_hint(text, level, &mut rand::thread_rng())
    }

    #[test]
    fn test_first_letter() {
        assert_eq!(hint("cat sat", HintLevel::FirstLetter), "c·· s··");
        assert_eq!(hint("a to", HintLevel::FirstLetter), "a t·");
    }

    #[test]
    fn test_first_letter_multibyte() {
        assert_eq!(hint("żółw", HintLevel::FirstLetter), "ż···");
    }

    #[test]
    fn test_every_other() {
        assert_eq!(
            hint("one two three four", HintLevel::EveryOther),
            "one ··· three ····"
        );
    }

    #[test]
    fn test_shape_preserves_whitespace() {
        let h = hint("Hello, big world!", HintLevel::Shape);
        assert_eq!(h, "······ ··· ······");
        assert_eq!(h.chars().count(), "Hello, big world!".chars().count());
    }

    #[test]
    fn test_zen_is_empty() {
        assert_eq!(hint("anything at all", HintLevel::Zen), "");
        assert_eq!(hint("", HintLevel::Zen), "");
    }

    #[test]
    fn test_empty_input_for_every_level() {
        for level in HintLevel::ALL {
            assert_eq!(hint("", level), "", "{level:?}");
        }
    }

    #[test]
    fn test_gaps_keep_first_word_and_shape() {
        let text = "alpha beta gamma delta epsilon";
        for _ in 0..20 {
            let h = hint(text, HintLevel::Gaps);
            assert!(h.starts_with("alpha "));
            assert_eq!(h.chars().count(), text.chars().count());
            for (shown, original) in h.split(' ').zip(text.split(' ')) {
                assert!(shown == original || shown == mask(original));
            }
        }
    }

    #[test]
    fn test_gaps_same_seed_same_mask() {
        let text = "one two three four five six seven eight";
        let a = generate_hint(text, HintLevel::Gaps, &mut StdRng::seed_from_u64(7));
        let b = generate_hint(text, HintLevel::Gaps, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_level_cycle() {
        assert_eq!(HintLevel::FirstLetter.next(), HintLevel::EveryOther);
        assert_eq!(HintLevel::Zen.next(), HintLevel::FirstLetter);
        assert_eq!(HintLevel::FirstLetter.prev(), HintLevel::Zen);
        let mut level = HintLevel::Shape;
        for _ in 0..HintLevel::ALL.len() {
            level = level.next();
        }
        assert_eq!(level, HintLevel::Shape);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(HintLevel::FirstLetter.to_string(), "Pierwsze Litery");
        assert_eq!(HintLevel::Zen.to_string(), "Tryb Zen");
    }
}
