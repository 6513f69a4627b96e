use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::diff::{render_diff, WordDiff};
use crate::hint::{generate_hint, HintLevel};
use crate::normalize::normalize_loose;
use crate::progress::{render_progress, ProgressCell};
use crate::scoring::{score_answer, PracticeResult};

pub const MOTIVATIONAL_QUOTES: [&str; 5] = [
    "Świetna robota! Każdy błąd to krok do przodu. 💪",
    "Wow, idzie Ci rewelacyjnie! ✨ Jesteś mistrzem!",
    "Tak trzymaj! Praktyka czyni mistrza. 🚀",
    "Niesamowite! Twój mózg właśnie stał się silniejszy. 🧠",
    "Jesteś nie do zatrzymania! Kolejna próba? 🔥",
];

/// Accuracy above which the review screen celebrates
const EXCELLENT_ACCURACY: u32 = 80;

/// One practice run over a rule: live input, hinting and the last result
#[derive(Debug, Clone)]
pub struct Practice {
    rule: String,
    input: String,
    hint_level: HintLevel,
    highlight_errors: bool,
    hint_seed: u64,
    hint: String,
    result: Option<PracticeResult>,
}

impl Practice {
    pub fn new(rule: &str, hint_level: HintLevel, highlight_errors: bool) -> Self {
        let mut practice = Self {
            rule: normalize_loose(rule),
            input: String::new(),
            hint_level,
            highlight_errors,
            hint_seed: rand::thread_rng().gen(),
            hint: String::new(),
            result: None,
        };
        practice.refresh_hint();
        practice
    }

    /// Loose-normalized rule, as displayed
    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn hint_level(&self) -> HintLevel {
        self.hint_level
    }

    pub fn highlight_errors(&self) -> bool {
        self.highlight_errors
    }

    pub fn result(&self) -> Option<&PracticeResult> {
        self.result.as_ref()
    }

    // Random gaps stay put until the level changes or the user retries.
    fn refresh_hint(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.hint_seed);
        self.hint = generate_hint(&self.rule, self.hint_level, &mut rng);
    }

    fn reroll_hint(&mut self) {
        self.hint_seed = rand::thread_rng().gen();
        self.refresh_hint();
    }

    pub fn write(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn set_hint_level(&mut self, level: HintLevel) {
        self.hint_level = level;
        self.reroll_hint();
        log::debug!("hint level set to {:?}", level);
    }

    pub fn next_hint_level(&mut self) {
        self.set_hint_level(self.hint_level.next());
    }

    pub fn prev_hint_level(&mut self) {
        self.set_hint_level(self.hint_level.prev());
    }

    pub fn toggle_highlight(&mut self) {
        self.highlight_errors = !self.highlight_errors;
    }

    /// Annotated view of the typing area
    pub fn progress(&self) -> Vec<ProgressCell> {
        render_progress(
            &self.input,
            &self.rule,
            &self.hint,
            self.hint_level,
            self.highlight_errors,
        )
    }

    /// Score the current input. Blank input is ignored and yields `None`.
    pub fn submit(&mut self) -> Option<PracticeResult> {
        if self.input.trim().is_empty() {
            return None;
        }
        let result = score_answer(&self.input, &self.rule);
        log::info!(
            "answer scored: {}/{} words, {}%",
            result.correct_count,
            result.total_words,
            result.accuracy
        );
        self.result = Some(result);
        self.result
    }

    /// Word-level comparison of the submitted answer
    pub fn diff(&self) -> Vec<WordDiff> {
        render_diff(&self.input, &self.rule)
    }

    /// Start over on the same rule with an empty answer
    pub fn retry(&mut self) {
        self.input.clear();
        self.result = None;
        self.reroll_hint();
    }

    pub fn headline(&self) -> &'static str {
        match self.result {
            Some(r) if r.accuracy > EXCELLENT_ACCURACY => "Doskonale!",
            _ => "Świetna próba!",
        }
    }

    pub fn motivational_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
        MOTIVATIONAL_QUOTES
            .choose(rng)
            .copied()
            .unwrap_or(MOTIVATIONAL_QUOTES[0])
    }
}
