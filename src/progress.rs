use crate::hint::HintLevel;
use crate::normalize::is_punctuation;

/// One rendered position of the live practice view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressCell {
    /// A character the user typed; `error` only when highlighting is on
    Typed { ch: char, error: bool },
    /// Punctuation typed by the user, always rendered neutrally
    Punctuation(char),
    /// Muted hint glyph for the untyped remainder of the rule
    Hint(char),
    /// Untyped position with nothing to show
    Blank,
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Annotate what the user typed so far and fill the rest from the hint.
///
/// Punctuation never counts against the user and does not consume a
/// position of the punctuation-free rule. The remainder starts at the spot
/// in the original rule matching the number of non-punctuation characters
/// typed.
pub fn render_progress(
    input: &str,
    rule: &str,
    hint: &str,
    level: HintLevel,
    highlight_errors: bool,
) -> Vec<ProgressCell> {
    let rule_chars: Vec<char> = rule.chars().collect();
    let clean_rule: Vec<char> = rule_chars
        .iter()
        .copied()
        .filter(|c| !is_punctuation(*c))
        .collect();

    let mut cells = Vec::with_capacity(input.len().max(rule_chars.len()));
    let mut clean_index = 0;

    for ch in input.chars() {
        if is_punctuation(ch) {
            cells.push(ProgressCell::Punctuation(ch));
            continue;
        }
        let matches = clean_rule
            .get(clean_index)
            .is_some_and(|expected| same_letter(ch, *expected));
        cells.push(ProgressCell::Typed {
            ch,
            error: highlight_errors && !matches,
        });
        clean_index += 1;
    }

    let resume_at = resume_position(&rule_chars, clean_index);
    let hint_chars: Vec<char> = hint.chars().collect();

    for i in resume_at..rule_chars.len() {
        let glyph = match level {
            HintLevel::Zen => ' ',
            _ => hint_chars.get(i).copied().unwrap_or(' '),
        };
        cells.push(if glyph == ' ' {
            ProgressCell::Blank
        } else {
            ProgressCell::Hint(glyph)
        });
    }

    cells
}

/// Index into `rule_chars` just past the `clean_count`-th non-punctuation char.
fn resume_position(rule_chars: &[char], clean_count: usize) -> usize {
    let mut idx = 0;
    let mut counted = 0;
    while idx < rule_chars.len() && counted < clean_count {
        if !is_punctuation(rule_chars[idx]) {
            counted += 1;
        }
        idx += 1;
    }
    idx
}
