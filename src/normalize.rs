/// Characters ignored when deciding whether two renditions of a rule match.
pub const PUNCTUATION: [char; 10] = ['.', ',', ';', '!', '?', ':', '"', '\'', '(', ')'];

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Trim and collapse every whitespace run into a single space.
/// Case and punctuation are left untouched; this is the display form.
pub fn normalize_loose(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison form: loose normalization, lowercased, punctuation removed,
/// whitespace collapsed again.
pub fn normalize_strict(text: &str) -> String {
    let lowered = normalize_loose(text).to_lowercase();
    normalize_loose(&strip_punctuation(&lowered))
}

pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !is_punctuation(*c)).collect()
}

/// Words of an already-normalized string. An empty string has no words.
pub fn words(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|w| !w.is_empty()).collect()
}
