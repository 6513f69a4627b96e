/// Piece of explanation text with its presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupSpan {
    Plain(String),
    Strong(String),
    LineBreak,
}

const STRONG_DELIMITER: &str = "**";

/// Split explanation text into typed spans.
///
/// `**word**` pairs become `Strong`; pairs never span a newline and an
/// unpaired delimiter is kept as literal text. Every `\n` is a `LineBreak`.
pub fn parse_markup(text: &str) -> Vec<MarkupSpan> {
    let mut spans = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            spans.push(MarkupSpan::LineBreak);
        }
        parse_line(line, &mut spans);
    }

    spans
}

fn parse_line(line: &str, spans: &mut Vec<MarkupSpan>) {
    let mut rest = line;

    while let Some(open) = rest.find(STRONG_DELIMITER) {
        let after_open = &rest[open + STRONG_DELIMITER.len()..];
        let Some(close) = after_open.find(STRONG_DELIMITER) else {
            break;
        };

        push_plain(spans, &rest[..open]);
        let inner = &after_open[..close];
        if !inner.is_empty() {
            spans.push(MarkupSpan::Strong(inner.to_string()));
        }
        rest = &after_open[close + STRONG_DELIMITER.len()..];
    }

    push_plain(spans, rest);
}

fn push_plain(spans: &mut Vec<MarkupSpan>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(MarkupSpan::Plain(prev)) = spans.last_mut() {
        prev.push_str(text);
    } else {
        spans.push(MarkupSpan::Plain(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::MarkupSpan::*;

    fn plain(s: &str) -> MarkupSpan {
        Plain(s.to_string())
    }

    fn strong(s: &str) -> MarkupSpan {
        Strong(s.to_string())
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_markup("just text"), vec![plain("just text")]);
        assert!(parse_markup("").is_empty());
    }

    #[test]
    fn test_bold_words() {
        assert_eq!(
            parse_markup("Rośliny **jedzą** światło i **rosną**!"),
            vec![
                plain("Rośliny "),
                strong("jedzą"),
                plain(" światło i "),
                strong("rosną"),
                plain("!"),
            ]
        );
    }

    #[test]
    fn test_newlines() {
        assert_eq!(
            parse_markup("one\ntwo\n"),
            vec![plain("one"), LineBreak, plain("two"), LineBreak]
        );
    }

    #[test]
    fn test_bold_does_not_cross_lines() {
        assert_eq!(
            parse_markup("**open\nclose**"),
            vec![plain("**open"), LineBreak, plain("close**")]
        );
    }

    #[test]
    fn test_unpaired_delimiter_is_literal() {
        assert_eq!(
            parse_markup("a **b** c **d"),
            vec![plain("a "), strong("b"), plain(" c **d")]
        );
    }

    #[test]
    fn test_markup_is_not_interpreted_as_html() {
        assert_eq!(parse_markup("<b>x</b>"), vec![plain("<b>x</b>")]);
    }
}
