use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use brainrule::{
    diff::WordDiff,
    hint::{HintLevel, MASK_GLYPH},
    markup::MarkupSpan,
    practice::Practice,
    progress::ProgressCell,
    session::{Explanation, SessionStep, EXPLANATION_FAILED_MESSAGE},
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const CURSOR: &str = "▏";

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
}

pub fn draw(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(f.area());

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " B ",
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" BrainCoding", bold()),
    ]));
    f.render_widget(title, chunks[0]);

    let body = chunks[1];
    match app.session.step() {
        SessionStep::CollectingInput => render_rule_input(app, f, body),
        SessionStep::AwaitingExplanation { explanation, .. } => {
            if let Some(practice) = app.session.practice() {
                render_explanation(practice, explanation, app.ticks, f, body)
            }
        }
        SessionStep::Practicing => {
            if let Some(practice) = app.session.practice() {
                render_practice(practice, f, body)
            }
        }
        SessionStep::ReviewingResult => {
            if let Some(practice) = app.session.practice() {
                render_results(practice, app.session.quote(), f, body)
            }
        }
    }
}

fn render_rule_input(app: &App, f: &mut Frame, area: Rect) {
    let error_lines = if app.session.error().is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // heading
            Constraint::Length(error_lines), // error
            Constraint::Min(3),              // draft
            Constraint::Length(1),           // legend
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Wpisz regułkę, którą chcesz", bold()),
            Span::styled(
                " opanować do perfekcji!",
                bold().fg(Color::Yellow),
            ),
        ]),
        Line::from(Span::styled(
            "Zacznijmy magiczną podróż do świata wiedzy ✨",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    if let Some(error) = app.session.error() {
        let error = Paragraph::new(Span::styled(error, bold().fg(Color::Red)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center);
        f.render_widget(error, chunks[1]);
    }

    let draft = if app.session.draft().is_empty() {
        Line::from(vec![
            Span::styled(CURSOR, Style::default().fg(Color::Yellow)),
            Span::styled(
                "Np. 'Fotosynteza to proces, w którym rośliny przekształcają światło słoneczne w energię.' 🌿",
                Style::default().add_modifier(Modifier::DIM),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw(app.session.draft()),
            Span::styled(CURSOR, Style::default().fg(Color::Yellow)),
        ])
    };
    let draft = Paragraph::new(draft)
        .block(Block::default().borders(Borders::ALL).title(" Twoja Regułka "))
        .wrap(Wrap { trim: false });
    f.render_widget(draft, chunks[2]);

    f.render_widget(
        legend("(enter) zaczynamy ćwiczyć / (esc) wyjście"),
        chunks[3],
    );
}

fn markup_lines(spans: &[MarkupSpan]) -> Vec<Line<'_>> {
    let mut lines = vec![Line::default()];
    for span in spans {
        match span {
            MarkupSpan::Plain(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push_span(Span::raw(text.as_str()));
                }
            }
            MarkupSpan::Strong(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push_span(Span::styled(text.as_str(), bold()));
                }
            }
            MarkupSpan::LineBreak => lines.push(Line::default()),
        }
    }
    lines
}

/// Zero to three dots, advancing every third tick
fn waiting_dots(ticks: usize) -> String {
    ".".repeat(ticks / 3 % 4)
}

fn render_explanation(
    practice: &Practice,
    explanation: &Explanation,
    ticks: usize,
    f: &mut Frame,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // rule
            Constraint::Min(3),    // explanation
            Constraint::Length(1), // legend
        ])
        .split(area);

    let rule = Paragraph::new(practice.rule())
        .block(Block::default().borders(Borders::ALL).title(" Twoja regułka: "))
        .style(Style::default().add_modifier(Modifier::DIM))
        .wrap(Wrap { trim: true });
    f.render_widget(rule, chunks[0]);

    let content = match explanation {
        Explanation::Pending => vec![Line::from(Span::styled(
            format!("BrainBot myśli{}", waiting_dots(ticks)),
            Style::default().add_modifier(Modifier::ITALIC),
        ))],
        Explanation::Ready(spans) => markup_lines(spans),
        Explanation::Failed => vec![Line::from(Span::styled(
            EXPLANATION_FAILED_MESSAGE,
            bold().fg(Color::Red),
        ))],
    };
    let explanation = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" BrainBot wyjaśnia... 🤖 "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(explanation, chunks[1]);

    f.render_widget(
        legend("(enter) rozumiem, chcę ćwiczyć! / (esc) inna regułka"),
        chunks[2],
    );
}

fn hint_level_bar(current: HintLevel) -> Line<'static> {
    let mut spans = Vec::new();
    for level in HintLevel::ALL {
        let style = if level == current {
            bold().bg(Color::Yellow).fg(Color::Black)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(format!(" {level} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn progress_spans(practice: &Practice) -> Vec<Span<'static>> {
    let typed_style = bold();
    let error_style = bold().fg(Color::Red);
    let hint_style = Style::default().fg(Color::DarkGray);

    let cells = practice.progress();
    // every typed char yields exactly one cell
    let typed_len = practice.input().chars().count().min(cells.len());

    let mut spans: Vec<Span> = cells
        .iter()
        .map(|cell| match *cell {
            ProgressCell::Typed { ch, error } => {
                Span::styled(ch.to_string(), if error { error_style } else { typed_style })
            }
            ProgressCell::Punctuation(ch) => Span::styled(ch.to_string(), typed_style),
            ProgressCell::Hint(ch) => Span::styled(ch.to_string(), hint_style),
            ProgressCell::Blank => Span::raw(" "),
        })
        .collect();

    spans.insert(
        typed_len,
        Span::styled(CURSOR, bold().fg(Color::Yellow)),
    );
    spans
}

fn render_practice(practice: &Practice, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // heading
            Constraint::Length(1), // hint levels
            Constraint::Length(2), // highlight toggle
            Constraint::Min(3),    // typing area
            Constraint::Length(1), // legend
        ])
        .split(area);

    let heading = Paragraph::new(Span::styled("Czas na praktykę!", bold()))
        .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    f.render_widget(
        Paragraph::new(hint_level_bar(practice.hint_level())).alignment(Alignment::Center),
        chunks[1],
    );

    let toggle = Paragraph::new(Line::from(vec![
        Span::raw("Podświetlaj błędy: "),
        if practice.highlight_errors() {
            Span::styled("WŁ", bold().fg(Color::Yellow))
        } else {
            Span::styled("WYŁ", Style::default().add_modifier(Modifier::DIM))
        },
    ]))
    .alignment(Alignment::Center);
    f.render_widget(toggle, chunks[2]);

    let inner_width = chunks[3].width.saturating_sub(2) as usize;
    let fits_one_line = practice.rule().width().max(practice.input().width()) < inner_width;
    let typing = Paragraph::new(Line::from(progress_spans(practice)))
        .block(Block::default().borders(Borders::ALL))
        .alignment(if fits_one_line {
            // short rules read best centered
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: false });
    f.render_widget(typing, chunks[3]);

    f.render_widget(
        legend("(enter) sprawdź / (tab) podpowiedzi / (ctrl+t) podświetlanie / (esc) od nowa"),
        chunks[4],
    );
}

fn diff_spans(diff: &[WordDiff]) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    for word in diff {
        match word {
            WordDiff::Correct { word } => {
                spans.push(Span::styled(word.as_str(), bold().fg(Color::Green)));
            }
            WordDiff::Incorrect { typed, expected } => {
                let typed = if typed.is_empty() {
                    MASK_GLYPH.to_string()
                } else {
                    typed.clone()
                };
                spans.push(Span::styled(
                    typed,
                    bold().fg(Color::Red).add_modifier(Modifier::CROSSED_OUT),
                ));
                spans.push(Span::styled(
                    format!("({expected})"),
                    Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
                ));
            }
        }
        spans.push(Span::raw(" "));
    }
    spans
}

fn render_results(practice: &Practice, quote: Option<&str>, f: &mut Frame, area: Rect) {
    let Some(result) = practice.result() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // headline
            Constraint::Min(3),    // comparison
            Constraint::Length(2), // stats
            Constraint::Length(2), // quote
            Constraint::Length(1), // legend
        ])
        .split(area);

    let headline = Paragraph::new(Span::styled(practice.headline(), bold()))
        .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    let diff = practice.diff();
    let comparison = Paragraph::new(Line::from(diff_spans(&diff)))
        .block(Block::default().borders(Borders::ALL).title(" Porównanie: "))
        .wrap(Wrap { trim: false });
    f.render_widget(comparison, chunks[1]);

    let stats = Paragraph::new(Line::from(vec![
        Span::styled(format!("{}%", result.accuracy), bold().fg(Color::Green)),
        Span::raw(" Poprawność   "),
        Span::styled(result.points.to_string(), bold().fg(Color::Yellow)),
        Span::raw(" Punktów   "),
        Span::styled(
            format!("{}/{}", result.correct_count, result.total_words),
            bold(),
        ),
        Span::raw(" słów"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(stats, chunks[2]);

    if let Some(quote) = quote {
        let quote = Paragraph::new(Span::styled(
            quote,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(quote, chunks[3]);
    }

    f.render_widget(
        legend("(r) spróbuj jeszcze raz / (n) inna regułka / (esc) wyjście"),
        chunks[4],
    );
}
