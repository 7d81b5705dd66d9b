use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use typesprint::{app::App, scoring::WordClass, session::Phase};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(AppView(app), f.area());
}

/// Renders whichever screen the app state calls for
pub struct AppView<'a>(pub &'a App);

impl Widget for AppView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.0;
        if !app.is_ready() {
            render_unavailable(app, area, buf);
            return;
        }

        match app.session().phase() {
            Phase::Idle | Phase::Running => render_typing(app, area, buf),
            Phase::Finished => render_results(app, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

fn legend_style() -> Style {
    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)
}

fn word_style(class: Option<WordClass>) -> Style {
    match class {
        Some(WordClass::Correct) => bold().fg(Color::Green),
        Some(WordClass::Incorrect) => bold().fg(Color::Red),
        Some(WordClass::Current) => bold().add_modifier(Modifier::UNDERLINED),
        None => dim_bold(),
    }
}

fn render_unavailable(app: &App, area: Rect, buf: &mut Buffer) {
    let reason = app.load_error().unwrap_or("the passage is empty");
    let lines = vec![
        Line::from(Span::styled(
            format!("word list unavailable: {reason}"),
            bold().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled("(esc)ape", legend_style())),
    ];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(lines.len() as u16),
            Constraint::Fill(1),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = app.session();
    let passage = app.passage();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let passage_width = passage.text().width();
    let passage_lines = if passage_width <= max_chars_per_line as usize {
        1
    } else {
        ((passage_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(2),              // timer
            Constraint::Length(passage_lines),  // passage
            Constraint::Length(1),              // current word
            Constraint::Length(1),              // input
            Constraint::Length(1),              // live stats
            Constraint::Fill(1),
            Constraint::Length(1),              // legend
        ])
        .split(area);

    let timer_text = if session.has_started() {
        session.remaining_secs().to_string()
    } else {
        format!("{}  start typing", session.remaining_secs())
    };
    Paragraph::new(Span::styled(timer_text, dim_bold()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let mut spans = Vec::with_capacity(passage.len() * 2);
    for (idx, (word, class)) in passage.words().iter().zip(app.word_classes()).enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(word.as_str(), word_style(class)));
    }

    Paragraph::new(Line::from(spans))
        .alignment(if passage_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(app.current_word(), legend_style()))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    let input_line = Line::from(vec![
        Span::styled("> ", dim_bold()),
        Span::styled(
            tail_to_width(session.input(), max_chars_per_line.saturating_sub(3) as usize),
            bold(),
        ),
        Span::styled("_", bold().add_modifier(Modifier::SLOW_BLINK)),
    ]);
    Paragraph::new(input_line).render(chunks[4], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} mistakes   {}% acc   {} chars",
            session.mistakes(),
            session.accuracy(),
            session.total_typed()
        ),
        dim_bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);

    Paragraph::new(Span::styled("(tab) new passage   (esc)ape", legend_style()))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1), // headline
            Constraint::Length(1), // details
            Constraint::Fill(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let (headline, details) = match app.results() {
        Some(r) => (
            format!("{} wpm   {}% acc", r.wpm, r.accuracy),
            format!(
                "{} correct words   {} mistakes   {} chars in {:.1}s",
                r.correct_words,
                r.mistakes,
                r.total_typed,
                r.elapsed.as_secs_f64()
            ),
        ),
        None => ("time is up".to_string(), String::new()),
    };

    Paragraph::new(Span::styled(headline, bold()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(details, dim_bold()))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(r)etry   (n)ew   (esc)ape",
        legend_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}

/// Longest suffix of `s` that fits in `width` columns.
fn tail_to_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = s.len();

    for (idx, c) in s.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            break;
        }
        start = idx;
    }

    &s[start..]
}
