use crate::app::{App, Focus};
use crate::flow::Feedback;
use crate::puzzle::Verdict;
use crate::ui::utils::{button_rows, content_column, hex_to_rgb};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Lays styled labels out in rows that fit `width`.
fn flow_lines(labels: Vec<(String, Style)>, width: usize) -> Vec<Line<'static>> {
    let text: Vec<String> = labels.iter().map(|(l, _)| l.clone()).collect();
    let mut items = labels.into_iter();
    button_rows(&text, width)
        .into_iter()
        .map(|count| {
            let mut spans = Vec::with_capacity(count * 2);
            for (i, (label, style)) in items.by_ref().take(count).enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(label, style));
            }
            Line::from(spans)
        })
        .collect()
}

pub fn draw(f: &mut Frame, app: &App) {
    let Some(round) = app.flow.round() else {
        return;
    };
    let strings = app.strings();

    let area = content_column(f.area(), 14);
    let width = area.width as usize;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(3), // answer
            Constraint::Length(1), // divider
            Constraint::Length(4), // word buttons
            Constraint::Length(1),
            Constraint::Length(2), // feedback
            Constraint::Length(1), // next / finish
        ])
        .split(area);

    let main = hex_to_rgb(&app.theme.main);
    let text = hex_to_rgb(&app.theme.text);
    let sub = hex_to_rgb(&app.theme.sub);
    let bg = hex_to_rgb(&app.theme.bg);

    f.render_widget(
        Paragraph::new(strings.make_sentence)
            .alignment(Alignment::Left)
            .style(Style::default().fg(main).add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    let answer_color = match app.flow.verdict() {
        Some(Verdict::Correct) => hex_to_rgb(&app.theme.success),
        Some(Verdict::Incorrect) => hex_to_rgb(&app.theme.error),
        None => text,
    };
    let answer_labels: Vec<(String, Style)> = round
        .answer()
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let style = if app.focus == Focus::Answer && i == app.answer_cursor {
                Style::default().bg(main).fg(bg)
            } else {
                Style::default().fg(answer_color).add_modifier(Modifier::UNDERLINED)
            };
            let label = if w.is_empty() { "\u{2423}".to_string() } else { w.clone() };
            (label, style)
        })
        .collect();
    f.render_widget(Paragraph::new(flow_lines(answer_labels, width)), chunks[2]);

    f.render_widget(
        Paragraph::new("─".repeat(width)).style(Style::default().fg(hex_to_rgb(&app.theme.sub_alt))),
        chunks[3],
    );

    let enabled = round.availability();
    let word_labels: Vec<(String, Style)> = round
        .shuffled_words()
        .iter()
        .zip(enabled)
        .enumerate()
        .map(|(i, (w, on))| {
            let focused = app.focus == Focus::Words && i == app.word_cursor;
            let style = match (focused, on) {
                (true, true) => Style::default().bg(main).fg(bg).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().bg(sub).fg(bg),
                (false, true) => Style::default().fg(text),
                (false, false) => Style::default().fg(sub).add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
            };
            (format!("[{}]", w), style)
        })
        .collect();
    f.render_widget(Paragraph::new(flow_lines(word_labels, width)), chunks[4]);

    let feedback: Option<(String, Color)> = match app.flow.feedback() {
        Feedback::None => None,
        Feedback::Correct => Some((strings.correct.to_string(), hex_to_rgb(&app.theme.success))),
        Feedback::Incorrect => Some((strings.incorrect.to_string(), hex_to_rgb(&app.theme.error))),
        Feedback::Answer(sentence) => Some((format!("{} \"{}\"", strings.answer_prefix, sentence), main)),
    };
    if let Some((message, color)) = feedback {
        f.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true }),
            chunks[6],
        );
    }

    let action = if app.flow.can_advance() {
        Some(strings.next)
    } else if app.flow.can_finish() {
        Some(strings.finish)
    } else {
        None
    };
    if let Some(action) = action {
        f.render_widget(
            Paragraph::new(action)
                .alignment(Alignment::Right)
                .style(Style::default().fg(main).add_modifier(Modifier::BOLD)),
            chunks[7],
        );
    }
}
