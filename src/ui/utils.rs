use ratatui::style::Color;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use textwrap::core::{display_width, Fragment};
use textwrap::wrap_algorithms::wrap_first_fit;
use crate::app::App;
use crate::flow::Screen;
use crate::i18n;

pub fn hex_to_rgb(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::White;
    }
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(255)
    };
    Color::Rgb(channel(0), channel(2), channel(4))
}

/// The middle column every screen draws into.
pub fn content_column(area: Rect, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(80),
            Constraint::Fill(1),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[derive(Debug)]
struct Button(f64);

impl Fragment for Button {
    fn width(&self) -> f64 {
        self.0
    }

    fn whitespace_width(&self) -> f64 {
        1.0
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Splits button labels into rows that fit `width`, keeping each label whole.
/// Returns how many labels go on each row; empty labels count like any other.
pub fn button_rows(labels: &[String], width: usize) -> Vec<usize> {
    let buttons: Vec<Button> = labels
        .iter()
        .map(|l| Button(display_width(l) as f64))
        .collect();
    wrap_first_fit(&buttons, &[width.max(1) as f64])
        .iter()
        .map(|row| row.len())
        .filter(|&n| n > 0)
        .collect()
}

pub fn render_header(f: &mut Frame, app: &App) {
    let sub = Style::default().fg(hex_to_rgb(&app.theme.sub));
    let mut header_spans = vec![Span::styled(
        "senta",
        Style::default()
            .fg(hex_to_rgb(&app.theme.main))
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(name) = app.flow.language_name() {
        header_spans.push(Span::styled(format!(" | {}", name), sub));
    }
    if let Some(session) = app.flow.session() {
        let shown = if session.is_complete() {
            session.pool().len()
        } else {
            session.current_index() + 1
        };
        header_spans.push(Span::styled(
            format!(" | {} | {}/{}", session.group, shown, session.pool().len()),
            sub,
        ));
    }
    let strings = app.strings();
    let sound = if app.sound.enabled { strings.sound_on } else { strings.sound_off };
    header_spans.push(Span::styled(format!(" | {}", sound), sub));

    let header_row_area = Rect::new(0, 1, f.area().width, 1);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(82),
            Constraint::Fill(1),
        ])
        .split(header_row_area);

    f.render_widget(Paragraph::new(Line::from(header_spans)), header_layout[1]);
}

pub fn render_footer(f: &mut Frame, app: &App) {
    let strings = app.strings();
    let hint = match app.flow.screen() {
        Screen::LanguageSelect => strings.keys_language,
        Screen::GroupSelect => strings.keys_group,
        Screen::Playing => strings.keys_playing,
        Screen::Complete => strings.keys_complete,
    };
    if f.area().height == 0 {
        return;
    }
    let footer = Paragraph::new(hint)
        .style(Style::default().fg(hex_to_rgb(&app.theme.sub_alt)))
        .alignment(Alignment::Center);
    f.render_widget(footer, Rect::new(0, f.area().height - 1, f.area().width, 1));
}

/// Error or fallback message, one line above the footer.
pub fn render_notice(f: &mut Frame, app: &App) {
    let Some(notice) = app.flow.notice() else {
        return;
    };
    if f.area().height < 3 {
        return;
    }
    let text = i18n::notice(app.strings(), notice);
    let line = Paragraph::new(text)
        .style(Style::default().fg(hex_to_rgb(&app.theme.error)))
        .alignment(Alignment::Center);
    f.render_widget(line, Rect::new(0, f.area().height - 3, f.area().width, 1));
}
