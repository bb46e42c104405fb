use crate::app::App;
use crate::i18n;
use crate::models::RANDOM_GROUP;
use crate::ui::utils::{content_column, hex_to_rgb};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw_languages(f: &mut Frame, app: &App) {
    let items: Vec<String> = app
        .languages
        .iter()
        .map(|code| format!("{}  ({})", i18n::language_name(code), code))
        .collect();
    draw_list(f, app, app.strings().choose_language, &items, app.language_cursor);
}

pub fn draw_groups(f: &mut Frame, app: &App) {
    let strings = app.strings();
    let items: Vec<String> = app
        .group_options()
        .into_iter()
        .map(|g| {
            let label = match g.description {
                Some(d) => d,
                None if g.key == RANDOM_GROUP => strings.random.to_string(),
                None => g.key,
            };
            format!("{}  · {} {}", label, g.count, strings.sentences)
        })
        .collect();
    draw_list(f, app, strings.choose_group, &items, app.group_cursor);
}

fn draw_list(f: &mut Frame, app: &App, title: &str, items: &[String], cursor: usize) {
    let height = (items.len() as u16).saturating_add(2);
    let area = content_column(f.area(), height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    f.render_widget(
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(hex_to_rgb(&app.theme.main))
                    .add_modifier(Modifier::BOLD),
            ),
        chunks[0],
    );

    let text = hex_to_rgb(&app.theme.text);
    let sub = hex_to_rgb(&app.theme.sub);
    let main = hex_to_rgb(&app.theme.main);

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == cursor {
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(main)),
                    Span::styled(item.clone(), Style::default().fg(text).add_modifier(Modifier::BOLD)),
                ])
            } else {
                Line::from(vec![Span::raw("  "), Span::styled(item.clone(), Style::default().fg(sub))])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[2]);
}
