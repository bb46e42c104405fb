use crate::app::App;
use crate::i18n;
use crate::ui::utils::{content_column, hex_to_rgb};
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let strings = app.strings();
    let area = content_column(f.area(), 9);
    let count = app.flow.session().map_or(0, |s| s.pool().len());

    let main = Style::default().fg(hex_to_rgb(&app.theme.main));
    let text = Style::default().fg(hex_to_rgb(&app.theme.text));
    let sub = Style::default().fg(hex_to_rgb(&app.theme.sub));

    let lines = vec![
        Line::from(Span::styled(strings.congratulations, main.add_modifier(Modifier::BOLD))),
        Line::default(),
        Line::from(Span::styled(strings.great_job, text.add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(i18n::completed(strings, count), text)),
        Line::default(),
        Line::from(Span::styled(
            format!("{}% · ★ {}", app.stats.accuracy(), app.stats.best_streak),
            sub,
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(hex_to_rgb(&app.theme.sub_alt)));

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
