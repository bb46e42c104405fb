pub mod complete;
pub mod menu;
pub mod puzzle;
pub mod utils;

use crate::app::App;
use crate::flow::Screen;
use crate::ui::utils::{hex_to_rgb, render_footer, render_header, render_notice};
use ratatui::{
    style::Style,
    widgets::Block,
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let bg_color = hex_to_rgb(&app.theme.bg);
    f.render_widget(
        Block::default().style(Style::default().bg(bg_color)),
        f.area(),
    );

    render_header(f, app);
    match app.flow.screen() {
        Screen::LanguageSelect => menu::draw_languages(f, app),
        Screen::GroupSelect => menu::draw_groups(f, app),
        Screen::Playing => puzzle::draw(f, app),
        Screen::Complete => complete::draw(f, app),
    }
    render_notice(f, app);
    render_footer(f, app);
}
