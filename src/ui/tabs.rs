use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};
use crate::games::Game;

const ACCENT: Color = Color::Rgb(255, 220, 80);

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(120, 120, 140))
            };
            Line::from(Span::styled(t.title(), style))
        })
        .collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .border_type(BorderType::Rounded)
        .title(" 🕹 Duocade ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );

    // Live score of the game on screen, top right.
    let hud = match app.current_tab {
        Tab::Home => None,
        Tab::Platformer => Some(app.platformer.hud()),
        Tab::Flappy => Some(app.flappy.hud()),
    };
    if let Some(hud) = hud {
        let status = format!(" {} / best {} ", hud.score, hud.best);
        block = block.title(Line::styled(status, Style::default().fg(ACCENT)).right_aligned());
    }

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
