pub mod home;
pub mod tabs;

use ratatui::prelude::*;

use crate::app::{App, Tab};
use crate::games::Game;
use home::SessionBests;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match app.current_tab {
        Tab::Home => {
            let bests = SessionBests {
                platformer: app.platformer.hud().best,
                flappy: app.flappy.hud().best,
            };
            home::render_home(frame, chunks[1], app.selected_game, app.show_bests, bests);
        }
        Tab::Platformer => app.platformer.render(frame, chunks[1]),
        Tab::Flappy => app.flappy.render(frame, chunks[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArcadeConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_every_tab_renders() {
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        let mut app = App::new(ArcadeConfig::default(), 3);

        for _ in Tab::all() {
            app.on_frame(std::time::Duration::from_millis(16));
            terminal.draw(|frame| render(frame, &mut app)).unwrap();
            app.on_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        }
        assert_eq!(app.current_tab, Tab::Home);
    }

    #[test]
    fn test_home_lists_both_games() {
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        let mut app = App::new(ArcadeConfig::default(), 3);
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Platformer"));
        assert!(text.contains("Flappy"));
    }
}
