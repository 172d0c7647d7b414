use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::audio::{sink_for, AudioSink};
use crate::config::ArcadeConfig;
use crate::games::flappy::Flappy;
use crate::games::platformer::Platformer;
use crate::games::Game;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Home,
    Platformer,
    Flappy,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Platformer, Tab::Flappy]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Platformer => " Platformer ",
            Tab::Flappy => " Flappy ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Platformer => 1,
            Tab::Flappy => 2,
        }
    }

    /// Game tiles on the home screen, in selection order.
    pub fn games() -> &'static [Tab] {
        &[Tab::Platformer, Tab::Flappy]
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    /// Highlighted tile on the home screen.
    pub selected_game: usize,
    pub show_bests: bool,
    /// Cues are still drained while muted, just not played.
    pub muted: bool,
    pub platformer: Platformer,
    pub flappy: Flappy,
    audio: Box<dyn AudioSink>,
}

impl App {
    pub fn new(config: ArcadeConfig, seed: u64) -> Self {
        let audio = sink_for(config.audio);
        Self::with_audio(config, seed, audio)
    }

    pub fn with_audio(config: ArcadeConfig, seed: u64, audio: Box<dyn AudioSink>) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            show_bests: false,
            muted: false,
            platformer: Platformer::new(config.platformer, seed),
            flappy: Flappy::new(config.flappy, seed.wrapping_add(1)),
            audio,
        }
    }

    pub fn active_game(&mut self) -> Option<&mut dyn Game> {
        match self.current_tab {
            Tab::Home => None,
            Tab::Platformer => Some(&mut self.platformer),
            Tab::Flappy => Some(&mut self.flappy),
        }
    }

    /// Advance the visible game by one frame and play whatever it raised.
    pub fn on_frame(&mut self, elapsed: Duration) {
        let Some(game) = self.active_game() else {
            return;
        };
        game.update(elapsed);
        let cues = game.drain_cues();
        if self.muted {
            return;
        }
        for cue in cues {
            self.audio.play(cue);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Releases only matter to held movement keys.
        if key.kind == KeyEventKind::Release {
            if let Some(game) = self.active_game() {
                game.handle_input(key);
            }
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if self.current_tab == Tab::Home {
                    self.should_quit = true;
                    return;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.muted = !self.muted;
                log::info!("audio {}", if self.muted { "muted" } else { "unmuted" });
                return;
            }
            KeyCode::Esc => {
                if self.current_tab != Tab::Home {
                    self.switch_to(Tab::Home);
                    return;
                }
            }
            _ => {}
        }

        if self.current_tab == Tab::Home && key.modifiers.is_empty() {
            let count = Tab::games().len();
            match key.code {
                KeyCode::Char('1') => self.switch_to(Tab::Platformer),
                KeyCode::Char('2') => self.switch_to(Tab::Flappy),
                KeyCode::Char('h') | KeyCode::Char('H') => self.show_bests = !self.show_bests,
                KeyCode::Right | KeyCode::Down => {
                    self.selected_game = (self.selected_game + 1) % count;
                }
                KeyCode::Left | KeyCode::Up => {
                    self.selected_game = (self.selected_game + count - 1) % count;
                }
                KeyCode::Enter => {
                    let tab = Tab::games()[self.selected_game % count];
                    self.switch_to(tab);
                }
                _ => {}
            }
            return;
        }

        if let Some(game) = self.active_game() {
            game.handle_input(key);
        }
    }

    fn switch_to(&mut self, tab: Tab) {
        log::debug!("tab {:?} -> {:?}", self.current_tab, tab);
        if let Some(game) = self.active_game() {
            game.on_leave();
        }
        self.current_tab = tab;
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}
