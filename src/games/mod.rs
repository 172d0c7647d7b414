pub mod flappy;
pub mod platformer;

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

use crate::audio::SoundCue;

pub trait Game {
    /// One logic step. `elapsed` is wall time since the previous frame.
    fn update(&mut self, elapsed: Duration);
    fn handle_input(&mut self, key: KeyEvent);
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn reset(&mut self);
    /// Called when the game's tab loses focus. Releases for keys held at
    /// that moment go to another tab, so held input must be dropped here.
    fn on_leave(&mut self) {}
    fn hud(&self) -> Hud<'_>;
    /// Cues raised since the last call, oldest first.
    fn drain_cues(&mut self) -> Vec<SoundCue>;
}

/// What the status line shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud<'a> {
    pub score: u32,
    pub best: u32,
    pub enemies_alive: Option<usize>,
    pub message: Option<&'a str>,
    /// Frames until `message` expires. `None` for prompts that stay up.
    pub message_ticks: Option<u32>,
}

/// Transient on-screen text, counted down once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub ticks_left: u32,
}

impl Message {
    /// Frames per second the durations are written against.
    const FPS: f32 = 60.0;

    pub fn new(text: impl Into<String>, secs: f32) -> Self {
        Self {
            text: text.into(),
            ticks_left: (secs * Self::FPS).round() as u32,
        }
    }

    /// Returns false once the message has expired.
    pub fn tick(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires() {
        let mut msg = Message::new("hi", 0.05);
        assert_eq!(msg.ticks_left, 3);
        assert!(msg.tick());
        assert!(msg.tick());
        assert!(!msg.tick());
    }
}
