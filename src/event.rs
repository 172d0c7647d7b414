use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
    /// Time to draw the next frame.
    Tick(Instant),
}

/// Polls the terminal on a background thread and forwards keys and frame
/// ticks over a channel. All game state stays on the receiving thread.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || {
            let mut next_tick = Instant::now() + tick_rate;
            loop {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                if event::poll(timeout).unwrap_or(false) {
                    // Presses, repeats and (where reported) releases all matter
                    // for held movement keys.
                    if let Ok(event::Event::Key(key)) = event::read() {
                        if tx.send(Event::Key(key)).is_err() {
                            return;
                        }
                    }
                }
                let now = Instant::now();
                if now >= next_tick {
                    next_tick = now + tick_rate;
                    if tx.send(Event::Tick(now)).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}
