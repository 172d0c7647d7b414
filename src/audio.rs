use std::io::{self, Write};

use crate::config::AudioMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Bird flapped
    Flap,
    /// Pipe passed or enemy stomped
    Score,
    /// Bird crashed or player took damage
    Hit,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Flap => "flap",
            SoundCue::Score => "score",
            SoundCue::Hit => "hit",
        }
    }
}

/// Decides what, if anything, a cue sounds like. Failures never reach the game.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, cue: SoundCue) {
        log::trace!("cue {} (silent)", cue.name());
    }
}

/// Rings the terminal bell for scores and hits. Flaps are too frequent to beep.
pub struct Bell<W: Write> {
    out: W,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioSink for Bell<W> {
    fn play(&mut self, cue: SoundCue) {
        if cue == SoundCue::Flap {
            return;
        }
        let res = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(e) = res {
            log::trace!("bell for {} failed: {}", cue.name(), e);
        }
    }
}

pub fn sink_for(mode: AudioMode) -> Box<dyn AudioSink> {
    match mode {
        AudioMode::Off => Box::new(Silent),
        AudioMode::Bell => Box::new(Bell::new(io::stdout())),
    }
}
