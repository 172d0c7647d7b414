use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Jump,
    FlapOrRestart,
}

const INTENT_COUNT: usize = 4;

impl Intent {
    fn index(self) -> usize {
        match self {
            Intent::MoveLeft => 0,
            Intent::MoveRight => 1,
            Intent::Jump => 2,
            Intent::FlapOrRestart => 3,
        }
    }
}

/// Platformer key bindings.
pub fn platformer_intent(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => {
            Some(Intent::Jump)
        }
        _ => None,
    }
}

/// Flappy key bindings.
pub fn flappy_intent(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Intent::FlapOrRestart)
        }
        _ => None,
    }
}

/// Boolean intents the simulation reads each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Intents {
    /// -1, 0 or 1 along x.
    pub fn horizontal(&self) -> f32 {
        let mut dir = 0.0;
        if self.left {
            dir -= 1.0;
        }
        if self.right {
            dir += 1.0;
        }
        dir
    }
}

/// A press keeps its intent held for `hold_ticks` frames. Once the terminal
/// has reported a release, presses hold until the matching release instead.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    ticks: [u32; INTENT_COUNT],
    hold_ticks: u32,
    release_events: bool,
}

impl HeldKeys {
    pub fn new(hold_ticks: u32) -> Self {
        Self {
            ticks: [0; INTENT_COUNT],
            hold_ticks,
            release_events: false,
        }
    }

    /// Feed a key event already mapped to an intent.
    pub fn apply(&mut self, intent: Intent, kind: KeyEventKind) {
        let slot = &mut self.ticks[intent.index()];
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                *slot = if self.release_events { u32::MAX } else { self.hold_ticks };
            }
            KeyEventKind::Release => {
                self.release_events = true;
                *slot = 0;
            }
        }
    }

    /// Map and feed a raw key event. Returns the intent it touched.
    pub fn handle(&mut self, key: &KeyEvent, map: fn(KeyCode) -> Option<Intent>) -> Option<Intent> {
        let intent = map(key.code)?;
        self.apply(intent, key.kind);
        Some(intent)
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        self.ticks[intent.index()] > 0
    }

    pub fn intents(&self) -> Intents {
        Intents {
            left: self.is_held(Intent::MoveLeft),
            right: self.is_held(Intent::MoveRight),
            jump: self.is_held(Intent::Jump),
        }
    }

    /// Count holds down by one frame.
    pub fn tick(&mut self) {
        if self.release_events {
            return;
        }
        for t in &mut self.ticks {
            *t = t.saturating_sub(1);
        }
    }

    pub fn clear(&mut self) {
        self.ticks = [0; INTENT_COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        let mut ev = KeyEvent::new(code, KeyModifiers::NONE);
        ev.kind = kind;
        ev
    }

    #[test]
    fn test_press_holds_for_configured_ticks() {
        let mut keys = HeldKeys::new(3);
        keys.handle(&key(KeyCode::Left, KeyEventKind::Press), platformer_intent);
        for _ in 0..2 {
            keys.tick();
            assert!(keys.intents().left);
        }
        keys.tick();
        assert!(!keys.intents().left);
    }

    #[test]
    fn test_release_mode_holds_until_release() {
        let mut keys = HeldKeys::new(3);
        // A release switches to release-driven holds.
        keys.handle(&key(KeyCode::Right, KeyEventKind::Release), platformer_intent);
        keys.handle(&key(KeyCode::Right, KeyEventKind::Press), platformer_intent);
        for _ in 0..100 {
            keys.tick();
        }
        assert!(keys.intents().right);
        keys.handle(&key(KeyCode::Right, KeyEventKind::Release), platformer_intent);
        assert!(!keys.intents().right);
    }

    #[test]
    fn test_horizontal_cancels_out() {
        let both = Intents { left: true, right: true, jump: false };
        assert_eq!(both.horizontal(), 0.0);
        let left = Intents { left: true, ..Default::default() };
        assert_eq!(left.horizontal(), -1.0);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut keys = HeldKeys::new(3);
        assert_eq!(keys.handle(&key(KeyCode::Char('x'), KeyEventKind::Press), platformer_intent), None);
        assert_eq!(keys.intents(), Intents::default());
    }
}
