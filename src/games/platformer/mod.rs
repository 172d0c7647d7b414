pub mod enemy;
pub mod player;
pub mod world;

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::*;

use crate::audio::SoundCue;
use crate::config::PlatformerConfig;
use crate::games::{Game, Hud, Message};
use crate::input::{platformer_intent, HeldKeys, Intents};
use crate::physics::{circles_overlap, Aabb, Entity};
use crate::render::{CanvasSurface, Surface, View};

use enemy::Enemy;
use player::Player;
use world::generate_platforms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    Paused,
    /// Logic frozen until the scheduled reset fires.
    Won,
}

pub struct Platformer {
    config: PlatformerConfig,
    rng: StdRng,
    platforms: Vec<Aabb>,
    player: Player,
    enemies: Vec<Enemy>,
    keys: HeldKeys,
    mode: Mode,
    message: Option<Message>,
    reset_in: Option<Duration>,
    camera_x: f32,
    best: u32,
    cues: Vec<SoundCue>,
}

impl Platformer {
    pub fn new(config: PlatformerConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let platforms = generate_platforms(&config, &mut rng);
        let enemies = (0..config.enemy_count)
            .map(|_| Enemy::spawn(&platforms, &config, &mut rng))
            .collect();
        Self {
            player: Player::new(&config),
            keys: HeldKeys::new(config.hold_ticks),
            platforms,
            enemies,
            rng,
            mode: Mode::Running,
            message: None,
            reset_in: None,
            camera_x: 0.0,
            best: 0,
            cues: Vec::new(),
            config,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Movement intents currently held.
    pub fn held(&self) -> Intents {
        self.keys.intents()
    }

    fn flash(&mut self, text: &str, secs: f32) {
        self.message = Some(Message::new(text, secs));
    }

    /// One logic step while running.
    fn step(&mut self) {
        let input = self.keys.intents();
        let was_alive = self.player.alive;
        self.player.update(input, &self.platforms, &self.config);
        if was_alive && !self.player.alive {
            self.cues.push(SoundCue::Hit);
        }
        if self.player.tick_respawn(&self.config) {
            log::debug!("player respawned");
        }

        for enemy in &mut self.enemies {
            enemy.update();
        }

        self.resolve_enemy_contacts();

        if self.player.score >= self.config.win_score && self.message.is_none() {
            log::info!("platformer won with score {}", self.player.score);
            self.mode = Mode::Won;
            self.flash("You win! 🎉", self.config.win_reset_secs);
            let delay = Duration::try_from_secs_f32(self.config.win_reset_secs).unwrap_or_default();
            self.reset_in = Some(delay);
        }
    }

    /// Player against every live enemy. Skipped entirely while invulnerable.
    fn resolve_enemy_contacts(&mut self) {
        if !self.player.alive || self.player.is_invulnerable() {
            return;
        }

        let config = &self.config;
        for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
            if !circles_overlap(
                self.player.position(),
                self.player.radius(),
                enemy.position(),
                enemy.radius(),
                config.stomp_margin,
            ) {
                continue;
            }

            let falling = self.player.body.vel.y > config.stomp_min_fall;
            let above = self.player.body.pos.y < enemy.body.pos.y;
            if falling && above {
                if enemy.hit(config) {
                    self.player.body.vel.y = -config.jump_velocity * config.stomp_bounce;
                    self.player.score += 1;
                    self.best = self.best.max(self.player.score);
                    self.message = Some(Message::new("+1! Enemy defeated!", 1.1));
                    self.cues.push(SoundCue::Score);
                }
            } else {
                log::debug!("player hit by enemy at x={:.0}", enemy.body.pos.x);
                self.player.die(config);
                self.message = Some(Message::new("Ouch! Respawn...", 1.5));
                self.cues.push(SoundCue::Hit);
                break;
            }
        }
    }

    fn update_camera(&mut self) {
        let max_cam = (self.config.world_width - self.config.view_width).max(0.0);
        let target = (self.player.body.pos.x - self.config.view_width / 2.0).clamp(0.0, max_cam);
        self.camera_x += (target - self.camera_x) * self.config.camera_smoothing;
    }

    fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    fn view(&self) -> View {
        View {
            camera_x: self.camera_x,
            width: self.config.view_width,
            height: self.config.view_height,
        }
    }

    fn draw(&self, s: &mut dyn Surface) {
        for plat in &self.platforms {
            s.rect(*plat, Color::Rgb(200, 150, 90));
        }

        for enemy in self.enemies.iter().filter(|e| e.alive) {
            let c = enemy.position();
            let r = enemy.radius();
            s.circle(c, r, Color::Rgb(230, 70, 70));
            s.circle(c, r * 1.3, Color::Rgb(150, 40, 40));
            let eye = c + Vec2::new(enemy.direction() * r * 0.4, -r * 0.3);
            s.line(eye, eye + Vec2::new(enemy.direction() * 3.0, 0.0), Color::White);
        }

        let p = &self.player;
        // Blink while invulnerable.
        let blink_off = p.is_invulnerable() && (p.invuln / 2) % 2 == 0;
        if p.alive && !blink_off {
            let c = p.position();
            let r = p.radius();
            s.circle(c, r, Color::Rgb(120, 220, 140));
            s.line(c, c + Vec2::new(p.facing * r, 0.0), Color::Rgb(200, 255, 200));
        }

        if let Some(msg) = &self.message {
            let at = Vec2::new(
                self.camera_x + self.config.view_width / 2.0 - msg.text.len() as f32 * 4.0,
                60.0,
            );
            s.text(at, &msg.text, Color::Rgb(255, 220, 80));
        }
    }
}

impl Game for Platformer {
    fn update(&mut self, elapsed: Duration) {
        match self.mode {
            Mode::Running => self.step(),
            Mode::Paused => {}
            Mode::Won => {
                let left = self.reset_in.unwrap_or_default().saturating_sub(elapsed);
                if left.is_zero() {
                    self.reset();
                    return;
                }
                self.reset_in = Some(left);
            }
        }

        self.update_camera();
        if self.message.as_mut().is_some_and(|m| !m.tick()) {
            self.message = None;
        }
        self.keys.tick();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Release {
            match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.reset();
                    return;
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.mode = match self.mode {
                        Mode::Running => Mode::Paused,
                        Mode::Paused => Mode::Running,
                        Mode::Won => Mode::Won,
                    };
                    self.keys.clear();
                    return;
                }
                _ => {}
            }
        }
        if self.mode == Mode::Running {
            self.keys.handle(&key, platformer_intent);
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(120, 200, 120)))
            .title(" 🏃 Platformer ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(150, 240, 150))
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Min(8),    // Game field
                Constraint::Length(1), // Help
            ])
            .split(inner);

        let hud = self.hud();
        let status = Line::from(vec![
            Span::styled(
                format!(" Score: {} ", hud.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("🏆 Best: {} ", hud.best), Style::default().fg(Color::Cyan)),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Enemies: {} ", hud.enemies_alive.unwrap_or(0)),
                Style::default().fg(Color::Rgb(230, 90, 90)),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let view = self.view();
        let this = &*self;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(Color::Rgb(20, 30, 55))
            .x_bounds(view.x_bounds())
            .y_bounds(view.y_bounds())
            .paint(move |ctx| {
                let mut surface = CanvasSurface::new(ctx, view);
                this.draw(&mut surface);
            });
        frame.render_widget(canvas, chunks[1]);

        let help = match self.mode {
            Mode::Paused => Line::from(Span::styled(
                " ⏸ PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Mode::Won => Line::from(Span::styled(
                " 🎉 Level cleared! A new level starts shortly ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Mode::Running => Line::from(Span::styled(
                " ←/→ Move │ SPACE/↑ Jump │ Land on enemies to defeat them │ P Pause │ R Restart │ Esc Menu",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(help), chunks[2]);
    }

    fn reset(&mut self) {
        log::debug!("platformer reset");
        self.platforms = generate_platforms(&self.config, &mut self.rng);
        self.enemies = (0..self.config.enemy_count)
            .map(|_| Enemy::spawn(&self.platforms, &self.config, &mut self.rng))
            .collect();
        self.player = Player::new(&self.config);
        self.keys.clear();
        self.mode = Mode::Running;
        self.message = None;
        self.reset_in = None;
        self.camera_x = 0.0;
        self.cues.clear();
    }

    fn on_leave(&mut self) {
        self.keys.clear();
    }

    fn hud(&self) -> Hud<'_> {
        Hud {
            score: self.player.score,
            best: self.best,
            enemies_alive: Some(self.enemies_alive()),
            message: self.message.as_ref().map(|m| m.text.as_str()),
            message_ticks: self.message.as_ref().map(|m| m.ticks_left),
        }
    }

    fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Body;
    use crate::render::RecordingSurface;
    use crossterm::event::KeyModifiers;

    const FRAME: Duration = Duration::from_millis(16);

    /// A game with no platforms and a single stationary enemy.
    fn arena(enemy_at: Vec2) -> Platformer {
        let mut game = Platformer::new(PlatformerConfig::default(), 1);
        game.platforms.clear();
        let platform = Aabb::new(enemy_at.x - 100.0, enemy_at.y + 23.0, 200.0, 18.0);
        game.enemies = vec![Enemy {
            body: Body::new(enemy_at, 23.0),
            platform,
            alive: true,
            hit_cooldown: 0,
        }];
        game
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_game_layout() {
        let game = Platformer::new(PlatformerConfig::default(), 42);
        assert_eq!(game.platforms.len(), 13);
        assert_eq!(game.enemies.len(), 3);
        assert_eq!(game.hud().enemies_alive, Some(3));
        assert_eq!(game.mode(), Mode::Running);
    }

    #[test]
    fn test_stomp_scores_exactly_once() {
        let mut game = arena(Vec2::new(500.0, 340.0));
        game.player.body.pos = Vec2::new(500.0, 300.0);
        game.player.body.vel.y = 5.0;

        game.update(FRAME);
        assert_eq!(game.player.score, 1);
        assert!(!game.enemies[0].alive);
        assert_eq!(game.player.body.vel.y, -11.0 * 0.7);
        assert_eq!(game.hud().message, Some("+1! Enemy defeated!"));
        // 1.1 s at 60 frames per second, one frame already spent.
        assert_eq!(game.hud().message_ticks, Some(65));
        assert_eq!(game.drain_cues(), vec![SoundCue::Score]);

        // Still overlapping the corpse next frame: no second point.
        game.player.body.pos = Vec2::new(500.0, 300.0);
        game.player.body.vel.y = 5.0;
        game.update(FRAME);
        assert_eq!(game.player.score, 1);
        assert_eq!(game.hud().best, 1);
    }

    #[test]
    fn test_side_contact_kills_player() {
        let mut game = arena(Vec2::new(530.0, 340.0));
        game.player.body.pos = Vec2::new(500.0, 340.0);

        game.update(FRAME);
        assert!(!game.player.alive);
        assert!(game.enemies[0].alive);
        assert_eq!(game.hud().message, Some("Ouch! Respawn..."));
        assert_eq!(game.drain_cues(), vec![SoundCue::Hit]);
    }

    #[test]
    fn test_rising_player_from_below_dies() {
        let mut game = arena(Vec2::new(500.0, 340.0));
        game.player.body.pos = Vec2::new(500.0, 370.0);
        game.player.body.vel.y = -6.0;

        game.update(FRAME);
        assert!(!game.player.alive);
        assert_eq!(game.player.score, 0);
    }

    #[test]
    fn test_invulnerable_player_ignores_contact() {
        let mut game = arena(Vec2::new(500.0, 340.0));
        game.player.body.pos = Vec2::new(500.0, 340.0);
        game.player.invuln = 10;

        game.update(FRAME);
        assert!(game.player.alive);
        assert!(game.enemies[0].alive);
        assert_eq!(game.player.score, 0);
        assert!(game.drain_cues().is_empty());
    }

    #[test]
    fn test_dead_player_respawns_after_timer() {
        let mut game = arena(Vec2::new(2000.0, 100.0));
        game.player.die(&game.config);
        for _ in 0..game.config.respawn_ticks {
            game.update(FRAME);
        }
        assert!(game.player.alive);
        assert_eq!(game.player.body.pos, game.config.spawn_point);
        assert!(game.player.is_invulnerable());
    }

    #[test]
    fn test_win_freezes_then_resets_keeping_best() {
        let mut game = arena(Vec2::new(2000.0, 100.0));
        game.player.score = 3;
        game.best = 3;

        game.update(FRAME);
        assert_eq!(game.mode(), Mode::Won);
        let frozen = game.player.body;
        game.update(FRAME);
        assert_eq!(game.player.body, frozen);

        game.update(Duration::from_secs(3));
        assert_eq!(game.mode(), Mode::Running);
        assert_eq!(game.hud().score, 0);
        assert_eq!(game.hud().best, 3);
        assert_eq!(game.enemies.len(), 3);
    }

    #[test]
    fn test_unusable_win_delay_resets_on_next_frame() {
        let config = PlatformerConfig { win_reset_secs: -1.0, ..PlatformerConfig::default() };
        let mut game = Platformer::new(config, 4);
        game.player.score = 3;

        game.update(FRAME);
        assert_eq!(game.mode(), Mode::Won);
        assert_eq!(game.reset_in, Some(Duration::ZERO));
        game.update(FRAME);
        assert_eq!(game.mode(), Mode::Running);
        assert_eq!(game.hud().score, 0);
    }

    #[test]
    fn test_win_waits_for_message_to_clear() {
        let mut game = arena(Vec2::new(2000.0, 100.0));
        game.player.score = 3;
        game.flash("+1! Enemy defeated!", 1.1);

        game.update(FRAME);
        assert_eq!(game.mode(), Mode::Running);
        for _ in 0..70 {
            game.update(FRAME);
        }
        assert_eq!(game.mode(), Mode::Won);
    }

    #[test]
    fn test_pause_toggles_and_freezes() {
        let mut game = arena(Vec2::new(2000.0, 100.0));
        game.handle_input(press(KeyCode::Char('p')));
        assert_eq!(game.mode(), Mode::Paused);
        let before = game.player.body;
        game.update(FRAME);
        assert_eq!(game.player.body, before);

        game.handle_input(press(KeyCode::Char('p')));
        assert_eq!(game.mode(), Mode::Running);
    }

    #[test]
    fn test_move_key_drives_player() {
        let mut game = arena(Vec2::new(2000.0, 100.0));
        game.handle_input(press(KeyCode::Right));
        game.update(FRAME);
        assert_eq!(game.player.body.pos.x, 70.0 + 4.2);
        assert_eq!(game.player.facing, 1.0);
    }

    #[test]
    fn test_leaving_drops_keys_held_until_release() {
        let mut game = arena(Vec2::new(2000.0, 100.0));
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            ..press(KeyCode::Left)
        };
        // Terminal reports releases, so presses now hold until released.
        game.handle_input(press(KeyCode::Left));
        game.handle_input(release);
        game.handle_input(press(KeyCode::Right));
        for _ in 0..20 {
            game.update(FRAME);
        }
        assert!(game.held().right);

        game.on_leave();
        assert_eq!(game.held(), Intents::default());
    }

    #[test]
    fn test_camera_tracks_player_within_world() {
        let mut game = arena(Vec2::new(2000.0, 100.0));
        game.player.body.pos.x = 2400.0;
        for _ in 0..200 {
            game.update_camera();
        }
        let max_cam = game.config.world_width - game.config.view_width;
        assert!((game.camera_x - max_cam).abs() < 0.5);
    }

    #[test]
    fn test_draw_skips_defeated_enemies() {
        let mut game = Platformer::new(PlatformerConfig::default(), 9);
        game.enemies[0].alive = false;
        let mut surface = RecordingSurface::default();
        game.draw(&mut surface);

        assert_eq!(surface.rects.len(), game.platforms.len());
        // Two rings per live enemy plus the player.
        assert_eq!(surface.circles.len(), 2 * 2 + 1);
    }
}
