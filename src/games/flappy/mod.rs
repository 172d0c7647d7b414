pub mod bird;
pub mod pipe;

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
use crate::config::FlappyConfig;
use crate::games::{Game, Hud};
use crate::input::{flappy_intent, Intent};
use crate::physics::{circle_rect_overlap, Aabb, Entity};
use crate::render::{CanvasSurface, Surface, View};

use bird::Bird;
use pipe::PipeSpawner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Bird bobs in place, nothing scores.
    Ready,
    Playing,
    GameOver,
}

pub struct Flappy {
    config: FlappyConfig,
    rng: StdRng,
    bird: Bird,
    spawner: PipeSpawner,
    mode: Mode,
    paused: bool,
    score: u32,
    best: u32,
    ground_offset: f32,
    cues: Vec<SoundCue>,
}

impl Flappy {
    pub fn new(config: FlappyConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            bird: Bird::new(&config),
            spawner: PipeSpawner::new(&config),
            mode: Mode::Ready,
            paused: false,
            score: 0,
            best: 0,
            ground_offset: 0.0,
            cues: Vec::new(),
            config,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Single input: start, flap, or restart depending on the mode.
    fn flap_or_restart(&mut self) {
        match self.mode {
            Mode::Ready => {
                log::debug!("flappy round started");
                self.mode = Mode::Playing;
                self.bird.flap(&self.config);
                self.cues.push(SoundCue::Flap);
            }
            Mode::Playing => {
                self.bird.flap(&self.config);
                self.cues.push(SoundCue::Flap);
            }
            Mode::GameOver => self.reset(),
        }
    }

    fn step(&mut self, elapsed: Duration) {
        let dt = elapsed.min(Duration::from_millis(self.config.max_delta_ms));
        self.spawner.advance(dt, &self.config, &mut self.rng);

        self.bird.step(&self.config);
        self.spawner.scroll(self.config.pipe_speed);
        self.scroll_ground();

        let bird_x = self.bird.body.pos.x;
        for pipe in self.spawner.pipes_mut() {
            if pipe.check_passed(bird_x) {
                self.score += 1;
                self.cues.push(SoundCue::Score);
            }
        }

        if self.bird.touches_ground(&self.config) || self.hits_pipe() {
            self.game_over();
        }
    }

    fn hits_pipe(&self) -> bool {
        let center = self.bird.position();
        let r = self.bird.radius();
        let floor = self.config.floor_y();
        self.spawner.pipes().iter().any(|pipe| {
            circle_rect_overlap(center, r, &pipe.top_segment())
                || circle_rect_overlap(center, r, &pipe.bottom_segment(floor))
        })
    }

    fn game_over(&mut self) {
        self.mode = Mode::GameOver;
        self.bird.alive = false;
        self.best = self.best.max(self.score);
        self.cues.push(SoundCue::Hit);
        log::debug!("flappy game over: score {} best {}", self.score, self.best);
    }

    fn scroll_ground(&mut self) {
        self.ground_offset = (self.ground_offset + self.config.pipe_speed) % 24.0;
    }

    fn view(&self) -> View {
        View {
            camera_x: 0.0,
            width: self.config.world_width,
            height: self.config.world_height,
        }
    }

    fn draw(&self, s: &mut dyn Surface) {
        let floor = self.config.floor_y();
        for pipe in self.spawner.pipes() {
            s.rect(pipe.top_segment(), Color::Rgb(100, 170, 40));
            s.rect(pipe.bottom_segment(floor), Color::Rgb(100, 170, 40));
        }

        s.rect(
            Aabb::new(0.0, floor, self.config.world_width, self.config.ground_height),
            Color::Rgb(210, 185, 110),
        );
        let mut x = -self.ground_offset;
        while x < self.config.world_width {
            s.line(Vec2::new(x, floor + 8.0), Vec2::new(x + 12.0, floor + 8.0), Color::Rgb(84, 168, 55));
            x += 24.0;
        }

        let c = self.bird.position();
        let r = self.bird.radius();
        let color = if self.bird.alive {
            Color::Rgb(245, 200, 66)
        } else {
            Color::Rgb(150, 120, 60)
        };
        s.circle(c, r, color);
        let tilt = self.bird.tilt();
        let beak = c + Vec2::new(tilt.cos(), tilt.sin()) * (r + 5.0);
        s.line(c, beak, Color::Rgb(225, 75, 35));

        let text = self.score.to_string();
        s.text(
            Vec2::new(self.config.world_width / 2.0 - 4.0, 40.0),
            &text,
            Color::White,
        );
    }
}

impl Game for Flappy {
    fn update(&mut self, elapsed: Duration) {
        if self.paused {
            return;
        }
        match self.mode {
            Mode::Ready => {
                self.bird.bob(&self.config);
                self.scroll_ground();
            }
            Mode::Playing => self.step(elapsed),
            Mode::GameOver => {}
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if self.mode == Mode::Playing {
                    self.paused = !self.paused;
                }
            }
            code => {
                if self.paused {
                    return;
                }
                if flappy_intent(code) == Some(Intent::FlapOrRestart) {
                    self.flap_or_restart();
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(245, 200, 66)))
            .title(" 🐤 Flappy ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(255, 225, 100))
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
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        // Keep the playfield's aspect: two braille dots per cell across, four down.
        let field = chunks[1];
        let want_w = ((field.height as f32 * 4.0) * self.config.world_width
            / self.config.world_height
            / 2.0) as u16;
        let w = want_w.clamp(10, field.width.max(10)).min(field.width);
        let field = Rect::new(field.x + (field.width - w) / 2, field.y, w, field.height);

        let view = self.view();
        let this = &*self;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(Color::Rgb(70, 150, 190))
            .x_bounds(view.x_bounds())
            .y_bounds(view.y_bounds())
            .paint(move |ctx| {
                let mut surface = CanvasSurface::new(ctx, view);
                this.draw(&mut surface);
            });
        frame.render_widget(canvas, field);

        let help = if self.paused {
            Line::from(Span::styled(
                " ⏸ PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(
                    format!(" {} ", hud.message.unwrap_or("")),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "SPACE/↑ Flap │ P Pause │ R Restart │ Esc Menu",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        };
        frame.render_widget(Paragraph::new(help), chunks[2]);
    }

    fn reset(&mut self) {
        self.bird = Bird::new(&self.config);
        self.spawner.clear();
        self.mode = Mode::Ready;
        self.paused = false;
        self.score = 0;
        self.cues.clear();
    }

    fn hud(&self) -> Hud<'_> {
        let message = match self.mode {
            Mode::Ready => Some("▶ Press SPACE to start!"),
            Mode::Playing => None,
            Mode::GameOver => Some("💀 GAME OVER! Press SPACE to try again"),
        };
        Hud {
            score: self.score,
            best: self.best,
            enemies_alive: None,
            message,
            message_ticks: None,
        }
    }

    fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::flappy::pipe::Pipe;
    use crate::render::RecordingSurface;
    use crossterm::event::KeyModifiers;

    const FRAME: Duration = Duration::from_millis(16);

    fn space() -> KeyEvent {
        KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)
    }

    fn playing() -> Flappy {
        let mut game = Flappy::new(FlappyConfig::default(), 3);
        game.mode = Mode::Playing;
        game
    }

    #[test]
    fn test_ready_bobs_without_scoring_or_spawning() {
        let mut game = Flappy::new(FlappyConfig::default(), 3);
        for _ in 0..500 {
            game.update(Duration::from_millis(40));
        }
        assert_eq!(game.mode(), Mode::Ready);
        assert_eq!(game.score, 0);
        assert!(game.spawner.pipes().is_empty());
        assert!(game.bird.alive);
    }

    #[test]
    fn test_first_flap_starts_round() {
        let mut game = Flappy::new(FlappyConfig::default(), 3);
        game.handle_input(space());
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(game.bird.body.vel.y, -game.config.flap_velocity);
        assert_eq!(game.drain_cues(), vec![SoundCue::Flap]);
    }

    #[test]
    fn test_one_physics_step_while_playing() {
        let mut game = playing();
        game.bird.body.pos.y = 100.0;
        game.bird.body.vel.y = 0.0;

        game.update(FRAME);
        assert!((game.bird.body.vel.y - 0.45).abs() < 1e-6);
        assert!((game.bird.body.pos.y - 100.45).abs() < 1e-4);
    }

    #[test]
    fn test_passing_a_pipe_scores_once() {
        let mut game = playing();
        let y = game.bird.body.pos.y;
        push_pipe(&mut game, Pipe::new(60.0, 64.0, y, 160.0));

        for _ in 0..5 {
            game.update(FRAME);
        }
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(game.score, 1);
        assert!(game.spawner.pipes()[0].passed);
        assert_eq!(game.drain_cues(), vec![SoundCue::Score]);
    }

    #[test]
    fn test_pipe_hit_ends_round() {
        let mut game = playing();
        game.score = 4;
        push_pipe(&mut game, Pipe::new(100.0, 64.0, 100.0, 140.0));

        game.update(FRAME);
        assert_eq!(game.mode(), Mode::GameOver);
        assert!(!game.bird.alive);
        assert_eq!(game.hud().best, 4);
        assert_eq!(game.drain_cues(), vec![SoundCue::Hit]);

        // Frozen after the crash.
        let before = game.bird.body;
        game.update(FRAME);
        assert_eq!(game.bird.body, before);
    }

    #[test]
    fn test_ground_ends_round() {
        let mut game = playing();
        game.bird.body.pos.y = game.config.floor_y() - game.config.bird_radius - 0.1;
        game.update(FRAME);
        assert_eq!(game.mode(), Mode::GameOver);
    }

    #[test]
    fn test_restart_keeps_best() {
        let mut game = playing();
        game.score = 7;
        game.game_over();
        push_pipe(&mut game, Pipe::new(200.0, 64.0, 300.0, 150.0));

        game.handle_input(space());
        assert_eq!(game.mode(), Mode::Ready);
        assert_eq!(game.hud().score, 0);
        assert_eq!(game.hud().best, 7);
        assert!(game.spawner.pipes().is_empty());
        assert!(game.bird.alive);
    }

    #[test]
    fn test_long_frame_is_clamped_for_spawning() {
        let mut game = playing();
        game.update(Duration::from_secs(10));
        assert!(game.spawner.pipes().is_empty());
    }

    #[test]
    fn test_pause_only_while_playing() {
        let mut game = Flappy::new(FlappyConfig::default(), 3);
        game.handle_input(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE));
        assert!(!game.paused);

        game.mode = Mode::Playing;
        game.handle_input(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE));
        assert!(game.paused);
        let before = game.bird.body;
        game.update(FRAME);
        assert_eq!(game.bird.body, before);
    }

    #[test]
    fn test_draw_emits_both_pipe_segments() {
        let mut game = playing();
        push_pipe(&mut game, Pipe::new(200.0, 64.0, 300.0, 150.0));
        let mut surface = RecordingSurface::default();
        game.draw(&mut surface);

        // Two segments plus the ground.
        assert_eq!(surface.rects.len(), 3);
        assert_eq!(surface.rects[0].height, 225.0);
        assert_eq!(surface.rects[1].y, 375.0);
        assert_eq!(surface.circles.len(), 1);
        assert_eq!(surface.texts, vec!["0".to_string()]);
    }

    fn push_pipe(game: &mut Flappy, pipe: Pipe) {
        game.spawner.push(pipe);
    }
}
