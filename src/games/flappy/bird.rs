use glam::Vec2;

use crate::config::FlappyConfig;
use crate::physics::{Body, Entity};

#[derive(Debug, Clone)]
pub struct Bird {
    pub body: Body,
    pub alive: bool,
    /// Resting height the idle bob oscillates around.
    home_y: f32,
    bob_phase: f32,
}

impl Bird {
    pub fn new(config: &FlappyConfig) -> Self {
        let home_y = config.floor_y() / 2.0;
        Self {
            body: Body::new(Vec2::new(config.bird_x, home_y), config.bird_radius),
            alive: true,
            home_y,
            bob_phase: 0.0,
        }
    }

    /// Idle animation while waiting for the first flap. No physics.
    pub fn bob(&mut self, config: &FlappyConfig) {
        self.bob_phase += 0.1;
        self.body.pos.y = self.home_y + self.bob_phase.sin() * config.bob_amplitude;
        self.body.vel = Vec2::ZERO;
    }

    /// Gravity then position, one fixed step.
    pub fn step(&mut self, config: &FlappyConfig) {
        self.body.apply_gravity(config.gravity, config.max_fall_speed);
        self.body.integrate();
        if self.body.top() < 0.0 {
            self.body.pos.y = self.body.radius;
            self.body.vel.y = 0.0;
        }
    }

    pub fn flap(&mut self, config: &FlappyConfig) {
        self.body.impulse_up(config.flap_velocity);
    }

    pub fn touches_ground(&self, config: &FlappyConfig) -> bool {
        self.body.bottom() >= config.floor_y()
    }

    /// Tilt in radians for drawing: nose up when rising, down when falling.
    pub fn tilt(&self) -> f32 {
        (self.body.vel.y * 0.08).clamp(-0.5, 1.2)
    }
}

impl Entity for Bird {
    fn body(&self) -> &Body {
        &self.body
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
