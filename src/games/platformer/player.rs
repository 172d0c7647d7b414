use glam::Vec2;

use crate::config::PlatformerConfig;
use crate::input::Intents;
use crate::physics::{resolve_platforms, Aabb, Body, Entity};

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub spawn_point: Vec2,
    pub on_ground: bool,
    pub alive: bool,
    pub jump_cooldown: u32,
    /// Ticks left in which enemy contact does no damage.
    pub invuln: u32,
    /// Ticks until respawn while dead.
    pub respawn_timer: u32,
    /// -1 facing left, 1 facing right.
    pub facing: f32,
    pub score: u32,
}

impl Player {
    pub fn new(config: &PlatformerConfig) -> Self {
        Self {
            body: Body::new(config.spawn_point, config.player_radius),
            spawn_point: config.spawn_point,
            on_ground: false,
            alive: true,
            jump_cooldown: 0,
            invuln: 0,
            respawn_timer: 0,
            facing: 1.0,
            score: 0,
        }
    }

    pub fn update(&mut self, input: Intents, platforms: &[Aabb], config: &PlatformerConfig) {
        if !self.alive {
            return;
        }

        let dir = input.horizontal();
        self.body.vel.x = dir * config.move_speed;
        if dir != 0.0 {
            self.facing = dir;
        }

        self.body.apply_gravity(config.gravity, config.max_fall_speed);

        if self.on_ground && input.jump && self.jump_cooldown == 0 {
            self.body.impulse_up(config.jump_velocity);
            self.on_ground = false;
            self.jump_cooldown = config.jump_cooldown;
        }
        self.jump_cooldown = self.jump_cooldown.saturating_sub(1);

        self.body.integrate();
        self.on_ground = resolve_platforms(&mut self.body, platforms, config.landing_tolerance);

        let r = self.body.radius;
        self.body.pos.x = self.body.pos.x.clamp(r, config.world_width - r);
        if self.body.pos.y > config.death_depth {
            log::debug!("player fell out of the world at x={:.0}", self.body.pos.x);
            self.die(config);
        }

        self.invuln = self.invuln.saturating_sub(1);
    }

    pub fn die(&mut self, config: &PlatformerConfig) {
        self.alive = false;
        self.respawn_timer = config.respawn_ticks;
    }

    /// Count the respawn timer down while dead. Returns true on the tick the
    /// player comes back.
    pub fn tick_respawn(&mut self, config: &PlatformerConfig) -> bool {
        if self.alive {
            return false;
        }
        self.respawn_timer = self.respawn_timer.saturating_sub(1);
        if self.respawn_timer == 0 {
            self.respawn(config);
            return true;
        }
        false
    }

    pub fn respawn(&mut self, config: &PlatformerConfig) {
        self.body.pos = self.spawn_point;
        self.body.vel = Vec2::ZERO;
        self.on_ground = false;
        self.jump_cooldown = 0;
        self.alive = true;
        self.invuln = config.invuln_ticks;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln > 0
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
