use glam::Vec2;
use rand::Rng;

use crate::config::PlatformerConfig;
use crate::physics::{Aabb, Body, Entity};

/// Spiky patroller that walks back and forth along one platform.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    /// Platform the patrol is confined to.
    pub platform: Aabb,
    pub alive: bool,
    pub hit_cooldown: u32,
}

impl Enemy {
    /// Place an enemy on a random floating platform. The last platform is the
    /// ground and is never picked.
    pub fn spawn<R: Rng>(platforms: &[Aabb], config: &PlatformerConfig, rng: &mut R) -> Self {
        let floating = platforms.len().saturating_sub(1).max(1);
        let platform = platforms[rng.gen_range(0..floating)];
        let inset = 50.0;
        let span = (platform.width - 2.0 * inset).max(0.0);
        let x = platform.x + inset + rng.gen_range(0.0..=span);
        let pos = Vec2::new(x, platform.y - config.enemy_radius);

        let speed = rng.gen_range(config.enemy_speed_min..=config.enemy_speed_max);
        let dir = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

        let mut body = Body::new(pos, config.enemy_radius);
        body.vel.x = dir * speed;
        Self {
            body,
            platform,
            alive: true,
            hit_cooldown: 0,
        }
    }

    pub fn update(&mut self) {
        if !self.alive {
            return;
        }

        self.body.pos.x += self.body.vel.x;
        let r = self.body.radius;
        let min_x = self.platform.x + r;
        let max_x = self.platform.right() - r;
        if self.body.pos.x < min_x {
            self.body.pos.x = min_x;
            self.body.vel.x = -self.body.vel.x;
        }
        if self.body.pos.x > max_x {
            self.body.pos.x = max_x;
            self.body.vel.x = -self.body.vel.x;
        }

        self.hit_cooldown = self.hit_cooldown.saturating_sub(1);
    }

    /// Defeat this enemy. Refused while the hit cooldown runs, so a single
    /// stomp cannot count twice.
    pub fn hit(&mut self, config: &PlatformerConfig) -> bool {
        if self.hit_cooldown > 0 || !self.alive {
            return false;
        }
        self.alive = false;
        self.hit_cooldown = config.enemy_hit_cooldown;
        true
    }

    /// -1 walking left, 1 walking right.
    pub fn direction(&self) -> f32 {
        if self.body.vel.x > 0.0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
