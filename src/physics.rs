use glam::Vec2;

/// Axis-aligned rectangle in world units, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Closest point inside the rectangle to `p`.
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }
}

/// Position, velocity and collision radius of a round entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Advance position by one step of velocity. Steps are per frame, not
    /// scaled by elapsed time.
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Add gravity to vertical velocity, capped at `max_fall` so fast bodies
    /// cannot skip through thin platforms.
    pub fn apply_gravity(&mut self, gravity: f32, max_fall: f32) {
        self.vel.y = (self.vel.y + gravity).min(max_fall);
    }

    /// Upward impulse; overrides whatever vertical velocity was there.
    pub fn impulse_up(&mut self, strength: f32) {
        self.vel.y = -strength;
    }
}

/// Capability set shared by every simulated entity.
pub trait Entity {
    fn body(&self) -> &Body;
    fn is_alive(&self) -> bool;

    fn position(&self) -> Vec2 {
        self.body().pos
    }

    fn radius(&self) -> f32 {
        self.body().radius
    }
}

/// Resolve a body against static platforms in declaration order.
///
/// Per platform the landing test runs first (only while not moving up), then the
/// side test. Every platform gets both tests, so a later platform can push the body
/// sideways right after an earlier one landed it, or override an earlier side push.
/// Returns whether the body ended up grounded.
pub fn resolve_platforms(body: &mut Body, platforms: &[Aabb], tolerance: f32) -> bool {
    let mut grounded = false;
    let r = body.radius;

    for plat in platforms {
        if body.vel.y >= 0.0 {
            let px = body.pos.x;
            let py = body.bottom();
            if px > plat.x - r
                && px < plat.right() + r
                && py > plat.y - tolerance
                && py < plat.bottom()
            {
                body.pos.y = plat.y - r;
                body.vel.y = 0.0;
                grounded = true;
            }
        }

        if body.pos.x + r > plat.x
            && body.pos.x - r < plat.right()
            && body.bottom() > plat.y
            && body.top() < plat.bottom()
        {
            if body.vel.x > 0.0 {
                body.pos.x = plat.x - r - 1.0;
            } else if body.vel.x < 0.0 {
                body.pos.x = plat.right() + r + 1.0;
            }
        }
    }

    grounded
}

/// Squared-distance circle test with a forgiveness margin shaved off the
/// combined radius.
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32, margin: f32) -> bool {
    let reach = ra + rb - margin;
    if reach <= 0.0 {
        return false;
    }
    a.distance_squared(b) < reach * reach
}

/// Circle against rectangle: clamp the center into the rectangle and compare
/// the squared distance to the radius. Touching counts as a hit.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Aabb) -> bool {
    let nearest = rect.clamp_point(center);
    center.distance_squared(nearest) <= radius * radius
}
