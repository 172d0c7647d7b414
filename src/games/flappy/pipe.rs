use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;

use crate::config::FlappyConfig;
use crate::physics::Aabb;

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub width: f32,
    /// Vertical center of the opening.
    pub gap_y: f32,
    pub gap_height: f32,
    /// Set once when the bird clears this pipe.
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, width: f32, gap_y: f32, gap_height: f32) -> Self {
        Self {
            x,
            width,
            gap_y,
            gap_height,
            passed: false,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Segment hanging from the ceiling down to the top of the gap.
    pub fn top_segment(&self) -> Aabb {
        Aabb::new(self.x, 0.0, self.width, self.gap_y - self.gap_height / 2.0)
    }

    /// Segment from the bottom of the gap down to the ground.
    pub fn bottom_segment(&self, floor_y: f32) -> Aabb {
        let y = self.gap_y + self.gap_height / 2.0;
        Aabb::new(self.x, y, self.width, floor_y - y)
    }

    /// Mark passed once the pipe is entirely behind `x`. Returns true only the
    /// first time.
    pub fn check_passed(&mut self, x: f32) -> bool {
        if self.passed || self.right() >= x {
            return false;
        }
        self.passed = true;
        true
    }
}

/// Time-driven pipe source plus the FIFO of live pipes.
#[derive(Debug, Clone)]
pub struct PipeSpawner {
    acc: Duration,
    interval: Duration,
    pipes: VecDeque<Pipe>,
}

impl PipeSpawner {
    pub fn new(config: &FlappyConfig) -> Self {
        Self {
            acc: Duration::ZERO,
            interval: Duration::from_millis(config.spawn_interval_ms),
            pipes: VecDeque::new(),
        }
    }

    pub fn pipes(&self) -> &VecDeque<Pipe> {
        &self.pipes
    }

    pub fn pipes_mut(&mut self) -> impl Iterator<Item = &mut Pipe> {
        self.pipes.iter_mut()
    }

    /// Feed elapsed time; spawns at most one pipe when the interval is reached.
    pub fn advance<R: Rng>(&mut self, dt: Duration, config: &FlappyConfig, rng: &mut R) -> bool {
        self.acc += dt;
        if self.acc < self.interval {
            return false;
        }
        self.acc = Duration::ZERO;
        let pipe = Self::random_pipe(config, rng);
        log::trace!("pipe spawned: gap_y={:.0} gap_h={:.0}", pipe.gap_y, pipe.gap_height);
        self.pipes.push_back(pipe);
        true
    }

    fn random_pipe<R: Rng>(config: &FlappyConfig, rng: &mut R) -> Pipe {
        let gap_height = rng.gen_range(config.gap_min..=config.gap_max);
        let half = gap_height / 2.0;
        let lo = config.gap_margin + half;
        let hi = (config.floor_y() - config.gap_margin - half).max(lo);
        let gap_y = rng.gen_range(lo..=hi);
        Pipe::new(config.world_width, config.pipe_width, gap_y, gap_height)
    }

    /// Slide every pipe left by `speed`, then drop the ones fully off-screen.
    pub fn scroll(&mut self, speed: f32) {
        for pipe in &mut self.pipes {
            pipe.x -= speed;
        }
        while self.pipes.front().is_some_and(|p| p.right() < 0.0) {
            self.pipes.pop_front();
        }
    }

    #[cfg(test)]
    pub fn push(&mut self, pipe: Pipe) {
        self.pipes.push_back(pipe);
    }

    pub fn clear(&mut self) {
        self.acc = Duration::ZERO;
        self.pipes.clear();
    }
}
