use std::time::{Duration, Instant};

/// Turns scheduler ticks into elapsed frame times.
///
/// Whatever drives the loop (here the tick channel from `EventHandler`) calls
/// `frame` once per display frame; the returned delta goes to exactly one logic
/// step. `stop` ends the loop.
#[derive(Debug)]
pub struct FrameDriver {
    last: Instant,
    running: bool,
    frames: u64,
}

impl FrameDriver {
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            running: true,
            frames: 0,
        }
    }

    /// Elapsed time since the previous frame, or `None` once stopped.
    pub fn frame(&mut self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        self.frames += 1;
        Some(elapsed)
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("frame driver stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_reports_elapsed() {
        let start = Instant::now();
        let mut driver = FrameDriver::new(start);
        let dt = driver.frame(start + Duration::from_millis(16));
        assert_eq!(dt, Some(Duration::from_millis(16)));
        let dt = driver.frame(start + Duration::from_millis(40));
        assert_eq!(dt, Some(Duration::from_millis(24)));
        assert_eq!(driver.frames(), 2);
    }

    #[test]
    fn test_stopped_driver_yields_nothing() {
        let start = Instant::now();
        let mut driver = FrameDriver::new(start);
        driver.stop();
        assert!(!driver.is_running());
        assert_eq!(driver.frame(start + Duration::from_millis(16)), None);
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut driver = FrameDriver::new(start);
        assert_eq!(driver.frame(start - Duration::from_millis(5)), Some(Duration::ZERO));
    }
}
