//! Shared utilities

use std::thread;
use std::time::{Duration, Instant};

/// Caps the main loop at a target rate by sleeping away whatever is left of
/// each frame's time budget. Ticks that overrun the budget (a regeneration,
/// say) are not slept at all and the loop continues immediately.
pub struct FrameLimiter {
    budget: Duration,
    tick_start: Instant,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / target_fps.max(1),
            tick_start: Instant::now(),
        }
    }

    /// Mark the start of a tick
    pub fn begin(&mut self) {
        self.tick_start = Instant::now();
    }

    /// Sleep for the remainder of the frame budget, if any
    pub fn wait(&self) {
        let elapsed = self.tick_start.elapsed();
        if let Some(remaining) = self.budget.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_holds_frame_budget() {
        // 100 fps -> 10ms budget; an empty tick must take at least that long
        let mut limiter = FrameLimiter::new(100);
        limiter.begin();
        let start = Instant::now();
        limiter.wait();
        assert!(start.elapsed() >= Duration::from_millis(9));
    }

    #[test]
    fn test_limiter_skips_sleep_when_over_budget() {
        let mut limiter = FrameLimiter::new(1000);
        limiter.begin();
        thread::sleep(Duration::from_millis(5));
        let start = Instant::now();
        limiter.wait();
        // Budget (1ms) already spent: wait() must return without sleeping
        assert!(start.elapsed() < Duration::from_millis(5));
    }
}
