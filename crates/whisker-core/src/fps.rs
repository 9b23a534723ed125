use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Loop rate over a sliding window, reported by the `tps` command.
pub struct TickCounter {
    timestamps: VecDeque<Instant>,
    window: Duration,
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            timestamps: VecDeque::new(),
            window,
        }
    }

    /// Record a loop iteration and forget the ones outside the window.
    pub fn tick(&mut self, now: Instant) {
        self.timestamps.push_back(now);
        let Some(cutoff) = now.checked_sub(self.window) else {
            return;
        };
        while self.timestamps.front().is_some_and(|&t| t < cutoff) {
            self.timestamps.pop_front();
        }
    }

    /// Ticks per second; `0.0` until two ticks have been seen.
    pub fn tps(&self) -> f64 {
        if self.timestamps.len() < 2 {
            return 0.0;
        }
        self.timestamps.len() as f64 / self.window.as_secs_f64()
    }
}
