use std::time::Duration;

use crate::config::{DELAY_STEP_MS, INITIAL_DELAY_MS, MIN_DELAY_MS};

/// Linear speed-up parameters: start at `initial`, shrink by `step` per food,
/// never go below `floor`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Pacing {
    pub initial: Duration,
    pub step: Duration,
    pub floor: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(INITIAL_DELAY_MS),
            step: Duration::from_millis(DELAY_STEP_MS),
            floor: Duration::from_millis(MIN_DELAY_MS),
        }
    }
}

impl Pacing {
    /// Delay after `foods_eaten` foods: `max(floor, initial - n * step)`.
    #[must_use]
    pub fn delay_after(self, foods_eaten: u32) -> Duration {
        self.step
            .checked_mul(foods_eaten)
            .and_then(|total| self.initial.checked_sub(total))
            .map_or(self.floor, |delay| delay.max(self.floor))
    }
}

/// Current inter-step delay of a running game.
#[derive(Debug, Clone, Copy)]
pub struct SpeedRamp {
    pacing: Pacing,
    delay: Duration,
}

impl SpeedRamp {
    #[must_use]
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            delay: pacing.initial,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Shortens the delay by one step, clamped at the floor. Returns the new delay.
    pub fn accelerate(&mut self) -> Duration {
        self.delay = self
            .delay
            .saturating_sub(self.pacing.step)
            .max(self.pacing.floor);
        self.delay
    }
}
