use std::fmt;
use std::time::{Duration, Instant};

use whisker_config::StatusConfig;

use crate::types::{AgentState, Behavior};

/// Happiness and energy, both on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusModel {
    pub happiness: f64,
    pub energy: f64,
}

/// Coarse label for the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Content,
    Bored,
    Sleepy,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Content => write!(f, "content"),
            Mood::Bored => write!(f, "bored"),
            Mood::Sleepy => write!(f, "sleepy"),
        }
    }
}

impl Default for StatusModel {
    fn default() -> Self {
        Self {
            happiness: 85.0,
            energy: 70.0,
        }
    }
}

/// Per-update deltas, all non-negative; the sign lives in
/// [`StatusModel::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusRates {
    pub sleep_energy_gain: f64,
    pub sleep_happiness_loss: f64,
    pub walk_energy_loss: f64,
    pub walk_happiness_gain: f64,
    pub idle_happiness_loss: f64,
}

impl Default for StatusRates {
    fn default() -> Self {
        Self::from_config(&StatusConfig::default())
    }
}

impl StatusRates {
    pub fn from_config(config: &StatusConfig) -> Self {
        Self {
            sleep_energy_gain: config.sleep_energy_gain,
            sleep_happiness_loss: config.sleep_happiness_loss,
            walk_energy_loss: config.walk_energy_loss,
            walk_happiness_gain: config.walk_happiness_gain,
            idle_happiness_loss: config.idle_happiness_loss,
        }
    }
}

const SLEEP_ENERGY_MAX: f64 = 100.0;
const SLEEP_HAPPINESS_MIN: f64 = 40.0;
const WALK_ENERGY_MIN: f64 = 10.0;
const WALK_HAPPINESS_MAX: f64 = 95.0;
const IDLE_HAPPINESS_MIN: f64 = 50.0;

impl StatusModel {
    pub fn from_config(config: &StatusConfig) -> Self {
        Self {
            happiness: config.initial_happiness,
            energy: config.initial_energy,
        }
    }

    /// Apply one update step for the given behavior.
    ///
    /// Each branch clamps only against its own floor/ceiling.
    pub fn update(&mut self, behavior: Behavior, rates: &StatusRates) {
        match behavior {
            Behavior::Sleeping => {
                self.energy = (self.energy + rates.sleep_energy_gain).min(SLEEP_ENERGY_MAX);
                self.happiness =
                    (self.happiness - rates.sleep_happiness_loss).max(SLEEP_HAPPINESS_MIN);
            }
            Behavior::Walking => {
                self.energy = (self.energy - rates.walk_energy_loss).max(WALK_ENERGY_MIN);
                self.happiness =
                    (self.happiness + rates.walk_happiness_gain).min(WALK_HAPPINESS_MAX);
            }
            Behavior::Idle | Behavior::Transitioning => {
                self.happiness =
                    (self.happiness - rates.idle_happiness_loss).max(IDLE_HAPPINESS_MIN);
            }
        }
    }

    pub fn mood(&self) -> Mood {
        if self.energy < 30.0 {
            Mood::Sleepy
        } else if self.happiness < 60.0 {
            Mood::Bored
        } else {
            Mood::Content
        }
    }
}

/// Periodic driver for [`StatusModel::update`].
///
/// The view creates one when it mounts and drops it when it unmounts; with
/// no timer alive, the status stops changing.
pub struct StatusTimer {
    interval: Duration,
    rates: StatusRates,
    next_due: Instant,
}

impl StatusTimer {
    pub fn start(interval: Duration, rates: StatusRates, now: Instant) -> Self {
        Self {
            interval,
            rates,
            next_due: now + interval,
        }
    }

    /// Fire every elapsed interval. Paused firings are skipped, not
    /// deferred. Returns how many updates were applied.
    pub fn tick(&mut self, now: Instant, state: &AgentState, status: &mut StatusModel) -> usize {
        let mut applied = 0;
        while self.next_due <= now {
            self.next_due += self.interval;
            if state.paused {
                continue;
            }
            status.update(state.behavior, &self.rates);
            applied += 1;
        }
        applied
    }
}
