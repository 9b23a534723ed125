use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;
use whisker_config::PetConfig;

use crate::animation::{self, AnimationClock, AnimationFrame};
use crate::default_sheet;
use crate::loader;
use crate::movement::{AfterArrival, BehaviorChoice, MovementController, MovementEvent};
use crate::random::{RandomSource, SeededRandom};
use crate::sprite::{AsciiFrame, SpriteSheet};
use crate::status::{StatusModel, StatusRates, StatusTimer};
use crate::types::{AgentState, BoundsProvider, Position};

/// The desktop cat: owns its state and every timer that changes it.
///
/// The host calls [`tick`](Self::tick) once per frame with the current bounds
/// and then reads [`state`](Self::state) and
/// [`current_frame`](Self::current_frame) to draw it.
pub struct Cat {
    state: AgentState,
    movement: MovementController,
    status: StatusModel,
    status_timer: Option<StatusTimer>,
    status_interval: Duration,
    status_rates: StatusRates,
    clock: AnimationClock,
    sheet: SpriteSheet,
    /// Present only when sitting flicker is enabled.
    flicker: Option<Box<dyn RandomSource>>,
}

impl Cat {
    /// Build a cat from config, loading the sprite sheet it names (or the
    /// embedded one).
    pub fn load(config: &PetConfig, start: Position, now: Instant) -> Result<Self> {
        let sheet = Self::load_sheet(config)?;
        Ok(Self::new(config, sheet, start, now))
    }

    /// The sprite sheet named by `sprites.path`, or the embedded cat.
    pub fn load_sheet(config: &PetConfig) -> Result<SpriteSheet> {
        match &config.sprites.path {
            Some(path) => {
                info!(path = %path.display(), "loading sprite sheet");
                loader::load_from_file(path)
            }
            None => default_sheet::load_default_sheet(),
        }
    }

    /// Build a cat with the embedded sprite sheet.
    pub fn load_default(config: &PetConfig, start: Position, now: Instant) -> Result<Self> {
        let sheet = default_sheet::load_default_sheet()?;
        Ok(Self::new(config, sheet, start, now))
    }

    pub fn new(config: &PetConfig, sheet: SpriteSheet, start: Position, now: Instant) -> Self {
        let rng = SeededRandom::from_seed_opt(config.seed);
        let mut cat = Self::with_random(config, sheet, start, now, Box::new(rng));
        if config.animation.sitting_flicker {
            let seed = config.seed.map(|s| s.wrapping_add(1));
            cat.flicker = Some(Box::new(SeededRandom::from_seed_opt(seed)));
        }
        cat
    }

    /// Build a cat whose scheduler draws from `rng`.
    ///
    /// Sitting flicker stays off; use [`new`](Self::new) for that.
    pub fn with_random(
        config: &PetConfig,
        sheet: SpriteSheet,
        start: Position,
        now: Instant,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            state: AgentState::at(start),
            movement: MovementController::new(&config.movement, &config.behavior, rng),
            status: StatusModel::from_config(&config.status),
            status_timer: None,
            status_interval: Duration::from_millis(config.status.interval_ms),
            status_rates: StatusRates::from_config(&config.status),
            clock: AnimationClock::new(Duration::from_millis(config.animation.frame_ms), now),
            sheet,
            flicker: None,
        }
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn status(&self) -> &StatusModel {
        &self.status
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    /// Start the status timer. Does nothing if it is already running.
    pub fn mount_status(&mut self, now: Instant) {
        if self.status_timer.is_none() {
            self.status_timer = Some(StatusTimer::start(self.status_interval, self.status_rates, now));
        }
    }

    /// Stop the status timer. Happiness and energy freeze until remounted.
    pub fn unmount_status(&mut self) {
        self.status_timer = None;
    }

    pub fn status_mounted(&self) -> bool {
        self.status_timer.is_some()
    }

    /// Kick off the behavior loop.
    pub fn start(&mut self, now: Instant, bounds: &dyn BoundsProvider) -> BehaviorChoice {
        info!(x = self.state.position.x, y = self.state.position.y, "cat started");
        self.random_behavior(now, bounds)
    }

    /// Advance every timer to `now`.
    pub fn tick(&mut self, now: Instant, bounds: &dyn BoundsProvider) -> Vec<MovementEvent> {
        let events = self.movement.tick(now, &mut self.state, bounds);
        if let Some(timer) = &mut self.status_timer {
            timer.tick(now, &self.state, &mut self.status);
        }
        let frame = self.select_frame();
        self.clock.show(frame, now);
        self.clock.tick(now);
        events
    }

    /// Walk to `target` and stop there.
    pub fn walk_to(&mut self, target: Position, now: Instant, bounds: &dyn BoundsProvider) -> bool {
        self.movement
            .walk_to(target, AfterArrival::Stop, now, &mut self.state, bounds)
    }

    pub fn sleep(&mut self, now: Instant) -> bool {
        self.movement.sleep(now, &mut self.state)
    }

    pub fn random_behavior(&mut self, now: Instant, bounds: &dyn BoundsProvider) -> BehaviorChoice {
        self.movement.random_behavior(now, &mut self.state, bounds)
    }

    /// Freeze the cat where it is.
    ///
    /// The state is left exactly as it was: a walk keeps reporting
    /// `Walking` and a nap keeps its pose. Pending timers notice the flag
    /// when they fire and stop.
    pub fn pause(&mut self) {
        if !self.state.paused {
            info!(behavior = %self.state.behavior, "paused");
        }
        self.state.paused = true;
    }

    /// Unfreeze the cat.
    ///
    /// Whatever was interrupted is discarded: the cat stands up and the
    /// scheduler picks a fresh behavior immediately. Returns `None` if the
    /// cat was not paused.
    pub fn resume(&mut self, now: Instant, bounds: &dyn BoundsProvider) -> Option<BehaviorChoice> {
        if !self.state.paused {
            return None;
        }
        self.state.paused = false;
        self.movement.reset(&mut self.state);
        let choice = self.random_behavior(now, bounds);
        info!(?choice, "resumed");
        Some(choice)
    }

    /// Row and frame count currently playing.
    pub fn animation_frame(&self) -> AnimationFrame {
        self.clock.current()
    }

    /// The sprite frame to draw right now.
    pub fn current_frame(&self) -> &AsciiFrame {
        let current = self.clock.current();
        self.sheet.frame(current.row, self.clock.frame_index())
    }

    fn select_frame(&mut self) -> AnimationFrame {
        match &mut self.flicker {
            Some(rng) => animation::select_flickering(&self.state, rng.as_mut()),
            None => animation::select(&self.state),
        }
    }
}
