//! Behavior core for the whisker desktop cat.
//!
//! This crate decides what the cat is doing and which sprite to show for it:
//! walking between points inside a bounding rectangle, dozing off, waking up
//! and picking something new at random, while happiness and energy drift with
//! whatever it is up to. It knows nothing about terminals; the host supplies
//! the bounds and the clock.
//!
//! # Quick start
//!
//! ```no_run
//! use std::time::Instant;
//! use whisker_agent::{Bounds, Cat, Position};
//! use whisker_config::PetConfig;
//!
//! let bounds = Bounds::new(0.0, 640.0, 0.0, 480.0);
//! let now = Instant::now();
//! let mut cat = Cat::load_default(&PetConfig::default(), bounds.center(), now).unwrap();
//! cat.mount_status(now);
//! cat.start(now, &bounds);
//! cat.tick(Instant::now(), &bounds);
//! let _frame = cat.current_frame();
//! ```

mod agent;
pub mod animation;
mod default_sheet;
pub mod loader;
pub mod movement;
pub mod random;
mod sprite;
mod status;
mod types;

pub use agent::Cat;
pub use animation::{AnimationClock, AnimationFrame};
pub use movement::{AfterArrival, BehaviorChoice, MovementController, MovementEvent, TaskKind};
pub use random::{RandomSource, SeededRandom};
pub use sprite::{AsciiFrame, SpriteSheet};
pub use status::{Mood, StatusModel, StatusRates, StatusTimer};
pub use types::{
    AgentState, Behavior, Bounds, BoundsProvider, Direction, Position, SittingVariant, SleepPose,
};
