//! Configuration types and loaders for WHISKER.
//!
//! This crate owns the on-disk configuration schema so the behavioral core
//! and the terminal host share a single source of truth for tuning.

pub mod pet;

pub use pet::{
    config_path, AnimationConfig, BehaviorConfig, DisplayConfig, MovementConfig, PetConfig,
    SpritesConfig, StatusConfig,
};
