use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level pet configuration loaded from `config.toml`.
///
/// Every section is optional; missing fields fall back to the defaults the
/// cat was tuned with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PetConfig {
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub movement: MovementConfig,
    pub behavior: BehaviorConfig,
    pub status: StatusConfig,
    pub animation: AnimationConfig,
    pub display: DisplayConfig,
    pub sprites: SpritesConfig,
}

/// Walk interpolation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovementConfig {
    /// Interval between movement ticks.
    pub tick_ms: u64,
    /// Distance advanced per axis per tick.
    pub step: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            tick_ms: 32,
            step: 2.0,
        }
    }
}

/// Random behavior scheduler tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Probability that the scheduler picks a walk over a nap.
    pub walk_probability: f64,
    /// Fraction of the bounds (per axis, centred) that wander targets are
    /// drawn from.
    pub wander_fraction: f64,
    pub rest_min_ms: u64,
    pub rest_max_ms: u64,
    /// Length of the sit-down animation before sleep proper.
    pub transition_ms: u64,
    pub sleep_min_ms: u64,
    pub sleep_max_ms: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            walk_probability: 0.7,
            wander_fraction: 0.5,
            rest_min_ms: 1000,
            rest_max_ms: 3000,
            transition_ms: 1200,
            sleep_min_ms: 5000,
            sleep_max_ms: 10000,
        }
    }
}

/// Happiness/energy update rates.
///
/// Rates are applied once per `interval_ms`. The floors and ceilings they
/// clamp against are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusConfig {
    pub interval_ms: u64,
    pub initial_happiness: f64,
    pub initial_energy: f64,
    pub sleep_energy_gain: f64,
    pub sleep_happiness_loss: f64,
    pub walk_energy_loss: f64,
    pub walk_happiness_gain: f64,
    /// Applied while idle or sitting down.
    pub idle_happiness_loss: f64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            initial_happiness: 85.0,
            initial_energy: 70.0,
            sleep_energy_gain: 0.5,
            sleep_happiness_loss: 0.1,
            walk_energy_loss: 0.2,
            walk_happiness_gain: 0.1,
            idle_happiness_loss: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Time each sprite frame stays on screen.
    pub frame_ms: u64,
    /// Re-pick the sitting pose on every frame instead of once per nap.
    pub sitting_flicker: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_ms: 200,
            sitting_flicker: false,
        }
    }
}

/// How terminal cells map onto movement units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub cell_width: f64,
    pub cell_height: f64,
    /// Start with the pointer passing through the overlay.
    pub ignore_mouse: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
            ignore_mouse: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpritesConfig {
    /// JSON sprite sheet replacing the embedded cat.
    pub path: Option<PathBuf>,
}

impl PetConfig {
    /// Parse and validate config TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse pet config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read pet config at {}", path.display()))?;

        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid pet config at {}", path.display()))
    }

    /// Load from [`config_path`], falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate semantic constraints that serde can't express.
    pub fn validate(&self) -> Result<()> {
        validate_positive_ms("movement.tick_ms", self.movement.tick_ms)?;
        validate_positive("movement.step", self.movement.step)?;

        let b = &self.behavior;
        validate_unit("behavior.walk_probability", b.walk_probability)?;
        validate_unit("behavior.wander_fraction", b.wander_fraction)?;
        validate_range("behavior.rest", b.rest_min_ms, b.rest_max_ms)?;
        validate_positive_ms("behavior.transition_ms", b.transition_ms)?;
        validate_range("behavior.sleep", b.sleep_min_ms, b.sleep_max_ms)?;

        validate_positive_ms("status.interval_ms", self.status.interval_ms)?;
        validate_percent("status.initial_happiness", self.status.initial_happiness)?;
        validate_percent("status.initial_energy", self.status.initial_energy)?;
        let s = &self.status;
        for (field, rate) in [
            ("status.sleep_energy_gain", s.sleep_energy_gain),
            ("status.sleep_happiness_loss", s.sleep_happiness_loss),
            ("status.walk_energy_loss", s.walk_energy_loss),
            ("status.walk_happiness_gain", s.walk_happiness_gain),
            ("status.idle_happiness_loss", s.idle_happiness_loss),
        ] {
            validate_rate(field, rate)?;
        }

        validate_positive_ms("animation.frame_ms", self.animation.frame_ms)?;
        validate_positive("display.cell_width", self.display.cell_width)?;
        validate_positive("display.cell_height", self.display.cell_height)?;

        Ok(())
    }
}

/// Return the config file path.
///
/// Precedence: `WHISKER_CONFIG` env var > `<config_dir>/whisker/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("WHISKER_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("whisker").join("config.toml"))
}

fn validate_positive_ms(field: &str, value: u64) -> Result<()> {
    if value == 0 {
        bail!("{field} must be greater than zero");
    }
    Ok(())
}

fn validate_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{field} must be a positive number, got {value}");
    }
    Ok(())
}

fn validate_unit(field: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        bail!("{field} must be within [0, 1], got {value}");
    }
    Ok(())
}

fn validate_percent(field: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        bail!("{field} must be within [0, 100], got {value}");
    }
    Ok(())
}

fn validate_rate(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        bail!("{field} must be within [0, 100], got {value}");
    }
    Ok(())
}

fn validate_range(field: &str, min_ms: u64, max_ms: u64) -> Result<()> {
    if min_ms > max_ms {
        bail!("{field}_min_ms ({min_ms}) must not exceed {field}_max_ms ({max_ms})");
    }
    Ok(())
}
