use std::fmt;
use std::str::FromStr;

/// Which way the cat is facing.
///
/// Variant order matches the walk rows of the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Down = 0,
    Right = 1,
    Up = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Left => "left",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "down" => Ok(Direction::Down),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "left" => Ok(Direction::Left),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level state of the cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Behavior {
    #[default]
    Idle,
    Walking,
    Sleeping,
    /// Settling down between walking and sleeping.
    Transitioning,
}

impl Behavior {
    pub const ALL: [Behavior; 4] = [
        Behavior::Idle,
        Behavior::Walking,
        Behavior::Sleeping,
        Behavior::Transitioning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Behavior::Idle => "idle",
            Behavior::Walking => "walking",
            Behavior::Sleeping => "sleeping",
            Behavior::Transitioning => "transitioning",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the cat sleeps. Only meaningful while [`Behavior::Sleeping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SleepPose {
    #[default]
    Sitting,
    Lying,
}

impl SleepPose {
    pub fn as_str(self) -> &'static str {
        match self {
            SleepPose::Sitting => "sitting",
            SleepPose::Lying => "lying",
        }
    }
}

impl fmt::Display for SleepPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two sitting rows a nap uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SittingVariant {
    #[default]
    First,
    Second,
}

/// A point in movement units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The rectangle the cat is confined to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub const fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Clamp a point into the rectangle.
    ///
    /// Uses `min` then `max` rather than `f64::clamp` so a collapsed
    /// rectangle (max below min) pins to the minimum instead of panicking.
    pub fn clamp(&self, p: Position) -> Position {
        Position {
            x: p.x.min(self.max_x).max(self.min_x),
            y: p.y.min(self.max_y).max(self.min_y),
        }
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn center(&self) -> Position {
        Position {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Source of the current bounds.
///
/// Queried on every use rather than cached, since the host window can be
/// resized at any time.
pub trait BoundsProvider {
    fn bounds(&self) -> Bounds;
}

impl BoundsProvider for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}

/// Everything the renderer needs to know about the cat.
///
/// Owned by [`crate::Cat`]. Only the movement controller writes
/// `direction`, `behavior`, `sleep_pose`, `sitting_variant` and `position`;
/// everything else reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgentState {
    pub direction: Direction,
    pub behavior: Behavior,
    pub sleep_pose: SleepPose,
    pub sitting_variant: SittingVariant,
    pub position: Position,
    pub paused: bool,
}

impl AgentState {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}
