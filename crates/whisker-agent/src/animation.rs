//! Sprite row selection and frame cycling.
//!
//! [`select`] is a pure function of the agent state and is safe to call on
//! every render frame. [`AnimationClock`] walks through the frames of the
//! selected row on a timer.

use std::time::{Duration, Instant};

use crate::random::RandomSource;
use crate::types::{AgentState, Behavior, Direction, SittingVariant, SleepPose};

/// Sprite sheet row indices.
pub mod rows {
    pub const WALK_DOWN: usize = 0;
    pub const WALK_RIGHT: usize = 1;
    pub const WALK_UP: usize = 2;
    pub const WALK_LEFT: usize = 3;
    pub const SLEEP_SITTING_1: usize = 4;
    pub const SLEEP_SITTING_2: usize = 5;
    pub const TRANSITIONING: usize = 6;
    pub const SLEEP_LYING: usize = 7;

    /// Total number of rows in a sheet.
    pub const COUNT: usize = 8;
}

/// Which sprite-sheet cell sequence to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    pub row: usize,
    pub frame_count: usize,
}

pub fn frame_count(behavior: Behavior) -> usize {
    match behavior {
        Behavior::Walking | Behavior::Transitioning => 4,
        Behavior::Sleeping => 2,
        Behavior::Idle => 1,
    }
}

/// Walk row for a direction. Idle reuses it and shows only frame 0.
pub fn direction_row(direction: Direction) -> usize {
    match direction {
        Direction::Down => rows::WALK_DOWN,
        Direction::Right => rows::WALK_RIGHT,
        Direction::Up => rows::WALK_UP,
        Direction::Left => rows::WALK_LEFT,
    }
}

fn sitting_row(variant: SittingVariant) -> usize {
    match variant {
        SittingVariant::First => rows::SLEEP_SITTING_1,
        SittingVariant::Second => rows::SLEEP_SITTING_2,
    }
}

/// Pick the row and frame count for the current state.
///
/// The sitting row comes from the variant chosen when the nap started, so
/// repeated calls with the same state always agree.
pub fn select(state: &AgentState) -> AnimationFrame {
    let row = match state.behavior {
        Behavior::Walking | Behavior::Idle => direction_row(state.direction),
        Behavior::Sleeping => match state.sleep_pose {
            SleepPose::Sitting => sitting_row(state.sitting_variant),
            SleepPose::Lying => rows::SLEEP_LYING,
        },
        Behavior::Transitioning => rows::TRANSITIONING,
    };
    AnimationFrame {
        row,
        frame_count: frame_count(state.behavior),
    }
}

/// Like [`select`], but re-flips the sitting row on every call.
///
/// Produces a restless flicker between the two sitting poses.
pub fn select_flickering(state: &AgentState, rng: &mut dyn RandomSource) -> AnimationFrame {
    let mut frame = select(state);
    if state.behavior == Behavior::Sleeping && state.sleep_pose == SleepPose::Sitting {
        frame.row = if rng.coin() {
            rows::SLEEP_SITTING_1
        } else {
            rows::SLEEP_SITTING_2
        };
    }
    frame
}

/// Cycles frame indices within the current row.
pub struct AnimationClock {
    current: AnimationFrame,
    frame_index: usize,
    frame_interval: Duration,
    last_advance: Instant,
}

impl AnimationClock {
    pub fn new(frame_interval: Duration, now: Instant) -> Self {
        Self {
            current: AnimationFrame {
                row: rows::WALK_DOWN,
                frame_count: 1,
            },
            frame_index: 0,
            frame_interval,
            last_advance: now,
        }
    }

    /// Switch to `frame`, restarting at frame 0 when the row changes.
    ///
    /// A flickering sitting row does not count as a change, otherwise the
    /// nap animation would never get past its first frame.
    pub fn show(&mut self, frame: AnimationFrame, now: Instant) {
        if frame == self.current {
            return;
        }
        let same_nap = is_sitting(frame.row) && is_sitting(self.current.row);
        self.current = frame;
        if same_nap {
            self.frame_index %= frame.frame_count.max(1);
            return;
        }
        self.frame_index = 0;
        self.last_advance = now;
    }

    /// Advance the clock, catching up if several intervals have passed.
    pub fn tick(&mut self, now: Instant) {
        let count = self.current.frame_count.max(1);
        if let Some(mut dt) = now.checked_duration_since(self.last_advance) {
            while dt >= self.frame_interval {
                self.frame_index = (self.frame_index + 1) % count;
                self.last_advance += self.frame_interval;
                dt -= self.frame_interval;
            }
        }
    }

    pub fn current(&self) -> AnimationFrame {
        self.current
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }
}

fn is_sitting(row: usize) -> bool {
    row == rows::SLEEP_SITTING_1 || row == rows::SLEEP_SITTING_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, ScriptedRandom};

    fn state(behavior: Behavior, direction: Direction, pose: SleepPose) -> AgentState {
        AgentState {
            behavior,
            direction,
            sleep_pose: pose,
            ..AgentState::default()
        }
    }

    #[test]
    fn frame_counts_per_behavior() {
        assert_eq!(frame_count(Behavior::Walking), 4);
        assert_eq!(frame_count(Behavior::Transitioning), 4);
        assert_eq!(frame_count(Behavior::Sleeping), 2);
        assert_eq!(frame_count(Behavior::Idle), 1);
    }

    #[test]
    fn walking_and_idle_follow_direction() {
        for (direction, row) in [
            (Direction::Down, 0),
            (Direction::Right, 1),
            (Direction::Up, 2),
            (Direction::Left, 3),
        ] {
            let walking = select(&state(Behavior::Walking, direction, SleepPose::Sitting));
            assert_eq!(walking, AnimationFrame { row, frame_count: 4 });
            let idle = select(&state(Behavior::Idle, direction, SleepPose::Sitting));
            assert_eq!(idle, AnimationFrame { row, frame_count: 1 });
        }
    }

    #[test]
    fn unrecognised_direction_uses_down_row() {
        let direction = "north-north-west".parse().unwrap_or_default();
        let frame = select(&state(Behavior::Walking, direction, SleepPose::Sitting));
        assert_eq!(frame.row, rows::WALK_DOWN);
    }

    #[test]
    fn sleeping_rows() {
        let mut s = state(Behavior::Sleeping, Direction::Left, SleepPose::Lying);
        assert_eq!(select(&s).row, rows::SLEEP_LYING);

        s.sleep_pose = SleepPose::Sitting;
        s.sitting_variant = SittingVariant::First;
        assert_eq!(select(&s).row, rows::SLEEP_SITTING_1);
        s.sitting_variant = SittingVariant::Second;
        assert_eq!(select(&s).row, rows::SLEEP_SITTING_2);
    }

    #[test]
    fn transitioning_row() {
        let frame = select(&state(Behavior::Transitioning, Direction::Up, SleepPose::Lying));
        assert_eq!(frame, AnimationFrame { row: rows::TRANSITIONING, frame_count: 4 });
    }

    #[test]
    fn every_combination_is_in_range() {
        let mut rng = ScriptedRandom::new(vec![0.2, 0.8]);
        for behavior in Behavior::ALL {
            for direction in Direction::ALL {
                for pose in [SleepPose::Sitting, SleepPose::Lying] {
                    for variant in [SittingVariant::First, SittingVariant::Second] {
                        let mut s = state(behavior, direction, pose);
                        s.sitting_variant = variant;
                        for frame in [select(&s), select_flickering(&s, &mut rng)] {
                            assert!(frame.row < rows::COUNT, "{s:?} -> {frame:?}");
                            assert!([1, 2, 4].contains(&frame.frame_count), "{s:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn select_is_idempotent() {
        for behavior in Behavior::ALL {
            for direction in Direction::ALL {
                let s = state(behavior, direction, SleepPose::Sitting);
                assert_eq!(select(&s), select(&s));
            }
        }
    }

    #[test]
    fn flicker_only_touches_sitting_naps() {
        let s = state(Behavior::Sleeping, Direction::Down, SleepPose::Sitting);
        assert_eq!(select_flickering(&s, &mut FixedRandom(0.9)).row, rows::SLEEP_SITTING_1);
        assert_eq!(select_flickering(&s, &mut FixedRandom(0.1)).row, rows::SLEEP_SITTING_2);

        let lying = state(Behavior::Sleeping, Direction::Down, SleepPose::Lying);
        assert_eq!(select_flickering(&lying, &mut FixedRandom(0.9)).row, rows::SLEEP_LYING);
    }

    #[test]
    fn clock_cycles_and_wraps() {
        let now = Instant::now();
        let mut clock = AnimationClock::new(Duration::from_millis(200), now);
        clock.show(AnimationFrame { row: rows::WALK_UP, frame_count: 4 }, now);

        for (step, expected) in [0usize, 1, 2, 3, 0, 1].iter().enumerate() {
            assert_eq!(clock.frame_index(), *expected, "step {step}");
            clock.tick(now + Duration::from_millis(200 * (step as u64 + 1)));
        }
    }

    #[test]
    fn clock_row_change_resets_frame() {
        let now = Instant::now();
        let mut clock = AnimationClock::new(Duration::from_millis(200), now);
        clock.show(AnimationFrame { row: rows::WALK_UP, frame_count: 4 }, now);
        let t1 = now + Duration::from_millis(400);
        clock.tick(t1);
        assert_eq!(clock.frame_index(), 2);

        clock.show(AnimationFrame { row: rows::TRANSITIONING, frame_count: 4 }, t1);
        assert_eq!(clock.frame_index(), 0);
        assert_eq!(clock.current().row, rows::TRANSITIONING);

        // Interval restarts from the row change.
        clock.tick(t1 + Duration::from_millis(199));
        assert_eq!(clock.frame_index(), 0);
    }

    #[test]
    fn clock_same_frame_is_noop() {
        let now = Instant::now();
        let mut clock = AnimationClock::new(Duration::from_millis(200), now);
        let walk = AnimationFrame { row: rows::WALK_LEFT, frame_count: 4 };
        clock.show(walk, now);
        clock.tick(now + Duration::from_millis(200));
        clock.show(walk, now + Duration::from_millis(250));
        assert_eq!(clock.frame_index(), 1);
    }

    #[test]
    fn clock_keeps_frame_across_sitting_flicker() {
        let now = Instant::now();
        let mut clock = AnimationClock::new(Duration::from_millis(200), now);
        clock.show(AnimationFrame { row: rows::SLEEP_SITTING_1, frame_count: 2 }, now);
        let t1 = now + Duration::from_millis(200);
        clock.tick(t1);
        assert_eq!(clock.frame_index(), 1);

        clock.show(AnimationFrame { row: rows::SLEEP_SITTING_2, frame_count: 2 }, t1);
        assert_eq!(clock.frame_index(), 1);
        clock.tick(t1 + Duration::from_millis(200));
        assert_eq!(clock.frame_index(), 0);
    }

    #[test]
    fn clock_catches_up_on_long_gap() {
        let now = Instant::now();
        let mut clock = AnimationClock::new(Duration::from_millis(200), now);
        clock.show(AnimationFrame { row: rows::WALK_DOWN, frame_count: 4 }, now);
        clock.tick(now + Duration::from_millis(650));
        assert_eq!(clock.frame_index(), 3);
    }
}
