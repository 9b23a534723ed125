//! Walking, napping and the random behavior loop.
//!
//! Nothing here sleeps or spawns: every timer is a deadline, and the host
//! drives the controller with [`MovementController::tick`]. Due work is
//! handled in deadline order, so a stalled frame replays exactly what would
//! have happened.
//!
//! The controller owns at most one walk and at most one pending task (a
//! sleep phase or the next scheduler run). Starting a walk or a nap begins a
//! new sequence: whatever was in flight is dropped, so stale timers from an
//! earlier sequence can never fire into a later one.

use std::time::{Duration, Instant};

use tracing::{debug, trace};
use whisker_config::{BehaviorConfig, MovementConfig};

use crate::random::RandomSource;
use crate::types::{
    AgentState, Behavior, BoundsProvider, Direction, Position, SittingVariant, SleepPose,
};

/// What to do once a walk reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterArrival {
    /// Stand still.
    Stop,
    /// Rest a little, then let the scheduler pick again.
    Wander,
}

/// Outcome of one scheduler run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BehaviorChoice {
    Walk { target: Position },
    Sleep,
    /// The cat is paused.
    Skipped,
}

/// Things that happened during a [`MovementController::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementEvent {
    Arrived { target: Position },
    FellAsleep { pose: SleepPose },
    WokeUp,
    Decided(BehaviorChoice),
}

/// Kinds of delayed work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// End of the sit-down transition.
    SleepOnset,
    WakeUp,
    /// Run the scheduler after resting.
    NextBehavior,
}

#[derive(Debug, Clone, Copy)]
struct PendingTask {
    due: Instant,
    kind: TaskKind,
    sequence: u64,
}

#[derive(Debug, Clone, Copy)]
struct Walk {
    target: Position,
    /// Signed offsets at the start of the walk. Only their signs matter.
    dx: f64,
    dy: f64,
    next_tick: Instant,
    then: AfterArrival,
}

enum Due {
    Walk(Instant),
    Task(Instant),
}

pub struct MovementController {
    tick_interval: Duration,
    step: f64,
    behavior: BehaviorConfig,
    rng: Box<dyn RandomSource>,
    walk: Option<Walk>,
    pending: Option<PendingTask>,
    sequence: u64,
}

impl MovementController {
    pub fn new(
        movement: &MovementConfig,
        behavior: &BehaviorConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            tick_interval: Duration::from_millis(movement.tick_ms),
            step: movement.step,
            behavior: behavior.clone(),
            rng,
            walk: None,
            pending: None,
            sequence: 0,
        }
    }

    /// Start walking towards `target`.
    ///
    /// The target is clamped into the current bounds. Any walk or nap in
    /// progress is abandoned. Returns `false` without touching anything when
    /// the cat is paused.
    pub fn walk_to(
        &mut self,
        target: Position,
        then: AfterArrival,
        now: Instant,
        state: &mut AgentState,
        bounds: &dyn BoundsProvider,
    ) -> bool {
        if state.paused {
            return false;
        }

        let b = bounds.bounds();
        let target = b.clamp(target);
        debug!(
            target_x = target.x,
            target_y = target.y,
            from_x = state.position.x,
            from_y = state.position.y,
            min_x = b.min_x,
            max_x = b.max_x,
            min_y = b.min_y,
            max_y = b.max_y,
            "walk started"
        );

        self.begin_sequence();

        let dx = target.x - state.position.x;
        let dy = target.y - state.position.y;
        state.direction = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        state.behavior = Behavior::Walking;

        self.walk = Some(Walk {
            target,
            dx,
            dy,
            next_tick: now + self.tick_interval,
            then,
        });
        true
    }

    /// Begin a nap: sit down, sleep for a while, then pick something new.
    ///
    /// Returns `false` without touching anything when the cat is paused.
    pub fn sleep(&mut self, now: Instant, state: &mut AgentState) -> bool {
        if state.paused {
            return false;
        }

        self.begin_sequence();
        state.behavior = Behavior::Transitioning;
        let due = now + Duration::from_millis(self.behavior.transition_ms);
        self.schedule(due, TaskKind::SleepOnset);
        debug!(sequence = self.sequence, "settling down for a nap");
        true
    }

    /// Pick the next behavior: usually a stroll to somewhere near the middle
    /// of the bounds, otherwise a nap.
    pub fn random_behavior(
        &mut self,
        now: Instant,
        state: &mut AgentState,
        bounds: &dyn BoundsProvider,
    ) -> BehaviorChoice {
        if state.paused {
            return BehaviorChoice::Skipped;
        }

        let choice = self.rng.next_unit();
        if choice < self.behavior.walk_probability {
            let b = bounds.bounds();
            let center = b.center();
            let range_x = b.width() * self.behavior.wander_fraction;
            let range_y = b.height() * self.behavior.wander_fraction;
            let target = Position {
                x: center.x + (self.rng.next_unit() * range_x - range_x / 2.0),
                y: center.y + (self.rng.next_unit() * range_y - range_y / 2.0),
            };
            debug!(choice, target_x = target.x, target_y = target.y, "decided to wander");
            self.walk_to(target, AfterArrival::Wander, now, state, bounds);
            BehaviorChoice::Walk { target }
        } else {
            debug!(choice, "decided to nap");
            self.sleep(now, state);
            BehaviorChoice::Sleep
        }
    }

    /// Run every timer that is due at or before `now`.
    pub fn tick(
        &mut self,
        now: Instant,
        state: &mut AgentState,
        bounds: &dyn BoundsProvider,
    ) -> Vec<MovementEvent> {
        let mut events = Vec::new();

        if self.walk.is_none() {
            let confined = bounds.bounds().clamp(state.position);
            if confined != state.position {
                trace!(x = confined.x, y = confined.y, "bounds shrank; moved cat inside");
                state.position = confined;
            }
        }

        while let Some(due) = self.next_due() {
            match due {
                Due::Walk(at) if at <= now => self.step_walk(at, state, bounds, &mut events),
                Due::Task(at) if at <= now => self.fire_task(at, state, bounds, &mut events),
                _ => break,
            }
        }

        events
    }

    /// Drop the current walk and any pending task.
    ///
    /// Leaves the agent state untouched.
    fn cancel(&mut self) {
        self.walk = None;
        self.pending = None;
    }

    /// Drop everything in flight and stand the cat up.
    pub fn reset(&mut self, state: &mut AgentState) {
        self.begin_sequence();
        state.behavior = Behavior::Idle;
    }

    pub fn is_walking(&self) -> bool {
        self.walk.is_some()
    }

    pub fn walk_target(&self) -> Option<Position> {
        self.walk.map(|w| w.target)
    }

    /// The pending delayed task, if any.
    pub fn pending(&self) -> Option<(Instant, TaskKind)> {
        self.pending.map(|p| (p.due, p.kind))
    }

    /// Identifier of the current walk/nap sequence.
    #[cfg(test)]
    fn sequence(&self) -> u64 {
        self.sequence
    }

    fn begin_sequence(&mut self) {
        self.cancel();
        self.sequence += 1;
    }

    fn schedule(&mut self, due: Instant, kind: TaskKind) {
        self.pending = Some(PendingTask {
            due,
            kind,
            sequence: self.sequence,
        });
    }

    fn next_due(&self) -> Option<Due> {
        match (self.walk.map(|w| w.next_tick), self.pending.map(|p| p.due)) {
            (Some(w), Some(t)) if w <= t => Some(Due::Walk(w)),
            (_, Some(t)) => Some(Due::Task(t)),
            (Some(w), None) => Some(Due::Walk(w)),
            (None, None) => None,
        }
    }

    fn step_walk(
        &mut self,
        at: Instant,
        state: &mut AgentState,
        bounds: &dyn BoundsProvider,
        events: &mut Vec<MovementEvent>,
    ) {
        let Some(mut walk) = self.walk else {
            return;
        };

        if state.paused {
            // Behavior stays `Walking`; resume decides what happens next.
            debug!("walk interrupted by pause");
            self.walk = None;
            return;
        }

        let b = bounds.bounds();
        walk.target = b.clamp(walk.target);
        let target = walk.target;

        let mut pos = state.position;
        pos.x += self.step * sign(walk.dx);
        pos.y += self.step * sign(walk.dy);
        if reached(walk.dx, pos.x, target.x) {
            pos.x = target.x;
        }
        if reached(walk.dy, pos.y, target.y) {
            pos.y = target.y;
        }
        let arrived = pos == target;
        state.position = b.clamp(pos);
        trace!(x = state.position.x, y = state.position.y, "walk tick");

        if !arrived {
            walk.next_tick = at + self.tick_interval;
            self.walk = Some(walk);
            return;
        }

        self.walk = None;
        state.behavior = Behavior::Idle;
        events.push(MovementEvent::Arrived { target });
        debug!(x = target.x, y = target.y, "arrived");

        if walk.then == AfterArrival::Wander {
            let rest = self
                .rng
                .delay(self.behavior.rest_min_ms, self.behavior.rest_max_ms);
            self.schedule(at + rest, TaskKind::NextBehavior);
        }
    }

    fn fire_task(
        &mut self,
        at: Instant,
        state: &mut AgentState,
        bounds: &dyn BoundsProvider,
        events: &mut Vec<MovementEvent>,
    ) {
        let Some(task) = self.pending.take() else {
            return;
        };
        if task.sequence != self.sequence {
            trace!(kind = ?task.kind, "dropping task from an earlier sequence");
            return;
        }
        if state.paused {
            debug!(kind = ?task.kind, "task skipped while paused");
            return;
        }

        match task.kind {
            TaskKind::SleepOnset => {
                state.sleep_pose = if self.rng.coin() {
                    SleepPose::Lying
                } else {
                    SleepPose::Sitting
                };
                state.sitting_variant = if self.rng.coin() {
                    SittingVariant::Second
                } else {
                    SittingVariant::First
                };
                state.behavior = Behavior::Sleeping;
                events.push(MovementEvent::FellAsleep {
                    pose: state.sleep_pose,
                });

                let nap = self
                    .rng
                    .delay(self.behavior.sleep_min_ms, self.behavior.sleep_max_ms);
                debug!(pose = ?state.sleep_pose, nap_ms = nap.as_millis() as u64, "fell asleep");
                self.schedule(at + nap, TaskKind::WakeUp);
            }
            TaskKind::WakeUp => {
                state.behavior = Behavior::Idle;
                events.push(MovementEvent::WokeUp);
                debug!("woke up");
                let choice = self.random_behavior(at, state, bounds);
                events.push(MovementEvent::Decided(choice));
            }
            TaskKind::NextBehavior => {
                let choice = self.random_behavior(at, state, bounds);
                events.push(MovementEvent::Decided(choice));
            }
        }
    }
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Whether an axis moving in the direction of `delta` has reached or passed
/// `target`.
fn reached(delta: f64, pos: f64, target: f64) -> bool {
    (delta > 0.0 && pos >= target) || (delta < 0.0 && pos <= target) || delta == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, ScriptedRandom, SeededRandom};
    use crate::types::Bounds;

    const SCREEN: Bounds = Bounds::new(0.0, 1000.0, 0.0, 800.0);
    const TICK: Duration = Duration::from_millis(32);

    fn controller(rng: impl RandomSource + 'static) -> MovementController {
        MovementController::new(
            &MovementConfig::default(),
            &BehaviorConfig::default(),
            Box::new(rng),
        )
    }

    fn arrivals(events: &[MovementEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, MovementEvent::Arrived { .. }))
            .count()
    }

    #[test]
    fn walk_up_scenario() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(500.0, 400.0));

        assert!(mc.walk_to(Position::new(500.0, 300.0), AfterArrival::Stop, now, &mut state, &SCREEN));
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.behavior, Behavior::Walking);

        let events = mc.tick(now + TICK * 49, &mut state, &SCREEN);
        assert!(events.is_empty());
        assert_eq!(state.position, Position::new(500.0, 302.0));
        assert_eq!(state.behavior, Behavior::Walking);

        let mut events = mc.tick(now + TICK * 50, &mut state, &SCREEN);
        events.extend(mc.tick(now + Duration::from_secs(60), &mut state, &SCREEN));
        assert_eq!(state.position, Position::new(500.0, 300.0));
        assert_eq!(state.behavior, Behavior::Idle);
        assert_eq!(arrivals(&events), 1);
        assert!(!mc.is_walking());
        assert!(mc.pending().is_none(), "a plain walk schedules nothing after arrival");
    }

    #[test]
    fn direction_follows_dominant_axis() {
        let now = Instant::now();
        let cases = [
            ((600.0, 410.0), Direction::Right),
            ((380.0, 390.0), Direction::Left),
            ((505.0, 500.0), Direction::Down),
            ((495.0, 300.0), Direction::Up),
            // Ties go to the vertical axis.
            ((510.0, 410.0), Direction::Down),
            ((490.0, 410.0), Direction::Down),
            ((490.0, 390.0), Direction::Up),
        ];
        for ((x, y), expected) in cases {
            let mut mc = controller(FixedRandom(0.5));
            let mut state = AgentState::at(Position::new(500.0, 400.0));
            mc.walk_to(Position::new(x, y), AfterArrival::Stop, now, &mut state, &SCREEN);
            assert_eq!(state.direction, expected, "target ({x}, {y})");
        }
    }

    #[test]
    fn settles_exactly_on_clamped_target() {
        let mut gen = SeededRandom::new(99);
        for case in 0..200 {
            let min_x = gen.next_range(-500.0, 500.0);
            let min_y = gen.next_range(-500.0, 500.0);
            let bounds = Bounds::new(
                min_x,
                min_x + gen.next_range(0.0, 900.0),
                min_y,
                min_y + gen.next_range(0.0, 900.0),
            );
            let start = bounds.clamp(Position::new(
                gen.next_range(-1000.0, 1000.0),
                gen.next_range(-1000.0, 1000.0),
            ));
            let target = Position::new(gen.next_range(-2000.0, 2000.0), gen.next_range(-2000.0, 2000.0));

            let now = Instant::now();
            let mut mc = controller(FixedRandom(0.5));
            let mut state = AgentState::at(start);
            mc.walk_to(target, AfterArrival::Stop, now, &mut state, &bounds);
            let events = mc.tick(now + Duration::from_secs(3600), &mut state, &bounds);

            assert_eq!(state.position, bounds.clamp(target), "case {case}");
            assert!(bounds.contains(state.position), "case {case}");
            assert_eq!(state.behavior, Behavior::Idle, "case {case}");
            assert_eq!(arrivals(&events), 1, "case {case}");
        }
    }

    #[test]
    fn walk_to_current_position_arrives_on_first_tick() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(10.0, 10.0));
        mc.walk_to(Position::new(10.0, 10.0), AfterArrival::Stop, now, &mut state, &SCREEN);
        assert_eq!(state.direction, Direction::Up);

        let events = mc.tick(now + TICK, &mut state, &SCREEN);
        assert_eq!(arrivals(&events), 1);
        assert_eq!(state.behavior, Behavior::Idle);
    }

    #[test]
    fn new_walk_preempts_old() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(500.0, 400.0));

        mc.walk_to(Position::new(900.0, 400.0), AfterArrival::Stop, now, &mut state, &SCREEN);
        let t1 = now + TICK * 10;
        assert!(mc.tick(t1, &mut state, &SCREEN).is_empty());
        assert_eq!(state.position, Position::new(520.0, 400.0));

        mc.walk_to(Position::new(520.0, 450.0), AfterArrival::Stop, t1, &mut state, &SCREEN);
        assert_eq!(state.direction, Direction::Down);
        let events = mc.tick(now + Duration::from_secs(60), &mut state, &SCREEN);
        assert_eq!(arrivals(&events), 1);
        assert_eq!(
            events[0],
            MovementEvent::Arrived { target: Position::new(520.0, 450.0) }
        );
        assert_eq!(state.position, Position::new(520.0, 450.0));
    }

    #[test]
    fn shrinking_bounds_mid_walk_still_terminates() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(0.0, 0.0));
        mc.walk_to(Position::new(1000.0, 800.0), AfterArrival::Stop, now, &mut state, &SCREEN);
        mc.tick(now + TICK * 5, &mut state, &SCREEN);

        let small = Bounds::new(0.0, 100.0, 0.0, 60.0);
        let events = mc.tick(now + Duration::from_secs(60), &mut state, &small);
        assert_eq!(state.position, Position::new(100.0, 60.0));
        assert_eq!(state.behavior, Behavior::Idle);
        assert_eq!(arrivals(&events), 1);
    }

    #[test]
    fn idle_cat_is_pulled_inside_shrunken_bounds() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(900.0, 700.0));
        mc.tick(now, &mut state, &Bounds::new(0.0, 300.0, 0.0, 200.0));
        assert_eq!(state.position, Position::new(300.0, 200.0));
    }

    #[test]
    fn paused_walk_does_not_start() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(500.0, 400.0));
        state.paused = true;
        assert!(!mc.walk_to(Position::new(0.0, 0.0), AfterArrival::Stop, now, &mut state, &SCREEN));
        assert_eq!(state.behavior, Behavior::Idle);
        assert!(!mc.is_walking());
    }

    #[test]
    fn pause_mid_walk_cancels_without_arrival() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(500.0, 400.0));
        mc.walk_to(Position::new(800.0, 400.0), AfterArrival::Wander, now, &mut state, &SCREEN);
        mc.tick(now + TICK * 3, &mut state, &SCREEN);
        let frozen_at = state.position;

        state.paused = true;
        let events = mc.tick(now + TICK * 4, &mut state, &SCREEN);
        assert!(events.is_empty());
        assert!(!mc.is_walking());
        assert_eq!(state.position, frozen_at);
        assert_eq!(state.behavior, Behavior::Walking);

        state.paused = false;
        let events = mc.tick(now + Duration::from_secs(60), &mut state, &SCREEN);
        assert!(events.is_empty());
        assert_eq!(state.position, frozen_at);
        assert!(mc.pending().is_none());
    }

    #[test]
    fn sleep_sequence_runs_to_next_behavior() {
        let now = Instant::now();
        // pose coin, variant coin, nap length, scheduler choice
        let mut mc = controller(ScriptedRandom::new(vec![0.9, 0.2, 0.0, 0.95]));
        let mut state = AgentState::at(Position::new(500.0, 400.0));

        assert!(mc.sleep(now, &mut state));
        assert_eq!(state.behavior, Behavior::Transitioning);

        assert!(mc.tick(now + Duration::from_millis(1199), &mut state, &SCREEN).is_empty());
        assert_eq!(state.behavior, Behavior::Transitioning);

        let events = mc.tick(now + Duration::from_millis(1200), &mut state, &SCREEN);
        assert_eq!(events, vec![MovementEvent::FellAsleep { pose: SleepPose::Lying }]);
        assert_eq!(state.behavior, Behavior::Sleeping);
        assert_eq!(state.sleep_pose, SleepPose::Lying);
        assert_eq!(state.sitting_variant, SittingVariant::First);

        assert!(mc.tick(now + Duration::from_millis(6199), &mut state, &SCREEN).is_empty());
        assert_eq!(state.behavior, Behavior::Sleeping);

        let events = mc.tick(now + Duration::from_millis(6200), &mut state, &SCREEN);
        assert_eq!(
            events,
            vec![MovementEvent::WokeUp, MovementEvent::Decided(BehaviorChoice::Sleep)]
        );
        assert_eq!(state.behavior, Behavior::Transitioning);
        assert_eq!(mc.pending().map(|(_, kind)| kind), Some(TaskKind::SleepOnset));
    }

    #[test]
    fn nap_length_stays_in_range() {
        let now = Instant::now();
        let mut mc = controller(ScriptedRandom::new(vec![0.1, 0.1, 0.999]));
        let mut state = AgentState::default();
        mc.sleep(now, &mut state);
        let onset = now + Duration::from_millis(1200);
        mc.tick(onset, &mut state, &SCREEN);

        let (wake_at, kind) = mc.pending().unwrap();
        assert_eq!(kind, TaskKind::WakeUp);
        let nap = wake_at - onset;
        assert!(nap >= Duration::from_millis(5000) && nap < Duration::from_millis(10000), "{nap:?}");
    }

    #[test]
    fn pause_before_sleep_changes_nothing() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(500.0, 400.0));
        state.paused = true;

        assert!(!mc.sleep(now, &mut state));
        assert_eq!(state.behavior, Behavior::Idle);
        assert!(mc.tick(now + Duration::from_secs(60), &mut state, &SCREEN).is_empty());
        assert_eq!(state.behavior, Behavior::Idle);
        assert!(mc.pending().is_none());
    }

    #[test]
    fn pause_during_nap_strands_the_sequence() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::default();
        mc.sleep(now, &mut state);

        state.paused = true;
        assert!(mc.tick(now + Duration::from_secs(30), &mut state, &SCREEN).is_empty());
        assert_eq!(state.behavior, Behavior::Transitioning);
        assert!(mc.pending().is_none());

        state.paused = false;
        assert!(mc.tick(now + Duration::from_secs(60), &mut state, &SCREEN).is_empty());
        assert_eq!(state.behavior, Behavior::Transitioning);
    }

    #[test]
    fn walk_during_nap_discards_sleep_timers() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(500.0, 400.0));
        mc.sleep(now, &mut state);
        let nap_sequence = mc.sequence();

        let t1 = now + Duration::from_millis(500);
        mc.walk_to(Position::new(510.0, 400.0), AfterArrival::Stop, t1, &mut state, &SCREEN);
        assert!(mc.sequence() > nap_sequence);

        let events = mc.tick(now + Duration::from_secs(30), &mut state, &SCREEN);
        assert_eq!(arrivals(&events), 1);
        assert!(!events.iter().any(|e| matches!(e, MovementEvent::FellAsleep { .. })));
        assert_eq!(state.behavior, Behavior::Idle);
        assert_eq!(state.position, Position::new(510.0, 400.0));
    }

    #[test]
    fn nap_during_walk_stops_walking() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.5));
        let mut state = AgentState::at(Position::new(500.0, 400.0));
        mc.walk_to(Position::new(900.0, 400.0), AfterArrival::Wander, now, &mut state, &SCREEN);
        mc.tick(now + TICK * 2, &mut state, &SCREEN);

        mc.sleep(now + TICK * 2, &mut state);
        assert!(!mc.is_walking());
        let events = mc.tick(now + TICK * 40, &mut state, &SCREEN);
        assert_eq!(events, vec![MovementEvent::FellAsleep { pose: SleepPose::Sitting }]);
        assert_eq!(state.position, Position::new(504.0, 400.0));
    }

    #[test]
    fn scheduler_always_sleeps_above_walk_probability() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.9));
        let mut state = AgentState::at(Position::new(500.0, 400.0));
        for i in 0..1000 {
            let at = now + Duration::from_millis(i);
            assert_eq!(mc.random_behavior(at, &mut state, &SCREEN), BehaviorChoice::Sleep);
            assert!(!mc.is_walking());
            assert_eq!(state.behavior, Behavior::Transitioning);
        }
    }

    #[test]
    fn scheduler_skips_when_paused() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.1));
        let mut state = AgentState::default();
        state.paused = true;
        assert_eq!(mc.random_behavior(now, &mut state, &SCREEN), BehaviorChoice::Skipped);
        assert_eq!(state.behavior, Behavior::Idle);
    }

    #[test]
    fn wander_targets_stay_in_central_rectangle() {
        let now = Instant::now();
        let mut mc = controller(SeededRandom::new(3));
        let mut state = AgentState::at(Position::new(500.0, 400.0));
        let mut walks = 0;
        for i in 0..500 {
            state.behavior = Behavior::Idle;
            let at = now + Duration::from_millis(i);
            if let BehaviorChoice::Walk { target } = mc.random_behavior(at, &mut state, &SCREEN) {
                walks += 1;
                assert!((250.0..=750.0).contains(&target.x), "x = {}", target.x);
                assert!((200.0..=600.0).contains(&target.y), "y = {}", target.y);
                assert_eq!(mc.walk_target(), Some(target));
            }
        }
        assert!(walks > 250, "expected roughly 70% walks, got {walks}");
    }

    #[test]
    fn wander_corner_values() {
        let now = Instant::now();
        let mut state = AgentState::at(Position::new(500.0, 400.0));
        let mut mc = controller(FixedRandom(0.0));
        assert_eq!(
            mc.random_behavior(now, &mut state, &SCREEN),
            BehaviorChoice::Walk { target: Position::new(250.0, 200.0) }
        );
    }

    #[test]
    fn wander_rests_then_decides_again() {
        let now = Instant::now();
        // choice, x, y, rest, choice (nap)
        let mut mc = controller(ScriptedRandom::new(vec![0.1, 0.5, 0.5, 0.0, 0.8]));
        let mut state = AgentState::at(Position::new(496.0, 400.0));

        let choice = mc.random_behavior(now, &mut state, &SCREEN);
        assert_eq!(choice, BehaviorChoice::Walk { target: Position::new(500.0, 400.0) });
        assert_eq!(state.direction, Direction::Right);

        let events = mc.tick(now + TICK * 2, &mut state, &SCREEN);
        assert_eq!(arrivals(&events), 1);
        let (due, kind) = mc.pending().unwrap();
        assert_eq!(kind, TaskKind::NextBehavior);
        assert_eq!(due, now + TICK * 2 + Duration::from_millis(1000));

        let events = mc.tick(due, &mut state, &SCREEN);
        assert_eq!(events, vec![MovementEvent::Decided(BehaviorChoice::Sleep)]);
        assert_eq!(state.behavior, Behavior::Transitioning);
    }

    #[test]
    fn pause_before_first_tick_cancels_wander() {
        let now = Instant::now();
        let mut mc = controller(FixedRandom(0.0));
        let mut state = AgentState::at(Position::new(500.0, 400.0));
        mc.walk_to(Position::new(502.0, 400.0), AfterArrival::Wander, now, &mut state, &SCREEN);
        state.paused = true;
        mc.tick(now + TICK, &mut state, &SCREEN);
        assert!(mc.pending().is_none());
    }
}
