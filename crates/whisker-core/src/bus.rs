use std::collections::VecDeque;

use crate::event::Event;

/// FIFO queue between input, console commands and the app loop.
///
/// Each loop iteration publishes what happened (input, console commands, a
/// tick) and then drains the queue and applies it to the cat.
///
/// Ticks and resizes carry absolute values, so only the newest matters: a
/// second one replaces the pending one in place instead of queueing behind it.
/// Control requests and mouse moves are always kept.
#[derive(Default)]
pub struct EventBus {
    queue: VecDeque<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: Event) {
        let slot = match &event {
            Event::Tick { .. } => self
                .queue
                .iter_mut()
                .find(|e| matches!(e, Event::Tick { .. })),
            Event::Resize { .. } => self
                .queue
                .iter_mut()
                .find(|e| matches!(e, Event::Resize { .. })),
            _ => None,
        };
        match slot {
            Some(pending) => *pending = event,
            None => self.queue.push_back(event),
        }
    }

    /// Take every pending event in publish order.
    pub fn drain(&mut self) -> Vec<Event> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ControlRequest;
    use std::time::{Duration, Instant};

    #[test]
    fn drain_empties_the_queue() {
        let mut bus = EventBus::new();
        bus.publish(Event::Control(ControlRequest::Pause));
        bus.publish(Event::Quit);
        assert_eq!(bus.drain().len(), 2);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn control_requests_keep_order() {
        let mut bus = EventBus::new();
        bus.publish(Event::Control(ControlRequest::Sleep));
        bus.publish(Event::Control(ControlRequest::Walk { x: 4.0, y: 2.0 }));
        bus.publish(Event::Control(ControlRequest::Sleep));
        bus.publish(Event::Quit);
        let events = bus.drain();
        assert!(matches!(&events[0], Event::Control(ControlRequest::Sleep)));
        assert!(matches!(
            &events[1],
            Event::Control(ControlRequest::Walk { x, y }) if *x == 4.0 && *y == 2.0
        ));
        assert!(matches!(&events[2], Event::Control(ControlRequest::Sleep)));
        assert!(matches!(&events[3], Event::Quit));
    }

    #[test]
    fn newer_tick_replaces_pending_one() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(32);
        let mut bus = EventBus::new();
        bus.publish(Event::Tick { now: t0 });
        bus.publish(Event::Control(ControlRequest::Wander));
        bus.publish(Event::Tick { now: t1 });

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::Tick { now } if now == t1));
        assert!(matches!(events[1], Event::Control(ControlRequest::Wander)));
    }

    #[test]
    fn only_the_last_resize_survives() {
        let mut bus = EventBus::new();
        bus.publish(Event::Resize { cols: 80, rows: 24 });
        bus.publish(Event::Resize { cols: 100, rows: 30 });
        bus.publish(Event::Resize { cols: 120, rows: 40 });
        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::Resize { cols: 120, rows: 40 }));
    }
}
