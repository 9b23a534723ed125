use std::time::Instant;

/// Pet commands raised by the console or key bindings and applied by the
/// host, which owns the cat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlRequest {
    Pause,
    Resume,
    Sleep,
    /// Walk to a point in movement units.
    Walk { x: f64, y: f64 },
    /// Hand control back to the random behavior loop.
    Wander,
    /// Log the current state and status to the console.
    Report,
    /// `None` toggles.
    SetInteractive(Option<bool>),
}

#[derive(Debug, Clone)]
pub enum Event {
    Tick { now: Instant },
    Mouse(crossterm::event::MouseEvent),
    Resize { cols: u16, rows: u16 },
    Control(ControlRequest),
    Quit,
}
