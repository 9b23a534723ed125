//! Runtime plumbing shared by the whisker host and its UI.
//!
//! An event bus, the drop-down console and its command set, logging setup,
//! a loop-rate counter and host-side state. Nothing here knows about cats;
//! pet commands travel as [`event::ControlRequest`]s.

pub mod bus;
pub mod command;
pub mod console;
pub mod event;
pub mod fps;
pub mod logging;
pub mod state;
