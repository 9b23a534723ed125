//! Terminal rendering for the whisker cat.
//!
//! Draws the playfield the cat roams, a one-line HUD and the console
//! overlay. All rendering goes through [`ratatui`]; this crate only reads
//! state owned by [`whisker_agent`] and [`whisker_core`].

pub mod console;
pub mod layout;
pub mod shell;
pub mod sprite;
