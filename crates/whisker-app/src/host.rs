use std::io::Write;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use ratatui::layout::Rect;
use whisker_agent::{Bounds, BoundsProvider, Position};
use whisker_config::DisplayConfig;
use whisker_ui::layout::{overlay_layout, CellMetrics};

/// The terminal as the cat's window: the field it may roam, in movement
/// units, recomputed whenever the terminal is resized.
pub struct HostWindow {
    field: Rect,
    metrics: CellMetrics,
    sprite_width: u16,
    sprite_height: u16,
}

impl HostWindow {
    pub fn new(display: &DisplayConfig, cols: u16, rows: u16, sprite: (u16, u16)) -> Self {
        let mut window = Self {
            field: Rect::default(),
            metrics: CellMetrics {
                cell_width: display.cell_width,
                cell_height: display.cell_height,
            },
            sprite_width: sprite.0,
            sprite_height: sprite.1,
        };
        window.resize(cols, rows);
        window
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.field = overlay_layout(Rect::new(0, 0, cols, rows)).field;
    }

    pub fn field(&self) -> Rect {
        self.field
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Screen cells covered by a sprite drawn at `pos`.
    pub fn sprite_rect(&self, pos: Position) -> Rect {
        let (x, y) = self.metrics.to_cell(self.field, pos);
        Rect::new(x, y, self.sprite_width, self.sprite_height)
    }

    /// Whether the pointer at `(col, row)` is over the cat.
    pub fn hit(&self, pos: Position, col: u16, row: u16) -> bool {
        let rect = self.sprite_rect(pos);
        col >= rect.left() && col < rect.right() && row >= rect.top() && row < rect.bottom()
    }
}

impl BoundsProvider for HostWindow {
    fn bounds(&self) -> Bounds {
        self.metrics
            .field_bounds(self.field, self.sprite_width, self.sprite_height)
    }
}

/// Let the pointer pass through the overlay (`true`) or deliver it to us.
pub fn set_ignore_mouse_events(out: &mut impl Write, ignore: bool) -> Result<()> {
    if ignore {
        execute!(out, DisableMouseCapture).context("failed to release the mouse")
    } else {
        execute!(out, EnableMouseCapture).context("failed to capture the mouse")
    }
}
