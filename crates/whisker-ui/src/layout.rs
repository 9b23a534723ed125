use ratatui::layout::{Constraint, Direction, Layout, Rect};
use whisker_agent::{Bounds, Position};

#[derive(Debug, Clone, Copy)]
pub struct OverlayRects {
    pub top: Rect,
    /// Where the cat roams.
    pub field: Rect,
    pub hud: Rect,
}

pub fn overlay_layout(area: Rect) -> OverlayRects {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // top bar
            Constraint::Min(1),    // field
            Constraint::Length(1), // hud
        ])
        .split(area);

    OverlayRects {
        top: chunks[0],
        field: chunks[1],
        hud: chunks[2],
    }
}

/// Size of one terminal cell in movement units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl CellMetrics {
    /// Bounds for the sprite's top-left corner so a `sprite_w`×`sprite_h`
    /// sprite stays fully inside `field`.
    ///
    /// A field smaller than the sprite collapses to the origin.
    pub fn field_bounds(&self, field: Rect, sprite_w: u16, sprite_h: u16) -> Bounds {
        let cols = field.width.saturating_sub(sprite_w);
        let rows = field.height.saturating_sub(sprite_h);
        Bounds::new(
            0.0,
            f64::from(cols) * self.cell_width,
            0.0,
            f64::from(rows) * self.cell_height,
        )
    }

    /// Terminal cell under `pos`, relative to `field`.
    pub fn to_cell(&self, field: Rect, pos: Position) -> (u16, u16) {
        let col = (pos.x / self.cell_width).round().max(0.0);
        let row = (pos.y / self.cell_height).round().max(0.0);
        (
            field.x.saturating_add(col.min(f64::from(u16::MAX)) as u16),
            field.y.saturating_add(row.min(f64::from(u16::MAX)) as u16),
        )
    }
}
