use anyhow::{bail, Result};
use unicode_width::UnicodeWidthStr;

use crate::animation::rows;

/// A single text-art animation frame.
///
/// Spaces are transparent when drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiFrame {
    pub lines: Vec<String>,
    /// Display width of the widest line, in terminal cells.
    pub width: u16,
    pub height: u16,
}

impl AsciiFrame {
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let lines: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
        let width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
        Self {
            width: width.min(u16::MAX as usize) as u16,
            height: lines.len().min(u16::MAX as usize) as u16,
            lines,
        }
    }
}

/// A complete sprite sheet: per-row animation frames.
///
/// Only [`SpriteSheet::new`] builds one, so every sheet has all
/// [`rows::COUNT`] rows and no row is empty.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    /// Frames indexed by `[row][frame_index]`, see [`rows`].
    rows: Vec<Vec<AsciiFrame>>,
    frame_width: u16,
    frame_height: u16,
}

impl SpriteSheet {
    /// Build a sheet, checking that every row exists and has frames.
    pub fn new(rows: Vec<Vec<AsciiFrame>>) -> Result<Self> {
        if rows.len() != rows::COUNT {
            bail!(
                "sprite sheet has {} rows, expected {}",
                rows.len(),
                rows::COUNT
            );
        }
        for (i, row) in rows.iter().enumerate() {
            if row.is_empty() {
                bail!("sprite sheet row {i} has no frames");
            }
            if let Some(j) = row.iter().position(|f| f.lines.is_empty()) {
                bail!("sprite sheet row {i} frame {j} is empty");
            }
        }

        let frames = rows.iter().flatten();
        let frame_width = frames.clone().map(|f| f.width).max().unwrap_or(0);
        let frame_height = frames.map(|f| f.height).max().unwrap_or(0);

        Ok(Self {
            rows,
            frame_width,
            frame_height,
        })
    }

    /// Frame `index` of `row`, wrapping when the row is shorter than the
    /// animation asks for. Out-of-range rows use the last row.
    pub fn frame(&self, row: usize, index: usize) -> &AsciiFrame {
        let row = &self.rows[row.min(rows::COUNT - 1)];
        &row[index % row.len()]
    }

    /// Frames in `row`, or an empty slice for an unknown row.
    pub fn row(&self, row: usize) -> &[AsciiFrame] {
        self.rows.get(row).map_or(&[], Vec::as_slice)
    }

    /// Bounding box of every frame, in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (self.frame_width, self.frame_height)
    }
}
