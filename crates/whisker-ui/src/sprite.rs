use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthChar;
use whisker_agent::AsciiFrame;

/// Draw `frame` with its top-left corner at `(x, y)`.
///
/// Spaces are transparent so whatever is underneath shows through. Glyphs
/// falling outside `clip` are dropped.
pub fn render_sprite(buf: &mut Buffer, clip: Rect, frame: &AsciiFrame, x: u16, y: u16, style: Style) {
    let clip = clip.intersection(buf.area);
    if clip.is_empty() {
        return;
    }

    for (dy, line) in frame.lines.iter().enumerate() {
        let Some(row) = u16::try_from(dy).ok().and_then(|dy| y.checked_add(dy)) else {
            break;
        };
        if row < clip.top() || row >= clip.bottom() {
            continue;
        }

        let mut col = x;
        for ch in line.chars() {
            let width = ch.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            let fits = col >= clip.left() && col.saturating_add(width) <= clip.right();
            if ch != ' ' && fits {
                if let Some(cell) = buf.cell_mut((col, row)) {
                    cell.set_char(ch);
                    cell.set_style(style);
                }
            }
            col = match col.checked_add(width) {
                Some(next) => next,
                None => break,
            };
        }
    }
}
