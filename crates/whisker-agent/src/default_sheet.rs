use anyhow::Result;

use crate::sprite::{AsciiFrame, SpriteSheet};

fn frame(lines: &[&str]) -> AsciiFrame {
    AsciiFrame::from_lines(lines)
}

/// Build the embedded default cat.
///
/// Row order follows [`crate::animation::rows`].
pub(crate) fn load_default_sheet() -> Result<SpriteSheet> {
    SpriteSheet::new(vec![
        // walk down
        vec![
            frame(&[" /\\_/\\ ", "( o.o )", " /   \\ "]),
            frame(&[" /\\_/\\ ", "( o.o )", " |   / "]),
            frame(&[" /\\_/\\ ", "( o.o )", " /   \\ "]),
            frame(&[" /\\_/\\ ", "( o.o )", " \\   | "]),
        ],
        // walk right
        vec![
            frame(&["   /\\_/\\", "~(  o.o)", "  /  \\  "]),
            frame(&["   /\\_/\\", "~(  o.o)", "  |  |  "]),
            frame(&["   /\\_/\\", "~(  o.o)", "  \\  /  "]),
            frame(&["   /\\_/\\", "~(  o.o)", "  |  |  "]),
        ],
        // walk up
        vec![
            frame(&[" /\\_/\\ ", "(  ~  )", " /   \\ "]),
            frame(&[" /\\_/\\ ", "(  ~  )", " |   / "]),
            frame(&[" /\\_/\\ ", "(  ~  )", " /   \\ "]),
            frame(&[" /\\_/\\ ", "(  ~  )", " \\   | "]),
        ],
        // walk left
        vec![
            frame(&["/\\_/\\   ", "(o.o  )~", "  /  \\  "]),
            frame(&["/\\_/\\   ", "(o.o  )~", "  |  |  "]),
            frame(&["/\\_/\\   ", "(o.o  )~", "  \\  /  "]),
            frame(&["/\\_/\\   ", "(o.o  )~", "  |  |  "]),
        ],
        // sleep, sitting upright
        vec![
            frame(&[" /\\_/\\  ", "( -.- ) ", " (\")(\")~"]),
            frame(&[" /\\_/\\ z", "( -.- ) ", " (\")(\")~"]),
        ],
        // sleep, sitting hunched
        vec![
            frame(&[" /\\_/\\  ", "( u.u ) ", " (    )~"]),
            frame(&[" /\\_/\\ Z", "( u.u ) ", " (    )~"]),
        ],
        // sitting down
        vec![
            frame(&[" /\\_/\\ ", "( o.o )", " /   \\ "]),
            frame(&[" /\\_/\\ ", "( o.- )", " (   ) "]),
            frame(&[" /\\_/\\ ", "( -.- )", " (\"_\") "]),
            frame(&[" /\\_/\\ ", "( -.- )", " (\")(\")"]),
        ],
        // sleep, lying
        vec![
            frame(&["        ", " /\\_/\\__", "(-.-  _)~"]),
            frame(&["      z ", " /\\_/\\__", "(-.-  _)~"]),
        ],
    ])
}
