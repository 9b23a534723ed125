use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::animation::rows;
use crate::sprite::{AsciiFrame, SpriteSheet};

/// JSON sprite sheet.
///
/// ```json
/// { "rows": { "walk_down": [["line", "line"], ["line", "line"]], ... } }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpriteSheetMeta {
    /// Maps row name (e.g. `"walk_down"`) to its frames, each a list of lines.
    rows: HashMap<String, Vec<Vec<String>>>,
}

const ROW_NAMES: [(&str, usize); rows::COUNT] = [
    ("walk_down", rows::WALK_DOWN),
    ("walk_right", rows::WALK_RIGHT),
    ("walk_up", rows::WALK_UP),
    ("walk_left", rows::WALK_LEFT),
    ("sleep_sitting_1", rows::SLEEP_SITTING_1),
    ("sleep_sitting_2", rows::SLEEP_SITTING_2),
    ("transitioning", rows::TRANSITIONING),
    ("sleep_lying", rows::SLEEP_LYING),
];

/// Decode a sprite sheet from JSON bytes.
pub fn load_from_bytes(json: &[u8]) -> Result<SpriteSheet> {
    let meta: SpriteSheetMeta =
        serde_json::from_slice(json).context("failed to parse sprite sheet JSON")?;
    SpriteSheet::new(order_rows(meta)?)
}

/// Load a sprite sheet from a JSON file on disk.
pub fn load_from_file(path: &Path) -> Result<SpriteSheet> {
    let json =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    load_from_bytes(&json).with_context(|| format!("invalid sprite sheet {}", path.display()))
}

/// Arrange named rows into sheet order. Every row must be present and no
/// unknown names are allowed.
fn order_rows(mut meta: SpriteSheetMeta) -> Result<Vec<Vec<AsciiFrame>>> {
    let mut ordered: Vec<Vec<AsciiFrame>> = vec![Vec::new(); rows::COUNT];

    for (name, row) in ROW_NAMES {
        let frames = meta
            .rows
            .remove(name)
            .with_context(|| format!("missing row \"{name}\" in sprite sheet"))?;
        ordered[row] = frames.iter().map(|lines| AsciiFrame::from_lines(lines)).collect();
    }

    if let Some(extra) = meta.rows.keys().next() {
        bail!("unknown row \"{extra}\" in sprite sheet");
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_json(skip: Option<&str>, extra: Option<&str>) -> String {
        let mut entries: Vec<String> = ROW_NAMES
            .iter()
            .filter(|(name, _)| Some(*name) != skip)
            .map(|(name, row)| format!("\"{name}\": [[\"r{row}a\", \"..\"], [\"r{row}b\", \"..\"]]"))
            .collect();
        if let Some(extra) = extra {
            entries.push(format!("\"{extra}\": [[\"?\"]]"));
        }
        format!("{{\"rows\": {{{}}}}}", entries.join(", "))
    }

    #[test]
    fn loads_complete_sheet() {
        let sheet = load_from_bytes(sheet_json(None, None).as_bytes()).unwrap();
        assert_eq!(sheet.frame(rows::SLEEP_LYING, 1).lines[0], "r7b");
        assert_eq!(sheet.frame(rows::WALK_RIGHT, 0).lines[0], "r1a");
        assert_eq!(sheet.frame_size(), (3, 2));
    }

    #[test]
    fn missing_row_is_named() {
        let err = load_from_bytes(sheet_json(Some("transitioning"), None).as_bytes()).unwrap_err();
        assert!(err.to_string().contains("transitioning"), "{err}");
    }

    #[test]
    fn unknown_row_is_rejected() {
        let err = load_from_bytes(sheet_json(None, Some("dancing")).as_bytes()).unwrap_err();
        assert!(err.to_string().contains("dancing"), "{err}");
    }

    #[test]
    fn empty_row_is_rejected() {
        let json = sheet_json(None, None).replace(
            "\"walk_up\": [[\"r2a\", \"..\"], [\"r2b\", \"..\"]]",
            "\"walk_up\": []",
        );
        let err = load_from_bytes(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"), "{err}");
    }

    #[test]
    fn bad_json_returns_error() {
        assert!(load_from_bytes(b"not json").is_err());
    }

    #[test]
    fn missing_file_names_path() {
        let path = std::env::temp_dir().join("whisker-no-such-sheet.json");
        let err = load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("whisker-no-such-sheet.json"), "{err}");
    }
}
