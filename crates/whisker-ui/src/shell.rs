use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use whisker_agent::{Behavior, Mood};

use crate::layout::OverlayRects;

const BAR_WIDTH: usize = 10;

pub struct ShellView<'a> {
    pub status_line: &'a str,
    pub behavior: Behavior,
    pub mood: Mood,
    pub happiness: f64,
    pub energy: f64,
    pub paused: bool,
    pub interactive: bool,
}

pub fn render_shell(
    f: &mut Frame,
    rects: OverlayRects,
    view: ShellView<'_>,
    field: impl FnOnce(&mut Frame, Rect),
) {
    let top = Paragraph::new(Line::from(format!(
        "WHISKER | {} | ` console  p pause  s sleep  w wander  i interact  q quit",
        view.status_line
    )))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(top, rects.top);

    field(f, rects.field);

    f.render_widget(Paragraph::new(hud_line(&view)), rects.hud);
}

/// The HUD: what the cat is doing and how it feels.
pub fn hud_line(view: &ShellView<'_>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!(" {:<13}", view.behavior.as_str()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" happy "),
        Span::styled(bar(view.happiness), Style::default().fg(Color::Magenta)),
        Span::raw(format!(" {:>3.0}  energy ", view.happiness)),
        Span::styled(bar(view.energy), Style::default().fg(Color::Green)),
        Span::raw(format!(" {:>3.0}  {}", view.energy, view.mood)),
    ];
    if view.paused {
        spans.push(Span::styled(
            "  PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    if view.interactive {
        spans.push(Span::styled("  [mouse]", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

/// Text gauge for a 0–100 value.
pub fn bar(value: f64) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
