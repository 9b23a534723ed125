use std::ops::Range;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use whisker_core::console::Console;
use whisker_core::logging::LogLevel;

/// Render the drop-down console over the top half of `area`.
///
/// Three bands: a title bar with the loop rate, the log tail, and the
/// command prompt.
pub fn render_console(f: &mut Frame, area: Rect, console: &Console, tps: f64) {
    let height = (area.height / 2).max(3).min(area.height);
    if height < 3 {
        return;
    }
    let overlay = Rect { height, ..area };

    f.render_widget(Clear, overlay);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(1),    // log area
            Constraint::Length(1), // input line
        ])
        .split(overlay);

    let title = Line::from(vec![
        Span::styled(
            " CONSOLE ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  TPS: {:.1}  ", tps)),
        Span::styled("` to close  ↑↓ history  PgUp/PgDn scroll", Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(
        Paragraph::new(title).style(Style::default().bg(Color::DarkGray).fg(Color::White)),
        chunks[0],
    );

    let log_lines = console.log_lines();
    let window = visible_range(log_lines.len(), chunks[1].height as usize, console.scroll_offset());
    let lines: Vec<Line> = log_lines
        .range(window)
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!(" {:5} ", entry.level),
                    Style::default()
                        .fg(level_color(entry.level))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("[{}] ", short_target(&entry.target)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(entry.message.as_str()),
            ])
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .style(Style::default().bg(Color::Black)),
        ),
        chunks[1],
    );

    let input_line = Line::from(vec![
        Span::styled(
            "> ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(console.input_buffer.as_str()),
    ]);
    f.render_widget(
        Paragraph::new(input_line).style(Style::default().bg(Color::Black).fg(Color::White)),
        chunks[2],
    );

    let col = console.input_buffer[..console.cursor_pos].width() as u16;
    f.set_cursor_position((chunks[2].x + 2 + col, chunks[2].y));
}

/// Indices of the log lines that fit in `height` rows, `offset` lines up
/// from the bottom.
pub fn visible_range(total: usize, height: usize, offset: usize) -> Range<usize> {
    let end = total.saturating_sub(offset);
    let start = end.saturating_sub(height);
    start..end
}

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Green,
        LogLevel::Debug => Color::Cyan,
        LogLevel::Trace => Color::DarkGray,
    }
}

/// Last path segment of a tracing target (`whisker_agent::movement` → `movement`).
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}
