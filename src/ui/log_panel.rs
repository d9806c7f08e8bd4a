//! Log panel, pinned to the newest entry unless the user scrolls back.
//!
//! Entries are wrapped by hand at character boundaries so long URLs stay
//! readable, and continuation rows are indented past the timestamp.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::state::{LogEntry, LogPanel};
use crate::ui::theme::{log_level_color, COLOR_BORDER, COLOR_DIM};

/// `[HH:MM:SS] `
const TIME_PREFIX_WIDTH: usize = 11;
/// Narrower panels wrap continuation rows flush left
const MIN_INDENTED_WIDTH: usize = TIME_PREFIX_WIDTH + 10;

fn continuation_indent(width: usize) -> usize {
    if width >= MIN_INDENTED_WIDTH {
        TIME_PREFIX_WIDTH
    } else {
        0
    }
}

fn entry_segments(entry: &LogEntry) -> [(String, Style); 2] {
    [
        (
            format!("[{}] ", entry.formatted_time()),
            Style::default().fg(COLOR_DIM),
        ),
        (
            entry.display_message(),
            Style::default().fg(log_level_color(entry.level)),
        ),
    ]
}

/// `[HH:MM:SS] message` on one line, the message colored by level.
pub fn log_line(entry: &LogEntry) -> Line<'static> {
    Line::from(
        entry_segments(entry)
            .into_iter()
            .map(|(text, style)| Span::styled(text, style))
            .collect::<Vec<_>>(),
    )
}

/// Rows `entry` occupies in a panel `width` columns wide.
pub fn row_count(entry: &LogEntry, width: usize) -> usize {
    let indent = continuation_indent(width);
    let mut rows = 1;
    let mut row_start = 0;
    let mut used = 0;
    for (text, _) in entry_segments(entry) {
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > row_start {
                rows += 1;
                row_start = indent;
                used = indent;
            }
            used += w;
        }
    }
    rows
}

/// `entry` split into rows no wider than `width` columns.
pub fn wrap_entry(entry: &LogEntry, width: usize) -> Vec<Line<'static>> {
    let indent = continuation_indent(width);
    let mut rows = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut row_start = 0;
    let mut used = 0;

    for (text, style) in entry_segments(entry) {
        let mut chunk = String::new();
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > row_start {
                if !chunk.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                rows.push(Line::from(std::mem::take(&mut spans)));
                if indent > 0 {
                    spans.push(Span::raw(" ".repeat(indent)));
                }
                row_start = indent;
                used = indent;
            }
            chunk.push(c);
            used += w;
        }
        if !chunk.is_empty() {
            spans.push(Span::styled(chunk, style));
        }
    }
    rows.push(Line::from(spans));
    rows
}

/// Rows for a panel `height` rows tall, `scroll` rows up from the newest.
fn window(panel: &LogPanel, width: usize, height: usize, scroll: usize) -> Vec<Line<'static>> {
    let wanted = scroll + height;
    let mut newest_first: Vec<Line<'static>> = Vec::with_capacity(wanted);
    for entry in panel.entries().iter().rev() {
        if newest_first.len() >= wanted {
            break;
        }
        newest_first.extend(wrap_entry(entry, width).into_iter().rev());
    }
    let mut rows: Vec<Line<'static>> = newest_first
        .into_iter()
        .skip(scroll)
        .take(height)
        .collect();
    rows.reverse();
    rows
}

pub fn render_log_panel(frame: &mut Frame, area: Rect, panel: &mut LogPanel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    let (width, height) = (inner.width as usize, inner.height as usize);
    if width == 0 || height == 0 {
        frame.render_widget(block.title(" Log "), area);
        return;
    }

    let total = panel.total_rows(width, row_count);
    panel.set_viewport(height, total.saturating_sub(height));

    let title = if panel.is_scrolled() {
        " Log (PgDn for newer) "
    } else {
        " Log "
    };
    let rows = window(panel, width, height, panel.scroll_offset());
    frame.render_widget(Paragraph::new(rows).block(block.title(title)), area);
}
