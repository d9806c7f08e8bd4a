//! Append-only event log shown in the log panel.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Severity of a log entry.
///
/// Deserializes from any string: unknown levels fall back to `Info`, and
/// `warn` is accepted as an alias for `warning`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LogLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    /// Lenient parse used for server-supplied levels.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => LogLevel::Success,
            "warning" | "warn" => LogLevel::Warning,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        LogLevel::parse(&s)
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line in the log panel. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: Local::now(),
        }
    }

    /// Capture time as `HH:MM:SS`.
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    /// Message text safe to hand to the terminal.
    pub fn display_message(&self) -> String {
        sanitize_for_display(&self.message)
    }
}

/// Neutralise characters that would be interpreted by the terminal.
///
/// C0 controls and DEL are rendered in caret notation (`ESC` becomes `^[`),
/// line breaks and tabs collapse to a space, and C1 controls become U+FFFD.
/// Everything else, including markup like `<b>`, is kept literally.
pub fn sanitize_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' | '\r' | '\t' => out.push(' '),
            '\u{7f}' => out.push_str("^?"),
            c if (c as u32) < 0x20 => {
                out.push('^');
                out.push(char::from(b'@' + c as u8));
            }
            '\u{80}'..='\u{9f}' => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}

/// Append-only list of log entries, newest last.
///
/// Also carries the panel's scrollback position, counted in rendered rows up
/// from the newest entry. The renderer reports the viewport size each frame
/// through [`LogPanel::set_viewport`]; appending an entry snaps back to the
/// bottom.
#[derive(Debug, Clone, Default)]
pub struct LogPanel {
    entries: Vec<LogEntry>,
    scroll: usize,
    max_scroll: usize,
    page_rows: usize,
    rows: RowCache,
}

/// Running total of wrapped rows for one panel width.
#[derive(Debug, Clone, Default)]
struct RowCache {
    width: usize,
    measured: usize,
    total: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, level: LogLevel) {
        self.entries.push(LogEntry::new(message, level));
        self.scroll = 0;
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, LogLevel::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, LogLevel::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, LogLevel::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, LogLevel::Error);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Rows scrolled up from the newest entry; 0 means pinned to the bottom.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll > 0
    }

    /// Total rendered rows at `width`, measuring only entries appended since
    /// the last call with the same width.
    pub fn total_rows(
        &mut self,
        width: usize,
        measure: impl Fn(&LogEntry, usize) -> usize,
    ) -> usize {
        if self.rows.width != width {
            self.rows = RowCache {
                width,
                ..RowCache::default()
            };
        }
        let fresh: usize = self.entries[self.rows.measured..]
            .iter()
            .map(|entry| measure(entry, width))
            .sum();
        self.rows.total += fresh;
        self.rows.measured = self.entries.len();
        self.rows.total
    }

    /// Record the visible height and the furthest the panel can scroll.
    pub fn set_viewport(&mut self, page_rows: usize, max_scroll: usize) {
        self.page_rows = page_rows;
        self.max_scroll = max_scroll;
        self.scroll = self.scroll.min(max_scroll);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    /// One screen back, keeping a row of overlap.
    pub fn page_up(&mut self) {
        self.scroll_up(self.page_step());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_step());
    }

    pub fn scroll_to_newest(&mut self) {
        self.scroll = 0;
    }

    fn page_step(&self) -> usize {
        self.page_rows.saturating_sub(1).max(1)
    }
}
