//! Color theme constants for the stepgate UI

use ratatui::style::Color;

use crate::state::LogLevel;

// ============================================================================
// Base palette
// ============================================================================

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Focused borders and highlights
pub const COLOR_ACCENT: Color = Color::Cyan;

/// Title text
pub const COLOR_HEADER: Color = Color::White;

/// Regular text
pub const COLOR_TEXT: Color = Color::White;

/// Hints, timestamps, placeholders
pub const COLOR_DIM: Color = Color::DarkGray;

/// Cursor block in the input box
pub const COLOR_CURSOR_BG: Color = Color::Magenta;

// ============================================================================
// Connection badge
// ============================================================================

pub const COLOR_CONNECTED: Color = Color::Rgb(4, 181, 117); // green #04B575

pub const COLOR_DISCONNECTED: Color = Color::Red;

// ============================================================================
// Log levels
// ============================================================================

pub const COLOR_LOG_INFO: Color = Color::Rgb(0, 122, 204); // blue #007ACC

pub const COLOR_LOG_SUCCESS: Color = Color::Rgb(4, 181, 117);

pub const COLOR_LOG_WARNING: Color = Color::Yellow;

pub const COLOR_LOG_ERROR: Color = Color::Red;

// ============================================================================
// Buttons and dialogs
// ============================================================================

/// Enabled button background
pub const COLOR_BUTTON: Color = Color::Rgb(0, 122, 204);

/// Disabled button background
pub const COLOR_BUTTON_DISABLED: Color = Color::Rgb(60, 60, 70);

pub const COLOR_APPROVE: Color = Color::Rgb(4, 181, 117);

pub const COLOR_DENY: Color = Color::Red;

/// Background color for dialog boxes
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);

pub fn log_level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => COLOR_LOG_INFO,
        LogLevel::Success => COLOR_LOG_SUCCESS,
        LogLevel::Warning => COLOR_LOG_WARNING,
        LogLevel::Error => COLOR_LOG_ERROR,
    }
}
