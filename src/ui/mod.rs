//! UI rendering for stepgate
//!
//! Screen layout, top to bottom:
//! - Header with title and connection badge
//! - Log panel (fills the remaining space, wraps and scrolls back)
//! - Task input box
//! - Submit button and keybind hints
//!
//! The confirmation dialog is drawn last, over everything else. Every render
//! rebuilds the hit-area registry used for mouse clicks.

pub mod components;
pub mod confirm_dialog;
pub mod header;
pub mod input;
pub mod interaction;
pub mod log_panel;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

pub use header::connection_badge;

/// Height of the bordered input box
const INPUT_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, app: &mut App) {
    app.hit_areas.clear();

    let [header_area, log_area, input_area, button_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    header::render_header(frame, header_area, app);
    log_panel::render_log_panel(frame, log_area, &mut app.log);
    input::render_input_box(frame, input_area, app);
    input::render_button_row(frame, button_area, app);

    if app.gate.is_pending() {
        // Drawn and registered last so it sits on top
        confirm_dialog::render_confirm_dialog(frame, frame.area(), app);
    }
}
