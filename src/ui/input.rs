//! Task input box and the submit button row.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::interaction::ClickAction;
use crate::ui::theme::{COLOR_ACCENT, COLOR_BUTTON, COLOR_BUTTON_DISABLED, COLOR_DIM, COLOR_TEXT};
use crate::widgets::InputBoxWidget;

pub const INPUT_PLACEHOLDER: &str = "Describe a task, e.g. search for rust tutorials";
pub const KEY_HINTS: &str = "Tab focus  Ctrl+Enter run  Ctrl+C quit";

/// Text of the submit button, e.g. `[ Run task ]`.
pub fn button_text(label: &str) -> String {
    format!("[ {} ]", label)
}

pub fn render_input_box(frame: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus == Focus::Input && !app.gate.is_pending();
    frame.render_widget(
        InputBoxWidget::new(&app.input, "Task", focused).placeholder(INPUT_PLACEHOLDER),
        area,
    );
    app.hit_areas.register(area, ClickAction::FocusInput);
}

pub fn render_button_row(frame: &mut Frame, area: Rect, app: &mut App) {
    let text = button_text(app.submit_label());
    let button_width = text.chars().count() as u16;

    let [button_area, _, hints_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(button_width + 1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);

    let enabled = app.submit_enabled();
    let mut style = if enabled {
        Style::default().fg(COLOR_TEXT).bg(COLOR_BUTTON)
    } else {
        Style::default().fg(COLOR_DIM).bg(COLOR_BUTTON_DISABLED)
    };
    if enabled && app.hit_areas.is_hovered(ClickAction::SubmitTask) {
        style = style.add_modifier(Modifier::BOLD);
    }
    if app.focus == Focus::SubmitButton {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    let button = Line::from(vec![Span::raw(" "), Span::styled(text, style)]);
    frame.render_widget(Paragraph::new(button), button_area);
    frame.render_widget(
        Paragraph::new(Span::styled(KEY_HINTS, Style::default().fg(COLOR_DIM))),
        hints_area,
    );

    let clickable = Rect {
        x: button_area.x + 1,
        width: button_width.min(button_area.width.saturating_sub(1)),
        ..button_area
    };
    app.hit_areas.register(clickable, ClickAction::SubmitTask);

    if app.focus == Focus::SubmitButton && !app.gate.is_pending() {
        // Focus marker in the leading column
        frame.render_widget(
            Paragraph::new(Span::styled(">", Style::default().fg(COLOR_ACCENT))),
            Rect {
                width: 1,
                ..button_area
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_text() {
        assert_eq!(button_text("Run task"), "[ Run task ]");
        assert_eq!(button_text("Submitting..."), "[ Submitting... ]");
    }
}
