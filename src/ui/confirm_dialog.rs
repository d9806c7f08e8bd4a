//! Modal dialog asking the user to approve or deny a step.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{App, DialogButton};
use crate::state::{sanitize_for_display, ConfirmationRequest};
use crate::ui::components::DialogFrame;
use crate::ui::interaction::ClickAction;
use crate::ui::theme::{COLOR_APPROVE, COLOR_DENY, COLOR_DIM, COLOR_HEADER, COLOR_TEXT};

pub const DIALOG_TITLE: &str = "Confirm step";
pub const APPROVE_LABEL: &str = "[ Approve (y) ]";
pub const DENY_LABEL: &str = "[ Deny (n) ]";

/// Raw step lines shown at most; longer steps are cut with an ellipsis
const MAX_RAW_LINES: usize = 12;

fn raw_step_lines(request: &ConfirmationRequest) -> Vec<String> {
    let raw = request.raw_step();
    let mut lines: Vec<String> = raw.lines().map(sanitize_for_display).collect();
    if lines.len() > MAX_RAW_LINES {
        lines.truncate(MAX_RAW_LINES - 1);
        lines.push("...".to_string());
    }
    lines
}

fn button_style(color: ratatui::style::Color, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(ratatui::style::Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    }
}

/// Headline, a blank row, the label, then the raw step. When `keep` is
/// smaller than `raw`, the last line kept becomes `...`.
fn body_lines(headline: &str, raw: &[String], keep: usize) -> Vec<Line<'static>> {
    let text = Style::default().fg(COLOR_TEXT);
    let mut lines = vec![
        Line::from(Span::styled(
            headline.to_string(),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Raw step:", Style::default().fg(COLOR_DIM))),
    ];
    let shown = if keep >= raw.len() {
        raw.len()
    } else {
        keep.saturating_sub(1)
    };
    lines.extend(
        raw[..shown]
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), text))),
    );
    if shown < raw.len() {
        lines.push(Line::from(Span::styled("...", text)));
    }
    lines
}

/// Wrapped body no taller than `max_rows` at `width`, dropping raw step lines
/// from the end until it fits, plus the rows it takes.
fn fit_body(
    headline: &str,
    raw: &[String],
    width: u16,
    max_rows: usize,
) -> (Paragraph<'static>, usize) {
    let mut keep = raw.len();
    loop {
        let body = Paragraph::new(body_lines(headline, raw, keep)).wrap(Wrap { trim: false });
        let rows = body.line_count(width);
        if rows <= max_rows || keep <= 1 {
            return (body, rows);
        }
        keep -= 1;
    }
}

pub fn render_confirm_dialog(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(request) = app.gate.pending() else {
        return;
    };

    let headline = sanitize_for_display(&request.headline());
    let raw_lines = raw_step_lines(request);

    // Two border rows, then a blank row and the buttons under the body
    let text_width = DialogFrame::width_for(area.width).saturating_sub(2);
    let max_rows = area.height.saturating_sub(4) as usize;
    let (body, rows) = fit_body(&headline, &raw_lines, text_width, max_rows);

    let content_height = (rows + 2).min(u16::MAX as usize) as u16;
    let inner = DialogFrame::new(DIALOG_TITLE, content_height).render(frame, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let body_area = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    frame.render_widget(body, body_area);

    let buttons_y = inner.y + inner.height.saturating_sub(1);
    let approve_width = APPROVE_LABEL.chars().count() as u16;
    let deny_width = DENY_LABEL.chars().count() as u16;
    let gap = 3;
    let total = approve_width + gap + deny_width;
    let start_x = inner.x + inner.width.saturating_sub(total) / 2;

    let approve_rect = Rect::new(start_x, buttons_y, approve_width, 1).intersection(inner);
    let deny_rect =
        Rect::new(start_x + approve_width + gap, buttons_y, deny_width, 1).intersection(inner);

    let selection = app.dialog_selection;
    frame.render_widget(
        Paragraph::new(Span::styled(
            APPROVE_LABEL,
            button_style(COLOR_APPROVE, selection == DialogButton::Approve),
        )),
        approve_rect,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            DENY_LABEL,
            button_style(COLOR_DENY, selection == DialogButton::Deny),
        )),
        deny_rect,
    );

    app.hit_areas.register(approve_rect, ClickAction::ApproveStep);
    app.hit_areas.register(deny_rect, ClickAction::DenyStep);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::connected_app;
    use crate::websocket::Step;
    use ratatui::{backend::TestBackend, Terminal};

    fn form_step(fields: usize) -> Step {
        let mut step = Step::new("fill_form");
        for i in 0..fields {
            step.extra
                .insert(format!("field_{:02}", i), serde_json::json!(i));
        }
        step
    }

    fn draw_dialog(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_confirm_dialog(f, f.area(), app))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn inside_border(row: &str) -> &str {
        row.trim().trim_matches('│').trim()
    }

    #[test]
    fn test_raw_lines_truncated() {
        let request = ConfirmationRequest {
            confirm_id: "x".to_string(),
            step_index: 1,
            step: form_step(20),
        };

        let lines = raw_step_lines(&request);
        assert_eq!(lines.len(), MAX_RAW_LINES);
        assert_eq!(lines.last().map(String::as_str), Some("..."));
    }

    #[test]
    fn test_wrapped_headline_keeps_whole_raw_step() {
        let (mut app, _) = connected_app();
        let url = format!("https://example.com/{}END", "segment/".repeat(8));
        app.open_confirmation(ConfirmationRequest {
            confirm_id: "nav".to_string(),
            step_index: 1,
            step: Step::new("navigate").with_url(url),
        });

        let rows = draw_dialog(&mut app, 60, 40);
        assert!(rows.iter().any(|r| r.contains("\"action\": \"navigate\"")));
        assert!(rows.iter().any(|r| inside_border(r) == "}"));
        assert!(rows.iter().any(|r| r.contains(APPROVE_LABEL)));
    }

    #[test]
    fn test_short_screen_cuts_raw_step_with_ellipsis() {
        let (mut app, _) = connected_app();
        app.open_confirmation(ConfirmationRequest {
            confirm_id: "form".to_string(),
            step_index: 2,
            step: form_step(10),
        });

        let rows = draw_dialog(&mut app, 80, 14);
        assert!(rows.iter().any(|r| inside_border(r) == "..."));
        assert!(rows.iter().any(|r| r.contains(DENY_LABEL)));
        assert!(!rows.iter().any(|r| r.contains("field_09")));
    }
}
