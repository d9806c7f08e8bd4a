//! Title bar with the connection badge.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::theme::{COLOR_CONNECTED, COLOR_DIM, COLOR_DISCONNECTED, COLOR_HEADER};

pub const TITLE: &str = "stepgate";

/// `● Connected` or `○ Disconnected`
pub fn connection_badge(connected: bool) -> Span<'static> {
    if connected {
        Span::styled(
            "● Connected",
            Style::default()
                .fg(COLOR_CONNECTED)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("○ Disconnected", Style::default().fg(COLOR_DISCONNECTED))
    }
}

pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let badge = connection_badge(app.is_connected());
    let badge_width = badge.width() as u16 + 1;

    let [title_area, badge_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(badge_width)])
        .areas(area);

    let title = Line::from(vec![
        Span::styled(
            format!(" {}", TITLE),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.config.server),
            Style::default().fg(COLOR_DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(title), title_area);
    frame.render_widget(
        Paragraph::new(Line::from(badge)).alignment(Alignment::Right),
        badge_area,
    );
}
