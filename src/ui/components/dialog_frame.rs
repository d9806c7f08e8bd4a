//! Centered modal frame. Clears whatever is underneath and sizes itself to
//! the screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::ui::theme::{COLOR_ACCENT, COLOR_DIALOG_BG, COLOR_HEADER};

/// Below this many columns the dialog takes all it can get
const NARROW_SCREEN: u16 = 60;
const MIN_WIDTH: u16 = 30;
const MAX_WIDTH: u16 = 72;
/// Columns always left free on each side
const SIDE_MARGIN: u16 = 2;

#[derive(Debug, Clone, Copy)]
pub struct DialogFrame<'a> {
    pub title: &'a str,
    /// Rows inside the border
    pub content_height: u16,
}

impl<'a> DialogFrame<'a> {
    pub fn new(title: &'a str, content_height: u16) -> Self {
        Self {
            title,
            content_height,
        }
    }

    /// Outer width on a screen `screen_width` columns wide: 60% of the screen
    /// within `MIN_WIDTH..=MAX_WIDTH`, never touching the edges.
    pub fn width_for(screen_width: u16) -> u16 {
        let available = screen_width.saturating_sub(SIDE_MARGIN * 2);
        if screen_width < NARROW_SCREEN {
            return available.min(MAX_WIDTH);
        }
        let proportional = (screen_width as u32 * 60 / 100) as u16;
        proportional.clamp(MIN_WIDTH, MAX_WIDTH).min(available)
    }

    /// Outer rectangle, borders included, centered in `screen`.
    pub fn area(&self, screen: Rect) -> Rect {
        let width = Self::width_for(screen.width);
        let height = self.content_height.saturating_add(2).min(screen.height);
        Rect {
            x: screen.x + (screen.width - width) / 2,
            y: screen.y + (screen.height - height) / 2,
            width,
            height,
        }
    }

    /// Draw the frame and return the content area inside it.
    pub fn render(&self, frame: &mut Frame, screen: Rect) -> Rect {
        let outer = self.area(screen);
        frame.render_widget(Clear, outer);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(COLOR_HEADER)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(COLOR_ACCENT))
            .style(Style::default().bg(COLOR_DIALOG_BG));

        let inner = block.inner(outer);
        frame.render_widget(block, outer);
        inner
    }
}
