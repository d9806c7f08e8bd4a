use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, BorderType, Borders, Widget},
};

use unicode_width::UnicodeWidthStr;

use crate::state::sanitize_for_display;
use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_CURSOR_BG, COLOR_DIM, COLOR_TEXT};

/// A single-line text input with cursor handling and horizontal scrolling.
///
/// The cursor is a character index, not a byte offset, so multi-byte input
/// edits cleanly. Scrolling and cursor placement work in display columns.
#[derive(Debug, Clone, Default)]
pub struct InputBox {
    content: String,
    /// Character index, `0..=content.chars().count()`
    cursor: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character at `char_idx` (or the end).
    fn byte_index(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.content.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete key
    pub fn delete_char(&mut self) {
        if self.cursor < self.char_count() {
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor as a character index.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Replace the text and put the cursor at the end
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// First visible character so the cursor cell fits inside `width`
    /// columns. Widths are terminal columns, so CJK text scrolls two columns
    /// per character.
    fn scroll_offset(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        let widths: Vec<usize> = self.content.chars().map(column_width).collect();
        let mut used = widths.get(self.cursor).copied().unwrap_or(1).max(1);
        let mut offset = self.cursor;
        while offset > 0 && used + widths[offset - 1] <= width {
            offset -= 1;
            used += widths[offset];
        }
        offset
    }

    /// Render inside a bordered block titled `title`.
    pub fn render_with_title(
        &self,
        area: Rect,
        buf: &mut Buffer,
        title: &str,
        placeholder: &str,
        focused: bool,
    ) {
        let border_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", title));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = inner.width as usize;

        if self.content.is_empty() && !focused {
            buf.set_stringn(
                inner.x,
                inner.y,
                placeholder,
                width,
                Style::default().fg(COLOR_DIM),
            );
            return;
        }

        let text_style = Style::default().fg(COLOR_TEXT);
        let cursor_style = text_style.bg(COLOR_CURSOR_BG);
        let offset = self.scroll_offset(width);
        let mut x = 0;

        for (idx, c) in self.content.chars().enumerate().skip(offset) {
            let shown = shown_char(c);
            let w = UnicodeWidthStr::width(shown.as_str());
            if x + w > width {
                break;
            }
            let style = if focused && idx == self.cursor {
                cursor_style
            } else {
                text_style
            };
            buf.set_stringn(inner.x + x as u16, inner.y, &shown, w.max(1), style);
            x += w;
        }

        if focused && self.cursor == self.char_count() && x < width {
            buf.set_stringn(inner.x + x as u16, inner.y, " ", 1, cursor_style);
        }
    }
}

/// How `c` appears on screen once control characters are neutralised.
fn shown_char(c: char) -> String {
    let mut utf8 = [0u8; 4];
    sanitize_for_display(c.encode_utf8(&mut utf8))
}

/// Terminal columns `c` takes up as drawn.
fn column_width(c: char) -> usize {
    UnicodeWidthStr::width(shown_char(c).as_str())
}

/// [`InputBox`] as a ratatui widget.
pub struct InputBoxWidget<'a> {
    input_box: &'a InputBox,
    title: &'a str,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputBoxWidget<'a> {
    pub fn new(input_box: &'a InputBox, title: &'a str, focused: bool) -> Self {
        Self {
            input_box,
            title,
            placeholder: "",
            focused,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for InputBoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.input_box
            .render_with_title(area, buf, self.title, self.placeholder, self.focused);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_new_input_box() {
        let input = InputBox::new();
        assert!(input.is_empty());
        assert_eq!(input.cursor_position(), 0);
        assert_eq!(input.content(), "");
    }

    #[test]
    fn test_editing() {
        let mut input = InputBox::new();
        input.insert_char('H');
        input.insert_char('i');
        input.backspace();
        assert_eq!(input.content(), "H");
        assert_eq!(input.cursor_position(), 1);

        input.set_content("Hllo");
        input.move_cursor_home();
        input.move_cursor_right();
        input.insert_char('e');
        assert_eq!(input.content(), "Hello");

        input.move_cursor_end();
        input.move_cursor_left();
        input.delete_char();
        assert_eq!(input.content(), "Hell");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = InputBox::new();
        input.set_content("café");
        assert_eq!(input.cursor_position(), 4);

        input.backspace();
        assert_eq!(input.content(), "caf");

        input.insert_char('é');
        input.move_cursor_home();
        input.insert_char('→');
        assert_eq!(input.content(), "→café");
        assert_eq!(input.cursor_position(), 1);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputBox::new();
        input.insert_char('X');
        input.move_cursor_home();
        input.move_cursor_left();
        assert_eq!(input.cursor_position(), 0);
        input.move_cursor_end();
        input.move_cursor_right();
        assert_eq!(input.cursor_position(), 1);
    }

    #[test]
    fn test_scrolls_to_keep_cursor_visible() {
        let mut input = InputBox::new();
        input.set_content("abcdefghij");
        assert_eq!(input.scroll_offset(5), 6);
        input.move_cursor_home();
        assert_eq!(input.scroll_offset(5), 0);
    }

    #[test]
    fn test_scroll_offset_counts_wide_characters() {
        let mut input = InputBox::new();
        input.set_content("搜尋一下台北今天的天氣預報資料謝");
        // 13 glyphs of two columns plus the cursor cell fit in 28
        assert_eq!(input.scroll_offset(28), 3);

        // Control characters are drawn in caret notation
        assert_eq!(column_width('\x07'), 2);
    }

    fn render_row(input: &InputBox, width: u16) -> Buffer {
        let backend = TestBackend::new(width, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(InputBoxWidget::new(input, "Task", true), f.area()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_render_cjk_keeps_tail_and_cursor_after_text() {
        let mut input = InputBox::new();
        input.set_content("搜尋一下台北今天的天氣預報資料謝");

        let buffer = render_row(&input, 30);
        let row: String = (0..30u16).map(|x| buffer[(x, 1u16)].symbol().to_string()).collect();
        assert!(row.contains("的"));
        assert!(row.contains("謝"));
        assert!(!row.contains("一"));

        // Border at x=0, then 13 glyphs of width two
        assert_eq!(buffer[(27u16, 1u16)].bg, COLOR_CURSOR_BG);
        assert_eq!(buffer[(25u16, 1u16)].symbol(), "謝");
        assert_ne!(buffer[(25u16, 1u16)].bg, COLOR_CURSOR_BG);
    }

    #[test]
    fn test_render_cursor_on_wide_character() {
        let mut input = InputBox::new();
        input.set_content("你好世界");
        input.move_cursor_home();
        input.move_cursor_right();

        let buffer = render_row(&input, 20);
        assert_eq!(buffer[(1u16, 1u16)].symbol(), "你");
        assert_eq!(buffer[(3u16, 1u16)].symbol(), "好");
        assert_eq!(buffer[(3u16, 1u16)].bg, COLOR_CURSOR_BG);
        assert_eq!(buffer[(5u16, 1u16)].symbol(), "世");
    }

    #[test]
    fn test_render_placeholder_when_unfocused_and_empty() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let input = InputBox::new();
        terminal
            .draw(|f| {
                f.render_widget(
                    InputBoxWidget::new(&input, "Task", false).placeholder("Describe a task"),
                    f.area(),
                )
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..30u16).map(|x| buffer[(x, 1u16)].symbol().to_string()).collect();
        assert!(row.contains("Describe a task"));
    }
}
