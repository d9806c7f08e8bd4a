//! Keyboard and mouse input.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::state::Decision;
use crate::ui::interaction::ClickAction;

use super::types::Focus;
use super::App;

/// Log rows moved per wheel notch
const WHEEL_ROWS: usize = 3;

fn is_submit_shortcut(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S'))
}

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        self.mark_dirty();

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }

        if self.gate.is_pending() {
            self.handle_dialog_key(key);
            return;
        }

        if is_submit_shortcut(&key) {
            let _ = self.submit_task();
            return;
        }

        match key.code {
            KeyCode::PageUp => self.log.page_up(),
            KeyCode::PageDown => self.log.page_down(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.next();
            }
            KeyCode::Enter if self.focus == Focus::SubmitButton => {
                self.handle_click(ClickAction::SubmitTask);
            }
            _ if self.focus == Focus::Input => self.handle_input_key(key),
            _ => {}
        }
    }

    /// The dialog is modal: nothing else sees keys while it is open.
    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.decide(Decision::Approve),
            KeyCode::Char('n') | KeyCode::Char('N') => self.decide(Decision::Deny),
            KeyCode::Esc => self.decide(Decision::Cancel),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.dialog_selection = self.dialog_selection.toggle();
            }
            KeyCode::Enter => self.decide(self.dialog_selection.decision()),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => self.input.move_cursor_home(),
            KeyCode::Char('e') if ctrl => self.input.move_cursor_end(),
            KeyCode::Char('u') if ctrl => self.input.clear(),
            KeyCode::Char(c) if !ctrl => self.input.insert_char(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Home => self.input.move_cursor_home(),
            KeyCode::End => self.input.move_cursor_end(),
            _ => {}
        }
    }

    /// Bracketed paste goes into the input as one line.
    pub fn handle_paste(&mut self, text: &str) {
        if self.gate.is_pending() || self.focus != Focus::Input {
            return;
        }
        self.mark_dirty();
        for c in text.chars() {
            match c {
                '\n' | '\r' | '\t' => self.input.insert_char(' '),
                c if c.is_control() => {}
                c => self.input.insert_char(c),
            }
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = self.hit_areas.hit_test(mouse.column, mouse.row) {
                    self.mark_dirty();
                    self.handle_click(action);
                }
            }
            MouseEventKind::ScrollUp => {
                self.log.scroll_up(WHEEL_ROWS);
                self.mark_dirty();
            }
            MouseEventKind::ScrollDown => {
                self.log.scroll_down(WHEEL_ROWS);
                self.mark_dirty();
            }
            MouseEventKind::Moved => {
                if self.hit_areas.update_hover(mouse.column, mouse.row) {
                    self.mark_dirty();
                }
            }
            _ => {}
        }
    }

    pub fn handle_click(&mut self, action: ClickAction) {
        if self.gate.is_pending() {
            match action {
                ClickAction::ApproveStep => self.decide(Decision::Approve),
                ClickAction::DenyStep => self.decide(Decision::Deny),
                _ => {}
            }
            return;
        }

        match action {
            ClickAction::FocusInput => self.focus = Focus::Input,
            ClickAction::SubmitTask => {
                // A disabled button does not react
                if self.submit_enabled() {
                    let _ = self.submit_task();
                }
            }
            ClickAction::ApproveStep | ClickAction::DenyStep => {}
        }
    }
}
