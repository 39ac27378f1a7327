//! Key handling for fields.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;

use super::adapter::FieldAdapter;
use super::value::InputKind;

/// Whether a field used a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

impl FieldAdapter {
    /// Handle a key event while this field is focused.
    ///
    /// Tab and Shift+Tab commit the value and move the form's cursor, Enter
    /// commits and submits (a textarea gets a newline instead), Esc commits and
    /// leaves no field focused. Everything else edits the surface.
    pub fn handle_key(&self, key: &KeyEvent) -> EventResult {
        if self.config().disabled || key.kind == KeyEventKind::Release {
            return EventResult::Ignored;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return EventResult::Ignored;
        }

        match key.code {
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.navigate(false),
            KeyCode::Tab => self.navigate(true),
            KeyCode::BackTab => self.navigate(false),
            KeyCode::Esc => {
                self.handle_blur();
                self.context().set_current_blurred();
                EventResult::Consumed
            }
            KeyCode::Enter if !self.kind().is_multiline() => {
                // An auto-submitted field may already have submitted on commit.
                if self.commit() {
                    return EventResult::Consumed;
                }
                if let Err(err) = self.context().submit() {
                    warn!("field '{}': submit failed: {}", self.name(), err);
                }
                EventResult::Consumed
            }
            _ => match self.kind() {
                InputKind::Checkbox => self.on_checkbox_key(key),
                InputKind::File => EventResult::Ignored,
                _ => self.on_text_key(key),
            },
        }
    }

    /// Commit, hide stale errors, then move the cursor one field over.
    fn navigate(&self, forward: bool) -> EventResult {
        self.handle_blur();
        self.set_form_submitted(false);
        if forward {
            self.context().set_next_focused();
        } else {
            self.context().set_last_focused();
        }
        EventResult::Consumed
    }

    fn on_checkbox_key(&self, key: &KeyEvent) -> EventResult {
        match key.code {
            KeyCode::Char(' ') => {
                self.context().set_current_focused();
                self.surface().toggle();
                self.handle_change();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_text_key(&self, key: &KeyEvent) -> EventResult {
        let surface = self.surface();
        let before = surface.text();

        match key.code {
            KeyCode::Char(c) => surface.insert_char(c),
            KeyCode::Enter => surface.insert_char('\n'),
            KeyCode::Backspace => surface.delete_char_before(),
            KeyCode::Delete => surface.delete_char_at(),
            KeyCode::Left => surface.cursor_left(),
            KeyCode::Right => surface.cursor_right(),
            KeyCode::Home => surface.cursor_home(),
            KeyCode::End => surface.cursor_end(),
            _ => return EventResult::Ignored,
        }

        if surface.text() != before {
            self.handle_change();
        }
        EventResult::Consumed
    }
}
