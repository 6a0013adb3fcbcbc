//! Single-line field editor
//!
//! Backs each input of the registration form. Tracks a byte cursor that is
//! always kept on a UTF-8 boundary, and maps the usual terminal editing keys
//! (arrows, Home/End, Ctrl+A/E/L, Backspace/Delete) onto edits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A text editor for one form field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldEditor {
    /// The content being edited
    content: String,

    /// Cursor position (byte offset in content)
    cursor: usize,
}

impl FieldEditor {
    /// Create an editor with initial content, cursor at the end
    #[cfg(test)]
    pub fn with_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            cursor: content.len(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Clear all content and reset the cursor
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Insert a character at the current cursor position
    pub fn insert_char(&mut self, c: char) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    /// Insert a string at the current cursor position (paste)
    pub fn insert_str(&mut self, s: &str) {
        // Pasted text may carry a trailing newline; fields are single-line
        let cleaned: String = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, &cleaned);
        self.cursor = cursor + cleaned.len();
    }

    /// Delete the character before the cursor (Backspace)
    pub fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let prev = self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.content.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Delete the character under the cursor (Delete)
    pub fn delete_char_after_cursor(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }

        let next = self.content[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len());
        self.content.drain(self.cursor..next);
        true
    }

    pub fn move_cursor_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor = self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        true
    }

    pub fn move_cursor_right(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }

        self.cursor = self.content[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len());
        true
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Handle a key event - returns true if the event was consumed
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    /// Content split around the cursor, for drawing a visible caret
    pub fn split_at_cursor(&self) -> (&str, &str) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.split_at(cursor)
    }

    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
