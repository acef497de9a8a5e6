//! Single-line query input
//!
//! Editing bindings: printable characters, Backspace, Delete, Left, Right,
//! Home, End, Ctrl+A, Ctrl+E, Ctrl+U, Ctrl+K. Anything else is left alone so
//! the file selector can claim it.

use crate::tui::traits::{Component, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PROMPT: &str = "> ";

#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    /// Byte offset into `value`, always on a char boundary
    cursor: usize,
    placeholder: String,
    /// Preferred field width in columns
    width: u16,
    focused: bool,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>, width: u16) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
            width,
            focused: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position in chars
    pub fn cursor(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Take the current value, leaving the input empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }

    /// Delete the character before the cursor
    pub fn delete_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.value.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Delete the character under the cursor
    pub fn delete_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.value.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn delete_to_start(&mut self) {
        self.value.drain(..self.cursor);
        self.cursor = 0;
    }

    pub fn delete_to_end(&mut self) {
        self.value.truncate(self.cursor);
    }

    /// Columns available for text inside `area`
    fn field_width(&self, area: Rect) -> usize {
        let inner = area.width.saturating_sub(2) as usize;
        inner.saturating_sub(PROMPT.width()).min(self.width as usize)
    }

    /// First visible byte and the caret column relative to it
    ///
    /// Scrolls horizontally so the caret always has a cell to sit in.
    fn window(&self, field: usize) -> (usize, usize) {
        let mut start = 0;
        let mut caret = self.value[..self.cursor].width();
        let limit = field.saturating_sub(1);

        let mut chars = self.value.char_indices();
        while caret > limit {
            match chars.next() {
                Some((_, ch)) => {
                    caret -= ch.width().unwrap_or(0);
                    start += ch.len_utf8();
                }
                None => break,
            }
        }
        (start, caret)
    }

    /// Terminal cell for the caret when the input is drawn in `area`
    pub fn caret_position(&self, area: Rect) -> Position {
        let (_, caret) = self.window(self.field_width(area));
        Position::new(
            area.x + 1 + PROMPT.width() as u16 + caret as u16,
            area.y + 1,
        )
    }
}

impl Component for TextInput {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let field = self.field_width(area);

        let mut spans = vec![Span::styled(PROMPT, Style::default().fg(theme.border))];
        if self.value.is_empty() {
            spans.push(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(theme.muted),
            ));
        } else {
            let (start, _) = self.window(field);
            let mut used = 0;
            let visible: String = self.value[start..]
                .chars()
                .take_while(|ch| {
                    used += ch.width().unwrap_or(0);
                    used <= field
                })
                .collect();
            spans.push(Span::styled(visible, Style::default().fg(theme.foreground)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border));

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

impl Interactive for TextInput {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('a') if ctrl => self.move_home(),
            KeyCode::Char('e') if ctrl => self.move_end(),
            KeyCode::Char('u') if ctrl => self.delete_to_start(),
            KeyCode::Char('k') if ctrl => self.delete_to_end(),
            KeyCode::Char(ch) if !ctrl && !alt => self.insert_char(ch),
            KeyCode::Backspace => self.delete_left(),
            KeyCode::Delete => self.delete_right(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn key_hint(&self) -> Option<&'static str> {
        Some("Enter:submit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new("Ask...", 100);
        for ch in text.chars() {
            input.handle_key(key(KeyCode::Char(ch)));
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("rfc 9110");
        assert_eq!(input.value(), "rfc 9110");
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "rfc 911");
        assert_eq!(input.cursor(), 7);
    }

    #[test]
    fn test_cursor_is_bounded() {
        let mut input = typed("ab");
        for _ in 0..5 {
            input.handle_key(key(KeyCode::Right));
        }
        assert_eq!(input.cursor(), 2);
        for _ in 0..5 {
            input.handle_key(key(KeyCode::Left));
        }
        assert_eq!(input.cursor(), 0);

        // Nothing to the left of the cursor
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "ab");
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
        input.handle_key(key(KeyCode::End));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = typed("héllo");
        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Right));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), "hllo");
        input.insert_char('é');
        assert_eq!(input.value(), "héllo");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_ctrl_bindings() {
        let mut input = typed("hello world");
        input.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(input.cursor(), 0);
        for _ in 0..6 {
            input.handle_key(key(KeyCode::Right));
        }
        input.handle_key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "hello ");
        input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(input.is_empty());
    }

    #[test]
    fn test_selector_keys_are_not_claimed() {
        let mut input = typed("x");
        for code in [KeyCode::Up, KeyCode::Down, KeyCode::Tab, KeyCode::BackTab] {
            assert_eq!(input.handle_key(key(code)), Handled::No);
        }
        assert_eq!(
            input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Handled::No
        );
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn test_shifted_chars_insert() {
        let mut input = TextInput::new("", 100);
        input.handle_key(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT));
        assert_eq!(input.value(), "R");
    }

    #[test]
    fn test_take_clears() {
        let mut input = typed("query");
        assert_eq!(input.take(), "query");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_window_keeps_caret_visible() {
        let input = typed("abcdefghij");
        // Ten columns of text in a five column field
        let (start, caret) = input.window(5);
        assert_eq!(caret, 4);
        assert_eq!(start, 6);

        let area = Rect::new(0, 10, 9, 3);
        // 9 wide: 2 border + 2 prompt leaves 5
        assert_eq!(input.caret_position(area), Position::new(7, 11));
    }
}
