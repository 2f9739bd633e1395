//! Input state and key handling for the picker.
//!
//! The app owns only what the terminal needs: the text buffer, the cursor and
//! the list scroll state. Everything else lives in the session, which the app
//! talks to through [`SessionEvent`]s.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use marklaunch_core::{Direction, SessionEvent};
use ratatui::widgets::ListState;

pub struct App {
    pub input: String,
    /// Cursor position in characters, not bytes.
    pub cursor_position: usize,
    pub list_state: ListState,
    pub placeholder: String,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::with_query("")
    }

    #[must_use]
    pub fn with_query(query: &str) -> Self {
        Self {
            input: query.to_string(),
            cursor_position: query.chars().count(),
            list_state: ListState::default(),
            placeholder: "Type to filter bookmarks...".to_string(),
        }
    }

    /// Translate a terminal event into the session event it stands for, if any.
    pub fn on_terminal_event(&mut self, event: &Event) -> Option<SessionEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(*key),
            Event::FocusLost => Some(SessionEvent::FocusLost),
            Event::FocusGained => Some(SessionEvent::FocusGained),
            _ => None,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Option<SessionEvent> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        tracing::debug!("KEY EVENT: code={:?}, modifiers={:?}", key.code, key.modifiers);

        match key.code {
            KeyCode::Esc => Some(SessionEvent::Cancel),
            KeyCode::Char('c') if ctrl => Some(SessionEvent::Cancel),
            KeyCode::Enter => Some(SessionEvent::Confirm),
            KeyCode::Up => Some(SessionEvent::Navigate(Direction::Up)),
            KeyCode::Char('k') if ctrl => Some(SessionEvent::Navigate(Direction::Up)),
            KeyCode::Down => Some(SessionEvent::Navigate(Direction::Down)),
            KeyCode::Char('j') if ctrl => Some(SessionEvent::Navigate(Direction::Down)),
            KeyCode::Char('u') if ctrl => {
                if self.input.is_empty() {
                    return None;
                }
                self.input.clear();
                self.cursor_position = 0;
                Some(self.query_changed())
            }
            KeyCode::Char(c) if !ctrl && !alt => {
                self.enter_char(c);
                Some(self.query_changed())
            }
            KeyCode::Backspace => self.delete_char().then(|| self.query_changed()),
            KeyCode::Delete => self.delete_char_forward().then(|| self.query_changed()),
            KeyCode::Left => {
                self.move_cursor_left();
                None
            }
            KeyCode::Right => {
                self.move_cursor_right();
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.char_count();
                None
            }
            _ => None,
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }

    pub fn enter_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.input.insert(idx, c);
        self.move_cursor_right();
    }

    /// Delete the character before the cursor. Returns whether anything changed.
    pub fn delete_char(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }
        self.move_cursor_left();
        let idx = self.byte_index();
        self.input.remove(idx);
        true
    }

    /// Delete the character under the cursor. Returns whether anything changed.
    pub fn delete_char_forward(&mut self) -> bool {
        if self.cursor_position >= self.char_count() {
            return false;
        }
        let idx = self.byte_index();
        self.input.remove(idx);
        true
    }

    #[must_use]
    pub fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.char_count())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.input.len(), |(idx, _)| idx)
    }

    fn query_changed(&self) -> SessionEvent {
        SessionEvent::QueryChanged(self.input.clone())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
