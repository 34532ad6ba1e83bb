use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use tracing::warn;
use tui_textarea::{CursorMove, Input, Key, TextArea};

use crate::cache::CacheManager;
use crate::config::Theme;

/// Event emitted by TextInput widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputEvent {
    None,
    Submit,
    Cancel,
    HistoryChanged,
}

/// Single-line text input wrapping tui-textarea, with optional persisted history
pub struct TextInput {
    textarea: TextArea<'static>,
    history_id: Option<String>,
    history: Vec<String>,
    /// Position while browsing history; None when editing a new value.
    history_index: Option<usize>,
    /// Value being edited before history browsing started.
    history_temp: Option<String>,
    history_limit: usize,
    history_loaded: bool,
    text_color: Option<Color>,
    cursor_focused: Option<Color>,
    focused: bool,
}

impl TextInput {
    pub fn new() -> Self {
        let mut widget = Self {
            textarea: TextArea::default(),
            history_id: None,
            history: Vec::new(),
            history_index: None,
            history_temp: None,
            history_limit: 100,
            history_loaded: false,
            text_color: None,
            cursor_focused: None,
            focused: false,
        };
        widget.apply_style();
        widget
    }

    fn apply_style(&mut self) {
        let mut style = Style::default();
        if let Some(color) = self.text_color {
            style = style.fg(color);
        }
        self.textarea.set_style(style);
        self.textarea.set_cursor_line_style(Style::default());
        self.set_focused(self.focused);
    }

    /// Text and cursor colors from the theme. `cursor_focused = "default"` uses a reversed cursor.
    pub fn with_theme(mut self, theme: &Theme) -> Self {
        self.text_color = Some(theme.get("text_primary"));
        self.cursor_focused = Some(theme.get("cursor_focused"));
        self.apply_style();
        self
    }

    pub fn with_history(mut self, history_id: &str) -> Self {
        self.history_id = Some(history_id.to_string());
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        let cursor_style = if !focused {
            // Same style as the text hides the cursor
            self.textarea.style()
        } else {
            match self.cursor_focused.unwrap_or(Color::Reset) {
                Color::Reset => Style::default().add_modifier(Modifier::REVERSED),
                color => Style::default().bg(color).fg(contrast(color)),
            }
        };
        self.textarea.set_cursor_style(cursor_style);
    }

    pub fn value(&self) -> &str {
        self.textarea.lines().first().map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, value: &str) {
        let single_line = value.replace(['\n', '\r'], " ");
        self.textarea = TextArea::new(vec![single_line]);
        self.apply_style();
        self.textarea.move_cursor(CursorMove::End);
    }

    pub fn clear(&mut self) {
        self.set_value("");
        self.history_index = None;
        self.history_temp = None;
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    fn ensure_history(&mut self, cache: &CacheManager) {
        if self.history_loaded {
            return;
        }
        if let Some(id) = &self.history_id {
            match cache.load_history_file(id) {
                Ok(history) => self.history = history,
                Err(e) => warn!(error = %e, history = %id, "could not load history"),
            }
        }
        self.history_loaded = true;
    }

    /// Record the current value in history and persist it.
    pub fn save_to_history(&mut self, cache: &CacheManager) {
        let Some(id) = self.history_id.clone() else {
            return;
        };
        let value = self.value().to_string();
        if value.is_empty() {
            return;
        }
        self.ensure_history(cache);
        self.history.retain(|h| h != &value);
        self.history.push(value.clone());
        if let Err(e) = cache.push_history(&id, &value, self.history_limit) {
            warn!(error = %e, history = %id, "could not save history");
        }
    }

    fn navigate_history_up(&mut self, cache: Option<&CacheManager>) {
        if let Some(cache) = cache {
            self.ensure_history(cache);
        }
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            Some(i) => i.saturating_sub(1),
            None => {
                self.history_temp = Some(self.value().to_string());
                self.history.len() - 1
            }
        };
        self.history_index = Some(index);
        let entry = self.history[index].clone();
        self.set_value(&entry);
    }

    fn navigate_history_down(&mut self) {
        let Some(index) = self.history_index else {
            return;
        };
        if index + 1 >= self.history.len() {
            let temp = self.history_temp.take().unwrap_or_default();
            self.history_index = None;
            self.set_value(&temp);
        } else {
            self.history_index = Some(index + 1);
            let entry = self.history[index + 1].clone();
            self.set_value(&entry);
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent, cache: Option<&CacheManager>) -> TextInputEvent {
        match event.code {
            KeyCode::Enter => {
                if let Some(cache) = cache {
                    self.save_to_history(cache);
                }
                TextInputEvent::Submit
            }
            KeyCode::Esc => TextInputEvent::Cancel,
            KeyCode::Up if self.history_id.is_some() => {
                self.navigate_history_up(cache);
                TextInputEvent::HistoryChanged
            }
            KeyCode::Down if self.history_id.is_some() => {
                self.navigate_history_down();
                TextInputEvent::HistoryChanged
            }
            _ => {
                self.textarea.input(key_event_to_input(event));
                self.history_index = None;
                self.history_temp = None;
                TextInputEvent::None
            }
        }
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

fn contrast(color: Color) -> Color {
    match color {
        Color::Black | Color::Red | Color::Blue | Color::Magenta | Color::DarkGray => Color::White,
        _ => Color::Black,
    }
}

fn key_event_to_input(event: &KeyEvent) -> Input {
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Delete => Key::Delete,
        _ => Key::Null,
    };
    Input {
        key,
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        self.textarea.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut input = TextInput::new();
        for c in "a.csv".chars() {
            let event = input.handle_key(&key(KeyCode::Char(c)), None);
            assert_eq!(event, TextInputEvent::None);
        }
        assert_eq!(input.value(), "a.csv");
        let event = input.handle_key(&key(KeyCode::Enter), None);
        assert_eq!(event, TextInputEvent::Submit);
        let event = input.handle_key(&key(KeyCode::Esc), None);
        assert_eq!(event, TextInputEvent::Cancel);
    }

    #[test]
    fn test_history_navigation() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::with_dir(dir.path().to_path_buf());
        cache
            .save_history_file("dataset", &["old.csv".into(), "new.csv".into()])
            .unwrap();
        let mut input = TextInput::new().with_history("dataset");
        input.set_value("draft");
        input.handle_key(&key(KeyCode::Up), Some(&cache));
        assert_eq!(input.value(), "new.csv");
        input.handle_key(&key(KeyCode::Up), Some(&cache));
        assert_eq!(input.value(), "old.csv");
        input.handle_key(&key(KeyCode::Down), Some(&cache));
        input.handle_key(&key(KeyCode::Down), Some(&cache));
        assert_eq!(input.value(), "draft");
    }

    #[test]
    fn test_set_value_strips_newlines() {
        let mut input = TextInput::new();
        input.set_value("a\nb");
        assert_eq!(input.value(), "a b");
        input.clear();
        assert!(input.is_empty());
    }
}
