//! Search bar widget — text input + page-size indicator at the bottom of the
//! screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor (arrow keys or h/l while
//!   this pane is focused, re-mapped by the App shell).
//!
//! Every edit filters live: the shell pushes the new text into the
//! controller, which resets to page 1 and re-runs the filter stage.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// The search text typed by the user.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl SearchBarState {
    /// Handle a key event from the app shell. Returns `true` when the query
    /// text changed and the filter must re-run.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, "search: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    // Walk back one char boundary
                    let prev = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.query.remove(prev);
                    self.cursor = prev;
                    tracing::debug!(query = %self.query, "search: backspace");
                    true
                } else {
                    false
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
                false
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    page_size: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(
        state: &'a SearchBarState,
        page_size: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, page_size, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Search").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        // Split inner area: search text (fill) | page-size indicator (fixed)
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(18)])
            .split(inner);

        let query_line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled("press / to search titles", self.theme.placeholder))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let indicator = format!("page size: {}", self.page_size);
        Paragraph::new(Line::from(indicator)).render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_reports_change() {
        let mut s = SearchBarState::default();
        assert!(s.handle(&AppEvent::Char('s')));
        assert!(s.handle(&AppEvent::Char('h')));
        assert_eq!(s.query, "sh");
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn backspace_at_start_is_silent() {
        let mut s = SearchBarState::default();
        assert!(!s.handle(&AppEvent::Backspace));
    }

    #[test]
    fn cursor_moves_do_not_report_change() {
        let mut s = SearchBarState::default();
        s.handle(&AppEvent::Char('a'));
        assert!(!s.handle(&AppEvent::Nav(Direction::Left)));
        assert_eq!(s.cursor, 0);
        // Insert at cursor position, not at the end
        s.handle(&AppEvent::Char('b'));
        assert_eq!(s.query, "ba");
    }

    #[test]
    fn multibyte_editing_stays_on_boundaries() {
        let mut s = SearchBarState::default();
        s.handle(&AppEvent::Char('é'));
        s.handle(&AppEvent::Char('x'));
        s.handle(&AppEvent::Nav(Direction::Left));
        s.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(s.cursor, 0);
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.cursor, 'é'.len_utf8());
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.query, "x");
    }
}
