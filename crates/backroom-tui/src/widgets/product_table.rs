//! Product table widget — the paginated record view filling most of the
//! screen.
//!
//! Renders straight from a [`RenderModel`]: one row per page item, the
//! total-count and "Page X / Y" captions, and hints for the previous / next
//! controls (dimmed when the model disables them). The selected row's
//! description is shown on a preview line under the table. A load failure
//! replaces the rows with an in-place error line; an empty page shows a
//! placeholder row.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `[` / `]` | Previous / next page (handled by the app shell) |
//! | `Enter` | Open the selected record in the detail form |

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use backroom_core::RenderModel;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Cursor into the rows of the current page.
#[derive(Debug, Default)]
pub struct ProductTableState {
    pub cursor: usize,
}

impl ProductTableState {
    /// Handle a navigation event from the app shell. `row_count` is the
    /// number of rows on the current page.
    pub fn handle(&mut self, event: &AppEvent, row_count: usize) {
        if row_count == 0 {
            self.cursor = 0;
            return;
        }
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "table: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < row_count {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "table: cursor down");
            }
            _ => {}
        }
    }

    /// Pull the cursor back inside the page after the rows changed under it
    /// (page flip, refilter, store refresh).
    pub fn clamp(&mut self, row_count: usize) {
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ProductTable<'a> {
    model: &'a RenderModel,
    state: &'a ProductTableState,
    loading: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ProductTable<'a> {
    pub fn new(
        model: &'a RenderModel,
        state: &'a ProductTableState,
        loading: bool,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { model, state, loading, focused, theme }
    }
}

impl Widget for ProductTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = if self.loading { "Products (loading…)" } else { "Products" };
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 {
            return;
        }

        // Bottom two rows of the pane: description preview + captions.
        let rows_area = Rect { height: inner.height - 2, ..inner };
        let preview_area = Rect { y: inner.bottom() - 2, height: 1, ..inner };
        let caption_area = Rect { y: inner.bottom() - 1, height: 1, ..inner };

        if let Some(ref err) = self.model.error {
            Paragraph::new(Line::from(Span::styled(
                format!("failed to load products: {err}"),
                self.theme.error_row,
            )))
            .render(rows_area, buf);
        } else if self.model.rows.is_empty() {
            Paragraph::new(Line::from(Span::styled("No data", self.theme.placeholder)))
                .render(rows_area, buf);
        } else {
            self.render_rows(rows_area, buf);
        }

        // Selected row's description, in place of the original's tooltip.
        if let Some(row) = self.model.rows.get(self.state.cursor) {
            if !row.description.is_empty() {
                Paragraph::new(Line::from(Span::styled(
                    format!("» {}", row.description),
                    self.theme.placeholder,
                )))
                .render(preview_area, buf);
            }
        }

        render_captions(self.model, caption_area, buf);
    }
}

impl ProductTable<'_> {
    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(self.model.headers.iter().map(String::as_str))
            .style(self.theme.table_header);

        let rows = self.model.rows.iter().map(|r| {
            Row::new(vec![
                r.id.as_str(),
                r.title.as_str(),
                r.price.as_str(),
                r.category.as_str(),
                r.thumb.as_str(),
            ])
        });

        let widths = [
            Constraint::Length(6),
            Constraint::Fill(2),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Fill(3),
        ];

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(highlight)
            .column_spacing(1);

        let mut table_state = TableState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}

fn render_captions(model: &RenderModel, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(Span::styled(
        model.count_caption.as_str(),
        Style::default().add_modifier(Modifier::DIM),
    )))
    .render(area, buf);

    let prev_style = if model.prev_enabled {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let next_style = if model.next_enabled {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let right = Line::from(vec![
        Span::styled("[ prev  ", prev_style),
        Span::raw(model.page_caption.as_str()),
        Span::styled("  next ]", next_style),
    ]);
    let width = right.width() as u16;
    let x = area.right().saturating_sub(width);
    buf.set_line(x, area.y, &right, width);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_within_page() {
        let mut s = ProductTableState::default();
        s.handle(&AppEvent::Nav(Direction::Up), 3);
        assert_eq!(s.cursor, 0);
        for _ in 0..10 {
            s.handle(&AppEvent::Nav(Direction::Down), 3);
        }
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn clamp_after_shrinking_page() {
        let mut s = ProductTableState { cursor: 9 };
        s.clamp(4);
        assert_eq!(s.cursor, 3);
        s.clamp(0);
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn empty_page_pins_cursor_to_zero() {
        let mut s = ProductTableState { cursor: 5 };
        s.handle(&AppEvent::Nav(Direction::Down), 0);
        assert_eq!(s.cursor, 0);
    }
}
