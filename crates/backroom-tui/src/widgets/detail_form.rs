//! Detail / create form — centred modal for editing one record or creating
//! a new one.
//!
//! The form exposes the editable fields (title, price, description, category
//! id, single image URL); in edit mode the record id is shown read-only and
//! the full image list is displayed underneath. Submitting builds a
//! [`ProductPayload`] via the standard coercion rules — the form itself never
//! validates, malformed numbers coerce to zero on submit.
//!
//! # Keys (while the form is open)
//!
//! | Key | Action |
//! |-----|--------|
//! | `Tab` / `↓` | Next field |
//! | `↑` | Previous field |
//! | `←` / `→` | Move cursor within the field |
//! | `Enter` | Submit (disabled while a save is in flight) |
//! | `Escape` | Close without saving |

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use backroom_api::StatusLine;
use backroom_core::{Product, ProductPayload};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub const FIELD_TITLE: usize = 0;
pub const FIELD_PRICE: usize = 1;
pub const FIELD_DESCRIPTION: usize = 2;
pub const FIELD_CATEGORY_ID: usize = 3;
pub const FIELD_IMAGE: usize = 4;
const FIELD_COUNT: usize = 5;

const LABELS: [&str; FIELD_COUNT] = ["title", "price", "description", "category id", "image"];

/// Column (within the popup's inner area) where field values start:
/// 12-char label + "│ " separator.
const VALUE_COL: u16 = 14;
const POPUP_WIDTH: u16 = 64;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Editing an existing record; its id goes into the PUT path.
    Edit { id: u64 },
    Create,
}

/// One editable text field with its own cursor.
#[derive(Debug)]
pub struct FormField {
    pub value: String,
    /// Byte offset of the cursor within `value`.
    pub cursor: usize,
}

impl FormField {
    fn new(value: String) -> Self {
        let cursor = value.len();
        Self { value, cursor }
    }

    fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    fn right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }
}

pub struct DetailFormState {
    pub mode: FormMode,
    pub fields: [FormField; FIELD_COUNT],
    pub active: usize,
    /// Full image URL list, shown read-only in edit mode.
    pub images: Vec<String>,
}

impl DetailFormState {
    /// Pre-filled form for an existing record.
    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit { id: product.id },
            fields: [
                FormField::new(product.title.clone()),
                FormField::new(product.price.to_string()),
                FormField::new(product.description.clone()),
                FormField::new(product.category.id.to_string()),
                FormField::new(product.thumbnail().unwrap_or("").to_string()),
            ],
            active: FIELD_TITLE,
            images: product.images.clone(),
        }
    }

    /// Blank form for a new record.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: std::array::from_fn(|_| FormField::new(String::new())),
            active: FIELD_TITLE,
            images: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<u64> {
        match self.mode {
            FormMode::Edit { id } => Some(id),
            FormMode::Create => None,
        }
    }

    /// Blank every field, keeping the mode. Used when a create succeeds.
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.cursor = 0;
        }
        self.active = FIELD_TITLE;
    }

    /// Handle a key event while the form is focused. Submission (`Enter`)
    /// and dismissal (`Escape`) are the app shell's concern, not handled
    /// here.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => self.fields[self.active].insert(*c),
            AppEvent::Backspace => self.fields[self.active].backspace(),
            AppEvent::Nav(Direction::Left) => self.fields[self.active].left(),
            AppEvent::Nav(Direction::Right) => self.fields[self.active].right(),
            AppEvent::Nav(Direction::Up) => {
                self.active = self.active.checked_sub(1).unwrap_or(FIELD_COUNT - 1);
            }
            AppEvent::Nav(Direction::Down) | AppEvent::FocusNext => {
                self.active = (self.active + 1) % FIELD_COUNT;
            }
            _ => {}
        }
    }

    /// Build the write payload from the current field values, applying the
    /// coercion rules.
    pub fn payload(&self) -> ProductPayload {
        ProductPayload::from_form(
            &self.fields[FIELD_TITLE].value,
            &self.fields[FIELD_PRICE].value,
            &self.fields[FIELD_DESCRIPTION].value,
            &self.fields[FIELD_CATEGORY_ID].value,
            &self.fields[FIELD_IMAGE].value,
        )
    }

    /// The popup rectangle this form renders into, for cursor placement.
    pub fn popup_area(&self, area: Rect) -> Rect {
        let height = self.popup_height();
        centered_rect(POPUP_WIDTH, height, area)
    }

    /// Absolute terminal position of the text cursor in the active field.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let popup = self.popup_area(area);
        let field = &self.fields[self.active];
        let col = field.value[..field.cursor].chars().count() as u16;
        let x = (popup.x + 1 + VALUE_COL + col).min(popup.right().saturating_sub(2));
        let y = popup.y + 1 + self.field_row(self.active) as u16;
        (x, y)
    }

    /// Row offset (within the popup's inner area) of field `idx`.
    fn field_row(&self, idx: usize) -> usize {
        // Edit mode shows a read-only id line above the fields.
        match self.mode {
            FormMode::Edit { .. } => idx + 1,
            FormMode::Create => idx,
        }
    }

    fn popup_height(&self) -> u16 {
        // fields + status + hint + borders, plus the id and image lines in
        // edit mode.
        let mut rows = FIELD_COUNT + 2;
        if let FormMode::Edit { .. } = self.mode {
            rows += 1 + self.images.len().min(3);
        }
        rows as u16 + 2
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct DetailForm<'a> {
    state: &'a DetailFormState,
    status: Option<&'a StatusLine>,
    busy: bool,
    theme: &'a Theme,
}

impl<'a> DetailForm<'a> {
    pub fn new(
        state: &'a DetailFormState,
        status: Option<&'a StatusLine>,
        busy: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, status, busy, theme }
    }
}

impl Widget for DetailForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = self.state.popup_area(area);
        Clear.render(popup, buf);

        let title = match self.state.mode {
            FormMode::Edit { id } => format!(" Edit product #{id} "),
            FormMode::Create => " New product ".to_string(),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = Vec::new();

        if let FormMode::Edit { id } = self.state.mode {
            lines.push(Line::from(Span::styled(
                format!("{:<12}│ {}", "id", id),
                self.theme.placeholder,
            )));
        }

        for (i, field) in self.state.fields.iter().enumerate() {
            let label_style = if i == self.state.active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<12}", LABELS[i]), label_style),
                Span::raw("│ "),
                Span::raw(field.value.as_str()),
            ]));
        }

        if let FormMode::Edit { .. } = self.state.mode {
            lines.push(Line::from(Span::styled(
                format!("images ({})", self.state.images.len()),
                self.theme.placeholder,
            )));
            for url in self.state.images.iter().take(3) {
                lines.push(Line::from(Span::styled(
                    format!("  {url}"),
                    self.theme.placeholder,
                )));
            }
        }

        match self.status {
            Some(status) => lines.push(Line::from(Span::styled(
                status.message.clone(),
                self.theme.status_style(status.phase),
            ))),
            None => lines.push(Line::from("")),
        }

        let hint = if self.busy {
            "saving…"
        } else {
            "Enter:save  Tab/↓:next field  Esc:close"
        };
        lines.push(Line::from(Span::styled(hint, self.theme.placeholder)));

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
