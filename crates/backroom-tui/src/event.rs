//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `/`                     | `SearchFocus`              |
//! | `]`, `PageDown`         | `NextPage`                 |
//! | `[`, `PageUp`           | `PrevPage`                 |
//! | `+` / `=`               | `PageSizeUp`               |
//! | `-`                     | `PageSizeDown`             |
//! | `e`                     | `Export`                   |
//! | `R`                     | `Reload`                   |
//! | `c`                     | `CreateOpen`               |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! Digits (`0`–`4` toggle column sorting) and `?` (help) reach the app shell
//! as plain `Char` events; the shell interprets them.
//!
//! ## Insert mode
//!
//! When a text-input widget (search bar, form field) is focused, the event
//! loop calls [`to_app_event_insert`] instead. In insert mode:
//! - letter and symbol shortcuts produce `Char` events so the user can type
//! - Arrow keys still produce `Nav` for cursor / field movement
//! - Only `Ctrl+c`, `Escape`, `Enter`, `Tab`, and `Backspace` keep their
//!   special bindings

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for table-cursor and form-field navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
///
/// Widgets receive `AppEvent` values — they never inspect crossterm types
/// directly. The App shell routes events to the appropriate widget based on
/// the current focus state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane (Tab-cycle), or the next form
    /// field while a form is open.
    FocusNext,
    /// Transfer focus to the search bar.
    SearchFocus,
    /// Advance to the next page of the filtered view.
    NextPage,
    /// Go back one page.
    PrevPage,
    /// Cycle the page size up through the configured choices.
    PageSizeUp,
    /// Cycle the page size down.
    PageSizeDown,
    /// Export the visible page as CSV.
    Export,
    /// Re-fetch the full record set.
    Reload,
    /// Open the create-product form.
    CreateOpen,
    /// Navigate the table cursor or move within a form.
    Nav(Direction),
    /// A printable character forwarded to the active text input (or an
    /// unbound shortcut the app shell interprets, e.g. sort digits).
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Confirm: open the selected row, or submit the active form.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (form, help popup, search focus).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no semantic meaning for the
/// application (mouse events, key-release events on terminals that emit
/// them, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input ("insert") mode.
///
/// In insert mode, shortcut characters (`q`, `e`, `c`, `[`, `]`, `+`, `-`,
/// hjkl, digits) are forwarded as [`AppEvent::Char`] so the user can type
/// freely. Arrow keys still produce [`AppEvent::Nav`] so `←`/`→` move the
/// text cursor and `↑`/`↓` change form fields. Only `Ctrl+c`, `Escape`,
/// `Enter`, `Tab`, and `Backspace` keep their special bindings.
///
/// Call this variant whenever a text-input widget (search bar, detail or
/// create form) has focus.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Quit — q (normal mode) or Ctrl+c anywhere
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        // Focus cycling
        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        // Search bar
        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::SearchFocus),

        // Paging — bracket keys and page keys both re-slice only
        Char(']') if key.modifiers == Mod::NONE => Some(AppEvent::NextPage),
        Char('[') if key.modifiers == Mod::NONE => Some(AppEvent::PrevPage),
        PageDown => Some(AppEvent::NextPage),
        PageUp => Some(AppEvent::PrevPage),

        // Page size — '+' usually arrives as Shift+'=' depending on the
        // terminal, so match the produced characters rather than modifiers
        Char('+') | Char('=') => Some(AppEvent::PageSizeUp),
        Char('-') if key.modifiers == Mod::NONE => Some(AppEvent::PageSizeDown),

        // Operations
        Char('e') if key.modifiers == Mod::NONE => Some(AppEvent::Export),
        Char('c') if key.modifiers == Mod::NONE => Some(AppEvent::CreateOpen),
        // Uppercase R — terminal may or may not set SHIFT; match the code alone
        Char('R') => Some(AppEvent::Reload),

        // Table / form navigation
        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        // Remaining printable characters (sort digits, '?') forward as-is
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

/// Key mapping for text-input / insert mode.
///
/// All printable characters (with or without Shift) forward as `Char`.
/// Arrow keys produce `Nav` so ← / → still move the text cursor.
fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        // Arrow keys move the text cursor / active form field
        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        // Tab exits the text input (focus-cycle / next-field behaviour)
        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        // Every printable character — including letters that are shortcuts
        // in normal mode — is forwarded verbatim
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
