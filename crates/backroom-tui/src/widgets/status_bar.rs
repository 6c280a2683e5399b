//! Status bar widget — the 1-line strip at the top of the screen.
//!
//! Shows the application name, the transient app-level notice (export
//! results, reload feedback), and right-aligned keybinding hints.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBar<'a> {
    notice: Option<&'a str>,
    _theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(notice: Option<&'a str>, theme: &'a Theme) -> Self {
        Self { notice, _theme: theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            " backroom ",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(notice) = self.notice {
            spans.push(Span::styled(
                format!("— {notice}"),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        // Keybinding hints at the right edge
        let hint = " c:new  e:export  R:reload  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
