//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Each iteration pumps the
//! sync controller's completion events before drawing, so network results
//! land on the next frame at the latest.

use crate::{
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        detail_form::{DetailForm, DetailFormState, FormMode},
        help::HelpPopup,
        product_table::{ProductTable, ProductTableState},
        search_bar::{SearchBar, SearchBarState},
        status_bar::StatusBar,
    },
};
use backroom_api::{Notice, SyncController};
use backroom_core::{config::Config, export, SortField};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub controller: SyncController,
    pub focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub search: SearchBarState,
    pub table: ProductTableState,
    /// Modal edit/create form; captures all input while open.
    pub form: Option<DetailFormState>,
    pub show_help: bool,
    /// Transient app-level message (export result, reload feedback).
    pub notice: Option<String>,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(controller: SyncController, config: Config, theme: Theme) -> Self {
        let state = AppState {
            controller,
            focus: Focus::Table,
            theme,
            config,
            search: SearchBarState::default(),
            table: ProductTableState::default(),
            form: None,
            show_help: false,
            notice: None,
            quit: false,
        };
        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on
    /// exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.state.controller.load_all();
        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.tick();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if self.is_insert_mode() {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn is_insert_mode(&self) -> bool {
        self.state.form.is_some() || self.state.focus == Focus::Search
    }

    /// Apply sync completions that arrived since the last tick.
    fn tick(&mut self) {
        let notices = self.state.controller.pump();
        for notice in notices {
            match notice {
                Notice::StoreRefreshed => self.clamp_cursor(),
                Notice::CreateSucceeded => {
                    // Reset the create form for the next entry; an edit form
                    // stays open showing its success status.
                    if let Some(form) = &mut self.state.form {
                        if form.mode == FormMode::Create {
                            form.clear();
                        }
                    }
                }
                Notice::UpdateSucceeded => {}
            }
        }
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // An open form captures everything.
        if s.form.is_some() {
            self.handle_form(event);
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            // Toggle help (only when not typing in the search bar)
            AppEvent::Char('?') if s.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::SearchFocus => {
                tracing::debug!("focus -> Search");
                s.focus = Focus::Search;
            }

            AppEvent::FocusNext => {
                s.focus = match s.focus {
                    Focus::Table => Focus::Search,
                    Focus::Search => Focus::Table,
                };
                tracing::debug!(to = ?s.focus, "focus cycle");
            }

            AppEvent::Escape => {
                if s.focus == Focus::Search {
                    s.focus = Focus::Table;
                }
            }

            // Paging and page size work regardless of pane focus
            AppEvent::NextPage => {
                s.controller.next_page();
                self.clamp_cursor();
            }
            AppEvent::PrevPage => {
                s.controller.prev_page();
                self.clamp_cursor();
            }
            AppEvent::PageSizeUp => {
                self.cycle_page_size(1);
            }
            AppEvent::PageSizeDown => {
                self.cycle_page_size(-1);
            }

            AppEvent::Export => self.export_page(),

            AppEvent::Reload => {
                s.notice = None;
                s.controller.load_all();
            }

            AppEvent::CreateOpen => {
                tracing::debug!("create form opened");
                s.controller.reset_create_status();
                s.form = Some(DetailFormState::create());
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.state.focus {
            Focus::Table => self.handle_table(event),
            Focus::Search => self.handle_search(event),
        }
    }

    fn handle_table(&mut self, event: AppEvent) {
        let s = &mut self.state;
        match event {
            // Column sorting: 1..4 toggle a column, 0 restores API order
            AppEvent::Char(c) if matches!(c, '0'..='4') => {
                match sort_field_for_digit(c) {
                    Some(field) => {
                        tracing::debug!(%field, "sort toggled");
                        s.controller.toggle_sort(field);
                    }
                    None => {
                        tracing::debug!("sort cleared");
                        s.controller.clear_sort();
                    }
                }
                self.clamp_cursor();
            }

            AppEvent::Nav(Direction::Up) | AppEvent::Nav(Direction::Down) => {
                let rows = s.controller.snapshot().page_items.len();
                s.table.handle(&event, rows);
            }

            AppEvent::Enter => {
                let snapshot = s.controller.snapshot();
                if let Some(product) = snapshot.page_items.get(s.table.cursor) {
                    tracing::debug!(id = product.id, "detail form opened");
                    s.controller.reset_detail_status();
                    s.form = Some(DetailFormState::edit(product));
                }
            }

            _ => {}
        }
    }

    fn handle_search(&mut self, event: AppEvent) {
        let s = &mut self.state;
        match event {
            AppEvent::Enter => {
                s.focus = Focus::Table;
            }
            other => {
                // Every text change filters live and resets to page 1.
                if s.search.handle(&other) {
                    s.controller.set_search(s.search.query.clone());
                    self.clamp_cursor();
                }
            }
        }
    }

    fn handle_form(&mut self, event: AppEvent) {
        let s = &mut self.state;
        let Some(form) = &mut s.form else { return };

        match event {
            AppEvent::Quit => s.quit = true,
            AppEvent::Escape => {
                tracing::debug!("form closed");
                s.form = None;
            }
            AppEvent::Enter => {
                // The save control is disabled while its request is in
                // flight; re-enabled by the controller on either outcome.
                let busy = match form.mode {
                    FormMode::Edit { .. } => s.controller.save_busy(),
                    FormMode::Create => s.controller.create_busy(),
                };
                if busy {
                    return;
                }
                let payload = form.payload();
                match form.id() {
                    Some(id) => s.controller.update(id, payload),
                    None => s.controller.create(payload),
                }
            }
            other => form.handle(&other),
        }
    }

    /// Step through the configured page-size choices.
    fn cycle_page_size(&mut self, step: isize) {
        let s = &mut self.state;
        let sizes = &s.config.ui.page_sizes;
        if sizes.is_empty() {
            return;
        }
        let current = s.controller.view().page_size;
        let idx = sizes.iter().position(|&n| n == current).unwrap_or(0) as isize;
        let next = (idx + step).clamp(0, sizes.len() as isize - 1) as usize;
        if sizes[next] != current {
            tracing::debug!(page_size = sizes[next], "page size changed");
            s.controller.set_page_size(sizes[next]);
            self.clamp_cursor();
        }
    }

    /// Write the visible page to the configured CSV file.
    fn export_page(&mut self) {
        let s = &mut self.state;
        let snapshot = s.controller.snapshot();
        let csv = export::encode_csv(&snapshot.page_items);
        let file_name = &s.config.export.file_name;
        s.notice = Some(match std::fs::write(file_name, csv) {
            Ok(()) => {
                tracing::debug!(rows = snapshot.page_items.len(), file = %file_name, "exported");
                format!("exported {} rows to {}", snapshot.page_items.len(), file_name)
            }
            Err(err) => format!("export failed: {err}"),
        });
    }

    fn clamp_cursor(&mut self) {
        let rows = self.state.controller.snapshot().page_items.len();
        self.state.table.clamp(rows);
    }
}

fn sort_field_for_digit(c: char) -> Option<SortField> {
    match c {
        '1' => Some(SortField::Id),
        '2' => Some(SortField::Title),
        '3' => Some(SortField::Price),
        '4' => Some(SortField::Category),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | table | 3-line search bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    let model = state.controller.render_model();

    frame.render_widget(StatusBar::new(state.notice.as_deref(), &state.theme), vert[0]);
    frame.render_widget(
        ProductTable::new(
            &model,
            &state.table,
            state.controller.is_loading(),
            state.focus == Focus::Table && state.form.is_none(),
            &state.theme,
        ),
        vert[1],
    );
    frame.render_widget(
        SearchBar::new(
            &state.search,
            state.controller.view().page_size,
            state.focus == Focus::Search && state.form.is_none(),
            &state.theme,
        ),
        vert[2],
    );

    if let Some(form) = &state.form {
        let (status, busy) = match form.mode {
            FormMode::Edit { .. } => {
                (state.controller.detail_status(), state.controller.save_busy())
            }
            FormMode::Create => {
                (state.controller.create_status(), state.controller.create_busy())
            }
        };
        frame.render_widget(DetailForm::new(form, status, busy, &state.theme), area);
        let (cx, cy) = form.cursor_position(area);
        frame.set_cursor_position((cx, cy));
    } else if state.focus == Focus::Search {
        let sb = SearchBar::new(
            &state.search,
            state.controller.view().page_size,
            true,
            &state.theme,
        );
        let (cx, cy) = sb.cursor_position(vert[2]);
        frame.set_cursor_position((cx, cy));
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}
