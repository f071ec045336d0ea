//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Query state lives in the `TableController`; the App routes Actions to it
//! and keeps the loaded library alongside.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_browser_screen, BrowserRenderContext, GotoPageDialog, HelpDialog, QuitDialog, SearchBar,
    TableComponent,
};
use crate::config::Config;
use crate::engine::{QueryState, Table, TableController};
use crate::model::{Modal, ModalStack};
use crate::services::{self, LibrarySource};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::env;
use std::path::PathBuf;
use tracing::{error, warn};

/// Page sizes offered by `+` and `-`
pub const PAGE_SIZE_STEPS: [usize; 6] = [5, 10, 20, 25, 50, 100];

/// Next page size up or down from `current`, staying on the step ladder
pub fn step_page_size(current: usize, up: bool) -> usize {
    if up {
        PAGE_SIZE_STEPS
            .iter()
            .copied()
            .find(|&s| s > current)
            .unwrap_or(PAGE_SIZE_STEPS[PAGE_SIZE_STEPS.len() - 1])
    } else {
        PAGE_SIZE_STEPS
            .iter()
            .rev()
            .copied()
            .find(|&s| s < current)
            .unwrap_or(PAGE_SIZE_STEPS[0])
    }
}

pub struct App {
    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────
    /// Rows and columns of the loaded library
    pub library: Table,

    pub controller: TableController,

    pub source: LibrarySource,

    pub config: Config,

    /// Whether page size changes are written back to the config file
    pub persist_config: bool,

    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Where exports are written
    pub export_dir: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub search_bar: SearchBar,
    pub table: TableComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub goto_page_dialog: GotoPageDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create the App and load the library behind `source`
    pub fn new(config: Config, source: LibrarySource) -> App {
        let (library, load_error) = match services::load_library(&source) {
            Ok(table) => (table, None),
            Err(e) => {
                error!(source = %source, error = %e, "failed to load library");
                (Table::new(Vec::new(), Vec::new()), Some(e.to_string()))
            }
        };

        let mut app = Self::with_library(config, source, library);
        app.error = load_error;
        app
    }

    /// Create the App around an already loaded table
    pub fn with_library(config: Config, source: LibrarySource, library: Table) -> App {
        let controller = TableController::new(QueryState::with_page_size(config.page_size));
        App {
            library,
            controller,
            source,
            config,
            persist_config: true,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            export_dir: None,
            search_bar: SearchBar::default(),
            table: TableComponent::new(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog,
            goto_page_dialog: GotoPageDialog,
        }
    }

    /// Rows on the current page
    fn page_len(&self) -> usize {
        self.controller.view(&self.library).rows.len()
    }

    fn reload_library(&mut self) {
        match services::load_library(&self.source) {
            Ok(table) => {
                self.library = table;
                self.controller.reset_for_new_rows(&self.library);
                self.table.reset_cursor();
                self.error = None;
                self.status_message = Some(format!("Reloaded {} tracks", self.library.rows.len()));
            }
            Err(e) => {
                error!(source = %self.source, error = %e, "reload failed");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Write the selection, or every matching row when nothing is selected
    fn export_rows(&mut self) -> Result<(PathBuf, usize)> {
        let rows = if self.controller.state().selected.is_empty() {
            self.controller.matched_rows(&self.library)
        } else {
            self.controller.selected_rows(&self.library)
        };

        let dir = match &self.export_dir {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("Could not determine working directory")?,
        };
        let path = services::export_to_dir(&dir, &self.library.columns, &rows)?;
        Ok((path, rows.len()))
    }

    fn change_page_size(&mut self, up: bool) {
        let size = step_page_size(self.controller.state().page_size, up);
        self.controller.set_page_size(&self.library, size);
        self.table.reset_cursor();

        if self.config.page_size == size {
            return;
        }
        self.config.page_size = size;
        if self.persist_config {
            if let Err(e) = self.config.save() {
                warn!(error = %e, "failed to save page size");
                self.error = Some(format!("Failed to save config: {}", e));
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        self.status_message = None;

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else if self.search_bar.active {
            self.search_bar.handle_key_event(key)
        } else {
            self.table.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() || self.search_bar.active {
            return Ok(None);
        }
        self.table.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Row Cursor (delegate to TableComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow | Action::PrevRow | Action::FirstRow | Action::LastRow => {
                let page_len = self.page_len();
                self.table.sync_page_len(page_len);
                self.table.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Pages
            // ─────────────────────────────────────────────────────────────────
            Action::FirstPage => {
                self.controller.first_page(&self.library);
                self.table.reset_cursor();
            }
            Action::PrevPage => {
                self.controller.prev_page(&self.library);
                self.table.reset_cursor();
            }
            Action::NextPage => {
                self.controller.next_page(&self.library);
                self.table.reset_cursor();
            }
            Action::LastPage => {
                self.controller.last_page(&self.library);
                self.table.reset_cursor();
            }
            Action::GotoPage(page) => {
                if matches!(self.modals.top(), Some(Modal::GotoPage { .. })) {
                    self.modals.pop();
                }
                self.controller.goto_page(&self.library, page);
                self.table.reset_cursor();
            }
            Action::IncreasePageSize => self.change_page_size(true),
            Action::DecreasePageSize => self.change_page_size(false),
            Action::TogglePagination => {
                let paginate = !self.controller.state().paginate;
                self.controller.set_paginate(&self.library, paginate);
                self.table.reset_cursor();
            }

            // ─────────────────────────────────────────────────────────────────
            // Sort
            // ─────────────────────────────────────────────────────────────────
            Action::SortByColumn(index) => {
                self.controller.sort_by_column(&self.library, index);
                self.table.reset_cursor();
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode | Action::ExitSearchMode => {
                self.search_bar.update(action)?;
            }
            Action::SearchInput(c) => {
                self.controller.push_search_char(c);
                self.table.reset_cursor();
            }
            Action::SearchBackspace => {
                self.controller.pop_search_char();
                self.table.reset_cursor();
            }
            Action::ClearSearch => {
                self.controller.clear_search();
                self.search_bar.update(action)?;
                self.table.reset_cursor();
            }

            // ─────────────────────────────────────────────────────────────────
            // Selection
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleRow => {
                let page_len = self.page_len();
                self.table.sync_page_len(page_len);
                if let Some(index) = self.table.cursor() {
                    self.controller.toggle_row(&self.library, index);
                }
            }
            Action::ToggleRowAt(index) => {
                self.controller.toggle_row(&self.library, index);
            }
            Action::ToggleAllRows => self.controller.toggle_all(&self.library),
            Action::ClearSelection => self.controller.clear_selection(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog
                    .set_selected(self.controller.state().selected.len());
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::OpenGotoPage => {
                self.modals.push(Modal::GotoPage {
                    input: String::new(),
                });
            }
            Action::CloseModal => {
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Library
            // ─────────────────────────────────────────────────────────────────
            Action::ReloadLibrary => self.reload_library(),
            Action::ExportRows => match self.export_rows() {
                Ok((path, count)) => {
                    self.status_message =
                        Some(format!("Exported {} rows to {}", count, path.display()));
                }
                Err(e) => {
                    error!(error = %e, "export failed");
                    self.error = Some(format!("Export failed: {}", e));
                }
            },
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let view = self.controller.view(&self.library);
        let total_pages = view.total_pages;
        let source = self.source.to_string();
        let ctx = BrowserRenderContext {
            columns: &self.library.columns,
            view: &view,
            state: self.controller.state(),
            source: &source,
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };

        draw_browser_screen(frame, area, &mut self.search_bar, &mut self.table, &ctx)?;

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal, total_pages)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help { .. } => {
                if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
                    if HelpDialog::scroll(key, scroll_offset) {
                        return Ok(None);
                    }
                }
                self.help_dialog.handle_key_event(key)
            }
            Modal::GotoPage { .. } => {
                let dialog = &self.goto_page_dialog;
                match self.modals.top_mut() {
                    Some(Modal::GotoPage { input }) => Ok(dialog.handle_input(key, input)),
                    _ => Ok(None),
                }
            }
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal, total_pages: usize) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help { scroll_offset } => {
                let clamped = self.help_dialog.draw_with_offset(frame, area, *scroll_offset);
                if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
                    *scroll_offset = clamped;
                }
            }
            Modal::GotoPage { input } => {
                self.goto_page_dialog
                    .draw_with_input(frame, area, input, total_pages);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::query::SortDirection;
    use crate::model::track::sample_library;

    fn app_with_rows(n: usize) -> App {
        let rows = (0..n)
            .map(|i| crate::engine::Row::new().with("title", format!("Track {:02}", i)))
            .collect();
        let table = Table::new(vec![crate::engine::ColumnDescriptor::text("title", "Title")], rows);
        let mut app = App::with_library(Config::default(), LibrarySource::Sample, table);
        app.persist_config = false;
        app
    }

    fn run(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_step_page_size() {
        assert_eq!(step_page_size(10, true), 20);
        assert_eq!(step_page_size(10, false), 5);
        assert_eq!(step_page_size(100, true), 100);
        assert_eq!(step_page_size(5, false), 5);
        // Off-ladder sizes snap to the neighbouring step
        assert_eq!(step_page_size(12, true), 20);
        assert_eq!(step_page_size(12, false), 10);
    }

    #[test]
    fn test_page_keys_move_through_pages() {
        let mut app = app_with_rows(25);
        run(&mut app, Action::NextPage);
        run(&mut app, Action::NextPage);
        run(&mut app, Action::NextPage);
        assert_eq!(app.controller.state().current_page, 3);

        run(&mut app, Action::FirstPage);
        assert_eq!(app.controller.state().current_page, 1);
    }

    #[test]
    fn test_search_mode_routes_keys_to_search() {
        let mut app = app_with_rows(25);
        let enter = app.handle_key_event(key(KeyCode::Char('/'))).unwrap().unwrap();
        run(&mut app, enter);
        assert!(app.search_bar.active);

        for c in "07".chars() {
            let action = app.handle_key_event(key(KeyCode::Char(c))).unwrap().unwrap();
            run(&mut app, action);
        }
        assert_eq!(app.controller.state().search_text, "07");
        assert_eq!(app.controller.view(&app.library).matched, 1);

        let clear = app.handle_key_event(key(KeyCode::Esc)).unwrap().unwrap();
        run(&mut app, clear);
        assert!(!app.search_bar.active);
        assert_eq!(app.controller.state().search_text, "");
    }

    #[test]
    fn test_toggle_row_uses_cursor() {
        let mut app = app_with_rows(25);
        run(&mut app, Action::NextPage);
        run(&mut app, Action::NextRow);
        run(&mut app, Action::ToggleRow);

        // Second row of page 2 is input position 11
        assert!(app.controller.state().selected.contains(&11));
    }

    #[test]
    fn test_sort_by_column_twice_reverses() {
        let mut app = App::with_library(
            Config::default(),
            LibrarySource::Sample,
            services::load_library(&LibrarySource::Sample).unwrap(),
        );
        run(&mut app, Action::SortByColumn(0));
        run(&mut app, Action::SortByColumn(0));
        let sort = app.controller.state().sort.clone().unwrap();
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(app.library.rows.len(), sample_library().len());
    }

    #[test]
    fn test_goto_page_dialog_flow() {
        let mut app = app_with_rows(25);
        run(&mut app, Action::OpenGotoPage);
        for code in [KeyCode::Char('3'), KeyCode::Enter] {
            if let Some(action) = app.handle_key_event(key(code)).unwrap() {
                run(&mut app, action);
            }
        }
        assert!(app.modals.is_empty());
        assert_eq!(app.controller.state().current_page, 3);
    }

    #[test]
    fn test_quit_dialog_confirms() {
        let mut app = app_with_rows(3);
        run(&mut app, Action::ToggleAllRows);
        run(&mut app, Action::OpenQuitDialog);
        assert_eq!(app.quit_dialog.selected, 3);

        let yes = app.handle_key_event(key(KeyCode::Char('y'))).unwrap().unwrap();
        run(&mut app, yes);
        assert!(app.should_quit);
    }

    #[test]
    fn test_page_size_change_keeps_first_row() {
        let mut app = app_with_rows(25);
        run(&mut app, Action::NextPage);
        run(&mut app, Action::DecreasePageSize);
        // Row 10 was first on page 2 of 10; with 5 per page it is on page 3
        assert_eq!(app.controller.state().page_size, 5);
        assert_eq!(app.controller.state().current_page, 3);
        assert_eq!(app.config.page_size, 5);
    }

    #[test]
    fn test_export_writes_selection() {
        let dir = std::env::temp_dir().join(format!("tracktable-app-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut app = app_with_rows(25);
        app.export_dir = Some(dir.clone());
        run(&mut app, Action::ToggleRowAt(0));
        run(&mut app, Action::ToggleRowAt(2));
        run(&mut app, Action::ExportRows);

        assert!(app.error.is_none());
        let message = app.status_message.clone().unwrap();
        assert!(message.starts_with("Exported 2 rows"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
