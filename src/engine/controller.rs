//! Table controller - the stateful side of the engine
//!
//! Owns one [`QueryState`] and exposes the operations a view calls in
//! response to user input. Rows are not owned: every operation that needs
//! them takes the [`Table`] the caller is currently showing, and the
//! derived view is recomputed from scratch on each call.
//!
//! Selection is addressed through page-relative indices but stored by the
//! row's position in the input collection, so a selection survives search,
//! sort and page changes as long as the caller keeps the same rows.

use super::pipeline;
use super::query::{QueryState, SortSpec};
use super::row::{RowRef, Table};
use super::value::ValueKind;
use std::collections::BTreeSet;
use tracing::debug;

/// The derived page handed to the renderer
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    /// Rows on the current page (at most `page_size`)
    pub rows: Vec<RowRef<'a>>,
    /// Current page after clamping
    pub current_page: usize,
    pub total_pages: usize,
    /// Rows left after search
    pub matched: usize,
    /// Rows in the input collection
    pub total: usize,
    /// 1-based index of the first visible row among the matched rows (0 when empty)
    pub range_start: usize,
    /// 1-based index of the last visible row among the matched rows (0 when empty)
    pub range_end: usize,
    /// Page indices of selected rows on this page
    pub selected_on_page: BTreeSet<usize>,
    /// Selected rows across all pages
    pub selected_total: usize,
}

impl TableView<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn all_selected(&self) -> bool {
        !self.rows.is_empty() && self.selected_on_page.len() == self.rows.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableController {
    state: QueryState,
}

impl TableController {
    pub fn new(state: QueryState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derivation
    // ─────────────────────────────────────────────────────────────────────────

    /// Filtered and sorted rows, unpaginated
    pub fn matched_rows<'a>(&self, table: &'a Table) -> Vec<RowRef<'a>> {
        let filtered = pipeline::filter(&table.rows, &self.state.search_text);
        let kind = self.sort_kind(table);
        pipeline::sort(filtered, self.state.sort.as_ref(), kind)
    }

    pub fn total_pages(&self, table: &Table) -> usize {
        self.pages_for(self.matched_rows(table).len())
    }

    /// Run the full pipeline for the current state
    pub fn view<'a>(&self, table: &'a Table) -> TableView<'a> {
        let matched = self.matched_rows(table);
        let total_pages = self.pages_for(matched.len());
        let current_page = self.state.current_page.clamp(1, total_pages);

        let rows: Vec<RowRef<'a>> = if self.state.paginate {
            pipeline::paginate(&matched, current_page, self.state.page_size).to_vec()
        } else {
            matched.clone()
        };

        let offset = if self.state.paginate {
            (current_page - 1) * self.state.page_size
        } else {
            0
        };
        let (range_start, range_end) = if rows.is_empty() {
            (0, 0)
        } else {
            (offset + 1, offset + rows.len())
        };

        let selected_on_page = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| self.state.selected.contains(&r.position))
            .map(|(i, _)| i)
            .collect();

        TableView {
            rows,
            current_page,
            total_pages,
            matched: matched.len(),
            total: table.rows.len(),
            range_start,
            range_end,
            selected_on_page,
            selected_total: self.state.selected.len(),
        }
    }

    fn pages_for(&self, len: usize) -> usize {
        if self.state.paginate {
            pipeline::total_pages(len, self.state.page_size)
        } else {
            1
        }
    }

    fn sort_kind(&self, table: &Table) -> ValueKind {
        self.state
            .sort
            .as_ref()
            .and_then(|spec| table.column(&spec.field))
            .map(|c| c.kind)
            .unwrap_or_default()
    }

    /// Bring `current_page` back into `[1, total_pages]`
    pub fn clamp_page(&mut self, table: &Table) {
        let total = self.total_pages(table);
        self.state.current_page = self.state.current_page.clamp(1, total);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.state.search_text {
            debug!(search = %text, "search changed");
            self.state.search_text = text;
            self.state.current_page = 1;
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut text = self.state.search_text.clone();
        text.push(c);
        self.set_search(text);
    }

    pub fn pop_search_char(&mut self) {
        let mut text = self.state.search_text.clone();
        text.pop();
        self.set_search(text);
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sort
    // ─────────────────────────────────────────────────────────────────────────

    /// Header activation on `field`.
    ///
    /// The active column toggles direction; another column becomes the sort
    /// field ascending. Unknown or non-sortable columns are ignored.
    pub fn sort_by(&mut self, table: &Table, field: &str) {
        let sortable = table.column(field).is_some_and(|c| c.sortable);
        if !sortable {
            return;
        }

        self.state.sort = Some(match self.state.sort.take() {
            Some(spec) if spec.field == field => SortSpec {
                field: spec.field,
                direction: spec.direction.toggled(),
            },
            _ => SortSpec::asc(field),
        });
        self.state.current_page = 1;

        if let Some(spec) = &self.state.sort {
            debug!(field = %spec.field, direction = ?spec.direction, "sort changed");
        }
    }

    /// Sort by the column at `index` in the table's column list
    pub fn sort_by_column(&mut self, table: &Table, index: usize) {
        if let Some(field) = table.columns.get(index).map(|c| c.field.clone()) {
            self.sort_by(table, &field);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────

    pub fn goto_page(&mut self, table: &Table, page: usize) {
        let total = self.total_pages(table);
        self.state.current_page = page.clamp(1, total);
    }

    pub fn first_page(&mut self, table: &Table) {
        self.goto_page(table, 1);
    }

    pub fn prev_page(&mut self, table: &Table) {
        let page = self.state.current_page.saturating_sub(1);
        self.goto_page(table, page);
    }

    pub fn next_page(&mut self, table: &Table) {
        let page = self.state.current_page.saturating_add(1);
        self.goto_page(table, page);
    }

    pub fn last_page(&mut self, table: &Table) {
        let total = self.total_pages(table);
        self.goto_page(table, total);
    }

    /// Change the page size, keeping the first visible row on screen
    pub fn set_page_size(&mut self, table: &Table, page_size: usize) {
        let page_size = page_size.max(1);
        let first_row = (self.state.current_page.max(1) - 1).saturating_mul(self.state.page_size);
        self.state.page_size = page_size;
        self.state.current_page = (first_row / page_size).saturating_add(1);
        self.clamp_page(table);
    }

    pub fn set_paginate(&mut self, table: &Table, paginate: bool) {
        self.state.paginate = paginate;
        self.clamp_page(table);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Flip the row at `page_index` on the current page
    pub fn toggle_row(&mut self, table: &Table, page_index: usize) {
        let view = self.view(table);
        let Some(position) = view.rows.get(page_index).map(|r| r.position) else {
            return;
        };
        if !self.state.selected.remove(&position) {
            self.state.selected.insert(position);
        }
    }

    /// Select every row on the current page, or clear them all if every
    /// one is already selected. Other pages are untouched.
    pub fn toggle_all(&mut self, table: &Table) {
        let view = self.view(table);
        let page_positions: Vec<usize> = view.rows.iter().map(|r| r.position).collect();
        if view.all_selected() {
            for position in page_positions {
                self.state.selected.remove(&position);
            }
        } else {
            self.state.selected.extend(page_positions);
        }
    }

    pub fn clear_selection(&mut self) {
        self.state.selected.clear();
    }

    /// Selected rows in input order
    pub fn selected_rows<'a>(&self, table: &'a Table) -> Vec<RowRef<'a>> {
        self.state
            .selected
            .iter()
            .filter_map(|&position| {
                table.rows.get(position).map(|row| RowRef { position, row })
            })
            .collect()
    }

    /// Forget everything tied to the previous rows (after a reload)
    pub fn reset_for_new_rows(&mut self, table: &Table) {
        self.state.selected.clear();
        self.clamp_page(table);
    }
}
