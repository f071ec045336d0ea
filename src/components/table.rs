//! Table component
//!
//! Draws the current page of a `TableView`: a checkbox column, column
//! titles with the sort indicator, and each cell through its column's
//! display transform. Owns the row cursor and remembers where the header
//! and rows were drawn so mouse clicks can be mapped back to columns and
//! rows.

use crate::action::Action;
use crate::component::Component;
use crate::engine::{ColumnDescriptor, SortSpec, TableView};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CHECKBOX_WIDTH: u16 = 3;
const HIGHLIGHT_SYMBOL: &str = "▶ ";
const MAX_COLUMN_WIDTH: usize = 40;

/// Everything the table needs to draw one page
pub struct TableRenderContext<'a, 'v> {
    pub columns: &'a [ColumnDescriptor],
    pub view: &'v TableView<'a>,
    pub sort: Option<&'a SortSpec>,
    pub title: &'a str,
}

struct HeaderCell {
    title: String,
    arrow: String,
    sortable: bool,
}

struct PageRow {
    selected: bool,
    cells: Vec<String>,
}

pub struct TableComponent {
    state: TableState,
    title: String,
    header_checkbox: &'static str,
    headers: Vec<HeaderCell>,
    rows: Vec<PageRow>,
    widths: Vec<u16>,
    /// Rows on the current page
    page_len: usize,
    /// Screen row of the header, once drawn
    header_y: Option<u16>,
    /// First screen row of the body
    body_y: u16,
    body_height: u16,
    /// Horizontal extent of each data column, in column order
    column_spans: Vec<(u16, u16)>,
    /// Horizontal extent of the checkbox column
    checkbox_span: (u16, u16),
}

impl Default for TableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TableComponent {
    pub fn new() -> Self {
        Self {
            state: TableState::default().with_selected(Some(0)),
            title: String::new(),
            header_checkbox: "[ ]",
            headers: Vec::new(),
            rows: Vec::new(),
            widths: Vec::new(),
            page_len: 0,
            header_y: None,
            body_y: 0,
            body_height: 0,
            column_spans: Vec::new(),
            checkbox_span: (0, 0),
        }
    }

    /// Row under the cursor, as a page index
    pub fn cursor(&self) -> Option<usize> {
        if self.page_len == 0 {
            None
        } else {
            self.state.selected()
        }
    }

    /// Keep the cursor on a row that exists after the page changed
    pub fn sync_page_len(&mut self, page_len: usize) {
        self.page_len = page_len;
        let cursor = self.state.selected().unwrap_or(0);
        self.state
            .select(Some(cursor.min(page_len.saturating_sub(1))));
    }

    pub fn reset_cursor(&mut self) {
        self.state.select(Some(0));
        *self.state.offset_mut() = 0;
    }

    /// Compute display widths for the data columns on this page
    pub fn column_widths(columns: &[ColumnDescriptor], view: &TableView<'_>) -> Vec<u16> {
        columns
            .iter()
            .map(|column| {
                if let Some(width) = column.width {
                    return width;
                }
                // +2 leaves room for the sort arrow
                let title = column.title.width() + 2;
                let widest_cell = view
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(i, r)| column.display(r.row, i).width())
                    .max()
                    .unwrap_or(0);
                title.max(widest_cell).clamp(4, MAX_COLUMN_WIDTH) as u16
            })
            .collect()
    }

    /// Take the page to show on the next draw
    pub fn set_page(&mut self, ctx: &TableRenderContext) {
        self.sync_page_len(ctx.view.rows.len());
        self.widths = Self::column_widths(ctx.columns, ctx.view);
        self.title = ctx.title.to_string();

        self.header_checkbox = if ctx.view.all_selected() {
            "[x]"
        } else if ctx.view.selected_on_page.is_empty() {
            "[ ]"
        } else {
            "[-]"
        };

        self.headers = ctx
            .columns
            .iter()
            .map(|column| HeaderCell {
                title: column.title.clone(),
                arrow: match ctx.sort {
                    Some(spec) if spec.field == column.field => format!(" {}", spec.direction.arrow()),
                    _ => String::new(),
                },
                sortable: column.sortable,
            })
            .collect();

        self.rows = ctx
            .view
            .rows
            .iter()
            .enumerate()
            .map(|(index, r)| PageRow {
                selected: ctx.view.selected_on_page.contains(&index),
                cells: ctx
                    .columns
                    .iter()
                    .zip(&self.widths)
                    .map(|(column, width)| truncate(&column.display(r.row, index), *width as usize))
                    .collect(),
            })
            .collect();
    }

    fn record_geometry(&mut self, area: Rect, widths: &[u16]) {
        // Inside the border
        let inner_x = area.x.saturating_add(1);
        let inner_y = area.y.saturating_add(1);
        let right = area.x.saturating_add(area.width.saturating_sub(1));

        self.header_y = Some(inner_y);
        self.body_y = inner_y.saturating_add(1);
        self.body_height = area.height.saturating_sub(3);

        let mut x = inner_x.saturating_add(HIGHLIGHT_SYMBOL.width() as u16);
        self.checkbox_span = (x, x.saturating_add(CHECKBOX_WIDTH).min(right));
        x = x.saturating_add(CHECKBOX_WIDTH + 1);

        self.column_spans = widths
            .iter()
            .map(|w| {
                let span = (x.min(right), x.saturating_add(*w).min(right));
                x = x.saturating_add(w + 1);
                span
            })
            .collect();
    }

    /// Data column drawn at screen column `x`
    pub fn column_at(&self, x: u16) -> Option<usize> {
        self.column_spans
            .iter()
            .position(|(start, end)| x >= *start && x < *end)
    }

    /// Page index of the row drawn at screen row `y`
    pub fn row_at(&self, y: u16) -> Option<usize> {
        if y < self.body_y || y >= self.body_y.saturating_add(self.body_height) {
            return None;
        }
        let index = (y - self.body_y) as usize + self.state.offset();
        (index < self.page_len).then_some(index)
    }
}

/// Cut `text` to `width` terminal cells, ending in `…` when shortened
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Component for TableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') => Some(Action::FirstRow),
            KeyCode::Char('G') => Some(Action::LastRow),

            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('H') | KeyCode::Home => Some(Action::FirstPage),
            KeyCode::Char('L') | KeyCode::End => Some(Action::LastPage),
            KeyCode::Char(':') => Some(Action::OpenGotoPage),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::IncreasePageSize),
            KeyCode::Char('-') => Some(Action::DecreasePageSize),
            KeyCode::Char('p') => Some(Action::TogglePagination),

            KeyCode::Char(c @ '1'..='9') => {
                c.to_digit(10).map(|d| Action::SortByColumn(d as usize - 1))
            }

            KeyCode::Char('/') => Some(Action::EnterSearchMode),

            KeyCode::Char(' ') => Some(Action::ToggleRow),
            KeyCode::Char('a') => Some(Action::ToggleAllRows),
            KeyCode::Esc => Some(Action::ClearSelection),

            KeyCode::Char('x') => Some(Action::ExportRows),
            KeyCode::Char('r') => Some(Action::ReloadLibrary),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if Some(mouse.row) == self.header_y {
                    if mouse.column >= self.checkbox_span.0 && mouse.column < self.checkbox_span.1 {
                        Some(Action::ToggleAllRows)
                    } else {
                        self.column_at(mouse.column).map(Action::SortByColumn)
                    }
                } else {
                    self.row_at(mouse.row).map(Action::ToggleRowAt)
                }
            }
            MouseEventKind::ScrollDown => Some(Action::NextRow),
            MouseEventKind::ScrollUp => Some(Action::PrevRow),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let last = self.page_len.saturating_sub(1);
        let cursor = self.state.selected().unwrap_or(0);
        match action {
            Action::NextRow => {
                if cursor < last {
                    self.state.select(Some(cursor + 1));
                }
            }
            Action::PrevRow => {
                self.state.select(Some(cursor.saturating_sub(1)));
            }
            Action::FirstRow => self.state.select(Some(0)),
            Action::LastRow => self.state.select(Some(last)),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let widths = self.widths.clone();
        self.record_geometry(area, &widths);

        let mut header_cells = vec![Cell::from(self.header_checkbox)];
        header_cells.extend(self.headers.iter().map(|header| {
            let style = if header.sortable {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
            };
            Cell::from(Line::from(vec![
                Span::styled(header.title.clone(), style),
                Span::styled(header.arrow.clone(), Style::default().fg(Color::Yellow)),
            ]))
        }));
        let header = Row::new(header_cells).bottom_margin(0);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|row| {
                let checkbox = if row.selected { "[x]" } else { "[ ]" };
                let mut cells = vec![Cell::from(Span::styled(
                    checkbox,
                    Style::default().fg(if row.selected { Color::Green } else { Color::DarkGray }),
                ))];
                cells.extend(row.cells.iter().map(|cell| Cell::from(cell.clone())));
                let style = if row.selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(cells).style(style)
            })
            .collect();

        let mut constraints = vec![Constraint::Length(CHECKBOX_WIDTH)];
        constraints.extend(widths.iter().map(|w| Constraint::Length(*w)));

        let table = Table::new(rows, constraints)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .column_spacing(1)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut self.state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{QueryState, Row, Table as DataTable, TableController};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Summer Vibes", 20), "Summer Vibes");
        assert_eq!(truncate("Summer Vibes", 7), "Summer…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_key_mapping() {
        let mut table = TableComponent::new();
        assert_eq!(table.handle_key_event(key(KeyCode::Char('3'))).unwrap(), Some(Action::SortByColumn(2)));
        assert_eq!(table.handle_key_event(key(KeyCode::Char(' '))).unwrap(), Some(Action::ToggleRow));
        assert_eq!(table.handle_key_event(key(KeyCode::Right)).unwrap(), Some(Action::NextPage));
        assert_eq!(table.handle_key_event(key(KeyCode::Char('z'))).unwrap(), None);
    }

    #[test]
    fn test_cursor_stays_on_page() {
        let mut table = TableComponent::new();
        table.sync_page_len(3);
        table.update(Action::LastRow).unwrap();
        assert_eq!(table.cursor(), Some(2));
        table.update(Action::NextRow).unwrap();
        assert_eq!(table.cursor(), Some(2));

        table.sync_page_len(1);
        assert_eq!(table.cursor(), Some(0));

        table.sync_page_len(0);
        assert_eq!(table.cursor(), None);
    }

    #[test]
    fn test_column_widths() {
        let columns = vec![
            ColumnDescriptor::text("title", "Title"),
            ColumnDescriptor::number("bpm", "BPM").width(9),
        ];
        let data = DataTable::new(
            columns.clone(),
            vec![Row::new().with("title", "A very long track title").with("bpm", 126i64)],
        );
        let controller = TableController::new(QueryState::default());
        let view = controller.view(&data);
        assert_eq!(TableComponent::column_widths(&columns, &view), vec![23, 9]);
    }

    #[test]
    fn test_set_page_takes_sort_and_selection() {
        let columns = vec![
            ColumnDescriptor::text("title", "Title").width(6),
            ColumnDescriptor::number("bpm", "BPM"),
        ];
        let data = DataTable::new(
            columns.clone(),
            vec![
                Row::new().with("title", "Summer Vibes").with("bpm", 126i64),
                Row::new().with("title", "Night").with("bpm", 120i64),
            ],
        );
        let mut controller = TableController::new(QueryState::default());
        controller.sort_by(&data, "bpm");
        controller.toggle_row(&data, 0);
        let view = controller.view(&data);

        let mut table = TableComponent::new();
        table.set_page(&TableRenderContext {
            columns: &columns,
            view: &view,
            sort: controller.state().sort.as_ref(),
            title: "library.csv",
        });

        assert_eq!(table.page_len, 2);
        assert_eq!(table.header_checkbox, "[-]");
        assert_eq!(table.headers[0].arrow, "");
        assert_eq!(table.headers[1].arrow, " ↑");
        // Sorted by bpm: Night first
        assert_eq!(table.rows[0].cells[0], "Night");
        assert!(table.rows[0].selected);
        assert_eq!(table.rows[1].cells[0], "Summe…");
        assert!(!table.rows[1].selected);
    }

    #[test]
    fn test_mouse_geometry() {
        let mut table = TableComponent::new();
        table.page_len = 5;
        table.record_geometry(Rect::new(0, 3, 80, 20), &[10, 6]);

        // Border at x=0, highlight symbol at 1-2, checkbox at 3-5, column 0 at 7-16
        assert_eq!(table.header_y, Some(4));
        assert_eq!(table.checkbox_span, (3, 6));
        assert_eq!(table.column_at(7), Some(0));
        assert_eq!(table.column_at(16), Some(0));
        assert_eq!(table.column_at(17), None);
        assert_eq!(table.column_at(18), Some(1));

        assert_eq!(table.row_at(5), Some(0));
        assert_eq!(table.row_at(9), Some(4));
        assert_eq!(table.row_at(10), None);
        assert_eq!(table.row_at(4), None);
    }
}
