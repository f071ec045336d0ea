//! Column descriptors
//!
//! A column names the field it shows, its title, whether it can be sorted,
//! the kind its raw values compare as, and optionally a display transform.

use super::row::Row;
use super::value::{Value, ValueKind};
use std::fmt;
use std::sync::Arc;

/// Custom display transform: `(value, row, page_index) -> cell text`
pub type RenderFn = Arc<dyn Fn(&Value, &Row, usize) -> String + Send + Sync>;

#[derive(Clone)]
pub struct ColumnDescriptor {
    pub field: String,
    pub title: String,
    pub sortable: bool,
    pub kind: ValueKind,
    pub render: Option<RenderFn>,
    /// Fixed width in terminal cells
    pub width: Option<u16>,
}

impl ColumnDescriptor {
    pub fn new(field: impl Into<String>, title: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            sortable: true,
            kind,
            render: None,
            width: None,
        }
    }

    pub fn text(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(field, title, ValueKind::Text)
    }

    pub fn number(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(field, title, ValueKind::Number)
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &Row, usize) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Cell text for `row` shown at `page_index` on the current page.
    ///
    /// Missing fields display as an empty string unless the render
    /// transform decides otherwise.
    pub fn display(&self, row: &Row, page_index: usize) -> String {
        let value = row.get(&self.field);
        match &self.render {
            Some(render) => render(value, row, page_index),
            None => value.to_text(),
        }
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("field", &self.field)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("kind", &self.kind)
            .field("render", &self.render.is_some())
            .field("width", &self.width)
            .finish()
    }
}
