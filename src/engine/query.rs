//! Query state: search, sort, page and selection configuration

use std::collections::BTreeSet;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header indicator
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    #[cfg(test)]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Current search/sort/page/selection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub sort: Option<SortSpec>,
    /// 1-based
    pub current_page: usize,
    pub page_size: usize,
    /// When off, the whole sorted result is one page
    pub paginate: bool,
    /// Selected rows by their position in the input collection
    pub selected: BTreeSet<usize>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort: None,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            paginate: true,
            selected: BTreeSet::new(),
        }
    }
}

impl QueryState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Default::default()
        }
    }
}
