//! Action enum - All possible application actions
//!
//! Components emit Actions in response to events, and the App processes
//! them against the table controller.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    Tick,
    Resize(u16, u16),
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Row Cursor
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the cursor to the next row on the page
    NextRow,
    PrevRow,
    FirstRow,
    LastRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Pages
    // ─────────────────────────────────────────────────────────────────────────
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    GotoPage(usize),
    IncreasePageSize,
    DecreasePageSize,
    TogglePagination,

    // ─────────────────────────────────────────────────────────────────────────
    // Sort
    // ─────────────────────────────────────────────────────────────────────────
    /// Activate the header of the column at this index
    SortByColumn(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,
    ClearSearch,

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle the row under the cursor
    ToggleRow,
    /// Toggle the row at this index on the current page
    ToggleRowAt(usize),
    /// Select or clear every row on the current page
    ToggleAllRows,
    ClearSelection,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    OpenGotoPage,
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Library
    // ─────────────────────────────────────────────────────────────────────────
    ReloadLibrary,
    ExportRows,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::NextPage => write!(f, "NextPage"),
            Action::LastPage => write!(f, "LastPage"),
            Action::GotoPage(page) => write!(f, "GotoPage({})", page),
            Action::IncreasePageSize => write!(f, "IncreasePageSize"),
            Action::DecreasePageSize => write!(f, "DecreasePageSize"),
            Action::TogglePagination => write!(f, "TogglePagination"),
            Action::SortByColumn(index) => write!(f, "SortByColumn({})", index),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::ToggleRow => write!(f, "ToggleRow"),
            Action::ToggleRowAt(index) => write!(f, "ToggleRowAt({})", index),
            Action::ToggleAllRows => write!(f, "ToggleAllRows"),
            Action::ClearSelection => write!(f, "ClearSelection"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenGotoPage => write!(f, "OpenGotoPage"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ReloadLibrary => write!(f, "ReloadLibrary"),
            Action::ExportRows => write!(f, "ExportRows"),
        }
    }
}
