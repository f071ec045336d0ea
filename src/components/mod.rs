//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod browser;
pub mod empty_state;
pub mod goto_page_dialog;
pub mod help_dialog;
pub mod layout;
pub mod pagination;
pub mod quit_dialog;
pub mod search_bar;
pub mod table;

pub use browser::{draw_browser_screen, BrowserRenderContext};
pub use goto_page_dialog::GotoPageDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use search_bar::SearchBar;
pub use table::TableComponent;
