//! Collaborators around the engine
//!
//! - Library loading (CSV, JSON, YAML, bundled sample)
//! - CSV export of the current result set

pub mod export;
pub mod library;

pub use export::export_to_dir;
pub use library::{load_library, LibrarySource};
