//! Model layer
//!
//! - `modal` - modal overlay stack
//! - `track` - track library schema and sample data

pub mod modal;
pub mod track;

pub use modal::{Modal, ModalStack};
