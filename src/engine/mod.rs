//! Tabular data engine
//!
//! Deterministic projection of `(rows, columns, query state)` onto a page
//! of rows plus selection bookkeeping:
//! - `pipeline` - the pure filter → sort → paginate stages
//! - `controller` - `TableController`, which owns the `QueryState`
//! - `value` / `row` / `column` - the dynamic data model

pub mod column;
pub mod controller;
pub mod pipeline;
pub mod query;
pub mod row;
pub mod value;

pub use column::ColumnDescriptor;
pub use controller::{TableController, TableView};
pub use query::{QueryState, SortSpec};
pub use row::{Row, RowRef, Table};
pub use value::{Value, ValueKind};
