//! Rendering of findbig results.
//!
//! [`TableRenderer`] prints the ranked entries as a table fitted to the
//! terminal width, with creation age, modification age and size columns.
//! [`JsonReport`] is the machine-readable equivalent.

mod json;
mod table;

pub use json::{JsonEntry, JsonReport};
pub use table::{PATH_MIN_WIDTH, RESERVED_COLUMNS, Row, TableRenderer, path_column_width};
