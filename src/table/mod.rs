//! Tabular output - rows, tables and a JSON Lines writer

pub mod types;
pub mod writer;

pub use types::{Row, Table};
pub use writer::TableWriter;
