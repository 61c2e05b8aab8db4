//! Field extraction - flattening raw JSON records into rows
//!
//! [`lookup`] walks a path and yields nothing on any absent key, wrong type or
//! out-of-range index; [`resolve`] adds a default on top and serves every
//! plain column that has one. Price and list columns post-process the
//! [`lookup`] result before defaulting. [`RowMaterializer`] applies a whole
//! schema plan to a record, expanding one-to-many records (order line items) into several rows.

pub mod materializer;
pub mod price;
pub mod resolve;

pub use materializer::RowMaterializer;
pub use price::select_price;
pub use resolve::{lookup, resolve};
