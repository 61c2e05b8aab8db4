//! Entity schemas - which column comes from which JSON path
//!
//! Each entity kind is described as data: an ordered list of [`ColumnSpec`]s
//! that [`EntitySchema::plan`] expands into concrete columns, fanning
//! localized fields out per language and prices per currency.

pub mod builder;
pub mod columns;
pub mod entities;

pub use builder::SchemaBuilder;
pub use columns::{Axis, Column, ColumnKind, ColumnSpec, EntitySchema, Extraction, FieldPath, Scope, Segment};
pub use entities::{category_schema, customer_schema, order_schema, product_schema, EntityKind};
