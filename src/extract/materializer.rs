//! Turning raw records into table rows using a pre-computed column plan.
//!
//! The plan is derived once per call from the [`EntitySchema`]; every record
//! of every page is then materialized against it without revisiting the schema.

use crate::extract::price::select_price;
use crate::extract::resolve::{lookup, resolve};
use crate::schema::{Column, EntitySchema, Extraction, FieldPath, Scope};
use crate::table::{Row, Table};
use serde_json::Value;
use tracing::warn;

/// Applies a column plan to records, one row per record or per expanded item.
pub struct RowMaterializer {
    entity: String,
    columns: Vec<Column>,
    expand: Option<FieldPath>,
}

impl RowMaterializer {
    pub fn new(schema: &EntitySchema) -> Self {
        RowMaterializer {
            entity: schema.name.clone(),
            columns: schema.plan(),
            expand: schema.expand.clone(),
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// An empty table with this materializer's columns.
    pub fn empty_table(&self, capacity: usize) -> Table {
        Table::with_capacity(self.entity.clone(), self.column_names(), capacity)
    }

    /// Materialize one record. Without expansion this is exactly one row;
    /// with expansion it is one row per item, possibly none.
    pub fn materialize(&self, record: &Value) -> Vec<Row> {
        let Some(expand) = &self.expand else {
            return vec![self.build_row(record, record)];
        };

        match lookup(record, expand) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| self.build_row(record, item))
                .collect(),
            _ => {
                let id = record_id(record);
                warn!(
                    entity = %self.entity,
                    id = %id,
                    path = %expand,
                    "record has no item array, contributing no rows"
                );
                Vec::new()
            }
        }
    }

    /// Materialize every record of a page into `table`, preserving order.
    pub fn materialize_into<'a, I>(&self, records: I, table: &mut Table)
    where
        I: IntoIterator<Item = &'a Value>,
    {
        for record in records {
            table.extend(self.materialize(record));
        }
    }

    fn build_row(&self, record: &Value, item: &Value) -> Row {
        let values = self
            .columns
            .iter()
            .map(|column| {
                let source = match column.scope {
                    Scope::Record => record,
                    Scope::Item => item,
                };
                self.extract_cell(column, source, record)
            })
            .collect();

        Row::new(values)
    }

    fn extract_cell(&self, column: &Column, source: &Value, record: &Value) -> Value {
        if let (Extraction::Value, Some(default)) = (&column.extraction, &column.default) {
            return resolve(source, &column.path, default);
        }

        let found = lookup(source, &column.path);

        let extracted = match &column.extraction {
            Extraction::Value => found.cloned(),
            Extraction::Price { currency } => found.and_then(|prices| select_price(prices, currency)),
            Extraction::Collect { key } => found.and_then(|value| collect_key(value, key)),
        };

        match (extracted, &column.default) {
            (Some(value), _) => value,
            (None, Some(default)) => default.clone(),
            (None, None) => {
                let id = record_id(record);
                warn!(
                    entity = %self.entity,
                    id = %id,
                    column = %column.name,
                    path = %column.path,
                    "mandatory field missing"
                );
                Value::Null
            }
        }
    }
}

/// The record's `id`, or null, for log context.
fn record_id(record: &Value) -> &Value {
    const NULL: &Value = &Value::Null;
    record.get("id").unwrap_or(NULL)
}

/// Collects `key` from each element of an array, skipping elements without it.
/// A single object is treated as a one-element array.
fn collect_key(value: &Value, key: &str) -> Option<Value> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(value),
        _ => return None,
    };

    let collected = items
        .iter()
        .filter_map(|item| item.get(key))
        .filter(|v| !v.is_null())
        .cloned()
        .collect();

    Some(Value::Array(collected))
}
