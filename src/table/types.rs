use serde::Serialize;
use serde_json::{Map, Value};

/// One fixed-width row; cells line up with the owning table's columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An ordered sequence of rows sharing one column list.
///
/// Tables are only grown by the crate while a call is running; callers
/// receive them finished and read them through the accessors below.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Entity the rows were extracted from, e.g. "products"
    pub entity: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(entity: impl Into<String>, columns: Vec<String>) -> Self {
        Self::with_capacity(entity, columns, 0)
    }

    pub fn with_capacity(entity: impl Into<String>, columns: Vec<String>, capacity: usize) -> Self {
        Table {
            entity: entity.into(),
            columns,
            rows: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width must match the column count");
        self.rows.push(row);
    }

    pub(crate) fn extend(&mut self, rows: impl IntoIterator<Item = Row>) {
        for row in rows {
            self.push(row);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the column called `column`.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.values().get(idx))
    }

    /// Columnar view: every cell of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r.values()[idx]).collect())
    }

    /// Rows as JSON objects with keys in column order.
    pub fn records(&self) -> impl Iterator<Item = Map<String, Value>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.values().iter().cloned())
                .collect()
        })
    }
}
