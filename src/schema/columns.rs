//! Declarative column specifications and the concrete column plan derived from them.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member lookup
    Key(String),
    /// Array element lookup
    Index(usize),
}

/// An ordered list of keys/indices walked from a JSON root.
///
/// Paths are written with dots, numeric segments being array indices:
/// `masterVariant.images.0.url`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// The empty path, resolving to the value it is applied to.
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(idx) => Segment::Index(idx),
                Err(_) => Segment::Key(s.to_string()),
            })
            .collect();
        FieldPath(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new path with `key` appended as an object lookup.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.to_string()));
        FieldPath(segments)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::parse(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key(key) => f.write_str(key)?,
                Segment::Index(idx) => write!(f, "{}", idx)?,
            }
        }
        Ok(())
    }
}

/// Parameter that multiplies one logical field into one column per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Language,
    Currency,
}

/// How a column turns the value found at its path into a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// Take the value at the path as is
    Value,
    /// The path points at a price list; pick the amount for the axis currency
    Price,
    /// The path points at an array of objects; collect `key` from each element
    Collect { key: String },
}

/// Where a column's path is rooted when records expand into several rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The record itself
    Record,
    /// The expanded sub-item (e.g. an order line item)
    Item,
}

/// Specification of one logical column, before fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub path: FieldPath,
    /// Value used when the path is absent. `None` marks a mandatory column.
    pub default: Option<Value>,
    pub fan_out: Option<Axis>,
    pub kind: ColumnKind,
    pub scope: Scope,
}

impl ColumnSpec {
    fn new(name: &str, path: &str, default: Option<Value>) -> Self {
        ColumnSpec {
            name: name.to_string(),
            path: FieldPath::parse(path),
            default,
            fan_out: None,
            kind: ColumnKind::Value,
            scope: Scope::Record,
        }
    }

    /// A column with no default.
    pub fn required(name: &str, path: &str) -> Self {
        Self::new(name, path, None)
    }

    pub fn optional(name: &str, path: &str, default: impl Into<Value>) -> Self {
        Self::new(name, path, Some(default.into()))
    }

    /// A list column collecting `key` from every element at `path`; empty list when absent.
    pub fn collect(name: &str, path: &str, key: &str) -> Self {
        let mut spec = Self::new(name, path, Some(Value::Array(Vec::new())));
        spec.kind = ColumnKind::Collect { key: key.to_string() };
        spec
    }

    /// One column per language, reading `{path}.{lang}`.
    pub fn localized(name: &str, path: &str, default: impl Into<Value>) -> Self {
        let mut spec = Self::new(name, path, Some(default.into()));
        spec.fan_out = Some(Axis::Language);
        spec
    }

    /// One column per currency, selecting from the price list at `path`; null when no price matches.
    pub fn priced(name: &str, path: &str) -> Self {
        let mut spec = Self::new(name, path, Some(Value::Null));
        spec.fan_out = Some(Axis::Currency);
        spec.kind = ColumnKind::Price;
        spec
    }

    /// Roots the path at the expanded item instead of the record.
    pub fn in_item(mut self) -> Self {
        self.scope = Scope::Item;
        self
    }

    pub fn is_mandatory(&self) -> bool {
        self.default.is_none()
    }
}

/// What the materializer does for one concrete column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Value,
    Price { currency: String },
    Collect { key: String },
}

/// A concrete column after fan-out: one output cell per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub path: FieldPath,
    pub default: Option<Value>,
    pub extraction: Extraction,
    pub scope: Scope,
}

/// A named, ordered list of column specifications plus the axis values they fan out over.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    /// Array of sub-items each producing one row; `None` means one row per record.
    pub expand: Option<FieldPath>,
    pub languages: Vec<String>,
    pub currencies: Vec<String>,
}

impl EntitySchema {
    /// Expands fan-out columns into the concrete, ordered column plan.
    ///
    /// A fanned-out spec yields `{name}_{axis_value}` columns in axis-list order,
    /// placed where the spec sits in the schema. Repeated axis values keep
    /// only their first occurrence, so column names stay unique.
    pub fn plan(&self) -> Vec<Column> {
        let mut plan = Vec::with_capacity(self.columns.len());

        for spec in &self.columns {
            let axis_values = match spec.fan_out {
                None => {
                    plan.push(Column {
                        name: spec.name.clone(),
                        path: spec.path.clone(),
                        default: spec.default.clone(),
                        extraction: Self::base_extraction(&spec.kind),
                        scope: spec.scope,
                    });
                    continue;
                }
                Some(Axis::Language) => &self.languages,
                Some(Axis::Currency) => &self.currencies,
            };

            let mut seen = HashSet::new();
            for value in axis_values.iter().filter(|v| seen.insert(*v)) {
                let (path, extraction) = match &spec.kind {
                    ColumnKind::Price => (
                        spec.path.clone(),
                        Extraction::Price { currency: value.clone() },
                    ),
                    kind => (spec.path.child(value), Self::base_extraction(kind)),
                };

                plan.push(Column {
                    name: format!("{}_{}", spec.name, value),
                    path,
                    default: spec.default.clone(),
                    extraction,
                    scope: spec.scope,
                });
            }
        }

        plan
    }

    /// Ordered names of the concrete columns.
    pub fn column_names(&self) -> Vec<String> {
        self.plan().into_iter().map(|c| c.name).collect()
    }

    fn base_extraction(kind: &ColumnKind) -> Extraction {
        match kind {
            ColumnKind::Collect { key } => Extraction::Collect { key: key.clone() },
            // A price column without a currency axis has no currency to select;
            // it reads the raw value at its path.
            ColumnKind::Value | ColumnKind::Price => Extraction::Value,
        }
    }
}
