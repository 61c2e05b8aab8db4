//! Fluent construction of entity schemas.

use crate::schema::columns::{ColumnSpec, EntitySchema, FieldPath};

/// Builder accumulating column specifications for one entity kind.
///
/// ```rust
/// use ctframe::schema::{ColumnSpec, SchemaBuilder};
///
/// let schema = SchemaBuilder::new("category")
///     .languages(["en", "de"])
///     .column(ColumnSpec::required("id", "id"))
///     .localized(&["name", "slug"], "")
///     .build();
///
/// assert_eq!(schema.column_names(), vec!["id", "name_en", "name_de", "slug_en", "slug_de"]);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    columns: Vec<ColumnSpec>,
    expand: Option<FieldPath>,
    languages: Vec<String>,
    currencies: Vec<String>,
}

impl SchemaBuilder {
    pub fn new(name: &str) -> Self {
        SchemaBuilder {
            name: name.to_string(),
            columns: Vec::new(),
            expand: None,
            languages: Vec::new(),
            currencies: Vec::new(),
        }
    }

    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn currencies<I, S>(mut self, currencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.currencies = currencies.into_iter().map(Into::into).collect();
        self
    }

    /// Produce one row per element of the array at `path` instead of one per record.
    pub fn expand(mut self, path: &str) -> Self {
        self.expand = Some(FieldPath::parse(path));
        self
    }

    pub fn column(mut self, spec: ColumnSpec) -> Self {
        self.columns.push(spec);
        self
    }

    /// Adds one language fan-out column per field, each reading the field's locale map.
    pub fn localized(mut self, fields: &[&str], default: &str) -> Self {
        for field in fields {
            self.columns.push(ColumnSpec::localized(field, field, default));
        }
        self
    }

    pub fn build(self) -> EntitySchema {
        EntitySchema {
            name: self.name,
            columns: self.columns,
            expand: self.expand,
            languages: self.languages,
            currencies: self.currencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::columns::Scope;

    #[test]
    fn test_builder_keeps_column_order() {
        let schema = SchemaBuilder::new("test")
            .column(ColumnSpec::required("b", "b"))
            .column(ColumnSpec::required("a", "a"))
            .build();

        assert_eq!(schema.name, "test");
        assert_eq!(schema.column_names(), vec!["b", "a"]);
        assert!(schema.expand.is_none());
    }

    #[test]
    fn test_builder_expand_and_item_scope() {
        let schema = SchemaBuilder::new("order")
            .expand("lineItems")
            .column(ColumnSpec::required("orderId", "id"))
            .column(ColumnSpec::required("productId", "productId").in_item())
            .build();

        assert_eq!(schema.expand, Some(FieldPath::parse("lineItems")));
        assert_eq!(schema.columns[0].scope, Scope::Record);
        assert_eq!(schema.columns[1].scope, Scope::Item);
    }
}
