//! The four commerce entity schemas.

use crate::schema::builder::SchemaBuilder;
use crate::schema::columns::{ColumnSpec, EntitySchema};
use std::fmt;

const LOCALIZED_FIELDS: &[&str] = &["name", "slug", "description"];

/// The entity kinds that can be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Customer,
    Order,
    Category,
}

impl EntityKind {
    /// API resource path for this kind.
    pub fn resource(self) -> &'static str {
        match self {
            EntityKind::Product => "product-projections",
            EntityKind::Customer => "customers",
            EntityKind::Order => "orders",
            EntityKind::Category => "categories",
        }
    }

    /// Plural name used in logs and table names.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Product => "products",
            EntityKind::Customer => "customers",
            EntityKind::Order => "orders",
            EntityKind::Category => "categories",
        }
    }

    /// Schema for this kind. Kinds without localized or priced fields ignore the axis lists.
    pub fn schema(self, languages: &[String], currencies: &[String]) -> EntitySchema {
        match self {
            EntityKind::Product => product_schema(languages, currencies),
            EntityKind::Customer => customer_schema(),
            EntityKind::Order => order_schema(languages),
            EntityKind::Category => category_schema(languages),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn product_schema(languages: &[String], currencies: &[String]) -> EntitySchema {
    SchemaBuilder::new("products")
        .languages(languages.iter().cloned())
        .currencies(currencies.iter().cloned())
        .column(ColumnSpec::required("id", "id"))
        .column(ColumnSpec::optional("sku", "masterVariant.sku", ""))
        .column(ColumnSpec::collect("categoryIds", "categories", "id"))
        .column(ColumnSpec::optional("img", "masterVariant.images.0.url", ""))
        .column(ColumnSpec::required("createdAt", "createdAt"))
        .localized(LOCALIZED_FIELDS, "")
        .column(ColumnSpec::priced("price", "masterVariant.prices"))
        .build()
}

pub fn customer_schema() -> EntitySchema {
    let mut builder = SchemaBuilder::new("customers").column(ColumnSpec::required("id", "id"));

    for field in ["firstName", "middleName", "lastName", "email", "dateOfBirth", "companyName"] {
        builder = builder.column(ColumnSpec::optional(field, field, ""));
    }

    builder
        .column(ColumnSpec::collect("customerGroup_ids", "customerGroup", "id"))
        .column(ColumnSpec::collect("customerGroup_names", "customerGroup", "name"))
        .column(ColumnSpec::required("createdAt", "createdAt"))
        .build()
}

/// Orders produce one row per line item. The header currency is always replaced
/// by the line item's own price currency, which is blank when the item has none.
pub fn order_schema(languages: &[String]) -> EntitySchema {
    SchemaBuilder::new("orders")
        .languages(languages.iter().cloned())
        .expand("lineItems")
        .column(ColumnSpec::required("productId", "productId").in_item())
        .column(ColumnSpec::optional("customerId", "customerId", "anonymous"))
        .column(ColumnSpec::optional("customerEmail", "customerEmail", ""))
        .column(ColumnSpec::optional("anonymousId", "anonymousId", ""))
        .column(ColumnSpec::required("orderId", "id"))
        .column(ColumnSpec::required("createdAt", "createdAt"))
        .column(ColumnSpec::optional("productPrice", "price.value.centAmount", "").in_item())
        .column(ColumnSpec::required("totalPrice", "totalPrice.centAmount"))
        .column(ColumnSpec::optional("currency", "price.value.currencyCode", "").in_item())
        .column(ColumnSpec::optional("quantity", "quantity", "").in_item())
        .column(ColumnSpec::optional("country", "country", ""))
        .column(ColumnSpec::localized("name", "name", "").in_item())
        .build()
}

pub fn category_schema(languages: &[String]) -> EntitySchema {
    SchemaBuilder::new("categories")
        .languages(languages.iter().cloned())
        .column(ColumnSpec::required("id", "id"))
        .column(ColumnSpec::required("createdAt", "createdAt"))
        .localized(LOCALIZED_FIELDS, "")
        .build()
}
