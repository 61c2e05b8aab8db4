//! # ctframe - commerce API tables
//!
//! Pulls products, customers, orders and categories out of a paginated
//! commerce REST API and flattens them into one table per entity kind.
//!
//! ## Modules
//!
//! - **paginate**: offset/limit page sequences with fail-fast semantics
//! - **schema**: declarative column specs per entity kind, with language and currency fan-out
//! - **extract**: path resolution with defaults and the row materializer
//! - **table**: the resulting tables and a JSON Lines writer
//! - **api**: the `CommerceApi` collaborator and its HTTP implementation
//! - **pipeline**: the engine tying the pieces together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ctframe::{ApiConfig, ExtractOptions, Extractor, HttpApi};
//!
//! # fn main() -> anyhow::Result<()> {
//! let api = HttpApi::new(ApiConfig::from_env()?)?;
//! let extractor = Extractor::new(api);
//!
//! let products = extractor.products(&ExtractOptions::new(300))?;
//! for name in products.column("name_en").unwrap_or_default() {
//!     println!("{}", name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Flattening records without the API
//!
//! ```rust
//! use ctframe::extract::RowMaterializer;
//! use ctframe::schema::customer_schema;
//! use serde_json::json;
//!
//! let materializer = RowMaterializer::new(&customer_schema());
//! let rows = materializer.materialize(&json!({"id": "c1", "email": "a@example.com"}));
//!
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].len(), materializer.column_names().len());
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod paginate;
pub mod pipeline;
pub mod schema;
pub mod table;

// Re-export commonly used types for convenience
pub use api::{AuthToken, CommerceApi, HttpApi};
pub use config::{ApiConfig, ExtractOptions, Staged};
pub use error::{ExtractError, Result};
pub use extract::{resolve, select_price, RowMaterializer};
pub use paginate::{paginate, PageRequest, PageWindow};
pub use pipeline::Extractor;
pub use schema::{EntityKind, EntitySchema, SchemaBuilder};
pub use table::{Row, Table, TableWriter};
