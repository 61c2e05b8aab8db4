//! ctframe: Extract commerce API entities into flat tables
//!
//! Usage:
//!   # First 300 products, credentials from CTP_* environment variables
//!   ctframe products --nr-items 300
//!
//!   # Orders with French line item names, written to a file
//!   ctframe orders --nr-items 50 --languages fr --output orders.jsonl
//!
//!   # Staged product projections, credentials from a JSON file
//!   ctframe products --nr-items 10 --staged true --config project.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ctframe::{ApiConfig, EntityKind, ExtractOptions, Extractor, HttpApi, TableWriter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Entity {
    Products,
    Customers,
    Orders,
    Categories,
}

impl From<Entity> for EntityKind {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Products => EntityKind::Product,
            Entity::Customers => EntityKind::Customer,
            Entity::Orders => EntityKind::Order,
            Entity::Categories => EntityKind::Category,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ctframe")]
#[command(about = "Extract commerce API entities into flat tables", long_about = None)]
struct Args {
    /// Entity kind to extract
    #[arg(value_enum)]
    entity: Entity,

    /// Number of items to fetch (orders: number of orders, not line items)
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    nr_items: i64,

    /// Index of the first item to fetch
    #[arg(long, default_value_t = 0)]
    offset: u64,

    /// Items requested per API call
    #[arg(long, default_value_t = ctframe::paginate::DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,

    /// Comma-separated locales for localized columns
    #[arg(long, value_delimiter = ',', default_value = "en,de")]
    languages: Vec<String>,

    /// Comma-separated currencies for product price columns
    #[arg(long, value_delimiter = ',', default_value = "USD,EUR")]
    currencies: Vec<String>,

    /// Read staged product projections: "true" or "false"
    #[arg(long, default_value = "false")]
    staged: String,

    /// JSON file with API credentials (default: CTP_* environment variables)
    #[arg(long, short = 'c')]
    config: Option<String>,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    output: Option<String>,

    /// Log chunk progress at debug level only
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let options = ExtractOptions {
        nr_items: args.nr_items,
        offset: args.offset,
        chunk_size: args.chunk_size,
        languages: args.languages,
        currencies: args.currencies,
        verbose: !args.quiet,
        ..Default::default()
    }
    .with_staged(&args.staged)?;

    let config = match &args.config {
        Some(path) => ApiConfig::from_file(path)?,
        None => ApiConfig::from_env().context("No --config given and environment is incomplete")?,
    };

    let extractor = Extractor::new(HttpApi::new(config)?);
    let table = extractor.extract(args.entity.into(), &options)?;

    match args.output {
        Some(path) => {
            let mut writer = TableWriter::create(&path)?;
            writer.write_table(&table)?;
            writer.flush()?;
            tracing::info!(rows = table.len(), %path, "table written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = TableWriter::new(stdout.lock());
            writer.write_table(&table)?;
            writer.flush()?;
        }
    }

    Ok(())
}
