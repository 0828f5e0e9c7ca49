//! CLI arguments

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Load the last seven days of per-client Google Analytics activity into a
/// new warehouse table
#[derive(Parser, Debug)]
#[command(name = "ga-activity-loader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Get analytics from view ID
    #[arg(short = 'v', long = "view", value_name = "VIEW_ID")]
    pub view_id: String,

    /// Destination table as <project>.<dataset>.<table>; it is created by
    /// the run and must not already exist
    #[arg(short, long, value_name = "PROJECT.DATASET.TABLE")]
    pub table: String,

    /// Warehouse to load into
    #[arg(long, value_enum, default_value_t = WarehouseKind::Bigquery)]
    pub warehouse: WarehouseKind,

    /// DuckDB database file, used with `--warehouse duckdb`
    #[arg(long, default_value = "analytics.duckdb")]
    pub database: PathBuf,

    /// Maximum concurrent activity searches
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Page size for reporting requests (API default when unset)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Retries for failed requests (429, 5xx, connection failures)
    #[arg(long, default_value_t = 0)]
    pub max_retries: u32,

    /// Client-side request rate limit
    #[arg(long)]
    pub requests_per_second: Option<u32>,

    /// Debug logging
    #[arg(long)]
    pub verbose: bool,
}

/// Destination warehouse
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WarehouseKind {
    /// Google BigQuery
    #[default]
    Bigquery,
    /// Local DuckDB database file
    Duckdb,
}
