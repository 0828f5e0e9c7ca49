//! Destination warehouse
//!
//! The loader writes into one freshly created table with a fixed 11-column
//! schema. Row values are always bound as query parameters; the table name
//! is the only identifier placed in statement text, and it is validated
//! before use.
//!
//! Two backends implement [`Warehouse`]:
//!
//! - [`BigQueryWarehouse`] runs statements through the BigQuery REST API
//! - [`DuckDbWarehouse`] writes to a local DuckDB database file

mod bigquery;
mod local;
mod schema;
mod statement;
mod table;

pub use bigquery::BigQueryWarehouse;
pub use local::DuckDbWarehouse;
pub use schema::{create_table_sql, Column, ColumnType, Dialect, ACTIVITY_COLUMNS};
pub use statement::{insert_from_unnest_sql, InsertStatement};
pub use table::TableName;

use crate::error::Result;
use crate::rows::ActivityRow;
use async_trait::async_trait;

/// A destination that can provision the activity table and bulk-load rows
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Short backend name for logging
    fn name(&self) -> &'static str;

    /// Create the activity table; fails if it already exists
    async fn create_table(&self, table: &TableName) -> Result<()>;

    /// Insert every row in one statement and return the number written
    ///
    /// An empty slice issues nothing and returns zero.
    async fn insert_rows(&self, table: &TableName, rows: &[ActivityRow]) -> Result<usize>;
}
