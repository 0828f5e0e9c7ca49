//! DuckDB backend
//!
//! Writes the activity table into a local DuckDB database. The dotted table
//! path is kept whole as one quoted identifier, so `proj.ds.events` becomes
//! a table literally named `proj.ds.events` in the default schema.

use super::schema::{create_table_sql, Dialect, ACTIVITY_COLUMNS};
use super::statement::InsertStatement;
use super::table::TableName;
use super::Warehouse;
use crate::error::{Error, Result};
use crate::rows::ActivityRow;
use async_trait::async_trait;
use duckdb::{params_from_iter, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Separator used when reading the array column back as one string
const PAGE_VIEW_SEPARATOR: char = '\u{1f}';

/// Warehouse backed by a DuckDB database file
pub struct DuckDbWarehouse {
    conn: Mutex<Connection>,
    /// Database location, for logging
    location: String,
}

impl DuckDbWarehouse {
    /// Open or create the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            Error::config(format!(
                "Failed to open DuckDB database {}: {e}",
                path.display()
            ))
        })?;

        Ok(Self {
            conn: Mutex::new(conn),
            location: path.display().to_string(),
        })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::config(format!("Failed to create DuckDB connection: {e}")))?;

        Ok(Self {
            conn: Mutex::new(conn),
            location: ":memory:".to_string(),
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Number of rows currently in `table`
    pub fn count_rows(&self, table: &TableName) -> Result<usize> {
        let conn = self.connection()?;
        let count: i64 = conn.query_row(
            &format!("SELECT count(*) FROM {}", table.duckdb_identifier()),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Every row of `table` in insertion order
    pub fn select_rows(&self, table: &TableName) -> Result<Vec<ActivityRow>> {
        let leading: Vec<&str> = ACTIVITY_COLUMNS[..9]
            .iter()
            .map(|column| column.name)
            .collect();
        let sql = format!(
            "SELECT {}, list_aggr(page_view, 'string_agg', '{PAGE_VIEW_SEPARATOR}'), source \
             FROM {} ORDER BY rowid",
            leading.join(", "),
            table.duckdb_identifier()
        );

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let page_view: Option<String> = row.get(9)?;
                Ok(ActivityRow {
                    client_id: row.get(0)?,
                    activity_time: row.get(1)?,
                    activity_type: row.get(2)?,
                    campaign: row.get(3)?,
                    channel_grouping: row.get(4)?,
                    hostname: row.get(5)?,
                    keyword: row.get(6)?,
                    landing_page: row.get(7)?,
                    medium: row.get(8)?,
                    page_view: page_view
                        .map(|joined| {
                            joined
                                .split(PAGE_VIEW_SEPARATOR)
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default(),
                    source: row.get(10)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::query("DuckDB connection lock poisoned"))
    }
}

impl std::fmt::Debug for DuckDbWarehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuckDbWarehouse")
            .field("location", &self.location)
            .finish()
    }
}

#[async_trait]
impl Warehouse for DuckDbWarehouse {
    fn name(&self) -> &'static str {
        "DuckDB"
    }

    async fn create_table(&self, table: &TableName) -> Result<()> {
        let sql = create_table_sql(&table.duckdb_identifier(), Dialect::DuckDb);
        info!("Creating DuckDB table {} in {}", table, self.location);

        let conn = self.connection()?;
        match conn.execute_batch(&sql) {
            Ok(()) => Ok(()),
            Err(err) if err.to_string().contains("already exists") => {
                Err(Error::table_exists(table.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn insert_rows(&self, table: &TableName, rows: &[ActivityRow]) -> Result<usize> {
        let Some(statement) = InsertStatement::build(&table.duckdb_identifier(), rows) else {
            return Ok(0);
        };
        debug!(
            "Inserting {} rows into {} with {} parameters",
            statement.rows,
            table,
            statement.params.len()
        );

        let conn = self.connection()?;
        let written = conn.execute(&statement.sql, params_from_iter(statement.params.iter()))?;
        Ok(written)
    }
}
