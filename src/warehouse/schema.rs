//! Fixed destination schema
//!
//! ```sql
//! CREATE TABLE `<project>.<dataset>.<table>` (
//!     client_id STRING NOT NULL,
//!     activity_time STRING,
//!     activity_type STRING,
//!     campaign STRING,
//!     channel_grouping STRING,
//!     hostname STRING,
//!     keyword STRING,
//!     landing_page STRING,
//!     medium STRING,
//!     page_view ARRAY<STRING>,
//!     source STRING
//! )
//! ```

/// Column value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    StringArray,
}

/// One destination column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub required: bool,
}

const fn string(name: &'static str) -> Column {
    Column {
        name,
        column_type: ColumnType::String,
        required: false,
    }
}

/// Destination columns in table order
pub const ACTIVITY_COLUMNS: [Column; 11] = [
    Column {
        name: "client_id",
        column_type: ColumnType::String,
        required: true,
    },
    string("activity_time"),
    string("activity_type"),
    string("campaign"),
    string("channel_grouping"),
    string("hostname"),
    string("keyword"),
    string("landing_page"),
    string("medium"),
    Column {
        name: "page_view",
        column_type: ColumnType::StringArray,
        required: false,
    },
    string("source"),
];

/// SQL dialect of a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    BigQuery,
    DuckDb,
}

impl Dialect {
    /// Type name of a column in this dialect
    pub fn type_name(self, column_type: ColumnType) -> &'static str {
        match (self, column_type) {
            (Dialect::BigQuery, ColumnType::String) => "STRING",
            (Dialect::BigQuery, ColumnType::StringArray) => "ARRAY<STRING>",
            (Dialect::DuckDb, ColumnType::String) => "VARCHAR",
            (Dialect::DuckDb, ColumnType::StringArray) => "VARCHAR[]",
        }
    }
}

/// `CREATE TABLE` for the activity schema; no `IF NOT EXISTS`
pub fn create_table_sql(table_identifier: &str, dialect: Dialect) -> String {
    let columns: Vec<String> = ACTIVITY_COLUMNS
        .iter()
        .map(|column| {
            let mut definition = format!("{} {}", column.name, dialect.type_name(column.column_type));
            if column.required {
                definition.push_str(" NOT NULL");
            }
            definition
        })
        .collect();

    format!(
        "CREATE TABLE {table_identifier} (\n  {}\n)",
        columns.join(",\n  ")
    )
}
