//! Destination table names

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static PROJECT_OR_DATASET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid identifier pattern"));

static TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid table pattern"));

/// Fully-qualified `<project>.<dataset>.<table>` destination
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    project: String,
    dataset: String,
    table: String,
}

impl TableName {
    /// Parse and validate a dotted table path
    pub fn parse(path: &str) -> Result<Self> {
        let parts: Vec<&str> = path.split('.').collect();
        let [project, dataset, table] = parts.as_slice() else {
            return Err(Error::invalid_table(
                path,
                "expected <project>.<dataset>.<table>",
            ));
        };

        for (label, value, pattern) in [
            ("project", project, &*PROJECT_OR_DATASET),
            ("dataset", dataset, &*PROJECT_OR_DATASET),
            ("table", table, &*TABLE),
        ] {
            if !pattern.is_match(value) {
                return Err(Error::invalid_table(
                    path,
                    format!("{label} segment '{value}' contains invalid characters"),
                ));
            }
        }

        Ok(Self {
            project: (*project).to_string(),
            dataset: (*dataset).to_string(),
            table: (*table).to_string(),
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Backtick-quoted path for BigQuery statements
    pub fn bigquery_identifier(&self) -> String {
        format!("`{self}`")
    }

    /// The whole path as one double-quoted DuckDB identifier
    pub fn duckdb_identifier(&self) -> String {
        format!("\"{self}\"")
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
