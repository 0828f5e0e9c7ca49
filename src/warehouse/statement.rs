//! Bulk insert statements
//!
//! Two shapes, both fully parameterized:
//!
//! - [`InsertStatement`]: a `VALUES` list with one positional `?` per value.
//!   Per row the parameters are the nine scalar columns up to `medium`, then
//!   one per `page_view` element, then `source`.
//! - [`insert_from_unnest_sql`]: `INSERT ... SELECT` over a single
//!   array-of-rows parameter, whose parameter count does not grow with the
//!   batch.

use super::schema::ACTIVITY_COLUMNS;
use crate::rows::ActivityRow;

/// A single multi-row `INSERT` with its bound values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    pub sql: String,
    pub params: Vec<String>,
    pub rows: usize,
}

impl InsertStatement {
    /// Build the statement for `rows`, or `None` when there is nothing to insert
    pub fn build(table_identifier: &str, rows: &[ActivityRow]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let columns: Vec<&str> = ACTIVITY_COLUMNS.iter().map(|column| column.name).collect();
        let mut tuples = Vec::with_capacity(rows.len());
        let mut params = Vec::with_capacity(rows.len() * ACTIVITY_COLUMNS.len());

        for row in rows {
            let leading = row.leading_values();
            params.extend(leading.iter().map(|value| (*value).to_string()));
            params.extend(row.page_view.iter().cloned());
            params.push(row.source.clone());

            let page_view = vec!["?"; row.page_view.len()].join(", ");
            tuples.push(format!(
                "({}, [{page_view}], ?)",
                vec!["?"; leading.len()].join(", ")
            ));
        }

        Some(Self {
            sql: format!(
                "INSERT INTO {table_identifier} ({}) VALUES {}",
                columns.join(", "),
                tuples.join(", ")
            ),
            params,
            rows: rows.len(),
        })
    }
}

/// `INSERT` reading every row from the one positional array parameter
///
/// The parameter's element fields must be named after the destination
/// columns.
pub fn insert_from_unnest_sql(table_identifier: &str) -> String {
    let columns = ACTIVITY_COLUMNS
        .iter()
        .map(|column| column.name)
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {table_identifier} ({columns}) SELECT {columns} FROM UNNEST(?)")
}
