//! Engine types
//!
//! Run configuration, stages and the end-of-run summary.

use crate::types::DateRange;
use crate::warehouse::TableName;
use std::fmt;

/// Configuration for one load run
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Reporting view to read from
    pub view_id: String,
    /// Destination table, created by the run
    pub table: TableName,
    /// Window shared by discovery and every activity search
    pub date_range: DateRange,
    /// Maximum in-flight activity searches (1 = sequential)
    pub concurrency: usize,
}

impl LoadConfig {
    /// Sequential run over the last seven days
    pub fn new(view_id: impl Into<String>, table: TableName) -> Self {
        Self {
            view_id: view_id.into(),
            table,
            date_range: DateRange::last_seven_days(),
            concurrency: 1,
        }
    }

    #[must_use]
    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Set the fetch concurrency; zero is treated as one
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    DiscoverClients,
    CreateTable,
    FetchActivities,
    BulkInsert,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::DiscoverClients => "discover-clients",
            Stage::CreateTable => "create-table",
            Stage::FetchActivities => "fetch-activities",
            Stage::BulkInsert => "bulk-insert",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// What a completed run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Client ids discovered
    pub clients: usize,
    /// Activities fetched across all clients
    pub activities: usize,
    /// Rows written by the bulk insert
    pub rows_inserted: usize,
}
