// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ga-activity-loader
//!
//! One-shot ETL from the Google Analytics Reporting API v4 into a freshly
//! created warehouse table.
//!
//! ## Features
//!
//! - **Service-account auth**: JWT-bearer token exchange with caching
//! - **Client discovery**: sessions grouped by `ga:clientId`, all pages
//! - **Activity timelines**: `userActivity:search` per client, optionally concurrent
//! - **Bound inserts**: one `INSERT` per load, values only ever bound as parameters
//! - **Warehouses**: BigQuery over REST, or a local DuckDB file
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ga_activity_loader::engine::{LoadConfig, LoadEngine};
//! use ga_activity_loader::warehouse::{DuckDbWarehouse, TableName};
//!
//! let warehouse = DuckDbWarehouse::open("analytics.duckdb")?;
//! let config = LoadConfig::new("12345", TableName::parse("proj.ds.activity")?);
//! let summary = LoadEngine::new(&reporting, &warehouse, config).run().await?;
//! println!("{} rows", summary.rows_inserted);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         LoadEngine                           │
//! │  discover clients → create table → fetch activities → insert │
//! └──────────────────────────────────────────────────────────────┘
//!                                 │
//! ┌──────────┬───────────┬────────┴────────┬──────────┬─────────────┐
//! │   Auth   │   HTTP    │    Pagination   │   Rows   │  Warehouse  │
//! ├──────────┼───────────┼─────────────────┼──────────┼─────────────┤
//! │ JWT      │ Retry     │ pageToken       │ Flatten  │ BigQuery    │
//! │ Token    │ Rate Limit│ nextPageToken   │ Validate │ DuckDB      │
//! │ cache    │ Backoff   │ Loop detection  │          │             │
//! └──────────┴───────────┴─────────────────┴──────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Environment settings
pub mod config;

/// Service-account authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page-token continuation
pub mod pagination;

/// Analytics Reporting API v4 client and models
pub mod reporting;

/// Destination rows
pub mod rows;

/// Destination table, schema and warehouse backends
pub mod warehouse;

/// Load orchestration
pub mod engine;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{ClientId, DateRange};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
