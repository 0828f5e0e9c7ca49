//! Error types for the activity loader
//!
//! Every stage of the pipeline returns `Result<T, Error>`. Nothing is caught
//! or recovered inside the pipeline: errors bubble to `main` and end the run.

use thiserror::Error;

/// Everything that can stop a load
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Setup
    // ============================================================================
    /// A local resource (database file, connection) could not be set up
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A required environment variable is unset or empty
    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    /// A setting or argument was present but unusable
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid service account key '{path}': {message}")]
    ServiceAccountKey { path: String, message: String },

    /// The signed assertion could not be built or was refused by the
    /// token endpoint
    #[error("JWT generation failed: {message}")]
    JwtGeneration { message: String },

    // ============================================================================
    // Google APIs
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status; `body` is the raw response text
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Pagination error: {message}")]
    Pagination { message: String },

    /// A success response whose body was not the expected JSON document
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to serialize request: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Activity data
    // ============================================================================
    /// A user activity lacked one of the fields every row needs
    #[error("Activity is missing required field '{field}'")]
    MissingField { field: String },

    // ============================================================================
    // Destination
    // ============================================================================
    #[error("Invalid table name '{table}': {message}")]
    InvalidTableName { table: String, message: String },

    #[error("Table '{table}' already exists")]
    TableAlreadyExists { table: String },

    /// A warehouse job could not be run to completion
    #[error("Query failed: {message}")]
    Query { message: String },

    #[error("DuckDB error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn missing_config(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn service_account_key(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ServiceAccountKey {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn jwt(message: impl Into<String>) -> Self {
        Self::JwtGeneration {
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    pub fn pagination(message: impl Into<String>) -> Self {
        Self::Pagination {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_table(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTableName {
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn table_exists(table: impl Into<String>) -> Self {
        Self::TableAlreadyExists {
            table: table.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Result type alias for the activity loader
pub type Result<T> = std::result::Result<T, Error>;
