//! CLI runner - builds the clients and runs the load

use crate::auth::{ServiceAccountKey, ANALYTICS_READONLY_SCOPE, BIGQUERY_SCOPE};
use crate::cli::commands::{Cli, WarehouseKind};
use crate::config::Settings;
use crate::engine::{LoadConfig, LoadEngine, LoadSummary};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::reporting::ReportingClient;
use crate::warehouse::{BigQueryWarehouse, DuckDbWarehouse, TableName, Warehouse};
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
    settings: Settings,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli, settings: Settings) -> Self {
        Self { cli, settings }
    }

    /// Run the load, printing progress to stdout
    pub async fn run(&self) -> Result<LoadSummary> {
        self.run_with_progress(std::io::stdout()).await
    }

    /// Run the load with progress sent to `progress`
    pub async fn run_with_progress(&self, progress: impl Write) -> Result<LoadSummary> {
        let table = TableName::parse(&self.cli.table)?;
        let key = ServiceAccountKey::from_file(&self.settings.credentials_path)?;

        let reporting = ReportingClient::new(HttpClient::with_auth(
            self.http_config(&self.settings.reporting_url),
            key.auth_config(&[ANALYTICS_READONLY_SCOPE]),
        )?)
        .with_page_size(self.cli.page_size);
        reporting.initialize().await?;

        let warehouse: Box<dyn Warehouse> = match self.cli.warehouse {
            WarehouseKind::Bigquery => {
                let bigquery = BigQueryWarehouse::new(HttpClient::with_auth(
                    self.http_config(&self.settings.bigquery_url),
                    key.auth_config(&[BIGQUERY_SCOPE]),
                )?);
                bigquery.initialize().await?;
                Box::new(bigquery)
            }
            WarehouseKind::Duckdb => {
                let duckdb = DuckDbWarehouse::open(&self.cli.database)?;
                info!("Using DuckDB database {}", duckdb.location());
                Box::new(duckdb)
            }
        };
        info!(
            "Loading view {} into {} table {}",
            self.cli.view_id,
            warehouse.name(),
            table
        );

        let config = LoadConfig::new(&self.cli.view_id, table).with_concurrency(self.cli.concurrency);

        let mut engine =
            LoadEngine::new(&reporting, warehouse.as_ref(), config).with_progress(progress);
        let summary = engine.run().await?;
        Ok(summary)
    }

    fn http_config(&self, base_url: &str) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(base_url)
            .max_retries(self.cli.max_retries);

        if let Some(rps) = self.cli.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }

        builder.build()
    }
}
