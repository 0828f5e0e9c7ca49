//! Load engine
//!
//! Runs one view/table/date-range load:
//!
//! ```text
//! Init → DiscoverClients → CreateTable → FetchActivities → BulkInsert → Done
//! ```
//!
//! Any error ends the run at the stage that raised it. Nothing created
//! earlier is rolled back, so a failed run may leave an empty table behind.
//!
//! Progress for the operator is written to the injected writer: the table
//! name before creation, then per client its id, a separator line and the
//! pretty-printed activity list.

mod types;

pub use types::{LoadConfig, LoadSummary, Stage};

use crate::error::{Error, Result};
use crate::reporting::{Activity, ReportingClient};
use crate::rows::{generate_rows, ActivityRow};
use crate::types::ClientId;
use crate::warehouse::Warehouse;
use futures::stream::{self, StreamExt};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

const CLIENT_SEPARATOR: &str = "-------------------";

/// Orchestrates a single load run
pub struct LoadEngine<'a> {
    reporting: &'a ReportingClient,
    warehouse: &'a dyn Warehouse,
    config: LoadConfig,
    progress: Box<dyn Write + 'a>,
    stage: Stage,
}

impl<'a> LoadEngine<'a> {
    /// Create an engine that reports progress on stdout
    pub fn new(
        reporting: &'a ReportingClient,
        warehouse: &'a dyn Warehouse,
        config: LoadConfig,
    ) -> Self {
        Self {
            reporting,
            warehouse,
            config,
            progress: Box::new(std::io::stdout()),
            stage: Stage::Init,
        }
    }

    /// Send progress output somewhere other than stdout
    #[must_use]
    pub fn with_progress(mut self, progress: impl Write + 'a) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// The stage the engine is in, or failed in
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Run the pipeline to completion
    pub async fn run(&mut self) -> Result<LoadSummary> {
        let start = Instant::now();
        let mut summary = LoadSummary::default();

        self.enter(Stage::DiscoverClients);
        let client_ids = self
            .reporting
            .discover_client_ids(&self.config.view_id, &self.config.date_range)
            .await?;
        summary.clients = client_ids.len();
        info!(
            "Found {} clients in view {} for {}",
            client_ids.len(),
            self.config.view_id,
            self.config.date_range
        );

        self.enter(Stage::CreateTable);
        writeln!(self.progress, "Creating table {}", self.config.table)?;
        self.warehouse.create_table(&self.config.table).await?;

        self.enter(Stage::FetchActivities);
        let rows = self.fetch_rows(&client_ids, &mut summary).await?;

        self.enter(Stage::BulkInsert);
        if rows.is_empty() {
            info!("No activity rows to insert; skipping bulk insert");
        } else {
            writeln!(self.progress, "Inserting data into {}", self.warehouse.name())?;
            summary.rows_inserted = self
                .warehouse
                .insert_rows(&self.config.table, &rows)
                .await?;
        }
        self.progress.flush()?;

        self.enter(Stage::Done);
        info!(
            "Loaded {} rows for {} clients into {} in {}ms",
            summary.rows_inserted,
            summary.clients,
            self.config.table,
            start.elapsed().as_millis()
        );

        Ok(summary)
    }

    /// Fetch every client's activities and flatten them into rows
    ///
    /// Up to `concurrency` searches are in flight at once; results are
    /// consumed in discovery order so printing and row order never depend
    /// on which response arrives first.
    async fn fetch_rows(
        &mut self,
        client_ids: &[ClientId],
        summary: &mut LoadSummary,
    ) -> Result<Vec<ActivityRow>> {
        let reporting = self.reporting;
        let view_id = self.config.view_id.as_str();
        let date_range = &self.config.date_range;

        let mut fetches = stream::iter(client_ids)
            .map(|client_id| async move {
                let activities = reporting
                    .fetch_activities(view_id, client_id, date_range)
                    .await?;
                Ok::<_, Error>((client_id, activities))
            })
            .buffered(self.config.concurrency.max(1));

        let mut rows = Vec::new();
        while let Some(fetched) = fetches.next().await {
            let (client_id, activities) = fetched?;
            write_client(&mut self.progress, client_id, &activities)?;

            summary.activities += activities.len();
            rows.extend(generate_rows(client_id, &activities)?);
            debug!("Client {} contributed {} rows", client_id, activities.len());
        }

        Ok(rows)
    }

    fn enter(&mut self, stage: Stage) {
        debug!("Entering stage {}", stage);
        self.stage = stage;
    }
}

fn write_client(out: &mut dyn Write, client_id: &ClientId, activities: &[Activity]) -> Result<()> {
    writeln!(out, "Client: {client_id}")?;
    writeln!(out, "{CLIENT_SEPARATOR}")?;
    writeln!(out, "{}", serde_json::to_string_pretty(activities)?)?;
    Ok(())
}
