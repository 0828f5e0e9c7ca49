//! BigQuery backend
//!
//! Statements go through `jobs.query` as GoogleSQL with positional
//! parameters. When the job has not finished within the request's wait
//! window, `jobs.getQueryResults` is polled until it reports completion.
//!
//! A failed job is reported by BigQuery as a non-success HTTP status. The
//! `errors` list of a successful response only carries warnings and is
//! logged.
//!
//! Rows are bound as one `ARRAY<STRUCT<...>>` parameter, so a bulk insert
//! uses a single query parameter regardless of how many rows it carries.

use super::schema::{create_table_sql, ColumnType, Dialect, ACTIVITY_COLUMNS};
use super::statement::insert_from_unnest_sql;
use super::table::TableName;
use super::Warehouse;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::rows::ActivityRow;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

/// Server-side wait per `jobs.query` / `getQueryResults` call
const QUERY_WAIT_MS: u64 = 10_000;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    #[serde(default)]
    job_reference: Option<JobReference>,
    #[serde(default)]
    job_complete: bool,
    #[serde(default)]
    errors: Vec<ErrorProto>,
    #[serde(default)]
    num_dml_affected_rows: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobReference {
    job_id: String,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorProto {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Warehouse backed by the BigQuery REST API
///
/// The `HttpClient` must carry the BigQuery base URL and a session with the
/// BigQuery scope. Jobs run in the project named by the table path.
#[derive(Debug)]
pub struct BigQueryWarehouse {
    http: HttpClient,
}

impl BigQueryWarehouse {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Establish the session before the first statement
    pub async fn initialize(&self) -> Result<()> {
        self.http.initialize_auth().await
    }

    /// Run one statement to completion
    async fn execute(&self, project: &str, sql: String, params: Vec<Value>) -> Result<QueryResponse> {
        let mut body = json!({
            "query": sql,
            "useLegacySql": false,
            "timeoutMs": QUERY_WAIT_MS,
        });
        if !params.is_empty() {
            body["parameterMode"] = json!("POSITIONAL");
            body["queryParameters"] = Value::Array(params);
        }

        let mut response: QueryResponse = self
            .http
            .post_json(&format!("/bigquery/v2/projects/{project}/queries"), body)
            .await?;
        log_warnings(&response);

        while !response.job_complete {
            let Some(job) = response.job_reference.as_ref() else {
                return Err(Error::query("incomplete query job has no job reference"));
            };
            debug!("Waiting for BigQuery job {}", job.job_id);

            let mut request = RequestConfig::new().query("timeoutMs", QUERY_WAIT_MS.to_string());
            if let Some(location) = &job.location {
                request = request.query("location", location.clone());
            }

            let next: QueryResponse = self
                .http
                .get_json_with_config(
                    &format!("/bigquery/v2/projects/{project}/queries/{}", job.job_id),
                    request,
                )
                .await?;
            log_warnings(&next);

            response = QueryResponse {
                job_reference: next.job_reference.or(response.job_reference),
                ..next
            };
        }

        Ok(response)
    }
}

#[async_trait]
impl Warehouse for BigQueryWarehouse {
    fn name(&self) -> &'static str {
        "BigQuery"
    }

    async fn create_table(&self, table: &TableName) -> Result<()> {
        let sql = create_table_sql(&table.bigquery_identifier(), Dialect::BigQuery);
        info!("Creating BigQuery table {}", table);

        match self.execute(table.project(), sql, Vec::new()).await {
            Ok(_) => Ok(()),
            Err(err) if is_already_exists(&err) => Err(Error::table_exists(table.to_string())),
            Err(err) => Err(err),
        }
    }

    async fn insert_rows(&self, table: &TableName, rows: &[ActivityRow]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        debug!("Inserting {} rows into {}", rows.len(), table);

        let response = self
            .execute(
                table.project(),
                insert_from_unnest_sql(&table.bigquery_identifier()),
                vec![rows_parameter(rows)],
            )
            .await?;

        Ok(response
            .num_dml_affected_rows
            .as_deref()
            .and_then(|count| count.parse().ok())
            .unwrap_or(rows.len()))
    }
}

/// The whole batch as one `ARRAY<STRUCT<...>>` query parameter
///
/// Struct fields follow the destination columns in table order.
fn rows_parameter(rows: &[ActivityRow]) -> Value {
    let struct_types: Vec<Value> = ACTIVITY_COLUMNS
        .iter()
        .map(|column| json!({"name": column.name, "type": parameter_type(column.column_type)}))
        .collect();

    json!({
        "parameterType": {
            "type": "ARRAY",
            "arrayType": {"type": "STRUCT", "structTypes": struct_types},
        },
        "parameterValue": {
            "arrayValues": rows.iter().map(struct_value).collect::<Vec<_>>(),
        },
    })
}

fn parameter_type(column_type: ColumnType) -> Value {
    match column_type {
        ColumnType::String => json!({"type": "STRING"}),
        ColumnType::StringArray => json!({"type": "ARRAY", "arrayType": {"type": "STRING"}}),
    }
}

fn struct_value(row: &ActivityRow) -> Value {
    let mut scalars = row
        .leading_values()
        .into_iter()
        .chain([row.source.as_str()]);

    let fields: Map<String, Value> = ACTIVITY_COLUMNS
        .iter()
        .map(|column| {
            let value = match column.column_type {
                ColumnType::String => json!({"value": scalars.next()}),
                ColumnType::StringArray => json!({
                    "arrayValues": row
                        .page_view
                        .iter()
                        .map(|page| json!({"value": page}))
                        .collect::<Vec<_>>(),
                }),
            };
            (column.name.to_string(), value)
        })
        .collect();

    json!({"structValues": fields})
}

fn log_warnings(response: &QueryResponse) {
    for entry in &response.errors {
        warn!(
            "BigQuery reported {}: {}",
            entry.reason.as_deref().unwrap_or("a warning"),
            entry.message.as_deref().unwrap_or_default()
        );
    }
}

fn is_already_exists(err: &Error) -> bool {
    match err {
        Error::HttpStatus { status, body } => *status == 409 || body.contains("Already Exists"),
        _ => false,
    }
}

#[cfg(test)]
mod parameter_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(client_id: &str, pages: &[&str]) -> ActivityRow {
        ActivityRow {
            client_id: client_id.to_string(),
            activity_time: "2024-03-01T10:00:00Z".to_string(),
            activity_type: "PAGEVIEW".to_string(),
            campaign: "(not set)".to_string(),
            channel_grouping: "Organic Search".to_string(),
            hostname: "www.example.com".to_string(),
            keyword: "(not provided)".to_string(),
            landing_page: "/".to_string(),
            medium: "organic".to_string(),
            page_view: pages.iter().map(|page| (*page).to_string()).collect(),
            source: "google".to_string(),
        }
    }

    #[test]
    fn test_struct_fields_follow_table_columns() {
        let param = rows_parameter(&[row("c1", &["/home"])]);

        let names: Vec<&str> = param["parameterType"]["arrayType"]["structTypes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|field| field["name"].as_str().unwrap())
            .collect();
        let columns: Vec<&str> = ACTIVITY_COLUMNS.iter().map(|column| column.name).collect();
        assert_eq!(names, columns);

        let fields = &param["parameterValue"]["arrayValues"][0]["structValues"];
        assert_eq!(fields["client_id"], json!({"value": "c1"}));
        assert_eq!(fields["medium"], json!({"value": "organic"}));
        assert_eq!(fields["source"], json!({"value": "google"}));
        assert_eq!(fields["page_view"], json!({"arrayValues": [{"value": "/home"}]}));
    }

    #[test]
    fn test_page_view_is_typed_as_string_array() {
        let param = rows_parameter(&[row("c1", &[])]);
        let page_view = &param["parameterType"]["arrayType"]["structTypes"][9];
        assert_eq!(
            page_view,
            &json!({"name": "page_view", "type": {"type": "ARRAY", "arrayType": {"type": "STRING"}}})
        );
        assert_eq!(
            param["parameterValue"]["arrayValues"][0]["structValues"]["page_view"],
            json!({"arrayValues": []})
        );
    }

    #[test]
    fn test_already_exists_detection() {
        assert!(is_already_exists(&Error::http_status(409, "")));
        assert!(is_already_exists(&Error::http_status(
            400,
            "Already Exists: Table acme:web.activity"
        )));
        assert!(!is_already_exists(&Error::http_status(400, "Syntax error")));
        assert!(!is_already_exists(&Error::query("Already Exists")));
    }
}
