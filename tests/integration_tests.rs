//! Integration tests using mock HTTP servers
//!
//! Tests the full flow: service-account key → token exchange → reporting
//! API → warehouse (BigQuery REST mock or a DuckDB file)

use clap::Parser;
use ga_activity_loader::cli::{Cli, Runner};
use ga_activity_loader::config::Settings;
use ga_activity_loader::warehouse::{DuckDbWarehouse, TableName};
use ga_activity_loader::Error;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY_FIXTURE: &str = include_str!("fixtures/service_account.json");

fn write_key(dir: &Path, token_server: &MockServer) -> PathBuf {
    let mut key: Value = serde_json::from_str(KEY_FIXTURE).unwrap();
    key["token_uri"] = json!(format!("{}/token", token_server.uri()));
    let key_path = dir.join("key.json");
    std::fs::write(&key_path, key.to_string()).unwrap();
    key_path
}

fn settings(key_path: PathBuf, reporting: &MockServer, bigquery: &MockServer) -> Settings {
    let lookup = |name: &str| match name {
        "GOOGLE_APPLICATION_CREDENTIALS" => Some(key_path.display().to_string()),
        "ANALYTICS_REPORTING_URL" => Some(reporting.uri()),
        "BIGQUERY_URL" => Some(bigquery.uri()),
        _ => None,
    };
    Settings::from_lookup(lookup).unwrap()
}

/// Token endpoint handing out a token per requested scope
async fn mount_tokens(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("jwt-bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-access-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

fn activity(time: &str, page: &str, campaign: &str) -> Value {
    json!({
        "activityTime": time,
        "activityType": "PAGEVIEW",
        "campaign": campaign,
        "channelGrouping": "Referral",
        "hostname": "shop.example.com",
        "keyword": "(not set)",
        "landingPagePath": "/welcome",
        "medium": "referral",
        "pageview": {"pagePath": page, "pageTitle": "Shop"},
        "source": "news.example.org",
        "customDimension": [{"index": 1, "value": "member"}]
    })
}

/// Two pages of clients (c1, c2 then c3) and their activity timelines
async fn mount_reporting(server: &MockServer) {
    let header_json = json!({"dimensions": ["ga:clientId"]});

    Mock::given(method("POST"))
        .and(path("/v4/reports:batchGet"))
        .and(header("Authorization", "Bearer test-access-token"))
        .and(body_partial_json(json!({"reportRequests": [{"pageToken": "p2"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [{"columnHeader": header_json, "data": {"rows": [{"dimensions": ["c3"]}]}}]
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/reports:batchGet"))
        .and(header("Authorization", "Bearer test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [{
                "columnHeader": header_json,
                "data": {"rows": [{"dimensions": ["c1"]}, {"dimensions": ["c2"]}]},
                "nextPageToken": "p2"
            }]
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;

    for (client_id, sessions) in [
        (
            "c1",
            json!([
                {"sessionId": "a", "activities": [activity("t1", "/one", "spring")]},
                {"sessionId": "b", "activities": [activity("t2", "/two", "it's \"on\"")]}
            ]),
        ),
        ("c2", json!([])),
        (
            "c3",
            json!([{"sessionId": "c", "activities": [activity("t3", "/three", "x'); DROP TABLE y; --")]}]),
        ),
    ] {
        Mock::given(method("POST"))
            .and(path("/v4/userActivity:search"))
            .and(header("Authorization", "Bearer test-access-token"))
            .and(body_partial_json(json!({
                "viewId": "12345",
                "user": {"type": "CLIENT_ID", "userId": client_id},
                "dateRange": {"startDate": "7daysAgo", "endDate": "today"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sessions": sessions})))
            .expect(1)
            .mount(server)
            .await;
    }
}

// ============================================================================
// DuckDB Warehouse
// ============================================================================

#[tokio::test]
async fn test_end_to_end_duckdb() {
    let server = MockServer::start().await;
    mount_tokens(&server).await;
    mount_reporting(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let key_path = write_key(dir.path(), &server);
    let db_path = dir.path().join("analytics.duckdb");

    let cli = Cli::try_parse_from([
        "ga-activity-loader",
        "-v",
        "12345",
        "-t",
        "acme.web.activity",
        "--warehouse",
        "duckdb",
        "--database",
        db_path.to_str().unwrap(),
        "--concurrency",
        "2",
    ])
    .unwrap();

    let mut output = Vec::new();
    let summary = Runner::new(cli, settings(key_path, &server, &server))
        .run_with_progress(&mut output)
        .await
        .unwrap();

    assert_eq!(summary.clients, 3);
    assert_eq!(summary.activities, 3);
    assert_eq!(summary.rows_inserted, 3);

    let warehouse = DuckDbWarehouse::open(&db_path).unwrap();
    let rows = warehouse
        .select_rows(&TableName::parse("acme.web.activity").unwrap())
        .unwrap();
    let summary_rows: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|row| (row.client_id.as_str(), row.page_view[0].as_str(), row.campaign.as_str()))
        .collect();
    assert_eq!(
        summary_rows,
        vec![
            ("c1", "/one", "spring"),
            ("c1", "/two", "it's \"on\""),
            ("c3", "/three", "x'); DROP TABLE y; --"),
        ]
    );

    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("Creating table acme.web.activity\n"));
    assert!(text.contains("\"customDimension\""));
    assert!(text.ends_with("Inserting data into DuckDB\n"));
}

#[tokio::test]
async fn test_rerun_against_existing_table_fails() {
    let server = MockServer::start().await;
    mount_tokens(&server).await;

    Mock::given(method("POST"))
        .and(path("/v4/reports:batchGet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reports": []})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let key_path = write_key(dir.path(), &server);
    let db_path = dir.path().join("analytics.duckdb");
    let args = [
        "ga-activity-loader",
        "-v",
        "12345",
        "-t",
        "acme.web.activity",
        "--warehouse",
        "duckdb",
        "--database",
        db_path.to_str().unwrap(),
    ];

    let first = Runner::new(
        Cli::try_parse_from(args).unwrap(),
        settings(key_path.clone(), &server, &server),
    )
    .run_with_progress(std::io::sink())
    .await
    .unwrap();
    assert_eq!(first.rows_inserted, 0);

    let err = Runner::new(
        Cli::try_parse_from(args).unwrap(),
        settings(key_path, &server, &server),
    )
    .run_with_progress(std::io::sink())
    .await
    .unwrap_err();
    assert!(matches!(err, Error::TableAlreadyExists { .. }));
    assert_eq!(err.to_string(), "Table 'acme.web.activity' already exists");
}

// ============================================================================
// BigQuery Warehouse
// ============================================================================

#[tokio::test]
async fn test_end_to_end_bigquery() {
    let reporting = MockServer::start().await;
    let bigquery = MockServer::start().await;
    mount_tokens(&reporting).await;
    mount_reporting(&reporting).await;

    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/acme/queries"))
        .and(header("Authorization", "Bearer test-access-token"))
        .and(body_string_contains("CREATE TABLE `acme.web.activity`"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobReference": {"projectId": "acme", "jobId": "create-1", "location": "US"},
            "jobComplete": true
        })))
        .expect(1)
        .mount(&bigquery)
        .await;

    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/acme/queries"))
        .and(body_string_contains("INSERT INTO `acme.web.activity`"))
        .and(body_partial_json(json!({"useLegacySql": false, "parameterMode": "POSITIONAL"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobReference": {"projectId": "acme", "jobId": "insert-1", "location": "US"},
            "jobComplete": true,
            "numDmlAffectedRows": "3"
        })))
        .expect(1)
        .mount(&bigquery)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let key_path = write_key(dir.path(), &reporting);
    let cli = Cli::try_parse_from(["ga-activity-loader", "-v", "12345", "-t", "acme.web.activity"])
        .unwrap();

    let mut output = Vec::new();
    let summary = Runner::new(cli, settings(key_path, &reporting, &bigquery))
        .run_with_progress(&mut output)
        .await
        .unwrap();
    assert_eq!(summary.rows_inserted, 3);

    let requests = bigquery.received_requests().await.unwrap();
    let insert: Value = requests
        .iter()
        .map(|request| serde_json::from_slice::<Value>(&request.body).unwrap())
        .find(|body| body["query"].as_str().unwrap().starts_with("INSERT"))
        .unwrap();

    let query = insert["query"].as_str().unwrap();
    assert!(!query.contains("DROP TABLE"));
    assert!(query.ends_with("FROM UNNEST(?)"));

    let params = insert["queryParameters"].as_array().unwrap();
    assert_eq!(params.len(), 1);

    let rows = params[0]["parameterValue"]["arrayValues"].as_array().unwrap();
    let field = |row: usize, name: &str| rows[row]["structValues"][name]["value"].clone();
    assert_eq!(rows.len(), 3);
    assert_eq!(field(0, "client_id"), "c1");
    assert_eq!(field(2, "client_id"), "c3");
    assert_eq!(field(2, "campaign"), "x'); DROP TABLE y; --");

    let text = String::from_utf8(output).unwrap();
    assert!(text.ends_with("Inserting data into BigQuery\n"));
}

#[tokio::test]
async fn test_missing_credentials_env() {
    let err = Settings::from_lookup(|_| None).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}
