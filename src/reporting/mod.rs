//! Analytics Reporting API (v4)
//!
//! Two calls feed the loader:
//!
//! - `reports:batchGet` with the `ga:sessions` metric grouped by
//!   `ga:clientId`, which lists every client active in the window
//! - `userActivity:search` per client, which returns that client's sessions
//!   and the activities inside them
//!
//! Requests and responses are plain serde models. The extractors that turn
//! a response page into client ids or a flat activity list are pure
//! functions, kept apart from the network client.

mod client;
mod extract;
mod requests;
mod responses;

pub use client::ReportingClient;
pub use extract::{extract_activities, extract_client_ids};
pub use requests::{
    Dimension, GetReportsRequest, Metric, ReportRequest, SearchUserActivityRequest, User,
    CLIENT_ID_DIMENSION, CLIENT_ID_USER_TYPE, SESSIONS_METRIC,
};
pub use responses::{
    Activity, ColumnHeader, DateRangeValues, GetReportsResponse, MetricHeader,
    MetricHeaderEntry, PageviewData, Report, ReportData, ReportRow, SearchUserActivityResponse,
    UserActivitySession,
};
