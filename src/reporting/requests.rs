//! Request bodies for the reporting endpoints

use crate::types::{ClientId, DateRange};
use serde::Serialize;

/// Dimension that carries the client identifier
pub const CLIENT_ID_DIMENSION: &str = "ga:clientId";

/// Metric used to discover active clients
pub const SESSIONS_METRIC: &str = "ga:sessions";

/// User type for activity lookups keyed by client id
pub const CLIENT_ID_USER_TYPE: &str = "CLIENT_ID";

/// Body of `reports:batchGet`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReportsRequest {
    pub report_requests: Vec<ReportRequest>,
}

impl GetReportsRequest {
    /// Wrap a single report request
    pub fn single(request: ReportRequest) -> Self {
        Self {
            report_requests: vec![request],
        }
    }
}

/// One report inside a batch request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub view_id: String,
    pub date_ranges: Vec<DateRange>,
    pub metrics: Vec<Metric>,
    pub dimensions: Vec<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ReportRequest {
    /// Sessions grouped by client id over one date range
    pub fn sessions_by_client_id(view_id: impl Into<String>, date_range: &DateRange) -> Self {
        Self {
            view_id: view_id.into(),
            date_ranges: vec![date_range.clone()],
            metrics: vec![Metric {
                expression: SESSIONS_METRIC.to_string(),
            }],
            dimensions: vec![Dimension {
                name: CLIENT_ID_DIMENSION.to_string(),
            }],
            page_token: None,
            page_size: None,
        }
    }

    /// Continue from a page token
    #[must_use]
    pub fn page_token(mut self, token: Option<&str>) -> Self {
        self.page_token = token.map(String::from);
        self
    }

    /// Limit rows per page
    #[must_use]
    pub fn page_size(mut self, size: Option<u32>) -> Self {
        self.page_size = size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub name: String,
}

/// Body of `userActivity:search`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUserActivityRequest {
    pub date_range: DateRange,
    pub view_id: String,
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SearchUserActivityRequest {
    /// Activity of one client over one date range
    pub fn for_client(
        view_id: impl Into<String>,
        client_id: &ClientId,
        date_range: &DateRange,
    ) -> Self {
        Self {
            date_range: date_range.clone(),
            view_id: view_id.into(),
            user: User {
                user_type: CLIENT_ID_USER_TYPE.to_string(),
                user_id: client_id.as_str().to_string(),
            },
            page_token: None,
            page_size: None,
        }
    }

    /// Continue from a page token
    #[must_use]
    pub fn page_token(mut self, token: Option<&str>) -> Self {
        self.page_token = token.map(String::from);
        self
    }

    /// Limit sessions per page
    #[must_use]
    pub fn page_size(mut self, size: Option<u32>) -> Self {
        self.page_size = size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: String,
    pub user_id: String,
}
