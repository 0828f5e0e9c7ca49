//! Reporting API client

use super::extract::{extract_activities, extract_client_ids};
use super::requests::{GetReportsRequest, ReportRequest, SearchUserActivityRequest};
use super::responses::{Activity, GetReportsResponse, SearchUserActivityResponse};
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{NextPage, PaginationState};
use crate::types::{ClientId, DateRange};
use tracing::debug;

const BATCH_GET_PATH: &str = "/v4/reports:batchGet";
const USER_ACTIVITY_SEARCH_PATH: &str = "/v4/userActivity:search";

/// Client for the two reporting calls the loader makes
///
/// The wrapped `HttpClient` carries the base URL and the authenticated
/// session.
#[derive(Debug)]
pub struct ReportingClient {
    http: HttpClient,
    page_size: Option<u32>,
}

impl ReportingClient {
    /// Create a client over an authenticated HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            page_size: None,
        }
    }

    /// Request pages of at most `page_size` rows/sessions
    #[must_use]
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Establish the session before the first query
    pub async fn initialize(&self) -> Result<()> {
        self.http.initialize_auth().await
    }

    /// Fetch one page of sessions grouped by client id, unmodified
    pub async fn sessions_by_client_id(
        &self,
        view_id: &str,
        date_range: &DateRange,
        page_token: Option<&str>,
    ) -> Result<GetReportsResponse> {
        let request = GetReportsRequest::single(
            ReportRequest::sessions_by_client_id(view_id, date_range)
                .page_token(page_token)
                .page_size(self.page_size),
        );

        self.http
            .post_json(BATCH_GET_PATH, serde_json::to_value(&request)?)
            .await
    }

    /// Fetch one page of a client's activity timeline, unmodified
    pub async fn search_user_activity(
        &self,
        view_id: &str,
        client_id: &ClientId,
        date_range: &DateRange,
        page_token: Option<&str>,
    ) -> Result<SearchUserActivityResponse> {
        let request = SearchUserActivityRequest::for_client(view_id, client_id, date_range)
            .page_token(page_token)
            .page_size(self.page_size);

        self.http
            .post_json(USER_ACTIVITY_SEARCH_PATH, serde_json::to_value(&request)?)
            .await
    }

    /// Every client with at least one session in the window, across all pages
    pub async fn discover_client_ids(
        &self,
        view_id: &str,
        date_range: &DateRange,
    ) -> Result<Vec<ClientId>> {
        let mut client_ids = Vec::new();
        let mut state = PaginationState::new();

        loop {
            let page = self
                .sessions_by_client_id(view_id, date_range, state.page_token())
                .await?;
            client_ids.extend(extract_client_ids(&page));

            if let NextPage::Done = state.advance(&page)? {
                break;
            }
        }

        debug!(
            "Discovered {} clients in view {} over {} page(s)",
            client_ids.len(),
            view_id,
            state.pages_fetched()
        );
        Ok(client_ids)
    }

    /// A client's activities across all sessions and pages
    pub async fn fetch_activities(
        &self,
        view_id: &str,
        client_id: &ClientId,
        date_range: &DateRange,
    ) -> Result<Vec<Activity>> {
        let mut activities = Vec::new();
        let mut state = PaginationState::new();

        loop {
            let page = self
                .search_user_activity(view_id, client_id, date_range, state.page_token())
                .await?;
            let next = state.advance(&page)?;
            activities.extend(extract_activities(page));

            if next.is_done() {
                break;
            }
        }

        debug!(
            "Fetched {} activities for client {} over {} page(s)",
            activities.len(),
            client_id,
            state.pages_fetched()
        );
        Ok(activities)
    }
}
