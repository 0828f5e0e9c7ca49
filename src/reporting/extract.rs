//! Pure extraction over reporting responses

use super::requests::CLIENT_ID_DIMENSION;
use super::responses::{Activity, GetReportsResponse, SearchUserActivityResponse};
use crate::types::ClientId;

/// Collect client ids from one `reports:batchGet` page
///
/// Walks every report's rows in order and pairs each row's dimension values
/// with the column header's dimension names; every value sitting under
/// `ga:clientId` is returned. Duplicates in the response are kept.
pub fn extract_client_ids(response: &GetReportsResponse) -> Vec<ClientId> {
    let mut client_ids = Vec::new();

    for report in &response.reports {
        let headers = &report.column_header.dimensions;
        for row in &report.data.rows {
            for (header, value) in headers.iter().zip(&row.dimensions) {
                if header == CLIENT_ID_DIMENSION {
                    client_ids.push(ClientId::new(value.as_str()));
                }
            }
        }
    }

    client_ids
}

/// Flatten one `userActivity:search` page into its activities
///
/// Session order is kept, then activity order within each session.
pub fn extract_activities(response: SearchUserActivityResponse) -> Vec<Activity> {
    response
        .sessions
        .into_iter()
        .flat_map(|session| session.activities)
        .collect()
}
