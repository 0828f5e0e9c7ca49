//! Pagination module
//!
//! Both Analytics Reporting endpoints page through results with a body field
//! `pageToken` on the request and `nextPageToken` on the response. This
//! module tracks the continuation token across requests and decides when a
//! listing is finished.

mod types;

pub use types::{NextPage, PageToken, PaginationState};
