//! Activity rows
//!
//! Flattens an activity and its owning client id into the values of one
//! destination row, in destination column order.

use crate::error::{Error, Result};
use crate::reporting::Activity;
use crate::types::ClientId;
use serde::Serialize;

/// One destination row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRow {
    pub client_id: String,
    pub activity_time: String,
    pub activity_type: String,
    pub campaign: String,
    pub channel_grouping: String,
    pub hostname: String,
    pub keyword: String,
    pub landing_page: String,
    pub medium: String,
    pub page_view: Vec<String>,
    pub source: String,
}

impl ActivityRow {
    /// Build a row, failing if the activity lacks any field the table needs
    pub fn from_activity(client_id: &ClientId, activity: &Activity) -> Result<Self> {
        let page_path = activity
            .pageview
            .as_ref()
            .and_then(|pageview| pageview.page_path.clone())
            .ok_or_else(|| Error::missing_field("pageview.pagePath"))?;

        Ok(Self {
            client_id: client_id.as_str().to_string(),
            activity_time: required(&activity.activity_time, "activityTime")?,
            activity_type: required(&activity.activity_type, "activityType")?,
            campaign: required(&activity.campaign, "campaign")?,
            channel_grouping: required(&activity.channel_grouping, "channelGrouping")?,
            hostname: required(&activity.hostname, "hostname")?,
            keyword: required(&activity.keyword, "keyword")?,
            landing_page: required(&activity.landing_page_path, "landingPagePath")?,
            medium: required(&activity.medium, "medium")?,
            page_view: vec![page_path],
            source: required(&activity.source, "source")?,
        })
    }

    /// Scalar values before the array column, in column order
    pub fn leading_values(&self) -> [&str; 9] {
        [
            &self.client_id,
            &self.activity_time,
            &self.activity_type,
            &self.campaign,
            &self.channel_grouping,
            &self.hostname,
            &self.keyword,
            &self.landing_page,
            &self.medium,
        ]
    }
}

/// One row per activity, all carrying the client's id
pub fn generate_rows(client_id: &ClientId, activities: &[Activity]) -> Result<Vec<ActivityRow>> {
    activities
        .iter()
        .map(|activity| ActivityRow::from_activity(client_id, activity))
        .collect()
}

fn required(value: &Option<String>, field: &str) -> Result<String> {
    value.clone().ok_or_else(|| Error::missing_field(field))
}
