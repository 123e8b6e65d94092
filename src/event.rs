use reqwest::Client;
use serde::Serialize;

use crate::error::ApiError;
use crate::error::Result;

/// A custom analytics event to record against the plugin
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEvent {
    event_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_in_quota: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<EventLocation>,
}

impl CustomEvent {
    /// An event attributed to the given source, e.g. `"api"`
    pub fn new(event_source: impl Into<String>) -> Self {
        Self {
            event_source: event_source.into(),
            member_id: None,
            is_in_quota: None,
            location: None,
        }
    }

    /// Attribute the event to a member
    pub fn with_member_id(mut self, member_id: impl Into<String>) -> Self {
        self.member_id = Some(member_id.into());
        self
    }

    /// Record whether the event counted against the member's quota
    pub fn with_in_quota(mut self, is_in_quota: bool) -> Self {
        self.is_in_quota = Some(is_in_quota);
        self
    }

    /// Record where the event originated
    pub fn with_location(mut self, location: EventLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Geographic origin of an event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subdivision_code: Option<String>,
}

impl EventLocation {
    /// A location in the given ISO country code, e.g. `"US"`
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            subdivision_code: None,
        }
    }

    /// Narrow the location to an ISO subdivision, e.g. `"US-CA"`
    pub fn with_subdivision_code(mut self, subdivision_code: impl Into<String>) -> Self {
        self.subdivision_code = Some(subdivision_code.into());
        self
    }
}

/// Records analytics events on behalf of the plugin
///
/// Obtained from [`crate::App::event`].
pub struct AppEvent {
    base_url: String,
    client: Client,
}

impl AppEvent {
    pub(crate) fn new(base_url: String, client: Client) -> Self {
        Self { base_url, client }
    }

    /// Record a custom event
    pub async fn create_custom(&self, event: CustomEvent) -> Result<()> {
        let url = format!("{}/events/create-custom", self.base_url);
        let response = self.client.post(url).json(&event).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::from_response(response).await.into())
        }
    }
}
