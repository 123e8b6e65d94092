use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// How a member signed up with the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignInMethod {
    #[serde(rename = "email-and-password")]
    EmailAndPassword,
    #[serde(rename = "magic-email-code")]
    MagicEmailCode,
    #[serde(rename = "google")]
    Google,
}

/// Authentication state of a member
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAuth {
    pub is_verified: bool,
    pub email: String,
    pub has_password: bool,
    pub sign_in_method: SignInMethod,
}

/// A member of the plugin as stored by the platform
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub auth: MemberAuth,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture_url: Option<String>,
    /// Values of the custom signup fields configured for the plugin
    #[serde(default)]
    pub custom_fields: HashMap<String, String>,
    /// Free-form metadata attached by the plugin developer
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// One page of a member listing
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of records across all pages
    pub total: u64,
    /// Cursor to pass as `start_after` for the next page, absent on the last page
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// Payload for creating a member
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    email: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<HashMap<String, String>>,
}

impl NewMember {
    /// A member signing in with the given email and password
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            is_verified: None,
            metadata: None,
        }
    }

    /// Mark the email as already verified, skipping the verification flow
    pub fn with_verified(mut self, is_verified: bool) -> Self {
        self.is_verified = Some(is_verified);
        self
    }

    /// Attach developer metadata to the member
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Partial update of a member; fields left unset keep their stored value
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<HashMap<String, String>>,
}

impl MemberUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_given_name(mut self, given_name: impl Into<String>) -> Self {
        self.given_name = Some(given_name.into());
        self
    }

    pub fn with_family_name(mut self, family_name: impl Into<String>) -> Self {
        self.family_name = Some(family_name.into());
        self
    }

    pub fn with_picture_url(mut self, picture_url: impl Into<String>) -> Self {
        self.picture_url = Some(picture_url.into());
        self
    }

    /// Replace the developer metadata attached to the member
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
