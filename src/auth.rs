use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::claims::TokenClaims;
use crate::error::ApiError;
use crate::error::Result;
use crate::member::Member;
use crate::member::MemberUpdate;
use crate::member::NewMember;
use crate::member::PaginatedResponse;
use crate::verifier::TokenVerifier;
use crate::verifier::VerifyToken;

/// Admin-side member management and token verification for one plugin
///
/// Obtained from [`crate::App::auth`]. REST calls carry the admin headers of
/// the shared transport; token verification runs against the platform's
/// signing-key endpoint.
pub struct AppAuth {
    plugin_id: String,
    base_url: String,
    client: Client,
    verifier: TokenVerifier,
    audience: String,
}

impl AppAuth {
    pub(crate) fn new(
        plugin_id: String,
        base_url: String,
        client: Client,
        verifier: TokenVerifier,
    ) -> Self {
        let audience = format!("plugin:{plugin_id}:admin");

        Self {
            plugin_id,
            base_url,
            client,
            verifier,
            audience,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/admin/plugins/{}{}", self.base_url, self.plugin_id, path)
    }

    /// Verify a bearer token minted for this plugin's admin audience
    pub async fn verify_token(&self, token: &str) -> Result<TokenClaims> {
        self.verifier.verify_token(token, &self.audience).await
    }

    /// The token verifier backing [`AppAuth::verify_token`]
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Look up a member by id; `None` when the platform knows no such member
    pub async fn get_member_by_id(&self, id: &str) -> Result<Option<Member>> {
        let response = self
            .client
            .get(self.api_url(&format!("/members/{id}")))
            .send()
            .await?;

        optional_json(response).await
    }

    /// Look up a member by email; `None` when the platform knows no such member
    pub async fn get_member_by_email(&self, email: &str) -> Result<Option<Member>> {
        let response = self
            .client
            .get(self.api_url(&format!("/member/byEmail/{email}")))
            .send()
            .await?;

        optional_json(response).await
    }

    /// List members page by page, `limit` records at a time
    ///
    /// Pass the `next_page_token` of the previous page as `start_after` to
    /// resume; `None` starts from the beginning.
    pub async fn get_members(
        &self,
        limit: u32,
        start_after: Option<&str>,
    ) -> Result<PaginatedResponse<Member>> {
        let mut request = self
            .client
            .get(self.api_url("/members"))
            .query(&[("limit", limit.to_string())]);

        if let Some(cursor) = start_after {
            request = request.query(&[("startAfter", cursor)]);
        }

        let response = request.send().await?;

        expect_json(response, StatusCode::OK).await
    }

    /// Create a member; the platform responds with the stored record
    pub async fn create_member(&self, member: NewMember) -> Result<Member> {
        let response = self
            .client
            .post(self.api_url("/members"))
            .json(&member)
            .send()
            .await?;

        let created: Member = expect_json(response, StatusCode::CREATED).await?;
        debug!(member = %created.id, "created member");

        Ok(created)
    }

    /// Apply a partial update to a member and return the updated record
    pub async fn update_member(&self, id: &str, update: MemberUpdate) -> Result<Member> {
        let response = self
            .client
            .patch(self.api_url(&format!("/members/{id}")))
            .json(&update)
            .send()
            .await?;

        success_json(response).await
    }

    /// Delete a member
    pub async fn delete_member(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.api_url(&format!("/members/{id}")))
            .send()
            .await?;

        if response.status().is_success() {
            debug!(member = %id, "deleted member");
            Ok(())
        } else {
            Err(ApiError::from_response(response).await.into())
        }
    }
}

/// Decode the body on 200, map 404 to `None`, surface anything else as an API error
async fn optional_json<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    match response.status() {
        StatusCode::NOT_FOUND => Ok(None),
        StatusCode::OK => Ok(Some(response.json().await?)),
        _ => Err(ApiError::from_response(response).await.into()),
    }
}

/// Decode the body on exactly the expected status, surface anything else as an API error
async fn expect_json<T: DeserializeOwned>(response: Response, expected: StatusCode) -> Result<T> {
    if response.status() == expected {
        Ok(response.json().await?)
    } else {
        Err(ApiError::from_response(response).await.into())
    }
}

/// Decode the body on any success status, surface anything else as an API error
async fn success_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(ApiError::from_response(response).await.into())
    }
}
