use serde::Deserialize;

/// The verified payload of a platform bearer token
///
/// Only produced by a verification that passed the signature, audience and
/// expiry checks, so holders can trust every field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Subject identifier of the authenticated member
    pub uid: String,
    /// Issuer the token was minted by
    pub iss: String,
    /// Audience the token was minted for
    pub aud: String,
    /// Issued-at time as Unix timestamp
    pub iat: i64,
    /// Expiration time as Unix timestamp
    pub exp: i64,
    /// Identity of the member the token belongs to
    pub user: TokenUser,
}

/// Member identity embedded in a bearer token
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub given_name: Option<String>,
    /// Identifier of the pricing plan the member is subscribed to, if any
    pub plan_id: Option<String>,
    /// Identifier of the price the member pays within the plan, if any
    pub price_id: Option<String>,
}
