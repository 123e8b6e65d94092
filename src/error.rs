use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("key resolution failed: {0}")]
    KeyResolution(String),
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("token signature verification failed")]
    InvalidSignature,
    #[error("token audience mismatch: expected {expected:?}, got {actual:?}")]
    AudienceMismatch { expected: String, actual: String },
    #[error("token expired at {0} (seconds since epoch)")]
    TokenExpired(i64),
    #[error("webhook signature mismatch")]
    SignatureMismatch,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
}

/// An unexpected response from a platform REST endpoint
///
/// Carries the status code together with the message and machine code parsed
/// from the platform's JSON error body. When the body is not the usual error
/// shape it is kept verbatim as the message.
#[derive(Error, Debug)]
#[error("api request failed with status {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
}

#[derive(Deserialize)]
struct RawErrorBody {
    message: Option<String>,
    code: Option<String>,
}

impl ApiError {
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Self::from_body(status, &body)
    }

    fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<RawErrorBody>(body) {
            Ok(parsed) => Self {
                status,
                code: parsed.code,
                message: parsed.message.unwrap_or_else(|| body.to_string()),
            },
            Err(_) => Self {
                status,
                code: None,
                message: body.to_string(),
            },
        }
    }
}

pub(crate) fn key_fetch_error(error: reqwest::Error) -> Error {
    Error::KeyResolution(format!("failed to fetch signing key set: {error}"))
}

pub(crate) fn key_decode_error(error: reqwest::Error) -> Error {
    Error::KeyResolution(format!("failed to decode signing key set: {error}"))
}
