//! # pluginlab-admin
//!
//! A Rust SDK for administering a PluginLab plugin: member management,
//! analytics events, bearer-token verification and webhook-signature
//! verification.
//!
//! ## Features
//!
//! - Bearer-token verification (PS256) against the platform's published signing keys
//! - Audience and expiration validation with precise error kinds
//! - Signing-key caching with an explicit refresh for key rotation
//! - Webhook payload authentication via constant-time HMAC-SHA256 comparison
//! - Member lookup, listing, creation, update and deletion
//! - Custom analytics event recording
//!
//! ## Example
//!
//! ```rust,no_run
//! use pluginlab_admin::{App, AppConfig, Webhook};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::new("my-plugin-id", "sk_admin_...");
//!     let app = App::new(config)?;
//!
//!     // Verify a bearer token presented by an end user
//!     let auth = app.auth()?;
//!     let token = "eyJhbGciOiJQUzI1NiIsInR5cCI6IkpXVCJ9...";
//!     let claims = auth.verify_token(token).await?;
//!
//!     println!("Member: {} <{}>", claims.uid, claims.user.email);
//!
//!     // Authenticate an incoming webhook delivery
//!     let webhook = Webhook::new("whsec_...");
//!     webhook.verify_signature(r#"{"event":"member.created"}"#, "received-signature")?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod auth;
mod claims;
mod config;
mod error;
mod event;
mod jwks;
mod member;
mod verifier;
mod webhook;

// Re-exports for public API
pub use app::App;
pub use auth::AppAuth;
pub use claims::TokenClaims;
pub use claims::TokenUser;
pub use config::AppConfig;
pub use error::ApiError;
pub use error::Error;
pub use error::Result;
pub use event::AppEvent;
pub use event::CustomEvent;
pub use event::EventLocation;
pub use jwks::KeyResolver;
pub use member::Member;
pub use member::MemberAuth;
pub use member::MemberUpdate;
pub use member::NewMember;
pub use member::PaginatedResponse;
pub use member::SignInMethod;
pub use verifier::TokenVerifier;
pub use verifier::VerifyToken;
pub use webhook::Webhook;
pub use webhook::WebhookHeader;
