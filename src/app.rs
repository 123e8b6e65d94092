use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::Client;

use crate::auth::AppAuth;
use crate::config::AppConfig;
use crate::error::Error;
use crate::error::Result;
use crate::event::AppEvent;
use crate::jwks::KeyResolver;
use crate::verifier::TokenVerifier;

/// Header carrying the admin secret on outbound REST calls
const ADMIN_SECRET_HEADER: &str = "X-PluginLab-Admin-Sdk-Secret";
/// Header identifying the plugin on outbound REST calls
const PLUGIN_ID_HEADER: &str = "X-PluginLab-Plugin-Id";

/// Entry point of the SDK
///
/// Builds one HTTP client carrying the fixed admin headers at construction
/// and hands it to every collaborator. Signing-key fetches use a separate
/// plain client so the admin secret never travels to the cert endpoint.
pub struct App {
    config: AppConfig,
    client: Client,
}

impl App {
    /// Build the SDK from its configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ADMIN_SECRET_HEADER,
            HeaderValue::from_str(&config.secret_key)
                .map_err(|_| Error::Config("secret key is not a valid header value".to_string()))?,
        );
        headers.insert(
            PLUGIN_ID_HEADER,
            HeaderValue::from_str(&config.plugin_id)
                .map_err(|_| Error::Config("plugin id is not a valid header value".to_string()))?,
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { config, client })
    }

    /// Member management and bearer-token verification
    pub fn auth(&self) -> Result<AppAuth> {
        let resolver = KeyResolver::new(
            &self.config.auth_cert_url,
            self.config.http_client.clone().unwrap_or_default(),
            self.config.key_fetch_timeout,
        )?;
        let verifier = TokenVerifier::new(resolver);

        Ok(AppAuth::new(
            self.config.plugin_id.clone(),
            self.config.auth_url.clone(),
            self.client.clone(),
            verifier,
        ))
    }

    /// Analytics event recording
    pub fn event(&self) -> AppEvent {
        AppEvent::new(self.config.event_url.clone(), self.client.clone())
    }
}
