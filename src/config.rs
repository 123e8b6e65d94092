use std::time::Duration;

use reqwest::Client;

/// Configuration for the admin SDK
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Identifier of the plugin this SDK instance administers
    pub(crate) plugin_id: String,
    /// Admin secret issued for the plugin, sent on every REST call
    pub(crate) secret_key: String,
    /// Base URL of the auth service
    pub(crate) auth_url: String,
    /// URL of the endpoint publishing the token signing keys
    pub(crate) auth_cert_url: String,
    /// Base URL of the event service
    pub(crate) event_url: String,
    /// Upper bound on a single signing-key fetch (default: 10 seconds)
    pub(crate) key_fetch_timeout: Duration,
    /// Optional custom HTTP client for fetching signing keys
    /// If not provided, a default client will be created
    pub(crate) http_client: Option<Client>,
}

const DEFAULT_AUTH_URL: &str = "https://auth.pluginlab.ai";
const DEFAULT_AUTH_CERT_URL: &str = "https://auth.pluginlab.ai/admin/v1/cert";
const DEFAULT_EVENT_URL: &str = "https://event.pluginlab.ai";
const DEFAULT_KEY_FETCH_TIMEOUT_SECS: u64 = 10;

impl AppConfig {
    /// Create a configuration for the given plugin with the production service URLs
    pub fn new(plugin_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            secret_key: secret_key.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            auth_cert_url: DEFAULT_AUTH_CERT_URL.to_string(),
            event_url: DEFAULT_EVENT_URL.to_string(),
            key_fetch_timeout: Duration::from_secs(DEFAULT_KEY_FETCH_TIMEOUT_SECS),
            http_client: None,
        }
    }

    /// Override the base URL of the auth service
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Override the URL the token signing keys are fetched from
    pub fn with_auth_cert_url(mut self, url: impl Into<String>) -> Self {
        self.auth_cert_url = url.into();
        self
    }

    /// Override the base URL of the event service
    pub fn with_event_url(mut self, url: impl Into<String>) -> Self {
        self.event_url = url.into();
        self
    }

    /// Set the upper bound on a single signing-key fetch
    pub fn with_key_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.key_fetch_timeout = timeout;
        self
    }

    /// Set a custom HTTP client for fetching signing keys
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}
