use std::time::Duration;

use jsonwebtoken::jwk::AlgorithmParameters;
use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::jwk::RSAKeyParameters;
use jsonwebtoken::DecodingKey;
use reqwest::Client;
use reqwest::Url;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::key_decode_error;
use crate::error::key_fetch_error;
use crate::error::Error;
use crate::error::Result;

/// Resolves token verification keys from the platform's signing-key endpoint
///
/// The key set is fetched lazily on first use and kept for the lifetime of the
/// resolver. It is never invalidated behind the caller's back; callers that
/// need to pick up rotated keys call [`KeyResolver::refresh`] or construct a
/// new resolver.
#[derive(Debug)]
pub struct KeyResolver {
    url: Url,
    client: Client,
    fetch_timeout: Duration,
    keys: RwLock<Option<JwkSet>>,
}

impl KeyResolver {
    /// Create a resolver for the given signing-key endpoint
    ///
    /// The URL must use HTTPS. Plain HTTP is accepted for loopback hosts only,
    /// anything else is rejected as a configuration error.
    pub fn new(url: &str, client: Client, fetch_timeout: Duration) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|error| Error::Config(format!("invalid signing-key url {url:?}: {error}")))?;

        match url.scheme() {
            "https" => {}
            "http" if is_loopback(&url) => {}
            scheme => {
                return Err(Error::Config(format!(
                    "signing-key url must use https, got scheme {scheme:?}"
                )))
            }
        }

        Ok(Self {
            url,
            client,
            fetch_timeout,
            keys: RwLock::new(None),
        })
    }

    /// Resolve the verification key for the given key id
    ///
    /// Without a key id the single key of a one-key set is used. A set holding
    /// more than one key requires the token to name one.
    pub async fn resolve(&self, kid: Option<&str>) -> Result<DecodingKey> {
        let keys = self.current_keys().await?;
        let jwk = select_key(&keys, kid)?;

        decoding_key(jwk)
    }

    /// Drop the cached key set and fetch a fresh one, replacing it wholesale
    pub async fn refresh(&self) -> Result<()> {
        self.replace_keys().await.map(|_| ())
    }

    /// Get the current key set, fetching it on first use
    async fn current_keys(&self) -> Result<JwkSet> {
        if let Some(keys) = self.cached_keys().await {
            return Ok(keys);
        }

        // First use, or racing another first caller. Last write wins, both
        // fetches return a usable set.
        self.replace_keys().await
    }

    async fn cached_keys(&self) -> Option<JwkSet> {
        self.keys.read().await.as_ref().cloned()
    }

    async fn replace_keys(&self) -> Result<JwkSet> {
        let fetched = self.fetch_keys().await?;

        let mut keys = self.keys.write().await;
        *keys = Some(fetched.clone());

        Ok(fetched)
    }

    async fn fetch_keys(&self) -> Result<JwkSet> {
        let jwks: JwkSet = self
            .client
            .get(self.url.clone())
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(key_fetch_error)?
            .error_for_status()
            .map_err(key_fetch_error)?
            .json()
            .await
            .map_err(key_decode_error)?;

        debug!(keys = jwks.keys.len(), url = %self.url, "fetched signing key set");

        Ok(jwks)
    }
}

fn is_loopback(url: &Url) -> bool {
    matches!(
        url.host_str(),
        Some("localhost") | Some("127.0.0.1") | Some("[::1]")
    )
}

fn select_key<'a>(keys: &'a JwkSet, kid: Option<&str>) -> Result<&'a Jwk> {
    match kid {
        Some(kid) => keys
            .find(kid)
            .ok_or_else(|| Error::KeyResolution(format!("no key with id {kid:?} in the key set"))),
        None if keys.keys.len() > 1 => Err(Error::MalformedToken(format!(
            "token names no key id but the key set holds {} keys",
            keys.keys.len()
        ))),
        None => keys
            .keys
            .first()
            .ok_or_else(|| Error::KeyResolution("key set is empty".to_string())),
    }
}

fn decoding_key(jwk: &Jwk) -> Result<DecodingKey> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(RSAKeyParameters { n, e, .. }) => {
            DecodingKey::from_rsa_components(n, e)
                .map_err(|error| Error::KeyResolution(format!("invalid RSA key components: {error}")))
        }
        other => Err(Error::KeyResolution(format!(
            "unsupported key type in key set: {other:?}"
        ))),
    }
}
