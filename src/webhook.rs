use std::fmt;

use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::Error;
use crate::error::Result;

type HmacSha256 = Hmac<Sha256>;

/// Header names attached to platform webhook deliveries
///
/// Only [`WebhookHeader::Signature`] participates in verification. The rest
/// are metadata for the receiving application to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookHeader {
    Signature,
    Event,
    DeliveryId,
    HookId,
    PluginId,
    SignatureVersion,
    SignatureAlgorithm,
    PoweredBy,
    Timestamp,
}

impl WebhookHeader {
    /// The header name as it appears on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            WebhookHeader::Signature => "X-PluginLab-Signature",
            WebhookHeader::Event => "X-PluginLab-Event",
            WebhookHeader::DeliveryId => "X-PluginLab-Delivery-Id",
            WebhookHeader::HookId => "X-PluginLab-Hook-Id",
            WebhookHeader::PluginId => "X-PluginLab-Plugin-Id",
            WebhookHeader::SignatureVersion => "X-PluginLab-Signature-Version",
            WebhookHeader::SignatureAlgorithm => "X-PluginLab-Signature-Algorithm",
            WebhookHeader::PoweredBy => "X-Powered-By",
            WebhookHeader::Timestamp => "X-PluginLab-Timestamp",
        }
    }
}

impl fmt::Display for WebhookHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verifies webhook payload signatures against the endpoint's shared secret
///
/// The signature is the lowercase hex HMAC-SHA256 digest of the delivery
/// body. Feed the body in as the literal bytes received on the wire; parsing
/// and re-serializing JSON first can change the byte content and break an
/// otherwise valid signature.
pub struct Webhook {
    secret: String,
}

impl Webhook {
    /// Create a verifier for the given shared secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Whether `signature` is the hex HMAC-SHA256 digest of `body` under the secret
    ///
    /// The comparison is constant-time in the digest length.
    pub fn is_signature_valid(&self, body: impl AsRef<[u8]>, signature: &str) -> bool {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body.as_ref());
        let expected = hex::encode(mac.finalize().into_bytes());

        bool::from(expected.as_bytes().ct_eq(signature.as_bytes()))
    }

    /// Verify the signature, failing with [`Error::SignatureMismatch`] when it does not match
    pub fn verify_signature(&self, body: impl AsRef<[u8]>, signature: &str) -> Result<()> {
        if self.is_signature_valid(body, signature) {
            Ok(())
        } else {
            Err(Error::SignatureMismatch)
        }
    }
}

impl fmt::Debug for Webhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Webhook")
            .field("secret", &"<redacted>")
            .finish()
    }
}
