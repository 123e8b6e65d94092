use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Validation;
use tracing::debug;

use crate::claims::TokenClaims;
use crate::error::Error;
use crate::error::Result;
use crate::jwks::KeyResolver;

/// The only signing algorithm the platform issues tokens with
const TOKEN_ALGORITHM: Algorithm = Algorithm::PS256;

/// Trait for bearer-token verification
#[async_trait]
pub trait VerifyToken {
    /// Verify a bearer token against the given audience and return its claims
    async fn verify_token(&self, token: &str, audience: &str) -> Result<TokenClaims>;
}

/// Verifies platform-issued bearer tokens against the remote signing-key set
pub struct TokenVerifier {
    resolver: KeyResolver,
}

impl TokenVerifier {
    /// Create a verifier drawing its keys from the given resolver
    pub fn new(resolver: KeyResolver) -> Self {
        Self { resolver }
    }

    /// The key resolver backing this verifier, e.g. to force a key refresh
    pub fn key_resolver(&self) -> &KeyResolver {
        &self.resolver
    }
}

#[async_trait]
impl VerifyToken for TokenVerifier {
    async fn verify_token(&self, token: &str, audience: &str) -> Result<TokenClaims> {
        let header = decode_header(token)
            .map_err(|error| Error::MalformedToken(format!("unparseable header: {error}")))?;

        // The accepted algorithm is pinned; the header only gets to agree.
        if header.alg != TOKEN_ALGORITHM {
            return Err(Error::MalformedToken(format!(
                "unexpected signing algorithm {:?}",
                header.alg
            )));
        }

        let decoding_key = self.resolver.resolve(header.kid.as_deref()).await?;

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Audience and expiry are checked below so their failures carry context
        validation.validate_aud = false;
        validation.validate_exp = false;

        let token_data = decode::<TokenClaims>(token, &decoding_key, &validation).map_err(jwt_error)?;
        let claims = token_data.claims;

        if claims.aud != audience {
            return Err(Error::AudienceMismatch {
                expected: audience.to_string(),
                actual: claims.aud,
            });
        }

        if claims.exp <= Utc::now().timestamp() {
            return Err(Error::TokenExpired(claims.exp));
        }

        debug!(uid = %claims.uid, "verified bearer token");

        Ok(claims)
    }
}

/// Map jsonwebtoken failures onto the crate's error kinds
fn jwt_error(error: jsonwebtoken::errors::Error) -> Error {
    match error.kind() {
        ErrorKind::InvalidSignature => Error::InvalidSignature,
        ErrorKind::InvalidRsaKey(reason) => {
            Error::KeyResolution(format!("invalid RSA key: {reason}"))
        }
        ErrorKind::MissingRequiredClaim(claim) => {
            Error::MalformedToken(format!("missing required claim {claim:?}"))
        }
        _ => Error::MalformedToken(error.to_string()),
    }
}
