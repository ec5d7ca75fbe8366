//! JWT session token creation and verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::{
    api::models::auth::Principal,
    config::Config,
    errors::{AuthFailure, Error},
};

/// JWT session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String, // Principal email
    pub iat: i64,      // Issued at
    pub exp: i64,      // Expiration time
}

impl SessionClaims {
    /// Create new session claims for a principal
    pub fn new(principal: &Principal, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.auth.session.expiry;

        Self {
            email: principal.email.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

impl From<SessionClaims> for Principal {
    fn from(claims: SessionClaims) -> Self {
        Self { email: claims.email }
    }
}

fn secret_key(config: &Config) -> Result<&str, Error> {
    config.secret_key.as_deref().filter(|s| !s.is_empty()).ok_or_else(|| Error::Internal {
        operation: "JWT sessions: secret_key is required".to_string(),
    })
}

/// Create a signed token for a principal, valid for `auth.session.expiry`
pub fn create_session_token(principal: &Principal, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(principal, config);
    let key = EncodingKey::from_secret(secret_key(config)?.as_bytes());

    encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify signature and expiry of a session token and decode its principal
pub fn verify_session_token(token: &str, config: &Config) -> Result<Principal, Error> {
    let key = DecodingKey::from_secret(secret_key(config)?.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Server errors (500) - key issues, internal failures
        ErrorKind::InvalidEcdsaKey
        | ErrorKind::InvalidRsaKey(_)
        | ErrorKind::RsaFailedSigning
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::InvalidKeyFormat
        | ErrorKind::Crypto(_) => Error::Internal {
            operation: format!("JWT verification: {e}"),
        },

        // Everything else is a bad credential: forged, expired, truncated or not a JWT at all
        _ => {
            tracing::debug!("Rejected session token: {e}");
            Error::Unauthenticated {
                reason: AuthFailure::InvalidCredential,
            }
        }
    })?;

    Ok(Principal::from(token_data.claims))
}
