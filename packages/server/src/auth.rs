//! Bearer credentials
//!
//! Credentials are compact HS256 JSON web tokens: the verified identity plus
//! issue and expiry times, signed with the server secret.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use http::header::AUTHORIZATION;
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Access token is required")]
    Missing,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Identity carried by a credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub google_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Token payload: the identity plus its validity window (unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub user: Claims,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default)]
    typ: String,
}

/// Issues and checks bearer credentials
pub trait Authenticator: Send + Sync {
    fn issue(&self, claims: &Claims) -> Result<String, AuthError>;

    fn verify(&self, token: &str) -> Result<Claims, AuthError>;

    /// Re-issue a credential for an identity that is still verified
    fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.verify(token)?;
        self.issue(&claims)
    }
}

pub struct HmacAuthenticator {
    secret: Vec<u8>,
    ttl: Duration,
}

impl HmacAuthenticator {
    pub fn new(secret: impl AsRef<[u8]>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn issue_at(&self, claims: &Claims, now: DateTime<Utc>) -> Result<String, AuthError> {
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };
        let payload = TokenClaims {
            user: claims.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let signing_input = format!("{}.{}", encode_json(&header)?, encode_json(&payload)?);
        let signature = self.mac(&signing_input)?.finalize().into_bytes();

        Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AuthError> {
        let malformed = || AuthError::Malformed("expected three segments".to_string());
        let (signing_input, signature) = token.rsplit_once('.').ok_or_else(malformed)?;
        let (header, payload) = signing_input.split_once('.').ok_or_else(malformed)?;
        if payload.contains('.') {
            return Err(malformed());
        }

        let header: Header = decode_json(header)?;
        if header.alg != ALGORITHM {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| AuthError::Malformed(e.to_string()))?;
        self.mac(signing_input)?
            .verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let claims: TokenClaims = decode_json(payload)?;
        if now.timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self, signing_input: &str) -> Result<HmacSha256, AuthError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|e| AuthError::Signing(e.to_string()))?;
        mac.update(signing_input.as_bytes());
        Ok(mac)
    }
}

impl Authenticator for HmacAuthenticator {
    fn issue(&self, claims: &Claims) -> Result<String, AuthError> {
        self.issue_at(claims, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now()).map(|claims| claims.user)
    }
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, AuthError> {
    let json = serde_json::to_vec(value).map_err(|e| AuthError::Signing(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_json<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| AuthError::Malformed(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::Malformed(e.to_string()))
}

/// Credential from an `Authorization: <scheme> <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .nth(1)
}
