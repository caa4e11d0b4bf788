//! Token handshake types: challenge, encryption seam, and session credential.

use std::fmt;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Response of `auth/challenge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationChallenge {
    /// RFC 3339 instant at which the challenge was issued.
    pub timestamp: String,
    /// Opaque challenge string, echoed back in the session request.
    pub challenge: String,
}

impl AuthorizationChallenge {
    /// Challenge timestamp in milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> Result<i64, ApiError> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.timestamp_millis())
            .map_err(|source| ApiError::InvalidChallengeTimestamp {
                timestamp: self.timestamp.clone(),
                source,
            })
    }
}

/// Plaintext handed to the [`TokenEncryptor`]: `"{token}|{timestamp millis}"`.
pub fn token_payload(token: &str, challenge: &AuthorizationChallenge) -> Result<String, ApiError> {
    Ok(format!("{token}|{}", challenge.timestamp_millis()?))
}

/// Encrypts the token payload with the KSeF public key.
///
/// The key material and cipher live with the caller; the returned string is
/// placed verbatim in the `Token` element of the session request.
pub trait TokenEncryptor {
    type Error: std::error::Error + Send + Sync + 'static;

    fn encrypt(&self, payload: &[u8]) -> Result<String, Self::Error>;
}

/// Attaches credentials to an outgoing request.
pub trait Authorization: Send + Sync {
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder;
}

/// Session token obtained from the handshake.
///
/// Sent as the raw value of the `Authorization` header. `Debug` never
/// prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential([REDACTED])")
    }
}

impl Authorization for SessionCredential {
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, self.0.as_str())
    }
}

/// Response of `auth/ksef-token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationToken {
    pub timestamp: String,
    pub reference_number: String,
    pub session_token: SessionToken,
}

impl AuthorizationToken {
    /// Credential for subsequent calls in this session.
    pub fn credential(&self) -> SessionCredential {
        SessionCredential::new(self.session_token.token.clone())
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub context: SessionContext,
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &"[REDACTED]")
            .field("context", &self.context)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub context_identifier: ContextIdentifier,
    pub context_name: ContextName,
    #[serde(default)]
    pub credentials_role_list: Vec<CredentialRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextName {
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRole {
    #[serde(rename = "type")]
    pub kind: String,
    pub role_type: String,
    pub role_description: Option<String>,
    pub start_timestamp: Option<String>,
}
