//! Async HTTP client for the KSeF API.
//!
//! Covers the token handshake (`auth/challenge`, `auth/ksef-token`) and the
//! invoice metadata query. Every call is a single request; non-success
//! statuses map to [`ApiError`] and retry policy is left to the caller.
//!
//! ```no_run
//! # async fn run() -> Result<(), ksef::client::ApiError> {
//! use ksef::client::{KsefClient, KsefConfig};
//!
//! let client = KsefClient::new(KsefConfig::from_env()?)?;
//! let challenge = client.get_challenge("1111111111").await?;
//! println!("challenge issued at {}", challenge.timestamp);
//! # Ok(())
//! # }
//! ```

mod auth;
mod config;
mod error;
mod query;
mod status;

pub use auth::*;
pub use config::{ConfigError, DEFAULT_TIMEOUT_SECS, KsefConfig, KsefEnvironment};
pub use error::ApiError;
pub use query::{InvoiceQuery, MAX_PAGE_SIZE, SubjectType};
pub use status::{ResponseErrorKind, StatusFailure, classify_status};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::core::{KsefError, ValidationError, validate_nip};
use crate::xml::init_session_token_request;

pub const URL_AUTH_CHALLENGE: &str = "auth/challenge";
pub const URL_AUTH_INIT_TOKEN: &str = "auth/ksef-token";
pub const URL_QUERY_INVOICES: &str = "invoices/query/metadata";

/// KSeF API client.
#[derive(Debug, Clone)]
pub struct KsefClient {
    http: reqwest::Client,
    base_url: Url,
}

impl KsefClient {
    /// Create a client from configuration.
    pub fn new(config: KsefConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ApiError::Http {
                endpoint: "client_init".into(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request an authorization challenge for the taxpayer `nip`.
    pub async fn get_challenge(&self, nip: &str) -> Result<AuthorizationChallenge, ApiError> {
        check_nip(nip)?;
        let body = serde_json::json!({
            "contextIdentifier": { "type": "onip", "identifier": nip }
        });
        let request = self.http.post(self.url(URL_AUTH_CHALLENGE)?).json(&body);
        self.send(URL_AUTH_CHALLENGE, request).await
    }

    /// Submit the encrypted token for `challenge` and open a session.
    pub async fn init_session(
        &self,
        challenge: &AuthorizationChallenge,
        nip: &str,
        encrypted_token: &str,
    ) -> Result<AuthorizationToken, ApiError> {
        check_nip(nip)?;
        let document = init_session_token_request(&challenge.challenge, nip, encrypted_token)?;
        let request = self
            .http
            .post(self.url(URL_AUTH_INIT_TOKEN)?)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(document);
        self.send(URL_AUTH_INIT_TOKEN, request).await
    }

    /// Full token handshake: challenge, payload encryption, session init.
    pub async fn authorize<E: TokenEncryptor>(
        &self,
        nip: &str,
        token: &str,
        encryptor: &E,
    ) -> Result<AuthorizationToken, ApiError> {
        let challenge = self.get_challenge(nip).await?;
        let payload = token_payload(token, &challenge)?;
        let encrypted = encryptor
            .encrypt(payload.as_bytes())
            .map_err(|e| ApiError::Encryption(Box::new(e)))?;
        self.init_session(&challenge, nip, &encrypted).await
    }

    /// Query invoice metadata. The response object is returned as is.
    pub async fn search_invoices(
        &self,
        authorization: &dyn Authorization,
        query: &InvoiceQuery,
    ) -> Result<Map<String, Value>, ApiError> {
        query.validate()?;
        let request = self
            .http
            .post(self.url(URL_QUERY_INVOICES)?)
            .query(&query.paging())
            .json(&query.body());
        let request = authorization.authorize(request);
        self.send(URL_QUERY_INVOICES, request).await
    }

    fn url(&self, endpoint: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| ConfigError::InvalidUrl(endpoint.to_string(), e.to_string()).into())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(endpoint, "sending KSeF request");
        let http_err = |source: reqwest::Error| ApiError::Http {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = request.send().await.map_err(http_err)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(http_err)?;

        if let Some(failure) = classify_status(status) {
            tracing::warn!(
                endpoint,
                status,
                retryable = failure.retryable,
                "KSeF request failed"
            );
            return Err(ApiError::from_failure(endpoint, failure, body));
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Deserialization {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn check_nip(nip: &str) -> Result<(), KsefError> {
    validate_nip(nip).map_err(|e| {
        KsefError::InvalidFieldValue(vec![ValidationError::with_element(
            "nip",
            format!("invalid NIP '{nip}': {e}"),
            "NIP",
        )])
    })
}
