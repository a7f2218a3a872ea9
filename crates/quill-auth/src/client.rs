//! HTTP client for the hosted identity service.
//!
//! The service exposes a GoTrue-style REST surface. Every call is a single
//! request/response round trip; no retries, caching, or timeouts beyond the
//! client default are applied at this layer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use quill_core::{Error, IdentityProvider, Result, Session, User};

/// Request timeout for identity calls (seconds).
pub const IDENTITY_TIMEOUT_SECS: u64 = 30;

/// The error message the identity service returns when a token carries no
/// active session. Matched verbatim to classify the response as the expected
/// "nobody signed in" outcome instead of a service fault.
pub const SESSION_MISSING_MSG: &str = "Auth session missing!";

/// Identity service client.
pub struct IdentityClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

/// Error body shape used by the identity service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl ErrorBody {
    fn message(self) -> String {
        self.msg
            .or(self.error_description)
            .unwrap_or_else(|| "unknown identity error".to_string())
    }
}

/// Successful token-endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    /// Lifetime of the access token in seconds.
    expires_in: i64,
    #[serde(default)]
    expires_at: Option<i64>,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| chrono::Utc::now().timestamp() + self.expires_in);
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}

/// User-endpoint response.
#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    email: String,
}

impl IdentityClient {
    /// Create a client for the given service base URL and public API key.
    pub fn new(base_url: String, anon_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(IDENTITY_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            subsystem = "auth",
            component = "identity_client",
            url = %base_url,
            "Initializing identity client"
        );

        Self {
            client,
            base_url,
            anon_key,
        }
    }

    /// Map a non-success identity response to an error, classifying the
    /// service's "session missing" message as [`Error::SessionMissing`].
    async fn classify_failure(status: StatusCode, response: reqwest::Response) -> Error {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message(),
            Err(_) => format!("identity service returned {}", status),
        };
        if message == SESSION_MISSING_MSG {
            Error::SessionMissing
        } else {
            Error::Identity(message)
        }
    }

    async fn token_request(&self, grant_type: &str, body: serde_json::Value) -> Result<Session> {
        let response = self
            .client
            .post(format!(
                "{}/auth/v1/token?grant_type={}",
                self.base_url, grant_type
            ))
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_failure(status, response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Identity(format!("malformed token response: {}", e)))?;
        Ok(token.into_session())
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    async fn get_user(&self, access_token: &str) -> Result<User> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_failure(status, response).await);
        }

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| Error::Identity(format!("malformed user response: {}", e)))?;
        Ok(User {
            id: user.id,
            email: user.email,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        self.token_request(
            "refresh_token",
            serde_json::json!({ "refresh_token": refresh_token }),
        )
        .await
    }

    async fn password_grant(&self, email: &str, password: &str) -> Result<Session> {
        self.token_request(
            "password",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .client
            .post(format!("{}/auth/v1/signup", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_failure(status, response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Identity(format!("malformed signup response: {}", e)))?;
        Ok(token.into_session())
    }

    async fn logout(&self, access_token: &str) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_failure(status, response).await);
        }
        Ok(())
    }
}
