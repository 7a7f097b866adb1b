//! Twitter/X posting
//!
//! Submits a finished rewrite as a new post through the v2 API, signed
//! with OAuth 1.0a user-context credentials. One attempt per post, no
//! retry, no backoff; every failure maps to a [`PublishError`] that the
//! pipeline logs and records as an empty post URL.

pub mod oauth;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{TwitterConfig, TwitterCredentials};
use crate::error::PublishError;

/// Seam for posting, implemented by [`TwitterPublisher`] and by test stubs.
#[async_trait]
pub trait Publish {
    /// Submit `text` as a new post and return its canonical URL
    async fn publish(&self, text: &str) -> Result<String, PublishError>;
}

/// Create-tweet request body
#[derive(Debug, Serialize)]
struct TweetRequest<'a> {
    text: &'a str,
}

/// Create-tweet response body
#[derive(Debug, Deserialize)]
struct TweetResponse {
    data: TweetData,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
}

/// Twitter v2 API publisher
pub struct TwitterPublisher {
    client: Client,

    /// Credentials, absent when the environment is not fully configured
    credentials: Option<TwitterCredentials>,

    /// API base URL, overridable for tests
    api_base: String,
}

impl TwitterPublisher {
    /// Create a new publisher
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Http` if the HTTP client cannot be created
    pub fn new(
        config: &TwitterConfig,
        credentials: Option<TwitterCredentials>,
    ) -> Result<Self, PublishError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            credentials,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Publish for TwitterPublisher {
    async fn publish(&self, text: &str) -> Result<String, PublishError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(PublishError::MissingCredentials)?;

        let url = format!("{}/2/tweets", self.api_base);
        let timestamp = Utc::now().timestamp().to_string();
        let header =
            oauth::authorization_header("POST", &url, credentials, &oauth::nonce(), &timestamp);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, header)
            .json(&TweetRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TweetResponse = response
            .json()
            .await
            .map_err(|_| PublishError::MalformedResponse)?;

        Ok(format!("https://twitter.com/user/status/{}", body.data.id))
    }
}
