//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Basic authentication on every request
//! - Exponential backoff retry logic for idempotent GETs (max 3 retries)
//! - Rate limit error handling

use crate::error::HostError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("foreachrepo/", env!("CARGO_PKG_VERSION"));

/// Media type requested from the GitHub API
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// Username/password pair sent as basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// HTTP client wrapper with authentication and retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    credentials: Credentials,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new(credentials: Credentials) -> Result<Self, HostError> {
        Self::with_config(credentials, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(
        credentials: Credentials,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, HostError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                HostError::network("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            credentials,
        })
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }

    /// Perform a GET request with retry logic
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, HostError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=MAX_RETRIES {
            match self.authenticated(self.client.get(url)).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(HostError::RateLimitExceeded {
                            url: url.to_string(),
                        });
                    } else if !status.is_success() {
                        return Err(HostError::Status {
                            url: url.to_string(),
                            status: status.as_u16(),
                        });
                    } else {
                        return Ok(response);
                    }
                }
                Err(e) => {
                    last_error = Some(if e.is_timeout() {
                        HostError::Timeout {
                            url: url.to_string(),
                        }
                    } else {
                        HostError::network(url, e.to_string())
                    });
                }
            }

            if attempt < MAX_RETRIES {
                log::debug!("Retrying {} in {}ms", url, delay);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| HostError::network(url, "unknown error")))
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, HostError> {
        let response = self.get(url).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| HostError::invalid_response(url, format!("failed to parse JSON: {}", e)))
    }

    /// Perform a single POST with a JSON body; the status is left to the caller
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, HostError> {
        self.authenticated(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HostError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    HostError::network(url, e.to_string())
                }
            })
    }
}
