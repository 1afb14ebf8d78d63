//! HTTP client for the points endpoint.
//!
//! [`PointsClient`] issues exactly one `GET {base_url}/api/points` per call and
//! never retries on its own; retrying is a user decision driven through the
//! view controller.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use spiky_core::Point;
use thiserror::Error;

/// Default base URL of the points server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Default user agent for points requests.
pub const DEFAULT_USER_AGENT: &str = "spiky-view/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const POINTS_PATH: &str = "/api/points";

/// A points fetch did not yield a complete, valid point list.
#[derive(Debug, Error)]
pub enum FetchFailedError {
    /// The request could not be sent or the connection dropped.
    #[error("network error fetching {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error message from the HTTP client.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout: Duration,
    },
    /// The server answered with a non-success status.
    #[error("{url} answered with HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The body was not a valid point list.
    #[error("failed to decode points from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder error message.
        message: String,
    },
}

/// Building the underlying HTTP client failed.
#[derive(Debug, Error)]
#[error("failed to build HTTP client")]
pub struct ClientBuildError(#[source] reqwest::Error);

/// Source of point lists, abstracted so the view session can run on stubs.
#[async_trait(?Send)]
pub trait PointsSource {
    /// Fetch the full point list.
    async fn fetch_points(&self) -> Result<Vec<Point>, FetchFailedError>;
}

/// Configuration for [`PointsClient`].
#[derive(Debug, Clone)]
pub struct PointsClientConfig {
    /// Base URL of the server, without the `/api/points` path.
    pub base_url: String,
    /// Timeout applied to connecting and to the whole request.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for PointsClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl PointsClientConfig {
    /// Configuration targeting `base_url` with default timeout and agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Fetches points from a Spiky server over HTTP.
#[derive(Debug, Clone)]
pub struct PointsClient {
    client: Client,
    config: PointsClientConfig,
    url: String,
}

impl PointsClient {
    /// Client for `base_url` with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(PointsClientConfig::new(base_url))
    }

    /// Client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the HTTP client cannot be built.
    pub fn with_config(config: PointsClientConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError)?;
        let url = format!("{}{POINTS_PATH}", config.base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            config,
            url,
        })
    }

    /// Full URL of the points endpoint.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> FetchFailedError {
        if error.is_timeout() {
            return FetchFailedError::Timeout {
                url: self.url.clone(),
                timeout: self.config.timeout,
            };
        }
        if let Some(status) = error.status() {
            return FetchFailedError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            };
        }
        if error.is_decode() {
            return FetchFailedError::Decode {
                url: self.url.clone(),
                message: error.to_string(),
            };
        }
        FetchFailedError::Network {
            url: self.url.clone(),
            message: error.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl PointsSource for PointsClient {
    async fn fetch_points(&self) -> Result<Vec<Point>, FetchFailedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let points: Vec<Point> = response
            .json()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        debug!("fetched {} points from {}", points.len(), self.url);
        Ok(points)
    }
}
