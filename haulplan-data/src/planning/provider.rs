//! HTTP [`TripPlanner`] talking to the trip-planning service.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use haulplan_core::{TripPlanner, TripRequest};
//! use haulplan_data::planning::{HttpTripPlanner, HttpTripPlannerConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpTripPlannerConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(10));
//! let planner = HttpTripPlanner::with_config(config)?;
//!
//! let request = TripRequest::new("Chicago, IL", "St. Louis, MO", "Dallas, TX", 22.5)?;
//! let result = planner.plan_trip(&request).await?;
//! println!("{:.1} miles", result.total_distance_miles);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use haulplan_core::{PlanError, TripPlanner, TripRequest, TripResult};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::api::{TripRequestBody, TripResponse};

/// Default user agent for service requests.
pub const DEFAULT_USER_AGENT: &str = "haulplan/0.1";

/// Default service location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path of the planning endpoint relative to the base URL.
const TRIP_ENDPOINT: &str = "api/trip/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for [`HttpTripPlanner`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The base URL could not be parsed.
    #[error("invalid service URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// Rejected URL.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Configuration for [`HttpTripPlanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTripPlannerConfig {
    /// Base URL of the service (e.g., `"http://localhost:8000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpTripPlannerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpTripPlannerConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full URL of the planning endpoint.
    ///
    /// # Errors
    /// Returns [`ProviderBuildError::InvalidBaseUrl`] when the base URL does
    /// not parse.
    pub fn endpoint(&self) -> Result<Url, ProviderBuildError> {
        let invalid = |source| ProviderBuildError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        };
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|base| base.join(TRIP_ENDPOINT))
            .map_err(invalid)
    }
}

/// Trip planner backed by the service's HTTP API.
///
/// One request is sent per call; the planner never retries.
#[derive(Debug, Clone)]
pub struct HttpTripPlanner {
    client: Client,
    config: HttpTripPlannerConfig,
    endpoint: Url,
}

impl HttpTripPlanner {
    /// Create a planner with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpTripPlannerConfig::new(base_url))
    }

    /// Create a planner with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: HttpTripPlannerConfig) -> Result<Self, ProviderBuildError> {
        let endpoint = config.endpoint()?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// The planning endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpTripPlannerConfig {
        &self.config
    }

    /// Convert a reqwest error to a `PlanError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> PlanError {
        let url = self.endpoint.to_string();
        if error.is_timeout() {
            return PlanError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return PlanError::HttpStatus {
                url,
                status: status.as_u16(),
            };
        }

        PlanError::Transport {
            url,
            message: error.to_string(),
        }
    }

    /// Classify a reply from its status and body.
    ///
    /// Non-success statuses are failures even when the body claims success;
    /// their `error` message is used when present.
    fn convert_response(&self, status: u16, body: &[u8]) -> Result<TripResult, PlanError> {
        let decoded = serde_json::from_slice::<TripResponse>(body);
        if !(200..300).contains(&status) {
            let message = decoded
                .ok()
                .and_then(|response| response.error_message().map(str::to_owned));
            return Err(message.map_or_else(
                || PlanError::HttpStatus {
                    url: self.endpoint.to_string(),
                    status,
                },
                |message| PlanError::Service { message },
            ));
        }
        decoded
            .map_err(|err| PlanError::Contract {
                reason: format!("undecodable response body: {err}"),
            })?
            .into_result()
    }
}

#[async_trait]
impl TripPlanner for HttpTripPlanner {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripResult, PlanError> {
        log::debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&TripRequestBody::from(request))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let outcome = self.convert_response(status, &body);
        match &outcome {
            Ok(result) => log::debug!(
                "service planned {:.1} miles over {} day(s)",
                result.total_distance_miles,
                result.logs.len()
            ),
            Err(err) => log::warn!("trip planning failed with HTTP {status}: {err}"),
        }
        outcome
    }
}
