//! Client configuration.

use std::sync::Arc;
use std::time::Duration;

use exponea_core::DEFAULT_API_URL;

use crate::auth::{Authenticator, Credentials, NoAuth};
use crate::error::ClientError;

/// How the client treats non-success HTTP statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Ignore the status and decode the body as a regular response.
    #[default]
    ParseBody,
    /// Fail with `ClientError::Status` on any non-2xx status.
    Reject,
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the API (default: `https://api.exponea.com`).
    pub target: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Strategy that attaches the project credentials to requests.
    pub authenticator: Arc<dyn Authenticator>,
    /// Handling of non-success HTTP statuses.
    pub status_policy: StatusPolicy,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_API_URL.to_string(),
            timeout_seconds: 30,
            authenticator: Arc::new(NoAuth),
            status_policy: StatusPolicy::default(),
            user_agent: concat!("exponea-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options targeting `target`.
    #[must_use]
    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the authentication strategy.
    #[must_use]
    pub fn authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Arc::new(authenticator);
        self
    }

    /// Set the status policy.
    #[must_use]
    pub fn status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Per-call overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Deadline for this call, replacing the client timeout.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Options with a per-call timeout.
    #[must_use]
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Credentials plus options, typically loaded from the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project credentials.
    pub credentials: Credentials,
    /// Client options.
    pub options: ClientOptions,
}

impl ClientConfig {
    /// Environment variable holding the project id.
    pub const PROJECT_ID_VAR: &'static str = "EXPONEA_PROJECT_ID";
    /// Environment variable holding the project secret.
    pub const PROJECT_SECRET_VAR: &'static str = "EXPONEA_PROJECT_SECRET";
    /// Environment variable overriding the API base URL.
    pub const API_URL_VAR: &'static str = "EXPONEA_API_URL";
    /// Environment variable overriding the timeout in seconds.
    pub const TIMEOUT_VAR: &'static str = "EXPONEA_TIMEOUT_SECONDS";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the project id or secret is missing.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the project id or secret is missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ClientError::Configuration(format!("{name} is not set")))
        };

        let credentials = Credentials::new(
            required(Self::PROJECT_ID_VAR)?,
            required(Self::PROJECT_SECRET_VAR)?,
        );

        let defaults = ClientOptions::default();
        let options = ClientOptions {
            target: lookup(Self::API_URL_VAR).unwrap_or_else(|| defaults.target.clone()),
            timeout_seconds: lookup(Self::TIMEOUT_VAR)
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            ..defaults
        };

        Ok(Self {
            credentials,
            options,
        })
    }
}
