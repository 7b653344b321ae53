//! Sub-endpoint paths of the Exponea API.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Production API base URL.
pub const DEFAULT_API_URL: &str = "https://api.exponea.com";

/// A sub-endpoint the client can post to.
///
/// The path doubles as the `name` tag of a bulk command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Event tracking (`crm/events`).
    Events,
    /// Customer property updates (`crm/customers`).
    Customers,
    /// Bulk submission (`bulk`).
    Bulk,
}

impl Endpoint {
    /// Path of the events endpoint.
    pub const EVENTS_PATH: &'static str = "crm/events";
    /// Path of the customers endpoint.
    pub const CUSTOMERS_PATH: &'static str = "crm/customers";
    /// Path of the bulk endpoint.
    pub const BULK_PATH: &'static str = "bulk";

    /// Path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Events => Self::EVENTS_PATH,
            Self::Customers => Self::CUSTOMERS_PATH,
            Self::Bulk => Self::BULK_PATH,
        }
    }

    /// Path with every `/` written as `\/`, the form used in bulk command names.
    #[must_use]
    pub fn escaped_path(self) -> String {
        self.path().replace('/', "\\/")
    }

    /// Full URL of this endpoint under `base_url`.
    #[must_use]
    pub fn url(self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Endpoint {
    type Err = ModelError;

    /// Accepts both the plain and the slash-escaped form of a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace("\\/", "/").trim_matches('/') {
            Self::EVENTS_PATH => Ok(Self::Events),
            Self::CUSTOMERS_PATH => Ok(Self::Customers),
            Self::BULK_PATH => Ok(Self::Bulk),
            _ => Err(ModelError::UnknownEndpoint(s.to_string())),
        }
    }
}
