//! Authentication strategies applied to outgoing requests.
//!
//! The service historically accepted unauthenticated posts, so `NoAuth` is the
//! default. Selecting a strategy is an explicit part of `ClientOptions`.

use std::fmt;

use reqwest::RequestBuilder;

/// Project credentials bound to a client.
#[derive(Clone)]
pub struct Credentials {
    /// Project identifier.
    pub project_id: String,
    /// Project secret.
    pub project_secret: String,
}

impl Credentials {
    /// Create credentials from an id and secret.
    #[must_use]
    pub fn new(project_id: impl Into<String>, project_secret: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            project_secret: project_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("project_id", &self.project_id)
            .field("project_secret", &"<redacted>")
            .finish()
    }
}

/// Attaches credentials to a request.
pub trait Authenticator: fmt::Debug + Send + Sync {
    /// Decorate `request` with whatever the strategy needs from `credentials`.
    fn authenticate(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder;
}

/// Sends requests without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl Authenticator for NoAuth {
    fn authenticate(&self, request: RequestBuilder, _credentials: &Credentials) -> RequestBuilder {
        request
    }
}

/// HTTP basic auth with the project id as user and the secret as password.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAuth;

impl Authenticator for BasicAuth {
    fn authenticate(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request.basic_auth(&credentials.project_id, Some(&credentials.project_secret))
    }
}

/// Sends the project secret in a named header.
#[derive(Debug, Clone)]
pub struct SecretHeader {
    header: String,
}

impl SecretHeader {
    /// Header used when none is given.
    pub const DEFAULT_HEADER: &'static str = "x-project-secret";

    /// Send the secret in `header`.
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

impl Default for SecretHeader {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HEADER)
    }
}

impl Authenticator for SecretHeader {
    fn authenticate(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request.header(self.header.as_str(), &credentials.project_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(auth: &dyn Authenticator) -> reqwest::Request {
        let credentials = Credentials::new("id", "secret");
        let request = reqwest::Client::new().post("http://localhost/crm/events");
        auth.authenticate(request, &credentials).build().unwrap()
    }

    #[test]
    fn no_auth_adds_nothing() {
        let request = build(&NoAuth);
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn basic_auth_header() {
        let request = build(&BasicAuth);
        let value = request.headers()["authorization"].to_str().unwrap();
        // base64("id:secret")
        assert_eq!(value, "Basic aWQ6c2VjcmV0");
    }

    #[test]
    fn secret_header() {
        let request = build(&SecretHeader::default());
        assert_eq!(request.headers()["x-project-secret"], "secret");

        let request = build(&SecretHeader::new("x-api-key"));
        assert_eq!(request.headers()["x-api-key"], "secret");
    }

    #[test]
    fn credentials_debug_redacts_secret() {
        let debug = format!("{:?}", Credentials::new("id", "secret"));
        assert!(debug.contains("id"));
        assert!(!debug.contains("\"secret\""));
    }
}
