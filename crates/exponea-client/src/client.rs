//! Exponea HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use exponea_core::{Bulk, BulkResponse, Command, Customer, Endpoint, Event, Response};

use crate::auth::{Authenticator, Credentials};
use crate::config::{ClientConfig, ClientOptions, RequestOptions, StatusPolicy};
use crate::error::ClientError;

/// Exponea API client bound to a single project.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ExponeaClient {
    client: Client,
    target: String,
    credentials: Credentials,
    authenticator: Arc<dyn Authenticator>,
    status_policy: StatusPolicy,
}

impl ExponeaClient {
    /// Create a client for the production API.
    ///
    /// # Arguments
    ///
    /// * `project_id` - Project the client tracks into by default
    /// * `project_secret` - Project secret, used by the configured authenticator
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn new(
        project_id: impl Into<String>,
        project_secret: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::with_options(project_id, project_secret, ClientOptions::default())
    }

    /// Create a client for a custom API base URL, e.g. a staging or mock server.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if `target` is not a valid URL or the
    /// HTTP client cannot be built.
    pub fn with_target(
        project_id: impl Into<String>,
        project_secret: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::with_options(project_id, project_secret, ClientOptions::with_target(target))
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`ExponeaClient::with_options`].
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let ClientConfig {
            credentials,
            options,
        } = config;
        Self::with_options(credentials.project_id, credentials.project_secret, options)
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the target is not a valid URL or the
    /// HTTP client cannot be built.
    pub fn with_options(
        project_id: impl Into<String>,
        project_secret: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let target = options.target.trim_end_matches('/').to_string();
        reqwest::Url::parse(&target).map_err(|e| {
            ClientError::Configuration(format!("invalid target URL {target:?}: {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .user_agent(options.user_agent)
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            target,
            credentials: Credentials::new(project_id, project_secret),
            authenticator: options.authenticator,
            status_policy: options.status_policy,
        })
    }

    /// Project the client is bound to.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.credentials.project_id
    }

    /// API base URL without a trailing slash.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Track an event.
    ///
    /// The event's project id defaults to the client's project. A response with
    /// `success == false` is returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be encoded, the request fails, or the
    /// response body is not a valid `Response`.
    pub async fn track(&self, event: Event) -> Result<Response, ClientError> {
        self.track_with_options(event, RequestOptions::default()).await
    }

    /// Track an event with per-call options.
    ///
    /// # Errors
    ///
    /// See [`ExponeaClient::track`].
    pub async fn track_with_options(
        &self,
        mut event: Event,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        event.fill_project_id(self.project_id());
        self.post(Endpoint::Events, &event, options).await
    }

    /// Upsert customer properties.
    ///
    /// The customer's project id defaults to the client's project.
    ///
    /// # Errors
    ///
    /// Returns an error if the update cannot be encoded, the request fails, or the
    /// response body is not a valid `Response`.
    pub async fn update(&self, customer: Customer) -> Result<Response, ClientError> {
        self.update_with_options(customer, RequestOptions::default()).await
    }

    /// Upsert customer properties with per-call options.
    ///
    /// # Errors
    ///
    /// See [`ExponeaClient::update`].
    pub async fn update_with_options(
        &self,
        mut customer: Customer,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        customer.fill_project_id(self.project_id());
        self.post(Endpoint::Customers, &customer, options).await
    }

    /// Send events and customer updates in one request.
    ///
    /// Commands keep the order of `models`; `BulkResponse::results` follows the
    /// same order.
    ///
    /// # Errors
    ///
    /// Returns an error if the bulk cannot be encoded, the request fails, or the
    /// response body is not a valid `BulkResponse`.
    pub async fn bulk<I>(&self, models: I) -> Result<BulkResponse, ClientError>
    where
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        self.bulk_with_options(models, RequestOptions::default()).await
    }

    /// Send events and customer updates in one request with per-call options.
    ///
    /// # Errors
    ///
    /// See [`ExponeaClient::bulk`].
    pub async fn bulk_with_options<I>(
        &self,
        models: I,
        options: RequestOptions,
    ) -> Result<BulkResponse, ClientError>
    where
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        let bulk: Bulk = models.into_iter().collect();
        self.send_bulk_request_with_options(bulk, options).await
    }

    /// Send a pre-assembled bulk.
    ///
    /// Project ids inside the bulk default to the client's project.
    ///
    /// # Errors
    ///
    /// See [`ExponeaClient::bulk`].
    pub async fn send_bulk_request(&self, bulk: Bulk) -> Result<BulkResponse, ClientError> {
        self.send_bulk_request_with_options(bulk, RequestOptions::default()).await
    }

    /// Send a pre-assembled bulk with per-call options.
    ///
    /// # Errors
    ///
    /// See [`ExponeaClient::bulk`].
    pub async fn send_bulk_request_with_options(
        &self,
        mut bulk: Bulk,
        options: RequestOptions,
    ) -> Result<BulkResponse, ClientError> {
        bulk.fill_project_id(self.project_id());
        self.post(Endpoint::Bulk, &bulk, options).await
    }

    /// Post any model to an endpoint and decode a single-call `Response`.
    ///
    /// The model is sent as is; no project id is filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be encoded, the request fails, or the
    /// response body is not a valid `Response`.
    pub async fn send_request<T>(
        &self,
        endpoint: Endpoint,
        model: &T,
    ) -> Result<Response, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.send_request_with_options(endpoint, model, RequestOptions::default())
            .await
    }

    /// Post any model to an endpoint with per-call options.
    ///
    /// # Errors
    ///
    /// See [`ExponeaClient::send_request`].
    pub async fn send_request_with_options<T>(
        &self,
        endpoint: Endpoint,
        model: &T,
        options: RequestOptions,
    ) -> Result<Response, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.post(endpoint, model, options).await
    }

    /// Encode, post, and decode one request.
    async fn post<T, R>(
        &self,
        endpoint: Endpoint,
        body: &T,
        options: RequestOptions,
    ) -> Result<R, ClientError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = endpoint.url(&self.target);
        // Encoded up front so encode failures are not reported as transport errors.
        let body = serde_json::to_vec(body)?;

        tracing::debug!(
            endpoint = %endpoint,
            url = %url,
            project_id = %self.credentials.project_id,
            bytes = body.len(),
            "Sending Exponea request"
        );

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        let request = self.authenticator.authenticate(request, &self.credentials);

        let response = request.send().await?;
        self.handle_response(endpoint, response).await
    }

    /// Read the body and decode it according to the status policy.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        response: reqwest::Response,
    ) -> Result<R, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            endpoint = %endpoint,
            status = status.as_u16(),
            bytes = body.len(),
            "Received Exponea response"
        );

        if !status.is_success() && self.status_policy == StatusPolicy::Reject {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::ResponseParse {
            status: status.as_u16(),
            source,
        })
    }
}
