//! Exponea Client SDK.
//!
//! This crate provides an async client for the Exponea tracking API: event
//! tracking, customer property updates, and bulk submission of both.
//!
//! # Example
//!
//! ```no_run
//! use exponea_client::{Command, Customer, Event, ExponeaClient};
//!
//! # async fn example() -> Result<(), exponea_client::ClientError> {
//! let client = ExponeaClient::new("project-token", "project-secret")?;
//!
//! // Track a single event
//! let response = client
//!     .track(
//!         Event::new("registration")
//!             .customer_id("registered", "peter@example.com")
//!             .property("source", "landing"),
//!     )
//!     .await?;
//!
//! if !response.success {
//!     eprintln!("rejected: {:?}", response.errors);
//! }
//!
//! // Send an event and a customer update in one request
//! let results = client
//!     .bulk(vec![
//!         Command::from(Event::new("purchase").customer_id("registered", "peter@example.com")),
//!         Command::from(
//!             Customer::new()
//!                 .id("registered", "peter@example.com")
//!                 .property("plan", "pro"),
//!         ),
//!     ])
//!     .await?;
//!
//! for result in &results.results {
//!     println!("{}: {}", result.status, result.other_data);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod auth;
mod client;
mod config;
mod error;

pub use auth::{Authenticator, BasicAuth, Credentials, NoAuth, SecretHeader};
pub use client::ExponeaClient;
pub use config::{ClientConfig, ClientOptions, RequestOptions, StatusPolicy};
pub use error::ClientError;
pub use exponea_core::{
    Bulk, BulkCommand, BulkResponse, BulkResponseResult, Command, Customer, Endpoint, Event, IdMap,
    ModelError, PropertyMap, Response, DEFAULT_API_URL, STATUS_OK,
};
