//! Request and response models for the Exponea tracking API.
//!
//! This crate provides the value types exchanged with the service:
//!
//! - **Endpoints**: `Endpoint` with the fixed sub-endpoint paths
//! - **Payloads**: `Event`, `Customer`, and the `Command` union over them
//! - **Bulk envelope**: `Bulk`, `BulkCommand`
//! - **Responses**: `Response`, `BulkResponse`, `BulkResponseResult`
//!
//! # Project identity
//!
//! Every payload carries an optional `project_id`. The client fills it from its
//! bound project when it is absent or empty, so callers only set it to target a
//! different project.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bulk;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod response;

pub use bulk::{Bulk, BulkCommand};
pub use endpoint::{Endpoint, DEFAULT_API_URL};
pub use error::ModelError;
pub use model::{Command, Customer, Event, IdMap, PropertyMap};
pub use response::{BulkResponse, BulkResponseResult, Response, STATUS_OK};
