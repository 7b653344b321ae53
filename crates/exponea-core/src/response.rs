//! Response bodies returned by the service.

use serde::{Deserialize, Deserializer, Serialize};

use crate::bulk::{Bulk, BulkCommand};

/// Status reported for a bulk command that was accepted.
pub const STATUS_OK: &str = "ok";

/// Decode `null` as the field's default, as missing fields already are.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Outcome of a single track or update call.
///
/// `success == false` means the service rejected the request; `errors` says why.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    /// Error messages, empty when none.
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
    /// Whether the service accepted the request.
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
}

impl Response {
    /// Accepted with no errors.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.success && self.errors.is_empty()
    }
}

/// Result of one command inside a bulk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkResponseResult {
    /// Command status, `"ok"` when accepted.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Free-form diagnostics.
    #[serde(deserialize_with = "null_as_default")]
    pub other_data: String,
}

impl BulkResponseResult {
    /// Whether the command was accepted.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Outcome of a bulk call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkResponse {
    /// Processing start time reported by the service.
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: i64,
    /// Processing end time reported by the service.
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: i64,
    /// Overall batch outcome.
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    /// One result per submitted command, in submission order.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<BulkResponseResult>,
}

impl BulkResponse {
    /// Pair each submitted command with its result by position.
    ///
    /// Stops at the shorter of the two sequences.
    pub fn correlate<'a>(
        &'a self,
        bulk: &'a Bulk,
    ) -> impl Iterator<Item = (&'a BulkCommand, &'a BulkResponseResult)> + 'a {
        bulk.iter().zip(self.results.iter())
    }

    /// Commands whose result is not `"ok"`, with their results.
    pub fn failures<'a>(
        &'a self,
        bulk: &'a Bulk,
    ) -> impl Iterator<Item = (&'a BulkCommand, &'a BulkResponseResult)> + 'a {
        self.correlate(bulk).filter(|(_, result)| !result.is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use crate::model::{Customer, Event};

    #[test]
    fn response_missing_fields_default() {
        let response: Response = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
        assert!(response.errors.is_empty());
    }

    #[test]
    fn response_null_fields_default() {
        let response: Response =
            serde_json::from_str(r#"{"errors":null,"success":true}"#).unwrap();
        assert!(response.success);
        assert!(response.errors.is_empty());
        assert!(response.is_ok());
    }

    #[test]
    fn bulk_response_null_fields_default() {
        let response: BulkResponse = serde_json::from_str(
            r#"{"start_time":null,"end_time":2,"success":true,"results":[
                {"status":"ok","other_data":null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.start_time, 0);
        assert_eq!(response.results[0].other_data, "");
        assert!(response.results[0].is_ok());

        let empty: BulkResponse =
            serde_json::from_str(r#"{"success":false,"results":null}"#).unwrap();
        assert!(empty.results.is_empty());
    }

    #[test]
    fn response_is_ok() {
        let ok: Response = serde_json::from_str(r#"{"errors":[],"success":true}"#).unwrap();
        assert!(ok.is_ok());

        let rejected: Response =
            serde_json::from_str(r#"{"errors":["bad id"],"success":false}"#).unwrap();
        assert!(!rejected.is_ok());
        assert_eq!(rejected.errors, vec!["bad id".to_string()]);
    }

    #[test]
    fn bulk_response_correlates_by_position() {
        let mut bulk: Bulk = [Event::new("a")].into_iter().collect();
        bulk.push(Customer::new());

        let response: BulkResponse = serde_json::from_str(
            r#"{"start_time":1,"end_time":2,"success":false,"results":[
                {"status":"ok","other_data":""},
                {"status":"error","other_data":"bad id"}
            ]}"#,
        )
        .unwrap();

        let pairs: Vec<_> = response.correlate(&bulk).collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.name, Endpoint::Events);
        assert!(pairs[0].1.is_ok());

        let failures: Vec<_> = response.failures(&bulk).collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0.name, Endpoint::Customers);
        assert_eq!(failures[0].1.other_data, "bad id");
    }
}
