//! Event and customer payloads.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

/// Customer identifiers keyed by identifier type (e.g. `"registered"`, `"email"`).
pub type IdMap = BTreeMap<String, String>;

/// Free-form string attributes of an event or customer.
pub type PropertyMap = BTreeMap<String, String>;

/// Replace an absent or empty project id with `project_id`.
fn fill(slot: &mut Option<String>, project_id: &str) {
    match slot.as_deref() {
        Some(id) if !id.is_empty() => {}
        _ => *slot = Some(project_id.to_string()),
    }
}

/// Zero carries no time, so it is left off the wire like an absent timestamp.
#[allow(clippy::trivially_copy_pass_by_ref, clippy::ref_option)]
fn is_unset_timestamp(timestamp: &Option<i64>) -> bool {
    matches!(timestamp, None | Some(0))
}

/// An event tracked against a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Identifiers of the customer the event belongs to.
    #[serde(default)]
    pub customer_ids: IdMap,
    /// Target project; filled from the client when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Event name.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event attributes.
    #[serde(default)]
    pub properties: PropertyMap,
    /// Epoch seconds; the service uses the receive time when absent or zero.
    #[serde(default, skip_serializing_if = "is_unset_timestamp")]
    pub timestamp: Option<i64>,
}

impl Event {
    /// Create an event of the given type with no identifiers or properties.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            ..Self::default()
        }
    }

    /// Add a customer identifier.
    #[must_use]
    pub fn customer_id(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.customer_ids.insert(kind.into(), value.into());
        self
    }

    /// Add an event property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Target an explicit project.
    #[must_use]
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the event time in epoch seconds.
    #[must_use]
    pub fn timestamp(mut self, seconds: i64) -> Self {
        self.timestamp = Some(seconds);
        self
    }

    /// Set the event time.
    #[must_use]
    pub fn at(self, time: DateTime<Utc>) -> Self {
        self.timestamp(time.timestamp())
    }

    /// Fill the project id from `project_id` unless one is already set.
    pub fn fill_project_id(&mut self, project_id: &str) {
        fill(&mut self.project_id, project_id);
    }
}

/// A property upsert for a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Identifiers of the customer to update.
    pub ids: IdMap,
    /// Target project; filled from the client when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Attributes to upsert.
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Customer {
    /// Create an empty customer update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a customer identifier.
    #[must_use]
    pub fn id(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.ids.insert(kind.into(), value.into());
        self
    }

    /// Add a property to upsert.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Target an explicit project.
    #[must_use]
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Fill the project id from `project_id` unless one is already set.
    pub fn fill_project_id(&mut self, project_id: &str) {
        fill(&mut self.project_id, project_id);
    }
}

/// A payload that can be dispatched on its own or inside a bulk.
///
/// Serializes as the bare payload; the target endpoint travels separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Command {
    /// Track an event.
    Event(Event),
    /// Update a customer.
    Customer(Customer),
}

impl Command {
    /// Endpoint this payload is posted to.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Event(_) => Endpoint::Events,
            Self::Customer(_) => Endpoint::Customers,
        }
    }

    /// Fill the project id from `project_id` unless one is already set.
    pub fn fill_project_id(&mut self, project_id: &str) {
        match self {
            Self::Event(event) => event.fill_project_id(project_id),
            Self::Customer(customer) => customer.fill_project_id(project_id),
        }
    }
}

impl From<Event> for Command {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

impl From<Customer> for Command {
    fn from(customer: Customer) -> Self {
        Self::Customer(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_wire_shape() {
        let event = Event::new("registration")
            .customer_id("registered", "peter@example.com")
            .property("plan", "pro")
            .project_id("p1");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "customer_ids": {"registered": "peter@example.com"},
                "project_id": "p1",
                "type": "registration",
                "properties": {"plan": "pro"}
            })
        );
    }

    #[test]
    fn event_properties_survive_encoding() {
        let event = Event::new("purchase").property("k", "v");
        let json = serde_json::to_string(&event).unwrap();
        let decoded: Event = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.properties, event.properties);
        assert_eq!(decoded.properties.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn event_timestamp_from_datetime() {
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let event = Event::new("login").at(time);
        assert_eq!(event.timestamp, Some(1_704_067_200));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["timestamp"], 1_704_067_200);
    }

    #[test]
    fn zero_timestamp_is_omitted() {
        let json = serde_json::to_value(Event::new("login").timestamp(0)).unwrap();
        assert!(json.get("timestamp").is_none());

        let json = serde_json::to_value(Event::new("login").timestamp(1)).unwrap();
        assert_eq!(json["timestamp"], 1);
    }

    #[test]
    fn fill_project_id_only_when_unset() {
        let mut unset = Event::new("a");
        unset.fill_project_id("bound");
        assert_eq!(unset.project_id.as_deref(), Some("bound"));

        let mut empty = Customer::new().project_id("");
        empty.fill_project_id("bound");
        assert_eq!(empty.project_id.as_deref(), Some("bound"));

        let mut explicit = Customer::new().project_id("other");
        explicit.fill_project_id("bound");
        assert_eq!(explicit.project_id.as_deref(), Some("other"));
    }

    #[test]
    fn command_endpoint_follows_variant() {
        assert_eq!(Command::from(Event::new("a")).endpoint(), Endpoint::Events);
        assert_eq!(Command::from(Customer::new()).endpoint(), Endpoint::Customers);
    }

    #[test]
    fn command_serializes_as_payload() {
        let command = Command::from(Customer::new().id("registered", "x"));
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["ids"]["registered"], "x");
        assert!(json.get("Customer").is_none());
    }
}
