//! Bulk envelope bundling several commands into one request.
//!
//! Each command is tagged with the path of the endpoint it would otherwise be
//! posted to. On the wire the tag is written with escaped slashes
//! (`"crm\/events"`); decoders see the plain path.

use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::endpoint::Endpoint;
use crate::error::ModelError;
use crate::model::{Command, Customer, Event};

/// One named command inside a bulk request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkCommand {
    /// Endpoint the command is dispatched to.
    #[serde(serialize_with = "serialize_escaped")]
    pub name: Endpoint,
    /// Command payload.
    pub data: Command,
}

impl BulkCommand {
    /// Wrap a payload, naming it after its endpoint.
    #[must_use]
    pub fn new(data: impl Into<Command>) -> Self {
        let data = data.into();
        Self {
            name: data.endpoint(),
            data,
        }
    }
}

/// Write the endpoint path as a JSON string with `/` escaped as `\/`.
fn serialize_escaped<S: Serializer>(name: &Endpoint, serializer: S) -> Result<S::Ok, S::Error> {
    // Paths are plain ASCII, so `\/` is the only escape the string needs.
    let raw = RawValue::from_string(format!("\"{}\"", name.escaped_path()))
        .map_err(ser::Error::custom)?;
    raw.serialize(serializer)
}

impl<'de> Deserialize<'de> for BulkCommand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            name: String,
            data: serde_json::Value,
        }

        let wire = Wire::deserialize(deserializer)?;
        let name: Endpoint = wire.name.parse().map_err(de::Error::custom)?;
        let data = match name {
            Endpoint::Events => {
                Command::Event(Event::deserialize(wire.data).map_err(de::Error::custom)?)
            }
            Endpoint::Customers => {
                Command::Customer(Customer::deserialize(wire.data).map_err(de::Error::custom)?)
            }
            Endpoint::Bulk => {
                return Err(de::Error::custom(ModelError::NotBulkable(wire.name)));
            }
        };

        Ok(Self { name, data })
    }
}

/// An ordered batch of commands.
///
/// Results in the matching `BulkResponse` are positional, so the order of
/// `commands` is preserved exactly as pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bulk {
    /// Commands in submission order.
    pub commands: Vec<BulkCommand>,
}

impl Bulk {
    /// Create an empty bulk.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&mut self, data: impl Into<Command>) {
        self.commands.push(BulkCommand::new(data));
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the bulk holds no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the commands in submission order.
    pub fn iter(&self) -> std::slice::Iter<'_, BulkCommand> {
        self.commands.iter()
    }

    /// Fill the project id of every command that has none.
    pub fn fill_project_id(&mut self, project_id: &str) {
        for command in &mut self.commands {
            command.data.fill_project_id(project_id);
        }
    }
}

impl<C: Into<Command>> FromIterator<C> for Bulk {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().map(BulkCommand::new).collect(),
        }
    }
}

impl<C: Into<Command>> Extend<C> for Bulk {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        self.commands.extend(iter.into_iter().map(BulkCommand::new));
    }
}

impl<'a> IntoIterator for &'a Bulk {
    type Item = &'a BulkCommand;
    type IntoIter = std::slice::Iter<'a, BulkCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
