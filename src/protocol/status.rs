//! Status record
//!
//! Decodes the JSON document carried by a status response into the fields
//! callers use. Everything else in the document is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, WireError};

/// Live server status as reported by a server list ping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerStatus {
    pub online: bool,
    pub players_online: i64,
    pub players_max: i64,
    pub player_sample: Vec<String>,
    pub version_name: String,
    pub protocol: i32,
    pub motd: String,
}

impl ServerStatus {
    /// Decode a status JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let document: StatusDocument = serde_json::from_str(json)
            .map_err(|e| WireError::ProtocolViolation(format!("status JSON: {}", e)))?;
        Ok(document.into())
    }
}

/// Outcome of a liveness probe; never a partial record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Online(ServerStatus),
    Unreachable,
}

impl Probe {
    pub fn is_online(&self) -> bool {
        matches!(self, Probe::Online(_))
    }

    pub fn status(&self) -> Option<&ServerStatus> {
        match self {
            Probe::Online(status) => Some(status),
            Probe::Unreachable => None,
        }
    }

    pub fn into_status(self) -> Option<ServerStatus> {
        match self {
            Probe::Online(status) => Some(status),
            Probe::Unreachable => None,
        }
    }
}

// =============================================================================
// Document layout
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct StatusDocument {
    #[serde(default)]
    players: Players,

    #[serde(default)]
    version: Version,

    #[serde(default)]
    description: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Players {
    #[serde(default)]
    online: i64,

    #[serde(default)]
    max: i64,

    #[serde(default)]
    sample: Vec<SamplePlayer>,
}

#[derive(Debug, Deserialize)]
struct SamplePlayer {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Version {
    #[serde(default = "Version::unknown_name")]
    name: String,

    #[serde(default = "Version::unknown_protocol")]
    protocol: i32,
}

impl Version {
    fn unknown_name() -> String {
        "unknown".to_string()
    }

    fn unknown_protocol() -> i32 {
        -1
    }
}

impl Default for Version {
    fn default() -> Self {
        Self {
            name: Self::unknown_name(),
            protocol: Self::unknown_protocol(),
        }
    }
}

/// Flatten a chat component to plain text
///
/// `description` may be a bare string, an object with `text` followed by its
/// `extra` components, or a list of components. Numbers render as written;
/// anything else contributes nothing.
fn flatten_component(value: &Value, out: &mut String) {
    match value {
        Value::String(text) => out.push_str(text),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::Array(parts) => {
            for part in parts {
                flatten_component(part, out);
            }
        }
        Value::Object(fields) => {
            if let Some(text) = fields.get("text") {
                flatten_component(text, out);
            }
            if let Some(Value::Array(extra)) = fields.get("extra") {
                for part in extra {
                    flatten_component(part, out);
                }
            }
        }
        Value::Null | Value::Bool(_) => {}
    }
}

impl From<StatusDocument> for ServerStatus {
    fn from(document: StatusDocument) -> Self {
        let mut motd = String::new();
        if let Some(description) = &document.description {
            flatten_component(description, &mut motd);
        }

        Self {
            online: true,
            players_online: document.players.online,
            players_max: document.players.max,
            player_sample: document
                .players
                .sample
                .into_iter()
                .map(|player| player.name.unwrap_or_default())
                .collect(),
            version_name: document.version.name,
            protocol: document.version.protocol,
            motd,
        }
    }
}
