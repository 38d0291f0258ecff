// Command descriptors
//
// The gateway only ever sees a command as a name plus its arguments. Both
// the catalogued `DeviceCommand` and the ad-hoc `CustomCommand` expose
// that through the `Command` trait.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// Name of the command served by the log service instead of the device
/// manager.
pub const GET_CLEAN_LOGS: &str = "GetCleanLogs";

// ── Arguments ────────────────────────────────────────────────────────

/// Command arguments, sent verbatim as `payload.body.data`.
///
/// Most device commands take keyed arguments; some take a positional list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandArgs {
    List(Vec<Value>),
    Map(Map<String, Value>),
}

impl CommandArgs {
    /// No arguments at all.
    pub fn none() -> Self {
        Self::List(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Map(fields) => fields.is_empty(),
        }
    }
}

impl Default for CommandArgs {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<Value>> for CommandArgs {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Map<String, Value>> for CommandArgs {
    fn from(fields: Map<String, Value>) -> Self {
        Self::Map(fields)
    }
}

impl TryFrom<Value> for CommandArgs {
    type Error = Error;

    /// Objects become keyed arguments, arrays positional ones and `null`
    /// means no arguments. Bare scalars are rejected.
    fn try_from(value: Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(Self::none()),
            Value::Array(items) => Ok(Self::List(items)),
            Value::Object(fields) => Ok(Self::Map(fields)),
            scalar => Err(Error::InvalidArgs {
                message: format!("expected a JSON object or array, got `{scalar}`"),
            }),
        }
    }
}

// ── Command trait ────────────────────────────────────────────────────

/// Anything that can be sent to a device.
pub trait Command: Send + Sync {
    fn name(&self) -> &str;
    fn args(&self) -> &CommandArgs;
}

/// A command from the known command catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceCommand {
    name: &'static str,
    args: CommandArgs,
}

impl DeviceCommand {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            args: CommandArgs::none(),
        }
    }

    pub fn with_args(name: &'static str, args: impl Into<CommandArgs>) -> Self {
        Self {
            name,
            args: args.into(),
        }
    }

    /// Fetch the cleaning history through the log service.
    pub fn get_clean_logs() -> Self {
        Self::new(GET_CLEAN_LOGS)
    }
}

impl Command for DeviceCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn args(&self) -> &CommandArgs {
        &self.args
    }
}

/// A command assembled at runtime from a caller-supplied name and raw
/// arguments, for anything the catalog does not cover.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomCommand {
    name: String,
    args: CommandArgs,
}

impl CustomCommand {
    pub fn new(name: impl Into<String>, args: impl Into<CommandArgs>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
        }
    }
}

impl Command for CustomCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn args(&self) -> &CommandArgs {
        &self.args
    }
}
