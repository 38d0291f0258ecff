// Request envelope construction
//
// The portal speaks two dialects for device commands: the log service takes
// a flat `{td, did, resource}` body, everything else goes through the device
// manager wrapped in a `{header, body}` payload. `build_envelope` picks the
// dialect by command name; the credential-derived query string is appended
// afterwards and is identical for both.

use serde_json::{Value, json};

use crate::command::{Command, GET_CLEAN_LOGS};
use crate::models::{Credentials, DeviceInfo};
use crate::paths;

/// Client version reported as `cv`.
pub const CLIENT_VERSION: &str = "1.67.3";
/// Client type reported as `t`.
pub const CLIENT_TYPE: &str = "a";
/// App version reported as `av`.
pub const APP_VERSION: &str = "1.3.1";

const PAYLOAD_PRIORITY: &str = "1";
const PAYLOAD_TZM: i64 = 480;
const PAYLOAD_VERSION: &str = "0.0.50";

/// Ordered query-string pairs.
pub type QueryParams = Vec<(&'static str, String)>;

/// A fully addressed command request, minus transport concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub path: &'static str,
    pub body: Value,
    pub query: QueryParams,
    td: String,
}

/// Shape `command` for `device`.
///
/// `timestamp` (unix seconds) only ends up in the device-manager header.
pub fn build_envelope<C>(command: &C, device: &DeviceInfo, timestamp: f64) -> Envelope
where
    C: Command + ?Sized,
{
    if command.name() == GET_CLEAN_LOGS {
        return Envelope {
            path: paths::LG_LOG,
            body: json!({
                "td": command.name(),
                "did": device.did,
                "resource": device.resource,
            }),
            query: QueryParams::new(),
            td: command.name().to_owned(),
        };
    }

    let mut payload = json!({
        "header": {
            "pri": PAYLOAD_PRIORITY,
            "ts": timestamp,
            "tzm": PAYLOAD_TZM,
            "ver": PAYLOAD_VERSION,
        }
    });
    if !command.args().is_empty() {
        payload["body"] = json!({ "data": command.args() });
    }

    Envelope {
        path: paths::IOT_DEVMANAGER,
        body: json!({
            "cmdName": command.name(),
            "payload": payload,
            "payloadType": "j",
            "td": "q",
            "toId": device.did,
            "toRes": device.resource,
            "toType": device.class,
        }),
        query: vec![("mid", device.class.clone()), ("did", device.did.clone())],
        td: "q".to_owned(),
    }
}

impl Envelope {
    /// Append the credential-derived query parameters.
    pub fn append_credentials(&mut self, credentials: &Credentials) {
        self.query.extend([
            ("td", self.td.clone()),
            ("u", credentials.user_id.clone()),
            ("cv", CLIENT_VERSION.to_owned()),
            ("t", CLIENT_TYPE.to_owned()),
            ("av", APP_VERSION.to_owned()),
        ]);
    }
}
