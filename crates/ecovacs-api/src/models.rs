// Gateway data model
//
// Account configuration, credential snapshots, and device records as
// returned by the device-list endpoint. Device records keep every field the
// cloud sends; only the addressing fields are modelled explicitly.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::region::continent_for;

/// The only `company` tag whose devices this gateway can address.
pub const SUPPORTED_COMPANY: &str = "eco-ng";

// ── Configuration ────────────────────────────────────────────────────

/// Account region plus the client device identifier.
///
/// `country` is always stored lower-case. When no continent is supplied it
/// is derived from the country (see [`continent_for`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    country: String,
    continent: String,
    device_id: String,
}

impl Configuration {
    /// Create a configuration for `country`, deriving the continent.
    pub fn new(country: &str, device_id: impl Into<String>) -> Self {
        let country = country.trim().to_ascii_lowercase();
        let continent = continent_for(&country).to_owned();
        Self {
            country,
            continent,
            device_id: device_id.into(),
        }
    }

    /// Override the derived continent token.
    pub fn with_continent(mut self, continent: &str) -> Self {
        self.continent = continent.trim().to_ascii_lowercase();
        self
    }

    /// Two-letter lower-case country code.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Short continent token (`eu`, `na`, `as`, `ww`).
    pub fn continent(&self) -> &str {
        &self.continent
    }

    /// Identifier of this client, sent as the auth `resource`.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

// ── Credentials ──────────────────────────────────────────────────────

/// Authenticated session snapshot handed out by an
/// [`Authenticator`](crate::auth::Authenticator).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: SecretString,
    pub user_id: String,
    /// Expiry as unix milliseconds.
    pub expires_at: i64,
}

impl Credentials {
    pub fn new(token: SecretString, user_id: impl Into<String>, expires_at: i64) -> Self {
        Self {
            token,
            user_id: user_id.into(),
            expires_at,
        }
    }
}

// ── Device ───────────────────────────────────────────────────────────

/// A device the account can address.
///
/// Only the three routing fields are required; everything else the cloud
/// returns lands in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub did: String,
    pub resource: String,
    /// Device class token, required for command routing.
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl DeviceInfo {
    pub fn new(
        did: impl Into<String>,
        resource: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self {
            did: did.into(),
            resource: resource.into(),
            class: class.into(),
            name: None,
            nick: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Build a record from a raw device-list entry.
    pub fn from_value(raw: &Value) -> Result<Self, Error> {
        Self::deserialize(raw).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: raw.to_string(),
        })
    }

    /// The `company` tag reported by the cloud, if any.
    pub fn company(&self) -> Option<&str> {
        self.extra.get("company").and_then(Value::as_str)
    }

    /// Best human-readable label: nick, then name, then did.
    pub fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.did)
    }
}
