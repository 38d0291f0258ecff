// Cloud command gateway
//
// `ApiClient` sequences every operation the same way: fetch a credential
// snapshot, shape the request, hand it to the transport, validate. Device
// commands skip validation because their replies are command-specific.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use crate::auth::Authenticator;
use crate::clock::{Clock, SystemClock};
use crate::command::Command;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::envelope::build_envelope;
use crate::error::Error;
use crate::models::{DeviceInfo, SUPPORTED_COMPANY};
use crate::paths;
use crate::transport::{Request, Transport};
use crate::validate::{SuccessCode, take_payload, validate};

/// Headers sent with every device command.
pub const COMMAND_HEADERS: &[(&str, &str)] = &[(
    "User-Agent",
    "Dalvik/2.1.0 (Linux; U; Android 5.1.1; A5010 Build/LMY48Z)",
)];

const GETTING_DEVICES: &str = "getting devices";
const GETTING_PRODUCT_IOT_MAP: &str = "getting product iot map";

/// Public entry point for talking to the cloud API.
///
/// Holds no mutable state; share it behind an `Arc` and call concurrently.
/// Nothing is cached, every call goes to the network.
pub struct ApiClient<A, T> {
    authenticator: A,
    transport: T,
    clock: Arc<dyn Clock>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<A: Authenticator, T: Transport> ApiClient<A, T> {
    pub fn new(transport: T, authenticator: A) -> Self {
        Self {
            authenticator,
            transport,
            clock: Arc::new(SystemClock),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Replace the time source used for envelope timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the sink for skipped-device and failure reports.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// List the account's devices this gateway can command.
    ///
    /// Entries from other companies, and entries missing `did`, `resource`
    /// or `class`, are reported to diagnostics and dropped. Server order is
    /// preserved.
    pub async fn list_devices(&self) -> Result<Vec<DeviceInfo>, Error> {
        let credentials = self.authenticator.authenticate().await?;
        let body = json!({
            "userid": credentials.user_id,
            "todo": "GetGlobalDeviceList",
        });

        let resp = self
            .transport
            .post(Request::new(paths::APPSVR_APP, body), &credentials)
            .await?;
        let resp = validate(resp, SuccessCode::Zero, GETTING_DEVICES, &*self.diagnostics)?;

        let Value::Array(entries) = take_payload(resp, "devices", GETTING_DEVICES)? else {
            return Err(Error::MalformedResponse {
                message: format!("`devices` is not a list on {GETTING_DEVICES}"),
            });
        };

        let mut devices = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.get("company").and_then(Value::as_str) != Some(SUPPORTED_COMPANY) {
                self.diagnostics.device_skipped(&entry);
                continue;
            }
            match DeviceInfo::from_value(&entry) {
                Ok(device) => devices.push(device),
                Err(err) => {
                    debug!(%err, "device entry lacks required fields");
                    self.diagnostics.device_skipped(&entry);
                }
            }
        }

        debug!(count = devices.len(), "listed devices");
        Ok(devices)
    }

    /// Fetch the map from device class id to product description.
    ///
    /// Duplicate class ids resolve to the last entry in the reply.
    pub async fn get_product_iot_map(&self) -> Result<HashMap<String, Value>, Error> {
        let credentials = self.authenticator.authenticate().await?;

        let resp = self
            .transport
            .post(Request::new(paths::PIM_PRODUCT_IOT_MAP, json!({})), &credentials)
            .await?;
        let resp = validate(
            resp,
            SuccessCode::ZeroOrZeroString,
            GETTING_PRODUCT_IOT_MAP,
            &*self.diagnostics,
        )?;

        let Value::Array(entries) = take_payload(resp, "data", GETTING_PRODUCT_IOT_MAP)? else {
            return Err(Error::MalformedResponse {
                message: format!("`data` is not a list on {GETTING_PRODUCT_IOT_MAP}"),
            });
        };

        let mut products = HashMap::with_capacity(entries.len());
        for mut entry in entries {
            let Some(class_id) = entry.get("classid").and_then(Value::as_str).map(str::to_owned)
            else {
                return Err(Error::MalformedResponse {
                    message: format!("entry without `classid` on {GETTING_PRODUCT_IOT_MAP}"),
                });
            };
            let product = entry.get_mut("product").map(Value::take).unwrap_or_default();
            products.insert(class_id, product);
        }

        Ok(products)
    }

    /// Send `command` to `device` and return the raw reply.
    ///
    /// The reply is not validated; success semantics are command-specific.
    pub async fn send_command<C>(&self, command: &C, device: &DeviceInfo) -> Result<Value, Error>
    where
        C: Command + ?Sized,
    {
        let mut envelope = build_envelope(command, device, self.clock.timestamp());
        let credentials = self.authenticator.authenticate().await?;
        envelope.append_credentials(&credentials);

        debug!(command = command.name(), did = %device.did, "sending command");

        let request = Request::from(envelope).with_headers(COMMAND_HEADERS);
        self.transport.post(request, &credentials).await
    }
}
