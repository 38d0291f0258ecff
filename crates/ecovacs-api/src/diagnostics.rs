// Gateway diagnostics
//
// The client reports skipped devices and rejected requests through an
// injected `Diagnostics` sink. Reporting never changes control flow.

use serde_json::Value;
use tracing::{debug, error};

pub trait Diagnostics: Send + Sync {
    /// A device-list entry was dropped because its company is unsupported.
    fn device_skipped(&self, device: &Value);

    /// A validated request came back with a non-success code.
    fn request_failed(&self, operation: &str, response: &Value);
}

/// Default sink: forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn device_skipped(&self, device: &Value) {
        debug!(%device, "skipping device as it is not supported");
    }

    fn request_failed(&self, operation: &str, response: &Value) {
        let code = response.get("code").unwrap_or(&Value::Null);
        error!(operation, %code, "request failed");
    }
}
