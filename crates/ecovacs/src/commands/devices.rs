//! Device list handler.

use ecovacs_api::DeviceInfo;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::Client;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "DID")]
    did: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Resource")]
    resource: String,
}

impl From<&DeviceInfo> for DeviceRow {
    fn from(d: &DeviceInfo) -> Self {
        Self {
            did: d.did.clone(),
            name: d.display_name().to_owned(),
            class: d.class.clone(),
            resource: d.resource.clone(),
        }
    }
}

pub async fn handle(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = client.list_devices().await?;
    let out = output::render_list(
        &global.output,
        &devices,
        |d| DeviceRow::from(d),
        |d| d.did.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
