//! Raw command handler.

use ecovacs_api::{CommandArgs, CustomCommand};
use tracing::debug;

use crate::cli::{GlobalOpts, SendArgs};
use crate::error::CliError;
use crate::output;

use super::Client;

/// Parse `--args` into command arguments; absent means none.
fn parse_args(raw: Option<&str>) -> Result<CommandArgs, CliError> {
    match raw {
        None => Ok(CommandArgs::none()),
        Some(text) => {
            let value: serde_json::Value = serde_json::from_str(text)?;
            Ok(CommandArgs::try_from(value)?)
        }
    }
}

pub async fn handle(client: &Client, args: SendArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let command = CustomCommand::new(args.command, parse_args(args.args.as_deref())?);

    let devices = client.list_devices().await?;
    let device = devices
        .into_iter()
        .find(|d| d.did == args.did)
        .ok_or(CliError::DeviceNotFound { did: args.did })?;

    debug!(did = %device.did, class = %device.class, "resolved target device");

    let resp = client.send_command(&command, &device).await?;
    let out = output::render_value(&global.output, &resp)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
