//! Command dispatch and shared gateway construction.

pub mod config_cmd;
pub mod devices;
pub mod portal;
pub mod products;
pub mod send;

use ecovacs_api::{ApiClient, HttpTransport, StaticAuthenticator};

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

pub type Client = ApiClient<StaticAuthenticator, HttpTransport>;

/// Build a gateway for the active profile.
pub fn connect(global: &GlobalOpts) -> Result<Client, CliError> {
    let resolved = config::resolve(global)?;
    let transport = HttpTransport::new(resolved.configuration, &resolved.transport)?;
    Ok(ApiClient::new(
        transport,
        StaticAuthenticator::new(resolved.credentials),
    ))
}

/// Route a cloud-facing command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Devices => devices::handle(&connect(global)?, global).await,
        Command::Products => products::handle(&connect(global)?, global).await,
        Command::Send(args) => send::handle(&connect(global)?, args, global).await,
        Command::PortalUrl(args) => portal::handle(&args, global),
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Ok(()),
    }
}
