//! Portal URL handler.

use ecovacs_api::resolve_portal_url;

use crate::cli::{GlobalOpts, PortalUrlArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &PortalUrlArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let region = config::region(global)?;
    let url = resolve_portal_url(&region, &args.path)?;
    output::print_output(url.as_str(), global.quiet);
    Ok(())
}
