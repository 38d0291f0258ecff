// ecovacs-api: Async gateway for the Ecovacs cloud device API

pub mod auth;
pub mod client;
pub mod clock;
pub mod command;
pub mod diagnostics;
pub mod envelope;
pub mod error;
pub mod models;
pub mod paths;
pub mod region;
pub mod transport;
pub mod validate;

pub use auth::{Authenticator, StaticAuthenticator};
pub use client::ApiClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{Command, CommandArgs, CustomCommand, DeviceCommand};
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use error::Error;
pub use models::{Configuration, Credentials, DeviceInfo};
pub use region::resolve_portal_url;
pub use transport::{HttpTransport, Request, Transport, TransportConfig};
