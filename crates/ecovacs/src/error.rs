//! CLI error types with miette diagnostics.
//!
//! Maps gateway and config errors into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use ecovacs_api::Error as ApiError;
use ecovacs_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Ecovacs portal")]
    #[diagnostic(
        code(ecovacs::connection_failed),
        help(
            "Check network access and the account country.\n\
             Try: ecovacs portal-url"
        )
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ecovacs::auth_failed),
        help("Refresh the token of the active profile and update `token` / `token_env`.")
    )]
    AuthFailed { message: String },

    #[error("No token configured for profile '{profile}'")]
    #[diagnostic(
        code(ecovacs::no_credentials),
        help("Set `token_env` (preferred) or `token` in the profile.")
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("device '{did}' not found")]
    #[diagnostic(
        code(ecovacs::not_found),
        help("Run: ecovacs devices to see available devices")
    )]
    DeviceNotFound { did: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(ecovacs::api_error))]
    Api { message: String },

    #[error(transparent)]
    #[diagnostic(code(ecovacs::response))]
    Response(ApiError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ecovacs::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ecovacs::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Config file: {path}"
        )
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(code(ecovacs::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(ecovacs::json), help("Pass --args as a JSON object or array."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::DeviceNotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Json(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Api { message } => Self::Api { message },
            ApiError::InvalidArgs { message } => Self::Validation {
                field: "args".into(),
                reason: message,
            },
            err if err.is_auth_expired() => Self::AuthFailed {
                message: match err {
                    ApiError::Authentication { message } => message,
                    ApiError::Http { body, .. } => body,
                    other => other.to_string(),
                },
            },
            err if err.is_transient() => Self::ConnectionFailed { source: err },
            other => Self::Response(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => Self::ProfileNotFound {
                name,
                available,
                path: String::new(),
            },
            other => Self::Config(other),
        }
    }
}
