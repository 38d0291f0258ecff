use thiserror::Error;

/// Top-level error type for the `ecovacs-api` crate.
///
/// Covers every failure mode the gateway can surface: authentication,
/// transport, malformed replies, and failures reported by the cloud API
/// itself. The CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Cloud API ───────────────────────────────────────────────────
    /// The API answered with a non-success `code`.
    ///
    /// The message always reads `failure {error} ({errno}) on {operation}`.
    #[error("{message}")]
    Api { message: String },

    // ── Authentication ──────────────────────────────────────────────
    /// No usable credentials could be produced.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing or joining error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The portal answered with a non-2xx status.
    #[error("HTTP {status} from portal: {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The reply parsed as JSON but lacks a field the gateway relies on.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    // ── Input ───────────────────────────────────────────────────────
    /// Command arguments that cannot be sent as `payload.body.data`.
    #[error("Invalid command arguments: {message}")]
    InvalidArgs { message: String },
}

impl Error {
    /// Returns `true` if this error indicates the credentials are no longer
    /// usable and a fresh login might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Http { status: 401, .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_message_verbatim() {
        let err = Error::Api {
            message: "failure bad (500) on getting devices".into(),
        };
        assert_eq!(err.to_string(), "failure bad (500) on getting devices");
        assert!(!err.is_transient());
    }

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Http {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_transient());
        assert!(!err.is_auth_expired());
    }

    #[test]
    fn unauthorized_counts_as_expired_auth() {
        let err = Error::Http {
            status: 401,
            body: "token expired".into(),
        };
        assert!(err.is_auth_expired());
    }
}
