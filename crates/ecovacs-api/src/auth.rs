use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::models::Credentials;

/// Source of credential snapshots.
///
/// Login, token refresh, and credential storage live behind this trait; the
/// gateway calls [`authenticate`](Self::authenticate) once per operation and
/// never caches the result.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self) -> impl Future<Output = Result<Credentials, Error>> + Send;
}

impl<A: Authenticator> Authenticator for Arc<A> {
    fn authenticate(&self) -> impl Future<Output = Result<Credentials, Error>> + Send {
        A::authenticate(self)
    }
}

/// Hands out a pre-acquired credential snapshot until it expires.
///
/// Suitable for tokens obtained out of band (config file, env var). An
/// `expires_at` of `0` means the token never expires.
pub struct StaticAuthenticator {
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl StaticAuthenticator {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self) -> Result<Credentials, Error> {
        let expires_at = self.credentials.expires_at;
        if expires_at > 0 && self.clock.timestamp_millis() >= expires_at {
            return Err(Error::Authentication {
                message: format!(
                    "token for user '{}' expired at {expires_at}",
                    self.credentials.user_id
                ),
            });
        }

        debug!(user_id = %self.credentials.user_id, "using static credentials");
        Ok(self.credentials.clone())
    }
}
