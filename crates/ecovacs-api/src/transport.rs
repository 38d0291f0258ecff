// Portal transport
//
// `Transport` is the seam between request shaping and the network. The
// bundled `HttpTransport` resolves the regional portal URL, stamps the
// credential `auth` block into the body, and POSTs JSON with reqwest.

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::{debug, trace};
use url::Url;

use crate::envelope::{Envelope, QueryParams};
use crate::error::Error;
use crate::models::{Configuration, Credentials};
use crate::region::resolve_portal_url;

/// Realm reported in the `auth` block.
pub const REALM: &str = "ecouser.net";

// ── Request ──────────────────────────────────────────────────────────

/// A POST against a portal path.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub path: &'static str,
    pub body: Value,
    pub query: QueryParams,
    pub headers: Vec<(&'static str, &'static str)>,
}

impl Request {
    pub fn new(path: &'static str, body: Value) -> Self {
        Self {
            path,
            body,
            query: QueryParams::new(),
            headers: Vec::new(),
        }
    }

    pub fn with_headers(mut self, headers: &[(&'static str, &'static str)]) -> Self {
        self.headers.extend_from_slice(headers);
        self
    }
}

impl From<Envelope> for Request {
    fn from(envelope: Envelope) -> Self {
        Self {
            path: envelope.path,
            body: envelope.body,
            query: envelope.query,
            headers: Vec::new(),
        }
    }
}

/// Performs authenticated POSTs and returns the decoded JSON reply.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        request: Request,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Value, Error>> + Send;
}

// ── Configuration ────────────────────────────────────────────────────

/// Shared settings for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Set to `false` to accept invalid certificates.
    pub verify_tls: bool,
    /// Replaces the regional portal API root (proxies, tests).
    pub portal_url: Option<Url>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            verify_tls: true,
            portal_url: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_tls);
        Ok(builder.build()?)
    }
}

// ── HTTP transport ───────────────────────────────────────────────────

pub struct HttpTransport {
    http: reqwest::Client,
    config: Configuration,
    portal_url: Option<Url>,
}

impl HttpTransport {
    pub fn new(config: Configuration, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            config,
            portal_url: transport.portal_url.clone(),
        })
    }

    /// Create a transport with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, config: Configuration, portal_url: Option<Url>) -> Self {
        Self {
            http,
            config,
            portal_url,
        }
    }

    /// Full URL for a portal path.
    pub fn url_for(&self, path: &str) -> Result<Url, Error> {
        match &self.portal_url {
            Some(base) => Ok(base.join(path)?),
            None => resolve_portal_url(&self.config, path),
        }
    }

    fn auth_block(&self, credentials: &Credentials) -> Value {
        json!({
            "with": "users",
            "userid": credentials.user_id,
            "realm": REALM,
            "token": credentials.token.expose_secret(),
            "resource": self.config.device_id(),
        })
    }
}

impl Transport for HttpTransport {
    async fn post(&self, request: Request, credentials: &Credentials) -> Result<Value, Error> {
        let url = self.url_for(request.path)?;

        let mut body = request.body;
        if let Value::Object(fields) = &mut body {
            fields.insert("auth".to_owned(), self.auth_block(credentials));
        }

        debug!("POST {}", url);

        let mut builder = self.http.post(url).query(&request.query).json(&body);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        trace!(body = %text, "portal reply");

        serde_json::from_str(&text).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: text,
        })
    }
}
