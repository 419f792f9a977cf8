//! Base RPC client.
//!
//! Provides `call()`: one action plus its parameters, POSTed as a JSON object
//! to the node's RPC endpoint, with the response decoded and coerced.
//! Supports Basic auth, configurable timeout, and retry with exponential
//! backoff.

use crate::coerce::coerce;
use crate::error::RpcError;
use crate::params::Params;
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use base64::Engine;
use nano_types::Unit;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Default node RPC URL.
pub const DEFAULT_URL: &str = nano_types::DEFAULT_RPC_URL;

/// Configuration for an RPC client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Endpoint URL (e.g., `http://localhost:7076`). Must be http or https.
    pub url: String,
    /// Optional username for Basic auth.
    pub username: Option<String>,
    /// Optional password for Basic auth.
    pub password: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Number of retry attempts on transient failure.
    pub retries: u32,
    /// Initial delay between retries (doubles each attempt).
    pub retry_delay: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Unit used when amounts are parsed or displayed without an explicit one.
    pub default_unit: Unit,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(60),
            retries: 0,
            retry_delay: Duration::from_millis(500),
            user_agent: concat!("nano-rpc/", env!("CARGO_PKG_VERSION")).to_string(),
            default_unit: Unit::Nano,
        }
    }
}

/// Check that `uri` is an absolute http(s) URL with a host.
fn validate_endpoint(uri: &str) -> Result<String, RpcError> {
    let invalid = |reason: String| RpcError::Configuration {
        uri: uri.to_string(),
        reason,
    };
    let url = Url::parse(uri).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}, use http or https"))),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(uri.trim_end_matches('/').to_string())
}

/// Blocking RPC client for a Nano node.
///
/// Holds only immutable configuration; each `call` builds its own request,
/// so one client can be shared behind an `Arc`.
pub struct RpcClient {
    transport: Box<dyn HttpTransport>,
    config: RpcConfig,
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.config.url)
            .finish_non_exhaustive()
    }
}

impl RpcClient {
    /// Create a new client for the given URL.
    pub fn new(url: &str) -> Result<Self, RpcError> {
        Self::with_config(RpcConfig {
            url: url.to_string(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        validate_endpoint(&config.url)?;
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Create a client that sends its requests through `transport`.
    pub fn with_transport(
        mut config: RpcConfig,
        transport: impl HttpTransport + 'static,
    ) -> Result<Self, RpcError> {
        config.url = validate_endpoint(&config.url)?;
        Ok(Self {
            transport: Box::new(transport),
            config,
        })
    }

    /// Get the configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    fn auth_header(&self) -> Option<String> {
        match (&self.config.username, &self.config.password) {
            (Some(user), Some(pass)) => {
                let creds = format!("{}:{}", user, pass);
                let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
                Some(format!("Basic {}", encoded))
            }
            _ => None,
        }
    }

    fn build_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), self.config.user_agent.clone()),
        ];
        if let Some(auth) = self.auth_header() {
            headers.push(("Authorization".to_string(), auth));
        }
        headers
    }

    /// Call an action and return the coerced response.
    ///
    /// Error payloads inside a 2xx response (`{"error": "..."}`) are returned
    /// as-is; the facades decide what they mean.
    pub fn call(&self, action: &str, params: Params) -> Result<Value, RpcError> {
        let request = HttpRequest {
            url: self.config.url.clone(),
            headers: self.build_headers(),
            body: params.to_body(action).to_string(),
        };
        log::debug!("rpc {} -> {}", action, self.config.url);
        log::trace!("rpc request body: {}", request.body);

        let attempts = self.config.retries + 1;
        let mut attempt = 0;
        loop {
            match self.do_call(action, &request) {
                Ok(val) => return Ok(val),
                Err(e) if e.is_transient() && attempt + 1 < attempts => {
                    let delay = self.config.retry_delay * 2u32.saturating_pow(attempt);
                    log::warn!(
                        "rpc {} failed (attempt {}/{}): {}; retrying in {:?}",
                        action,
                        attempt + 1,
                        attempts,
                        e,
                        delay
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn do_call(&self, action: &str, request: &HttpRequest) -> Result<Value, RpcError> {
        let resp = self
            .transport
            .post(request)
            .map_err(|source| RpcError::Http {
                action: action.to_string(),
                url: request.url.clone(),
                source,
            })?;

        if !resp.is_success() {
            log::warn!("rpc {} returned HTTP {}", action, resp.status);
            return Err(RpcError::HttpStatus {
                action: action.to_string(),
                url: request.url.clone(),
                status: resp.status,
                body: resp.body.chars().take(500).collect(),
            });
        }

        log::trace!("rpc {} response body: {}", action, resp.body);
        let val: Value = serde_json::from_str(&resp.body)?;
        Ok(coerce(val))
    }
}
