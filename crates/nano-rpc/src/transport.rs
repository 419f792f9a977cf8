//! HTTP transport.
//!
//! [`RpcClient`](crate::RpcClient) only needs "POST this body, give me the
//! status and body back". [`ReqwestTransport`] is the default blocking
//! implementation; anything else (a proxy, a test double) can implement
//! [`HttpTransport`].

use crate::client::RpcConfig;
use crate::error::{RpcError, TransportFailure};
use reqwest::blocking::Client;

/// One outgoing POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking "send POST, get status + body" capability.
///
/// An `Err` means no response was obtained at all (connection refused,
/// timeout, TLS failure); non-2xx responses are returned as `Ok`.
pub trait HttpTransport: Send + Sync {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure>;
}

/// [`HttpTransport`] backed by `reqwest`'s blocking client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &RpcConfig) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| RpcError::Configuration {
                uri: config.url.clone(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let resp = builder.body(request.body.clone()).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            url: "http://localhost:7076".into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: "{}".into(),
        };
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("user-agent"), None);
    }

    #[test]
    fn test_success_range() {
        let resp = |status| HttpResponse {
            status,
            body: String::new(),
        };
        assert!(resp(200).is_success());
        assert!(resp(204).is_success());
        assert!(!resp(301).is_success());
        assert!(!resp(500).is_success());
    }
}
