//! Scripted in-memory transport shared by the integration tests.

#![allow(dead_code)]

use nano_rpc::{HttpRequest, HttpResponse, HttpTransport, Nano, RpcConfig, TransportFailure};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

enum Reply {
    Status(u16, String),
    Refused,
}

/// Answers each POST with the next queued reply and records what was sent.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self::default()
    }

    /// Queue a 200 reply with `body` as its JSON.
    pub fn reply(&self, body: Value) -> &Self {
        self.reply_status(200, &body.to_string())
    }

    pub fn reply_status(&self, status: u16, body: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Status(status, body.to_string()));
        self
    }

    pub fn refuse(&self) -> &Self {
        self.replies.lock().unwrap().push_back(Reply::Refused);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Decoded bodies of every request sent so far.
    pub fn bodies(&self) -> Vec<Value> {
        self.requests()
            .iter()
            .map(|r| serde_json::from_str(&r.body).unwrap())
            .collect()
    }

    pub fn actions(&self) -> Vec<String> {
        self.bodies()
            .iter()
            .map(|b| b["action"].as_str().unwrap().to_string())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpTransport for MockTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Status(status, body)) => Ok(HttpResponse { status, body }),
            Some(Reply::Refused) => Err("connection refused".into()),
            None => Err("no scripted reply".into()),
        }
    }
}

/// A client wired to a fresh mock.
pub fn nano() -> (Nano, MockTransport) {
    nano_with(RpcConfig::default())
}

pub fn nano_with(config: RpcConfig) -> (Nano, MockTransport) {
    let mock = MockTransport::new();
    let nano = Nano::with_transport(config, mock.clone()).unwrap();
    (nano, mock)
}

pub const ACCOUNT: &str = "nano_1111111111111111111111111111111111111111111111111111hifc8npp";
pub const DESTINATION: &str = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";
pub const WALLET: &str = "000D1BAEC8EC208142C99059B393051BAC8380F9B5A2E6B2489A277D81789F3F";
pub const HASH: &str = "991CF190094C00F0B68E2E5F75F6BEE95A2E0BD93CEAA4A6734DB9F19B728948";
pub const SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
