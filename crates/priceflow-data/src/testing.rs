//! In-memory transport for tests.

use crate::transport::Transport;
use crate::{FetchError, Method, RequestBuilder, Response};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// What a test sees of a sent request.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub method: Method,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

/// Replays queued responses in order and records every request.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<Response, FetchError>>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: Value) {
        let body = serde_json::to_vec(&body).unwrap();
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(Response::new(status, HashMap::new(), body)));
    }

    pub fn fail(&self, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(FetchError::Request(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(Recorded {
            method: request.method(),
            url: request.url().to_string(),
            authorization: request.header_value("Authorization").map(str::to_string),
            content_type: request.header_value("Content-Type").map(str::to_string),
            body: request
                .body_bytes()
                .map(|b| serde_json::from_slice(b).unwrap()),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Request("no response queued".to_string())))
    }
}
