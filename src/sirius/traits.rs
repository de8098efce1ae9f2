//! Trait abstraction for the Sirius transport to enable mocking in tests

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

/// A request ready to be sent, relative to the adapter's base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: String::new(),
            headers: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What came back from Sirius: the status and the body, if it was JSON
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult {
    pub status: u16,
    pub body: Option<Value>,
}

impl RequestResult {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }
}

/// No response was received
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid Sirius base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to Sirius failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request to Sirius timed out")]
    Timeout,
}

/// Sends requests to the Sirius API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RequestResult, TransportError>;
}
