//! Mock in-memory transport for testing
//!
//! `MockTransport` records every request it is given and answers from a
//! queue of canned responses. It lets the resource adapter and the MCP tools
//! be exercised without a Redmine instance.
//!
//! # Usage
//!
//! ```ignore
//! use redmine_mcp::redmine::mock_transport::MockTransport;
//!
//! let transport = MockTransport::new();
//! transport.push_json(serde_json::json!({"issues": [], "total_count": 0})).await;
//! let client = RedmineClient::new(Arc::new(transport.clone()));
//! client.list_issues(&Default::default()).await?;
//! assert_eq!(transport.request_count().await, 1);
//! ```

use crate::error::{RedmineMcpError, Result};
use crate::redmine::transport::{RedmineTransport, RemoteRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A canned answer for the next request
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Successful response with a JSON body
    Json(Value),
    /// Non-success HTTP status
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },
    /// The request never reached the server
    TransportFailure(String),
}

/// Mock transport that records requests and replays queued responses
///
/// When the queue is empty every request succeeds with an empty JSON object.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    requests: Arc<RwLock<Vec<RemoteRequest>>>,
    responses: Arc<RwLock<VecDeque<MockResponse>>>,
}

impl MockTransport {
    /// Create a mock with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub async fn push(&self, response: MockResponse) {
        self.responses.write().await.push_back(response);
    }

    /// Queue a successful JSON response
    pub async fn push_json(&self, value: Value) {
        self.push(MockResponse::Json(value)).await;
    }

    /// Queue a non-success status
    pub async fn push_status(&self, status: u16, body: impl Into<String>) {
        self.push(MockResponse::Status {
            status,
            body: body.into(),
        })
        .await;
    }

    /// All requests received so far, oldest first
    pub async fn requests(&self) -> Vec<RemoteRequest> {
        self.requests.read().await.clone()
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// The most recent request, if any
    pub async fn last_request(&self) -> Option<RemoteRequest> {
        self.requests.read().await.last().cloned()
    }
}

#[async_trait]
impl RedmineTransport for MockTransport {
    async fn send(&self, request: RemoteRequest) -> Result<Value> {
        self.requests.write().await.push(request);

        match self.responses.write().await.pop_front() {
            Some(MockResponse::Json(value)) => Ok(value),
            Some(MockResponse::Status { status, body }) => {
                Err(RedmineMcpError::Remote { status, body })
            }
            Some(MockResponse::TransportFailure(message)) => {
                Err(RedmineMcpError::Transport(message))
            }
            None => Ok(Value::Object(serde_json::Map::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_requests_and_replays_in_order() {
        let transport = MockTransport::new();
        transport.push_json(json!({"first": true})).await;
        transport.push_status(404, "").await;

        let first = transport.send(RemoteRequest::get("/a.json")).await.unwrap();
        assert_eq!(first, json!({"first": true}));

        let second = transport.send(RemoteRequest::get("/b.json")).await;
        assert_eq!(second.unwrap_err().remote_status(), Some(404));

        let third = transport.send(RemoteRequest::get("/c.json")).await.unwrap();
        assert_eq!(third, json!({}));

        let paths: Vec<String> = transport
            .requests()
            .await
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["/a.json", "/b.json", "/c.json"]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let transport = MockTransport::new();
        let clone = transport.clone();
        clone.send(RemoteRequest::get("/x.json")).await.unwrap();
        assert_eq!(transport.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let transport = MockTransport::new();
        transport
            .push(MockResponse::TransportFailure("connection refused".to_string()))
            .await;

        let err = transport
            .send(RemoteRequest::get("/x.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, RedmineMcpError::Transport(_)));
    }
}
