//! In-process transports that record requests instead of hitting the network

use azkaban_client::protocol::ApiRequest;
use azkaban_client::transport::{RawResponse, Transport, TransportError};
use azkaban_client::{AzkabanClient, Session};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Records every request and answers with queued bodies (empty once drained).
#[derive(Default)]
pub struct RecordingTransport {
    replies: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(RawResponse::new(200, body));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RawResponse::new(200, "")))
    }
}

/// Fails every request as if the host were unreachable.
pub struct UnreachableTransport;

impl Transport for UnreachableTransport {
    fn execute(&self, _request: &ApiRequest) -> Result<RawResponse, TransportError> {
        Err(TransportError::Other("connection refused".to_string()))
    }
}

pub fn spy_client(spy: &Arc<RecordingTransport>, session: Session) -> AzkabanClient {
    AzkabanClient::builder()
        .transport(spy.clone())
        .session(session)
        .build()
        .expect("Failed to build client")
}

pub fn logged_session() -> Session {
    Session::new("http://azkaban:8081", "alice", "tok")
}
