//! Mock HTTP server setup for integration tests

use azkaban_client::{AzkabanClient, ClientConfig, Session};
use mockito::{Matcher, Mock, Server, ServerGuard};

pub const SESSION_ID: &str = "4a1c6b1e-session";

/// Test fixture that manages a mock Azkaban server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub fn new() -> Self {
        let server = Server::new();
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client over real HTTP, not logged in. Ignores AZKABAN_* env vars.
    pub fn client(&self) -> AzkabanClient {
        AzkabanClient::builder()
            .config(ClientConfig::default())
            .build()
            .expect("Failed to build client")
    }

    /// Client over real HTTP that already holds a session for this server.
    pub fn logged_client(&self) -> AzkabanClient {
        AzkabanClient::builder()
            .config(ClientConfig::default())
            .session(Session::new(&self.base_url, "alice", SESSION_ID))
            .build()
            .expect("Failed to build client")
    }

    /// Mock a GET whose query carries the session plus `params`.
    pub fn mock_get(&mut self, path: &str, params: &[(&str, &str)], body: &str) -> Mock {
        let mut matchers = vec![Matcher::UrlEncoded(
            "session.id".to_string(),
            SESSION_ID.to_string(),
        )];
        matchers.extend(
            params
                .iter()
                .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string())),
        );
        self.server
            .mock("GET", path)
            .match_query(Matcher::AllOf(matchers))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    /// Mock a url-encoded form POST containing `params`.
    pub fn mock_post(&mut self, path: &str, params: &[(&str, &str)], body: &str) -> Mock {
        let matchers = params
            .iter()
            .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
            .collect();
        self.server
            .mock("POST", path)
            .match_body(Matcher::AllOf(matchers))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }
}
