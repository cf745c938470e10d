use crate::client::core::AzkabanClient;
use crate::client::session::Session;
use crate::config::ClientConfig;
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Starts from [`ClientConfig::from_env`]; explicit setters win over the
/// environment.
pub struct AzkabanClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    session: Session,
}

impl AzkabanClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::from_env(),
            transport: None,
            session: Session::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Check server certificates. Off by default since Azkaban usually runs
    /// behind a self-signed certificate.
    pub fn verify_tls(mut self, enable: bool) -> Self {
        self.config.verify_tls = enable;
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.config.proxy = Some(url.into());
        self
    }

    /// Use a custom transport instead of HTTP (primarily for testing).
    ///
    /// Timeout, TLS and proxy settings are ignored when a transport is given.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Start already logged in, e.g. with a session loaded from disk.
    pub fn session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn build(self) -> Result<AzkabanClient> {
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };
        Ok(AzkabanClient {
            transport,
            session: self.session,
        })
    }
}

impl Default for AzkabanClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
