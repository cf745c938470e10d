//! Generic request assembly.
//!
//! One routine serves every operation: the endpoint descriptor supplies the
//! method, path and selector parameter, the caller supplies the rest.

use super::endpoints::{Endpoint, HttpMethod, Operation};

/// Parameter names whose values never reach the logs.
const REDACTED_PARAMS: [&str; 2] = ["password", "session.id"];

/// File sent as one part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub field: &'static str,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// One fully-assembled outbound call, independent of any HTTP library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub operation: Operation,
    pub method: HttpMethod,
    pub host: String,
    pub path: &'static str,
    /// Query string for GET, form fields for POST. Order is preserved.
    pub params: Vec<(String, String)>,
    pub attachment: Option<Attachment>,
}

impl ApiRequest {
    pub fn url(&self) -> String {
        format!("{}{}", self.host, self.path)
    }

    /// First value sent under `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters with credentials masked, for debug logging.
    pub fn redacted_params(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| {
                if REDACTED_PARAMS.contains(&k.as_str()) {
                    (k.as_str(), "***")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect()
    }
}

/// Builds an [`ApiRequest`] from an operation's endpoint descriptor.
pub struct RequestBuilder {
    operation: Operation,
    endpoint: Endpoint,
    host: String,
    params: Vec<(String, String)>,
    attachment: Option<Attachment>,
}

impl RequestBuilder {
    /// Start a request for `operation` against `host`.
    ///
    /// `session.id` goes first when the endpoint is authenticated, followed
    /// by the endpoint's selector parameter.
    pub fn new(operation: Operation, host: &str, session_id: Option<&str>) -> Self {
        let endpoint = operation.endpoint();
        let mut params = Vec::new();
        if endpoint.authenticated {
            if let Some(id) = session_id {
                params.push(("session.id".to_string(), id.to_string()));
            }
        }
        if let Some((key, value)) = endpoint.action {
            params.push((key.to_string(), value.to_string()));
        }
        Self {
            operation,
            endpoint,
            host: host.to_string(),
            params,
            attachment: None,
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add `key` only when a value is present.
    pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.params.extend(params);
        self
    }

    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn build(self) -> ApiRequest {
        ApiRequest {
            operation: self.operation,
            method: self.endpoint.method,
            host: self.host,
            path: self.endpoint.path,
            params: self.params,
            attachment: self.attachment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_request_leads_with_session_and_action() {
        let req = RequestBuilder::new(Operation::Cancel, "http://az:8081", Some("tok"))
            .param("execid", 42)
            .build();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url(), "http://az:8081/executor");
        assert_eq!(
            req.params,
            vec![
                ("session.id".to_string(), "tok".to_string()),
                ("ajax".to_string(), "cancelFlow".to_string()),
                ("execid".to_string(), "42".to_string()),
            ]
        );
    }

    #[test]
    fn login_never_sends_a_session_id() {
        let req = RequestBuilder::new(Operation::Login, "http://az", Some("stale"))
            .param("username", "alice")
            .param("password", "secret")
            .build();
        assert_eq!(req.param("session.id"), None);
        assert_eq!(req.param("action"), Some("login"));
        assert_eq!(req.url(), "http://az/");
    }

    #[test]
    fn redaction_masks_credentials() {
        let req = RequestBuilder::new(Operation::Login, "http://az", None)
            .param("username", "alice")
            .param("password", "secret")
            .build();
        let shown = req.redacted_params();
        assert!(shown.contains(&("username", "alice")));
        assert!(shown.contains(&("password", "***")));
    }

    #[test]
    fn optional_params_are_skipped_when_absent() {
        let req = RequestBuilder::new(Operation::FetchFlowExecutionUpdates, "http://az", Some("t"))
            .param("execid", 7)
            .param_opt::<i64>("lastUpdateTime", None)
            .build();
        assert_eq!(req.param("lastUpdateTime"), None);
    }

    #[test]
    fn fetch_projects_keeps_fixed_query() {
        let req = RequestBuilder::new(Operation::FetchProjects, "http://az", Some("t")).build();
        assert_eq!(req.url(), "http://az/index?all");
        assert_eq!(req.params, vec![("session.id".to_string(), "t".to_string())]);
    }
}
