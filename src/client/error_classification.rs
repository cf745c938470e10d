//! Response classification.
//!
//! Every reply goes through the same ordered checks before the client looks
//! at its payload:
//!
//! 1. the login page (the server rendered its login form instead of answering)
//! 2. the literal missing-credentials text
//! 3. JSON decoding, where an undecodable body counts as an empty object
//! 4. an `error` key (`"session"` means the token is no longer valid)
//! 5. `status == "error"` with its `message`
//! 6. an empty object, unless the endpoint legitimately answers with nothing
//!
//! The order matters: an expired session yields HTML, which must not be
//! mistaken for an empty body.

use crate::protocol::{Classification, Operation};
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Line the server emits only when it renders its login page.
pub const LOGIN_PAGE_MARKER: &str =
    "  <script type=\"text/javascript\" src=\"/js/azkaban/view/login.js\"></script>";

/// Body the server returns when a login carries no credentials.
pub const MISSING_CREDENTIALS: &str = "Login error. Need username and password";

pub const EMPTY_RESPONSE: &str = "Empty response";

const LOGIN_PAGE_MESSAGE: &str = "Server answered with its login page, log in again";

/// Outcome of running a body through the funnel.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Success(Value),
    SessionExpired(String),
    Rejected(String),
}

impl Verdict {
    pub fn into_result(self, operation: Operation) -> Result<Value> {
        match self {
            Verdict::Success(payload) => Ok(payload),
            Verdict::SessionExpired(message) => Err(Error::Session(message)),
            Verdict::Rejected(message) => Err(Error::api(operation, message)),
        }
    }
}

/// Steps 1 and 2: detect a dead session from the raw text.
pub fn login_page_verdict(body: &str) -> Option<Verdict> {
    if body.lines().any(|line| line == LOGIN_PAGE_MARKER) {
        return Some(Verdict::SessionExpired(LOGIN_PAGE_MESSAGE.to_string()));
    }
    if body == MISSING_CREDENTIALS {
        return Some(Verdict::SessionExpired(body.to_string()));
    }
    None
}

/// Run the whole funnel over `body`.
pub fn classify(body: &str, allow_empty: bool) -> Verdict {
    if let Some(verdict) = login_page_verdict(body) {
        return verdict;
    }

    let payload = match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) | Err(_) => Value::Object(Map::new()),
        Ok(value) => value,
    };

    if let Value::Object(map) = &payload {
        if let Some(error) = map.get("error") {
            if error.as_str() == Some("session") {
                return Verdict::SessionExpired("session".to_string());
            }
            return Verdict::Rejected(value_text(error));
        }

        if map.get("status").and_then(Value::as_str) == Some("error") {
            let message = map
                .get("message")
                .map(value_text)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Verdict::Rejected(message);
        }

        if map.is_empty() && !allow_empty {
            return Verdict::Rejected(EMPTY_RESPONSE.to_string());
        }
    }

    Verdict::Success(payload)
}

/// Classify a reply to `operation` the way its endpoint declares.
///
/// [`Classification::LoginPageOnly`] endpoints return the raw body as a
/// JSON string; the rest go through the whole funnel, honouring the
/// endpoint's empty-body opt-out.
pub fn check(operation: Operation, body: &str) -> Result<Value> {
    let endpoint = operation.endpoint();
    match endpoint.classification {
        Classification::Full => classify(body, endpoint.allow_empty).into_result(operation),
        Classification::LoginPageOnly => {
            check_login_page(body)?;
            Ok(Value::String(body.to_string()))
        }
    }
}

/// Login-page checks only, for endpoints whose success body is not JSON.
pub fn check_login_page(body: &str) -> Result<()> {
    match login_page_verdict(body) {
        Some(Verdict::SessionExpired(message)) => Err(Error::Session(message)),
        _ => Ok(()),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
