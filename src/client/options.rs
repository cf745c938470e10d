//! Optional execution parameters shared by execute and schedule.
//!
//! Options are free-form: anything Azkaban accepts can be set by name. Falsy
//! values are dropped before sending so the server applies its own default.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// What happens to the rest of a flow after a job fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    FinishCurrent,
    CancelAll,
    FinishPossible,
}

impl FailureAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureAction::FinishCurrent => "finishCurrent",
            FailureAction::CancelAll => "cancelImmediately",
            FailureAction::FinishPossible => "finishPossible",
        }
    }
}

/// Behaviour when the flow is already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrentOption {
    Ignore,
    Pipeline,
    Skip,
}

impl ConcurrentOption {
    pub fn as_str(self) -> &'static str {
        match self {
            ConcurrentOption::Ignore => "ignore",
            ConcurrentOption::Pipeline => "pipeline",
            ConcurrentOption::Skip => "skip",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionOptions(BTreeMap<String, Value>);

impl ExecutionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set any option by its wire name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn failure_action(self, action: FailureAction) -> Self {
        self.set("failureAction", action.as_str())
    }

    pub fn failure_emails<S: AsRef<str>>(self, emails: &[S]) -> Self {
        self.set("failureEmails", join(emails))
    }

    pub fn success_emails<S: AsRef<str>>(self, emails: &[S]) -> Self {
        self.set("successEmails", join(emails))
    }

    pub fn notify_failure_first(self, enabled: bool) -> Self {
        self.set("notifyFailureFirst", enabled)
    }

    pub fn notify_failure_last(self, enabled: bool) -> Self {
        self.set("notifyFailureLast", enabled)
    }

    pub fn concurrent_option(self, option: ConcurrentOption) -> Self {
        self.set("concurrentOption", option.as_str())
    }

    pub fn pipeline_level(self, level: u32) -> Self {
        self.set("pipelineLevel", level)
    }

    /// Jobs to skip in this run. Sent as a JSON array.
    pub fn disabled<S: AsRef<str>>(self, jobs: &[S]) -> Self {
        let jobs: Vec<Value> = jobs
            .iter()
            .map(|j| Value::String(j.as_ref().to_string()))
            .collect();
        self.set("disabled", Value::Array(jobs))
    }

    /// Override one flow property for this run.
    pub fn flow_override(self, property: &str, value: impl Into<String>) -> Self {
        self.set(format!("flowOverride[{}]", property), value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(is_falsy)
    }

    /// Wire parameters with falsy entries stripped.
    pub fn to_params(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter(|(_, value)| !is_falsy(value))
            .map(|(name, value)| (name.clone(), wire_value(value)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ExecutionOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn wire_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}
