//! Summaries returned by state-changing operations, plus payload field lookup.

use crate::protocol::Operation;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// Result of uploading a project archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub project: String,
    pub project_id: Option<u64>,
    pub version: String,
}

/// Result of scheduling a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReceipt {
    pub schedule_id: u64,
    pub message: String,
}

/// Result of triggering a flow execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionReceipt {
    pub exec_id: Option<u64>,
    pub message: String,
}

pub(crate) fn field<'a>(
    operation: Operation,
    payload: &'a Value,
    name: &'static str,
) -> Result<&'a Value> {
    payload.get(name).ok_or(Error::MissingField {
        operation,
        field: name,
    })
}

/// String form of a field, rendering numbers as text.
pub(crate) fn field_text(
    operation: Operation,
    payload: &Value,
    name: &'static str,
) -> Result<String> {
    Ok(match field(operation, payload, name)? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Numeric id that the server may send as a number or a numeric string.
pub(crate) fn field_id(operation: Operation, payload: &Value, name: &'static str) -> Result<u64> {
    as_id(field(operation, payload, name)?).ok_or(Error::MissingField {
        operation,
        field: name,
    })
}

pub(crate) fn as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
