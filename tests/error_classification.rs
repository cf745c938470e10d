//! Reply classification as seen through the public client API.

mod integration;

use azkaban_client::client::error_classification::{LOGIN_PAGE_MARKER, MISSING_CREDENTIALS};
use azkaban_client::{Error, ExecutionOptions, Operation, PermissionOptions};
use integration::recording::{logged_session, spy_client, RecordingTransport};

fn login_page() -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n{}\n  </head>\n  <body></body>\n</html>\n",
        LOGIN_PAGE_MARKER
    )
}

#[test]
fn login_page_is_a_session_error_everywhere() {
    let spy = RecordingTransport::new();
    let client = spy_client(&spy, logged_session());

    spy.reply(&login_page());
    assert!(client.fetch_projects().unwrap_err().is_session_error());
    spy.reply(&login_page());
    assert!(client.delete("etl").unwrap_err().is_session_error());
    spy.reply(&login_page());
    assert!(client.fetch_sla(3).unwrap_err().is_session_error());
}

#[test]
fn missing_credentials_text_is_a_session_error() {
    let spy = RecordingTransport::new();
    spy.reply(MISSING_CREDENTIALS);
    let client = spy_client(&spy, logged_session());

    let err = client.fetch_flow_execution(5).unwrap_err();
    assert!(matches!(err, Error::Session(ref m) if m == MISSING_CREDENTIALS));
}

#[test]
fn error_key_becomes_operation_error() {
    let spy = RecordingTransport::new();
    spy.reply(r#"{"error": "Flow daily isn't running."}"#);
    let client = spy_client(&spy, logged_session());

    let err = client.cancel(12).unwrap_err();
    assert_eq!(err.operation(), Some(Operation::Cancel));
    assert_eq!(err.to_string(), "Cancel error: Flow daily isn't running.");
}

#[test]
fn status_error_without_message() {
    let spy = RecordingTransport::new();
    spy.reply(r#"{"status": "error"}"#);
    let client = spy_client(&spy, logged_session());

    let err = client
        .execute("etl", "daily", &ExecutionOptions::new())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Api { operation: Operation::Execute, ref message } if message == "Unknown error"
    ));
}

#[test]
fn empty_reply_depends_on_operation() {
    let spy = RecordingTransport::new();
    let client = spy_client(&spy, logged_session());

    // Default reply is an empty body.
    client.delete("etl").unwrap();
    client
        .change_permission("etl", "ops", &PermissionOptions::new().admin(true))
        .unwrap();
    client.remove_permission("etl", "ops").unwrap();
    client.resume_flow_execution(4).unwrap();

    let err = client.fetch_jobs_from_flow("etl", "daily").unwrap_err();
    assert_eq!(err.operation(), Some(Operation::FetchJobsFromFlow));
    assert_eq!(err.message(), Some("Empty response"));
    let err = client.fetch_running_executions_of_a_flow("etl", "daily").unwrap_err();
    assert_eq!(err.operation(), Some(Operation::FetchRunningExecutionsOfAFlow));
}

#[test]
fn fetch_sla_error_label() {
    let spy = RecordingTransport::new();
    spy.reply(r#"{"error": "no such schedule"}"#);
    let client = spy_client(&spy, logged_session());

    let err = client.fetch_sla(99).unwrap_err();
    assert_eq!(err.to_string(), "FetchSLA error: no such schedule");
}

#[test]
fn missing_success_field_is_reported() {
    let spy = RecordingTransport::new();
    spy.reply(r#"{"status": "success", "message": "scheduled"}"#);
    let client = spy_client(&spy, logged_session());

    let err = client
        .schedule("etl", "daily", "0 0 * ? * *", &ExecutionOptions::new())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingField { operation: Operation::Schedule, field: "scheduleId" }
    ));
}

#[test]
fn fetch_projects_passes_html_through() {
    let spy = RecordingTransport::new();
    spy.reply("<html><body>etl</body></html>");
    let client = spy_client(&spy, logged_session());

    assert_eq!(client.fetch_projects().unwrap(), "<html><body>etl</body></html>");
}

#[test]
fn fetch_projects_skips_the_json_checks() {
    let spy = RecordingTransport::new();
    let client = spy_client(&spy, logged_session());

    spy.reply("{}");
    assert_eq!(client.fetch_projects().unwrap(), "{}");
    // Empty body once the queue drains.
    assert_eq!(client.fetch_projects().unwrap(), "");
}
