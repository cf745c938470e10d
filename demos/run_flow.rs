//! Log in, run a flow and follow it until it finishes.
//!
//! Connection details come from the environment:
//! - AZKABAN_HOST (e.g. https://azkaban.example.com:8443)
//! - AZKABAN_USER / AZKABAN_PASSWORD
//! - AZKABAN_PROJECT / AZKABAN_FLOW
//!
//! Usage:
//!   RUST_LOG=azkaban_client=debug cargo run --example run_flow

use azkaban_client::{AzkabanClient, ExecutionOptions, FailureAction, Session};
use std::time::Duration;

fn env(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("{name} not set").into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut client = AzkabanClient::new()?;

    // Reuse a saved login when there is one.
    let session_file = Session::default_path();
    if let Some(saved) = session_file.as_ref().and_then(|p| Session::load(p).ok()) {
        client.restore_session(saved);
    }
    if !client.is_logged_in() {
        client.login(
            &env("AZKABAN_HOST")?,
            &env("AZKABAN_USER")?,
            &env("AZKABAN_PASSWORD")?,
        )?;
        if let Some(path) = &session_file {
            client.get_logged_session().save(path)?;
        }
    }

    let project = env("AZKABAN_PROJECT")?;
    let flow = env("AZKABAN_FLOW")?;
    let options = ExecutionOptions::new().failure_action(FailureAction::FinishPossible);
    let receipt = client.execute(&project, &flow, &options)?;
    println!("{}", receipt.message);

    let Some(exec_id) = receipt.exec_id else {
        return Ok(());
    };
    loop {
        let execution = client.fetch_flow_execution(exec_id)?;
        let status = execution
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        println!("execution {exec_id}: {status}");
        if matches!(
            status.as_str(),
            "SUCCEEDED" | "FAILED" | "KILLED" | "CANCELLED"
        ) {
            break;
        }
        std::thread::sleep(Duration::from_secs(5));
    }
    Ok(())
}
