//! # azkaban-client
//!
//! Blocking client for the Azkaban workflow scheduler's AJAX API.
//!
//! ## Overview
//!
//! Each operation (login, upload, schedule, execute, cancel, fetch status and
//! logs, manage permissions) maps to exactly one HTTP request against a fixed
//! endpoint table. Every reply then goes through one ordered classification
//! funnel that decides between success, an expired session, and a domain
//! error for that operation.
//!
//! ## Key Features
//!
//! - **Explicit session**: [`AzkabanClient`] owns the host/user/token and
//!   refuses authenticated calls without one, before any network traffic
//! - **Declarative endpoints**: [`protocol::Operation`] maps to method, path
//!   and selector parameter; one generic routine builds every request
//! - **Typed failures**: [`Error`] separates session expiry, per-operation
//!   rejections and transport failures
//! - **Pluggable transport**: the [`transport::Transport`] trait lets tests and
//!   embedders replace the `reqwest` backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use azkaban_client::{AzkabanClient, ExecutionOptions};
//!
//! fn main() -> azkaban_client::Result<()> {
//!     let mut client = AzkabanClient::new()?;
//!     client.login("https://azkaban.example.com:8443/", "alice", "secret")?;
//!
//!     let receipt = client.execute("etl", "daily", &ExecutionOptions::new())?;
//!     println!("{}", receipt.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, session, permissions, options and response classification |
//! | [`protocol`] | Endpoint table and request assembly |
//! | [`transport`] | Transport trait and the blocking HTTP implementation |
//! | [`config`] | Timeout, TLS and proxy settings |

pub mod client;
pub mod config;
pub mod protocol;
pub mod transport;

pub use client::{
    AzkabanClient, AzkabanClientBuilder, ConcurrentOption, ExecutionOptions, ExecutionReceipt,
    FailureAction, PermissionOptions, Permissions, ScheduleReceipt, Session, UploadReceipt,
};
pub use config::ClientConfig;
pub use protocol::Operation;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
