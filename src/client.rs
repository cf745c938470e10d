//! Azkaban client: session handling, operations and response classification.
//!
//! Keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

mod archive;
pub mod builder;
pub mod core;
pub mod error_classification;
pub mod options;
pub mod permissions;
pub mod session;
pub mod types;

pub use builder::AzkabanClientBuilder;
pub use core::AzkabanClient;
pub use error_classification::Verdict;
pub use options::{ConcurrentOption, ExecutionOptions, FailureAction};
pub use permissions::{PermissionOptions, Permissions};
pub use session::{normalize_host, Session};
pub use types::{ExecutionReceipt, ScheduleReceipt, UploadReceipt};
