//! Group permission flags.
//!
//! - admin: anything on the project, including permissions and deletion
//! - read: view jobs, flows and execution logs
//! - write: upload project files and modify job files
//! - execute: execute, pause and cancel flows
//! - schedule: add, modify and remove flow schedules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Permissions as requested by the caller. Unset flags count as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<bool>,
}

impl PermissionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admin(mut self, enabled: bool) -> Self {
        self.admin = Some(enabled);
        self
    }

    pub fn read(mut self, enabled: bool) -> Self {
        self.read = Some(enabled);
        self
    }

    pub fn write(mut self, enabled: bool) -> Self {
        self.write = Some(enabled);
        self
    }

    pub fn execute(mut self, enabled: bool) -> Self {
        self.execute = Some(enabled);
        self
    }

    pub fn schedule(mut self, enabled: bool) -> Self {
        self.schedule = Some(enabled);
        self
    }
}

/// The full flag set sent to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub admin: bool,
    pub read: bool,
    pub write: bool,
    pub execute: bool,
    pub schedule: bool,
}

impl Permissions {
    /// Sent to revoke a group's access.
    pub const NONE: Permissions = Permissions {
        admin: false,
        read: false,
        write: false,
        execute: false,
        schedule: false,
    };

    pub const ALL: Permissions = Permissions {
        admin: true,
        read: true,
        write: true,
        execute: true,
        schedule: true,
    };

    /// Fill in a partial request the way the Azkaban web UI does: admin
    /// implies everything, and read is granted unless every flag was given.
    pub fn normalize(options: &PermissionOptions) -> Self {
        let filled = Permissions {
            admin: options.admin.unwrap_or(false),
            read: options.read.unwrap_or(false),
            write: options.write.unwrap_or(false),
            execute: options.execute.unwrap_or(false),
            schedule: options.schedule.unwrap_or(false),
        };

        if filled.admin {
            return Permissions::ALL;
        }
        if filled == Permissions::ALL {
            return filled;
        }
        Permissions {
            read: true,
            ..filled
        }
    }

    /// Query parameters in the `permissions[<flag>]` form the server expects.
    pub fn to_params(&self) -> Vec<(String, String)> {
        [
            ("admin", self.admin),
            ("write", self.write),
            ("read", self.read),
            ("execute", self.execute),
            ("schedule", self.schedule),
        ]
        .into_iter()
        .map(|(flag, enabled)| (format!("permissions[{}]", flag), enabled.to_string()))
        .collect()
    }
}

impl From<PermissionOptions> for Permissions {
    fn from(options: PermissionOptions) -> Self {
        Permissions::normalize(&options)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let granted: Vec<&str> = [
            ("admin", self.admin),
            ("read", self.read),
            ("write", self.write),
            ("execute", self.execute),
            ("schedule", self.schedule),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect();
        if granted.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&granted.join(", "))
        }
    }
}
