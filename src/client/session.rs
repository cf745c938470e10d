//! Login state.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Host, user and token of the current login. All absent when logged out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub host: Option<String>,
    pub user: Option<String>,
    pub session_id: Option<String>,
}

impl Session {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            host: Some(host.into()),
            user: Some(user.into()),
            session_id: Some(session_id.into()),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session_id.as_deref().is_some_and(|id| !id.is_empty())
            && self.host.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// Host and token, or `NotLoggedIn`.
    pub(crate) fn credentials(&self) -> Result<(&str, &str)> {
        if !self.is_logged_in() {
            return Err(Error::NotLoggedIn);
        }
        match (self.host.as_deref(), self.session_id.as_deref()) {
            (Some(host), Some(id)) => Ok((host, id)),
            _ => Err(Error::NotLoggedIn),
        }
    }

    /// `AZKABAN_SESSION_FILE`, else `~/.azkaban_cli`.
    pub fn default_path() -> Option<PathBuf> {
        session_path(std::env::var("AZKABAN_SESSION_FILE").ok(), dirs::home_dir())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the session as JSON, readable by the owner only on Unix.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::configuration_with_context(
                    format!("Cannot create session directory: {}", e),
                    ErrorContext::new()
                        .with_field_path("session_file")
                        .with_details(parent.display().to_string())
                        .with_source("session_store"),
                )
            })?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

fn session_path(override_path: Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
    match override_path.filter(|p| !p.trim().is_empty()) {
        Some(path) => Some(PathBuf::from(path)),
        None => home.map(|h| h.join(".azkaban_cli")),
    }
}

/// Strip every trailing `/` from a host.
pub fn normalize_host(host: &str) -> String {
    host.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        assert_eq!(normalize_host("http://host/"), "http://host");
        assert_eq!(normalize_host("http://host///"), "http://host");
        assert_eq!(normalize_host("http://host"), "http://host");
    }

    #[test]
    fn default_session_is_logged_out() {
        let session = Session::default();
        assert!(!session.is_logged_in());
        assert!(matches!(session.credentials(), Err(Error::NotLoggedIn)));
    }

    #[test]
    fn empty_token_is_not_a_login() {
        let session = Session::new("http://az", "alice", "");
        assert!(!session.is_logged_in());
    }

    #[test]
    fn credentials_expose_host_and_token() {
        let session = Session::new("http://az", "alice", "tok");
        assert_eq!(session.credentials().unwrap(), ("http://az", "tok"));
    }

    #[test]
    fn session_file_override_wins_over_home() {
        let home = Some(PathBuf::from("/home/alice"));
        assert_eq!(
            session_path(Some("/tmp/az.json".into()), home.clone()),
            Some(PathBuf::from("/tmp/az.json"))
        );
        assert_eq!(
            session_path(Some("  ".into()), home.clone()),
            Some(PathBuf::from("/home/alice/.azkaban_cli"))
        );
        assert_eq!(session_path(None, None), None);
    }

    #[test]
    fn default_path_falls_back_to_home_directory() {
        if std::env::var_os("AZKABAN_SESSION_FILE").is_some() {
            return;
        }
        assert_eq!(
            Session::default_path(),
            dirs::home_dir().map(|h| h.join(".azkaban_cli"))
        );
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let session = Session::new("http://az", "alice", "tok");
        session.save(&path).unwrap();
        assert_eq!(Session::load(&path).unwrap(), session);
    }

    #[test]
    fn loading_garbage_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(Session::load(&path), Err(Error::Serialization(_))));
    }
}
