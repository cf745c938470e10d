//! Client configuration.
//!
//! Defaults suit an internal Azkaban behind a self-signed certificate; every
//! knob can be overridden from the environment or set on the builder.
//!
//! | Variable | Effect | Default |
//! |----------|--------|---------|
//! | `AZKABAN_HTTP_TIMEOUT_SECS` | Per-request timeout | 30 |
//! | `AZKABAN_VERIFY_TLS` | `1`/`true` turns certificate verification on | off |
//! | `AZKABAN_PROXY_URL` | Route every request through this proxy | none |

use std::env;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Duration,
    /// Validate server certificates. Off by default.
    pub verify_tls: bool,
    pub proxy: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verify_tls: false,
            proxy: None,
            user_agent: format!("azkaban-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(secs) =
            lookup("AZKABAN_HTTP_TIMEOUT_SECS").and_then(|s| s.trim().parse::<u64>().ok())
        {
            self.timeout = Duration::from_secs(secs.max(1));
        }
        if let Some(flag) = lookup("AZKABAN_VERIFY_TLS") {
            self.verify_tls = parse_flag(&flag);
        }
        if let Some(proxy) = lookup("AZKABAN_PROXY_URL").filter(|p| !p.trim().is_empty()) {
            self.proxy = Some(proxy);
        }
        self
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_skip_certificate_checks() {
        let cfg = ClientConfig::default();
        assert!(!cfg.verify_tls);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(cfg.proxy.is_none());
    }

    #[test]
    fn env_overrides_apply() {
        let cfg = ClientConfig::default().with_overrides(lookup_from(&[
            ("AZKABAN_HTTP_TIMEOUT_SECS", "5"),
            ("AZKABAN_VERIFY_TLS", "TRUE"),
            ("AZKABAN_PROXY_URL", "http://proxy:3128"),
        ]));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert!(cfg.verify_tls);
        assert_eq!(cfg.proxy.as_deref(), Some("http://proxy:3128"));
    }

    #[test]
    fn malformed_overrides_are_ignored() {
        let cfg = ClientConfig::default().with_overrides(lookup_from(&[
            ("AZKABAN_HTTP_TIMEOUT_SECS", "soon"),
            ("AZKABAN_PROXY_URL", "  "),
        ]));
        assert_eq!(cfg, ClientConfig::default());
    }
}
