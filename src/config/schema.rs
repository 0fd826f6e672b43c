//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the site backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Site identity, mode and content locations.
    pub site: SiteSection,

    /// Relational store settings.
    pub store: StoreConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Production hides failure detail; development returns it in the envelope body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Production,
    Development,
}

impl AppMode {
    pub fn is_diagnostic(self) -> bool {
        self == AppMode::Development
    }
}

/// Site settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSection {
    /// Application name, used in logs.
    pub name: String,

    /// Production or development (diagnostic) mode.
    pub mode: AppMode,

    /// Directory holding `<page>.html` fragments.
    pub documents_dir: PathBuf,

    /// Static assets served at `/` when present.
    pub public_dir: Option<PathBuf>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "cdroot".to_string(),
            mode: AppMode::Production,
            documents_dir: PathBuf::from("public/html"),
            public_dir: Some(PathBuf::from("public")),
        }
    }
}

/// Relational store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file.
    pub path: PathBuf,

    /// Prepared statements kept per connection.
    pub statement_cache_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cdroot.db"),
            statement_cache_capacity: 16,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.site.mode, AppMode::Production);
        assert_eq!(config.store.statement_cache_capacity, 16);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml() {
        let config: SiteConfig = toml::from_str(
            r#"
            [site]
            mode = "development"
            documents_dir = "/srv/html"
            "#,
        )
        .unwrap();
        assert!(config.site.mode.is_diagnostic());
        assert_eq!(config.site.documents_dir, PathBuf::from("/srv/html"));
        assert_eq!(config.site.name, "cdroot");
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
