//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the site tooling.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static site settings.
    pub site: StaticSiteConfig,

    /// Asset staging settings.
    pub staging: StagingConfig,

    /// Response security header settings.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:5173").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5173".to_string(),
        }
    }
}

/// Static site served by `serve`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticSiteConfig {
    /// Directory served at `/`.
    pub static_dir: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for StaticSiteConfig {
    fn default() -> Self {
        Self {
            static_dir: "./static".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Where the WebAssembly build artifacts come from and where they land.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Distribution directory of the installed media library.
    pub source_dir: String,

    /// Static-asset directory the files are copied into.
    pub dest_dir: String,

    /// File names copied, in order.
    pub files: Vec<String>,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            source_dir: "./node_modules/@ffmpeg/core-mt/dist/esm".to_string(),
            dest_dir: "./static/wasm".to_string(),
            files: vec![
                "ffmpeg-core.js".to_string(),
                "ffmpeg-core.wasm".to_string(),
                "ffmpeg-core.worker.js".to_string(),
            ],
        }
    }
}

/// Response security header configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// Replaces the built-in Content-Security-Policy when set.
    pub content_security_policy: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
