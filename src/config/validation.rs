//! Configuration validation.
//!
//! Serde handles syntax; this module checks the values make sense together.
//! Returns all validation errors, not just the first.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Component, Path};

use axum::http::HeaderValue;
use tracing::level_filters::LevelFilter;

use crate::config::schema::SiteConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("site.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("staging.files must name at least one file")]
    NoStagedFiles,

    #[error("staging.files entry `{0}` must be a bare file name")]
    NotAFileName(String),

    #[error("staging.files lists `{0}` more than once")]
    DuplicateFile(String),

    #[error("staging.source_dir and staging.dest_dir are the same directory")]
    SameStagingDirectory,

    #[error("security.content_security_policy is not a valid header value")]
    InvalidPolicy,

    #[error("observability.log_level `{0}` is not one of off, error, warn, info, debug, trace")]
    InvalidLogLevel(String),
}

/// Check a parsed configuration, collecting every error found.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.site.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.staging.files.is_empty() {
        errors.push(ValidationError::NoStagedFiles);
    }

    let mut seen = HashSet::new();
    for file in &config.staging.files {
        if file.is_empty() || file.contains(['/', '\\']) || file == "." || file == ".." {
            errors.push(ValidationError::NotAFileName(file.clone()));
        } else if !seen.insert(file.as_str()) {
            errors.push(ValidationError::DuplicateFile(file.clone()));
        }
    }

    // spelling only; stage_assets compares the resolved directories
    if same_spelling(&config.staging.source_dir, &config.staging.dest_dir) {
        errors.push(ValidationError::SameStagingDirectory);
    }

    if let Some(policy) = &config.security.content_security_policy {
        if HeaderValue::from_str(policy).is_err() {
            errors.push(ValidationError::InvalidPolicy);
        }
    }

    if config.observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn same_spelling(a: &str, b: &str) -> bool {
    fn parts(path: &str) -> impl Iterator<Item = Component<'_>> {
        Path::new(path).components().filter(|c| *c != Component::CurDir)
    }
    parts(a).eq(parts(b))
}
