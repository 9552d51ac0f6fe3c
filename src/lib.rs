//! Tooling for a cross-origin isolated WebAssembly media site.
//!
//! - [`staging`] copies the ffmpeg WebAssembly build into the static directory
//! - [`security`] stamps cross-origin isolation headers and the CSP on responses
//! - [`http`] serves the static directory through that middleware

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod staging;

pub use config::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security::{SecurityHeaders, SecurityHeadersLayer};
pub use staging::{stage_assets, StageConfig, StageError, StageReport};
