//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (cross-origin isolation + Content-Security-Policy)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - One canonical policy; configuration may replace the CSP, never merge it
//! - Headers are overwritten, not appended, so handlers cannot weaken them

pub mod headers;

pub use headers::{
    SecurityHeaders, SecurityHeadersLayer, SecurityHeadersService,
    DEFAULT_CONTENT_SECURITY_POLICY,
};
