//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout via tracing-subscriber fmt layer
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace layer span
//! - `RUST_LOG` takes precedence over the configured level

pub mod logging;

pub use logging::{env_filter, init_logging};
