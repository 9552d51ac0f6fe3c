//! Build-time asset staging.
//!
//! # Data Flow
//! ```text
//! node_modules/@ffmpeg/core-mt/dist/esm/
//!     ffmpeg-core.js
//!     ffmpeg-core.wasm         → copy.rs (create dest, copy in order)
//!     ffmpeg-core.worker.js        → static/wasm/
//! ```
//!
//! # Design Decisions
//! - Runs once, synchronously, before the site is built
//! - Fail fast: the first missing file aborts the run, nothing is rolled back

pub mod copy;

pub use copy::{stage_assets, StageConfig, StageError, StageReport, StagedAsset};
