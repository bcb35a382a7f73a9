//! Core driver components for the N5010 HiTek port.
//!
//! - [`config`] - Bring-up configuration and builder pattern
//! - [`port`] - The port driver: reset, adaptation, bring-up, link
//! - [`stats`] - MAC statistics counter table
//! - [`features`] - Runtime-toggleable port features
//!
//! # Example
//!
//! ```ignore
//! use ph_n5010_htk::driver::{BringUpConfig, Effort, XcvrPort};
//!
//! let config = BringUpConfig::new().with_effort(Effort::Full);
//! let mut port = XcvrPort::new(bus, delay, config);
//! port.bring_up();
//! ```

// Submodules
pub mod config;
pub mod features;
pub mod port;
pub mod stats;

// Re-exports for convenience
pub use config::{BringUpConfig, Effort};
pub use features::Feature;
pub use port::{AdaptOutcome, AdaptPolicy, XcvrPort};
pub use stats::{STAT_COUNT, STATS_100G, StatInfo};
