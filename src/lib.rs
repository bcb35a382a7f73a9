//! N5010 HiTek 100G Transceiver Bring-Up Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the Silicom N5010 HiTek 100G soft
//! MAC port: a 4-lane 25G SerDes group behind the HiTek transceiver wrapper,
//! with an E-tile PMA underneath.
//!
//! # Architecture
//!
//! The driver is organized into four layers:
//!
//! 1. **Port Layer** ([`driver::port`]): Reset sequencing, the duplex
//!    adaptation flow, link status, statistics, and features
//! 2. **PMA Layer** ([`pma`]): The attribute and opcode command protocols
//! 3. **DRP Layer** ([`drp`]): The indirect per-lane register engine
//! 4. **HAL Layer** ([`hal`]): 32-bit register window access
//!
//! All waiting goes through an injected `embedded_hal::delay::DelayNs`, so
//! the entire sequence runs against a simulated port in host tests.
//!
//! # Example
//!
//! ```ignore
//! use ph_n5010_htk::{BringUpConfig, Effort, XcvrPort};
//! use ph_n5010_htk::hal::Mmio32;
//!
//! // Your delay implementation
//! let delay = /* impl DelayNs */;
//!
//! // SAFETY: `base` maps this port's register window exclusively
//! let bus = unsafe { Mmio32::new(base) };
//!
//! let config = BringUpConfig::new().with_effort(Effort::Full);
//! let mut port = XcvrPort::new(bus, delay, config);
//!
//! port.bring_up();
//! port.clear_statistics();
//! if port.wait_for_link() {
//!     // traffic can flow
//! }
//! ```
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for error types

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod constants;
pub mod driver;
pub mod drp;
pub mod error;
pub mod hal;
pub mod pma;
pub mod regs;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{BringUpConfig, Effort};
pub use driver::features::Feature;
pub use driver::port::{AdaptOutcome, AdaptPolicy, XcvrPort};
pub use driver::stats::{STAT_COUNT, STATS_100G, StatInfo};
pub use drp::{DrpBus, DrpPort};
pub use error::{ConfigError, DrpError, Error, PmaError, Result, XcvrError};
pub use pma::PmaAttribute;
