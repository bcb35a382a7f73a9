//! Timing and polling constants
//!
//! The polling bounds below were tuned against real N5010 hardware; several
//! of them (the attribute sent/done polls in particular) are empirical rather
//! than datasheet-derived and must not be "rounded" to nicer numbers.

// =============================================================================
// DRP Engine
// =============================================================================

/// Ready-bit samples allowed per DRP handshake phase.
///
/// The wrapper guide expects ready on the first sample; one re-read covers
/// the request latency. Anything longer means the engine is wedged.
pub const DRP_READY_POLLS: u32 = 2;

// =============================================================================
// PMA Attribute Protocol
// =============================================================================

/// Maximum polls of the attribute-sent bit
pub const ATTR_SENT_POLLS: u32 = 10_000;

/// Delay between attribute-sent polls, in microseconds
pub const ATTR_SENT_POLL_DELAY_US: u32 = 100;

/// Maximum polls of the attribute-busy bit (no inter-poll delay)
pub const ATTR_DONE_POLLS: u32 = 1024;

/// Maximum polls of the opcode operation status register
pub const OPCODE_STATUS_POLLS: u32 = 1024;

/// Maximum polls of the configuration loading status register
pub const CONFIG_LOAD_POLLS: u32 = 1024;

// =============================================================================
// Reset Sequencer
// =============================================================================

/// Maximum ready-field samples while waiting for reset to assert
pub const RESET_ASSERT_POLLS: u32 = 200;

/// Delay before each reset-assert sample, in microseconds
pub const RESET_ASSERT_POLL_DELAY_US: u32 = 1000;

/// Consecutive all-ready samples required after deassert.
///
/// The ready signal has been seen to glitch after deassert; a single sample
/// is not trustworthy, so the streak below is required before the group is
/// declared out of reset.
pub const RESET_READY_STREAK: u32 = 100;

/// Delay after a not-ready sample during deassert, in microseconds
pub const RESET_RESAMPLE_DELAY_US: u32 = 200;

/// Total ready-field samples allowed after deassert
pub const RESET_DEASSERT_POLLS: u32 = 20_000;

// =============================================================================
// Adaptation
// =============================================================================

/// Settle time after the PMA analog reset, in microseconds
pub const ANALOG_RESET_SETTLE_US: u32 = 100_000;

/// Settle time after starting an adaptation run, before polling its status,
/// in microseconds
pub const ADAPT_START_SETTLE_US: u32 = 10_000;

/// Settle time after dropping to mission mode, in microseconds
pub const MISSION_SETTLE_US: u32 = 10_000;

/// Maximum polls of the adaptation-in-progress bit, per lane
pub const ADAPT_VERIFY_POLLS: u32 = 10_000;

/// Consecutive all-lanes-locked samples required to call the group locked
pub const LOCK_STREAK: u32 = 1000;

/// Delay between lock samples, in microseconds
pub const LOCK_POLL_DELAY_US: u32 = 1;

/// Default lock wait budget after initial adaptation, in microseconds (2 s)
pub const INITIAL_LOCK_TIMEOUT_US: u32 = 2_000_000;

/// Default lock wait budget after entering mission mode, in microseconds
/// (10 s)
pub const MISSION_LOCK_TIMEOUT_US: u32 = 10_000_000;

/// Maximum initial-adaptation attempts
pub const ADAPT_MAX_ATTEMPTS: u32 = 10;

/// Consecutive successful attempts required to accept adaptation
pub const ADAPT_REQUIRED_CONSECUTIVE: u32 = 2;

// =============================================================================
// Link
// =============================================================================

/// Maximum link-status polls after bring-up
pub const LINK_POLLS: u32 = 20_000;

/// Delay between link-status polls, in microseconds
pub const LINK_POLL_DELAY_US: u32 = 100;

/// Diagnostic PCS status samples taken at the end of bring-up
pub const PCS_STATUS_SAMPLES: u32 = 5;
