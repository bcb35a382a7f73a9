//! Configuration types for the bring-up sequence

use crate::constants::{
    ADAPT_MAX_ATTEMPTS, ADAPT_REQUIRED_CONSECUTIVE, INITIAL_LOCK_TIMEOUT_US, LINK_POLLS,
    MISSION_LOCK_TIMEOUT_US,
};

/// Initial adaptation effort level
///
/// Full effort takes noticeably longer per attempt but links brought up at
/// low effort have been seen to break down shortly after bring-up, so full
/// is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effort {
    /// Fastest adaptation, least robust result
    Low,
    /// Thorough adaptation
    #[default]
    Full,
}

impl Effort {
    /// Value written with the effort-level attribute code
    #[must_use]
    pub const fn attribute_value(self) -> u16 {
        match self {
            Effort::Low => 0x0000,
            Effort::Full => 0x0001,
        }
    }
}

/// Bring-up sequence configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BringUpConfig {
    /// Initial adaptation effort level
    pub effort: Effort,
    /// Lock wait budget after initial adaptation, in microseconds
    pub initial_lock_timeout_us: u32,
    /// Lock wait budget after entering mission mode, in microseconds
    pub mission_lock_timeout_us: u32,
    /// Maximum initial-adaptation attempts
    pub adapt_max_attempts: u32,
    /// Consecutive successful attempts required to accept adaptation
    pub adapt_required_consecutive: u32,
    /// Maximum link-status polls after bring-up
    pub link_polls: u32,
}

impl BringUpConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            effort: Effort::Full,
            initial_lock_timeout_us: INITIAL_LOCK_TIMEOUT_US,
            mission_lock_timeout_us: MISSION_LOCK_TIMEOUT_US,
            adapt_max_attempts: ADAPT_MAX_ATTEMPTS,
            adapt_required_consecutive: ADAPT_REQUIRED_CONSECUTIVE,
            link_polls: LINK_POLLS,
        }
    }

    /// Set the initial adaptation effort level
    #[must_use]
    pub const fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = effort;
        self
    }

    /// Set the lock wait budget after initial adaptation, in microseconds
    #[must_use]
    pub const fn with_initial_lock_timeout_us(mut self, timeout_us: u32) -> Self {
        self.initial_lock_timeout_us = timeout_us;
        self
    }

    /// Set the lock wait budget after entering mission mode, in microseconds
    #[must_use]
    pub const fn with_mission_lock_timeout_us(mut self, timeout_us: u32) -> Self {
        self.mission_lock_timeout_us = timeout_us;
        self
    }

    /// Set the maximum number of initial-adaptation attempts
    #[must_use]
    pub const fn with_adapt_max_attempts(mut self, attempts: u32) -> Self {
        self.adapt_max_attempts = attempts;
        self
    }

    /// Set the consecutive successes required to accept adaptation
    #[must_use]
    pub const fn with_adapt_required_consecutive(mut self, consecutive: u32) -> Self {
        self.adapt_required_consecutive = consecutive;
        self
    }

    /// Set the maximum link-status polls after bring-up
    #[must_use]
    pub const fn with_link_polls(mut self, polls: u32) -> Self {
        self.link_polls = polls;
        self
    }
}

impl Default for BringUpConfig {
    fn default() -> Self {
        Self::new()
    }
}
