//! Error types for the N5010 HiTek transceiver driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Argument and configuration failures
//! - [`DrpError`]: DRP engine handshake failures
//! - [`PmaError`]: PMA attribute / opcode protocol timeouts
//! - [`XcvrError`]: Reset and adaptation sequencing failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. Polling timeouts here are ordinary protocol
//! outcomes, not faults: the bring-up sequence logs them and keeps going.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Argument and configuration errors
///
/// These are rejected synchronously, before any register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Lane index out of range (must be 0-3)
    InvalidLane,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidLane => "invalid lane index",
        }
    }
}

// =============================================================================
// DRP Errors
// =============================================================================

/// DRP engine handshake errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrpError {
    /// Ready bit stuck low before the request was issued; the address and
    /// data registers were never written
    NotReady,
    /// Ready bit stuck low after the request was issued
    Timeout,
}

impl core::fmt::Display for DrpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DrpError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DrpError::NotReady => "DRP ready stuck low before request",
            DrpError::Timeout => "DRP ready stuck low after request",
        }
    }
}

// =============================================================================
// PMA Errors
// =============================================================================

/// PMA attribute and opcode protocol errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PmaError {
    /// Attribute code was never reported as sent to the PMA
    AttributeNotSent,
    /// PMA never finished acting on the attribute
    AttributeIncomplete,
    /// Opcode operation status never reported done-without-error
    OperationTimeout,
    /// PMA configuration load never reported complete
    ConfigLoadTimeout,
}

impl core::fmt::Display for PmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PmaError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PmaError::AttributeNotSent => "PMA attribute not sent",
            PmaError::AttributeIncomplete => "PMA attribute transaction incomplete",
            PmaError::OperationTimeout => "PMA operation status timeout",
            PmaError::ConfigLoadTimeout => "PMA configuration load timeout",
        }
    }
}

// =============================================================================
// Transceiver Sequencing Errors
// =============================================================================

/// Reset and adaptation sequencing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum XcvrError {
    /// Reset never observed as asserted (ready field stuck non-zero)
    ResetAssertTimeout,
    /// Ready field never held the all-ready value for the required streak
    ResetReadyTimeout,
    /// Not all lanes reported locked-to-data within the budget
    LockTimeout,
    /// Initial adaptation never produced the required consecutive successes
    AdaptationFailed,
}

impl core::fmt::Display for XcvrError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl XcvrError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            XcvrError::ResetAssertTimeout => "reset not asserted",
            XcvrError::ResetReadyTimeout => "ready not stable after reset",
            XcvrError::LockTimeout => "lanes not locked to data",
            XcvrError::AdaptationFailed => "initial adaptation failed",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::InvalidLane)) => { /* ... */ }
///     Err(Error::Drp(DrpError::Timeout)) => { /* ... */ }
///     Err(Error::Pma(PmaError::AttributeNotSent)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// DRP handshake error
    Drp(DrpError),
    /// PMA protocol error
    Pma(PmaError),
    /// Sequencing error
    Xcvr(XcvrError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Drp(e) => write!(f, "drp: {}", e.as_str()),
            Error::Pma(e) => write!(f, "pma: {}", e.as_str()),
            Error::Xcvr(e) => write!(f, "xcvr: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DrpError> for Error {
    fn from(e: DrpError) -> Self {
        Error::Drp(e)
    }
}

impl From<PmaError> for Error {
    fn from(e: PmaError) -> Self {
        Error::Pma(e)
    }
}

impl From<XcvrError> for Error {
    fn from(e: XcvrError) -> Self {
        Error::Xcvr(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidLane;
        assert_eq!(format!("{}", err), "invalid lane index");
    }

    #[test]
    fn drp_error_as_str_non_empty() {
        for variant in [DrpError::NotReady, DrpError::Timeout] {
            assert!(!variant.as_str().is_empty(), "DrpError::{:?} has empty string", variant);
        }
    }

    #[test]
    fn pma_error_as_str_non_empty() {
        let variants = [
            PmaError::AttributeNotSent,
            PmaError::AttributeIncomplete,
            PmaError::OperationTimeout,
            PmaError::ConfigLoadTimeout,
        ];
        for variant in variants {
            assert!(!variant.as_str().is_empty(), "PmaError::{:?} has empty string", variant);
        }
    }

    #[test]
    fn xcvr_error_as_str_non_empty() {
        let variants = [
            XcvrError::ResetAssertTimeout,
            XcvrError::ResetReadyTimeout,
            XcvrError::LockTimeout,
            XcvrError::AdaptationFailed,
        ];
        for variant in variants {
            assert!(!variant.as_str().is_empty(), "XcvrError::{:?} has empty string", variant);
        }
    }

    #[test]
    fn error_from_domain_errors() {
        let err: Error = ConfigError::InvalidLane.into();
        assert_eq!(err, Error::Config(ConfigError::InvalidLane));

        let err: Error = DrpError::NotReady.into();
        assert_eq!(err, Error::Drp(DrpError::NotReady));

        let err: Error = PmaError::OperationTimeout.into();
        assert_eq!(err, Error::Pma(PmaError::OperationTimeout));

        let err: Error = XcvrError::LockTimeout.into();
        assert_eq!(err, Error::Xcvr(XcvrError::LockTimeout));
    }

    #[test]
    fn error_display_includes_domain() {
        let display = format!("{}", Error::Drp(DrpError::Timeout));
        assert!(display.contains("drp"));
        assert!(display.contains("after request"));

        let display = format!("{}", Error::Pma(PmaError::ConfigLoadTimeout));
        assert!(display.contains("pma"));
        assert!(display.contains("configuration load"));
    }

    #[test]
    fn error_equality_and_clone() {
        let err = Error::Xcvr(XcvrError::AdaptationFailed);
        assert_eq!(err, err.clone());
        assert_ne!(err, Error::Xcvr(XcvrError::LockTimeout));
    }
}
