//! PMA attribute and opcode protocols
//!
//! Two indirect command interfaces sit behind the DRP:
//!
//! - The **attribute** interface (E-tile PHY user guide, section 7.11
//!   "PMA Attribute Details"): a 16-bit code plus 16-bit value staged byte
//!   by byte, triggered, and acknowledged through status sub-registers.
//! - The **opcode** interface (UG-20056): a 32-bit opcode staged byte by
//!   byte with a single done/error status sub-register.
//!
//! Both are strictly ordered: staging, trigger, then completion polling.
//! Timeouts abort the handshake early and leave any hardware-side flags
//! untouched.

use embedded_hal::delay::DelayNs;

use crate::constants::{
    ATTR_DONE_POLLS, ATTR_SENT_POLL_DELAY_US, ATTR_SENT_POLLS, CONFIG_LOAD_POLLS,
    OPCODE_STATUS_POLLS,
};
use crate::drp::DrpBus;
use crate::error::{PmaError, Result};
use crate::regs::pma;

// =============================================================================
// Attributes
// =============================================================================

/// A PMA attribute: a 16-bit code selecting the operation and a 16-bit value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PmaAttribute {
    /// Attribute code
    pub code: u16,
    /// Attribute value
    pub value: u16,
}

impl PmaAttribute {
    /// Create an attribute from code and value
    #[must_use]
    pub const fn new(code: u16, value: u16) -> Self {
        Self { code, value }
    }

    /// Pack into the 32-bit wire form, code in the high half
    #[must_use]
    pub const fn packed(self) -> u32 {
        (self.code as u32) << 16 | self.value as u32
    }

    /// Read the initial adaptation effort level
    pub const READ_INITIAL_EFFORT: Self = Self::new(0x002C, 0x0118);
    /// Set the initial adaptation effort level to full
    pub const SET_FULL_EFFORT: Self = Self::new(0x006C, 0x0001);
    /// Start one initial adaptation run
    pub const START_INITIAL_ADAPTATION: Self = Self::new(0x000A, 0x0001);
    /// Start continuous adaptation
    pub const START_CONTINUOUS_ADAPTATION: Self = Self::new(0x000A, 0x0006);
    /// Query adaptation status; result bit 0 set while adaptation runs
    pub const ADAPTATION_STATUS: Self = Self::new(0x0126, 0x0B00);
}

// =============================================================================
// Attribute Handshake
// =============================================================================

/// Send one attribute to the PMA on `lane` and return its 16-bit result.
///
/// The handshake stages the packed attribute into 0x84-0x87, triggers it,
/// waits for the attribute-sent flag (long poll, 100 µs spacing) and then
/// for the busy flag to clear (short poll, back to back). Either timeout
/// returns early; the sent flag is cleared only on the success path, so a
/// wedged PMA is left for the next reset to recover.
pub fn update_setting<B, D>(drp: &mut B, delay: &mut D, lane: u8, attr: PmaAttribute) -> Result<u16>
where
    B: DrpBus,
    D: DelayNs,
{
    let word = attr.packed();

    drp.write(lane, pma::ATTR_VALUE_LO, word & 0xFF)?;
    drp.write(lane, pma::ATTR_VALUE_HI, word >> 8 & 0xFF)?;
    drp.write(lane, pma::ATTR_CODE_LO, word >> 16 & 0xFF)?;
    drp.write(lane, pma::ATTR_CODE_HI, word >> 24 & 0xFF)?;

    // Trigger: send the staged code to the PMA
    drp.rmw(lane, pma::ATTR_REQUEST, pma::ATTR_REQUEST_BIT)?;

    // Wait for the code to be reported as sent
    let mut sent = false;
    for _ in 0..ATTR_SENT_POLLS {
        delay.delay_us(ATTR_SENT_POLL_DELAY_US);
        if drp.read_or_zero(lane, pma::ATTR_STATUS) & pma::ATTR_SENT != 0 {
            sent = true;
            break;
        }
    }
    if !sent {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "pma: attribute {:#06x}/{:#06x} not sent, lane {}",
            attr.code,
            attr.value,
            lane
        );
        return Err(PmaError::AttributeNotSent.into());
    }

    // Wait for the PMA to finish acting on the code
    let mut done = false;
    for _ in 0..ATTR_DONE_POLLS {
        if drp.read_or_zero(lane, pma::ATTR_BUSY) & pma::ATTR_BUSY_BIT == 0 {
            done = true;
            break;
        }
    }
    if !done {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "pma: attribute {:#06x}/{:#06x} transaction incomplete, lane {}",
            attr.code,
            attr.value,
            lane
        );
        return Err(PmaError::AttributeIncomplete.into());
    }

    let hi = drp.read(lane, pma::ATTR_RESULT_HI)?;
    let lo = drp.read(lane, pma::ATTR_RESULT_LO)?;
    let result = (hi << 8 | lo) as u16;

    clear_attribute_sent(drp, lane)?;

    Ok(result)
}

/// Clear the attribute-sent flag (write-1-to-clear)
pub fn clear_attribute_sent<B: DrpBus>(drp: &mut B, lane: u8) -> Result<()> {
    drp.rmw(lane, pma::ATTR_STATUS, pma::ATTR_SENT)?;
    Ok(())
}

// =============================================================================
// Opcode Interface
// =============================================================================

/// Load a 32-bit opcode into the PMA on `lane` and wait for completion.
///
/// Completion requires the done flag set with the error flag clear; the
/// poll runs back to back without delays.
pub fn load_config_params<B: DrpBus>(drp: &mut B, lane: u8, opcode: u32) -> Result<()> {
    drp.write(lane, pma::OPCODE_B0, opcode & 0xFF)?;
    drp.write(lane, pma::OPCODE_B1, opcode >> 8 & 0xFF)?;
    drp.write(lane, pma::OPCODE_B2, opcode >> 16 & 0xFF)?;
    drp.write(lane, pma::OPCODE_B3, opcode >> 24 & 0xFF)?;

    for _ in 0..OPCODE_STATUS_POLLS {
        let status = drp.read_or_zero(lane, pma::OPCODE_STATUS);
        if status & pma::OP_DONE != 0 && status & pma::OP_ERROR == 0 {
            return Ok(());
        }
    }

    #[cfg(feature = "defmt")]
    defmt::warn!("pma: opcode {:#010x} status timeout, lane {}", opcode, lane);
    Err(PmaError::OperationTimeout.into())
}

/// Request a PMA configuration load and wait for the loading status.
///
/// The configuration registers exist once per port and are addressed
/// through lane 0.
pub fn choose_config<B: DrpBus>(drp: &mut B) -> Result<()> {
    drp.write(0, pma::CONFIG_REQUEST, pma::CONFIG_LOAD)?;

    for _ in 0..CONFIG_LOAD_POLLS {
        if drp.read_or_zero(0, pma::CONFIG_STATUS) & pma::CONFIG_LOADED != 0 {
            return Ok(());
        }
    }

    #[cfg(feature = "defmt")]
    defmt::warn!("pma: configuration load status timeout");
    Err(PmaError::ConfigLoadTimeout.into())
}

// =============================================================================
// Unit Tests
// =============================================================================
