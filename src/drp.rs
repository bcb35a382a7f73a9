//! DRP (Dynamic Reconfiguration Port) channel
//!
//! The DRP is an indirect register-access engine: per-lane transceiver
//! sub-registers are reached by programming an address (with the lane index
//! folded into a high bit-field) and requesting a read or write through the
//! DRP control register, then polling the ready bit.
//!
//! Only one DRP transaction may be outstanding per port; correctness
//! depends on observing ready before issuing a request and again after it.
//! The implementation follows the Transceiver Wrapper User Guide sections
//! 4.1 ("DRP Write Operation") and 4.2 ("DRP Read Operation").

use crate::constants::DRP_READY_POLLS;
use crate::error::{ConfigError, DrpError, Result};
use crate::hal::bus::RegisterBus;
use crate::regs::{LANE_COUNT, xcvr};

// =============================================================================
// DRP Bus Trait
// =============================================================================

/// Indirect read/write access to per-lane DRP sub-registers
///
/// This trait can be implemented by different backends, allowing the PMA
/// protocol layer to work against a mock in host tests.
pub trait DrpBus {
    /// Read the sub-register at `addr` on `lane`
    fn read(&mut self, lane: u8, addr: u32) -> Result<u32>;

    /// Write `data` to the sub-register at `addr` on `lane`
    fn write(&mut self, lane: u8, addr: u32, data: u32) -> Result<()>;

    /// Read, OR `set_mask` into the value, write back, then read once more.
    ///
    /// The trailing read mirrors the documented flow; its value is
    /// returned for diagnostics but carries no protocol meaning.
    fn rmw(&mut self, lane: u8, addr: u32, set_mask: u32) -> Result<u32> {
        let value = self.read(lane, addr)?;
        self.write(lane, addr, value | set_mask)?;
        self.read(lane, addr)
    }

    /// Legacy read variant collapsing timeouts to zero.
    ///
    /// A timeout is indistinguishable from a register that genuinely reads
    /// zero; status polling loops accept that because "zero" means
    /// "keep waiting" for every bit they sample. Prefer [`DrpBus::read`]
    /// anywhere the value matters.
    fn read_or_zero(&mut self, lane: u8, addr: u32) -> u32 {
        self.read(lane, addr).unwrap_or(0)
    }
}

// =============================================================================
// DRP Port
// =============================================================================

/// DRP engine driver for one port's lane group
///
/// Owns the port's [`RegisterBus`]; the reset sequencer and MAC/PCS helpers
/// borrow it back through [`DrpPort::bus_mut`].
#[derive(Debug)]
pub struct DrpPort<B: RegisterBus> {
    bus: B,
}

impl<B: RegisterBus> DrpPort<B> {
    /// Create a DRP driver over a port register window
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Access the underlying register bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Consume the driver, returning the register bus
    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Poll the ready bit, bounded by [`DRP_READY_POLLS`]
    fn wait_ready(&mut self) -> bool {
        for _ in 0..DRP_READY_POLLS {
            if self.bus.read(xcvr::DRP_CTRL) & xcvr::DRP_READY != 0 {
                return true;
            }
        }
        false
    }

    fn check_lane(lane: u8) -> Result<()> {
        if lane >= LANE_COUNT {
            return Err(ConfigError::InvalidLane.into());
        }
        Ok(())
    }
}

impl<B: RegisterBus> DrpBus for DrpPort<B> {
    fn write(&mut self, lane: u8, addr: u32, data: u32) -> Result<()> {
        Self::check_lane(lane)?;

        // Enable the DRP engine, then confirm the engine is reachable
        self.bus.write(xcvr::DRP_CTRL, xcvr::DRP_ENABLE);
        let _ = self.bus.read(xcvr::DRP_CTRL);

        // Ready must be observed before touching address/data; on timeout
        // the write is never issued (protocol-defined guard)
        if !self.wait_ready() {
            #[cfg(feature = "defmt")]
            defmt::warn!("drp: ready stuck low before write, lane {} addr {:#x}", lane, addr);
            return Err(DrpError::NotReady.into());
        }

        self.bus.write(xcvr::DRP_ADDR, addr | u32::from(lane) << xcvr::DRP_LANE_SHIFT);
        self.bus.write(xcvr::DRP_WDATA, data);

        // Request + write direction
        self.bus
            .write(xcvr::DRP_CTRL, xcvr::DRP_ENABLE | xcvr::DRP_REQ | xcvr::DRP_WRITE);

        if !self.wait_ready() {
            #[cfg(feature = "defmt")]
            defmt::warn!("drp: ready stuck low after write, lane {} addr {:#x}", lane, addr);
            return Err(DrpError::Timeout.into());
        }

        Ok(())
    }

    fn read(&mut self, lane: u8, addr: u32) -> Result<u32> {
        Self::check_lane(lane)?;

        self.bus.write(xcvr::DRP_CTRL, xcvr::DRP_ENABLE);

        if !self.wait_ready() {
            #[cfg(feature = "defmt")]
            defmt::warn!("drp: ready stuck low before read, lane {} addr {:#x}", lane, addr);
            return Err(DrpError::NotReady.into());
        }

        self.bus.write(xcvr::DRP_ADDR, addr | u32::from(lane) << xcvr::DRP_LANE_SHIFT);

        // Request + read direction
        self.bus.write(xcvr::DRP_CTRL, xcvr::DRP_ENABLE | xcvr::DRP_REQ);

        if !self.wait_ready() {
            #[cfg(feature = "defmt")]
            defmt::warn!("drp: ready stuck low after read, lane {} addr {:#x}", lane, addr);
            return Err(DrpError::Timeout.into());
        }

        Ok(self.bus.read(xcvr::DRP_RDATA))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
