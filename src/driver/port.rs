//! Port driver: reset sequencing, adaptation, and bring-up
//!
//! [`XcvrPort`] owns one port's register window (through a [`DrpPort`]) and
//! an injected delay source, and drives the duplex adaptation flow from the
//! E-tile PHY user guide section 3.1.4, adjusted by what the adaptation
//! controller work on the N5014 front ports showed to be necessary.
//!
//! Bring-up is best effort by design: a port with a dead peer must still
//! come up far enough that the link recovers on its own once a cable is
//! plugged, so every timeout past the first reset assert is logged and the
//! sequence continues.

use embedded_hal::delay::DelayNs;

use crate::constants::{
    ADAPT_START_SETTLE_US, ADAPT_VERIFY_POLLS, ANALOG_RESET_SETTLE_US, LINK_POLL_DELAY_US,
    LOCK_POLL_DELAY_US, LOCK_STREAK, MISSION_SETTLE_US, PCS_STATUS_SAMPLES, RESET_ASSERT_POLLS,
    RESET_ASSERT_POLL_DELAY_US, RESET_DEASSERT_POLLS, RESET_READY_STREAK, RESET_RESAMPLE_DELAY_US,
};
use crate::driver::config::BringUpConfig;
use crate::driver::features::{self, Feature};
use crate::driver::stats;
use crate::drp::{DrpBus, DrpPort};
use crate::error::{Result, XcvrError};
use crate::hal::bus::RegisterBus;
use crate::pma::{self, PmaAttribute};
use crate::regs::{LANE_COUNT, mac, pcs, pma as pma_regs, xcvr};

// =============================================================================
// Adaptation Retry Policy
// =============================================================================

/// Verdict after recording one adaptation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdaptOutcome {
    /// Keep trying
    Continue,
    /// Enough consecutive successes; adaptation is accepted
    Accepted,
    /// Attempt budget spent without acceptance
    Exhausted,
}

/// Retry bookkeeping for initial adaptation.
///
/// Acceptance requires a run of consecutive successful attempts; any
/// failure resets the run. Kept separate from the hardware driver so the
/// retry semantics are testable on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdaptPolicy {
    max_attempts: u32,
    required_consecutive: u32,
    attempts: u32,
    streak: u32,
}

impl AdaptPolicy {
    /// Create a policy with the given budget and acceptance streak
    #[must_use]
    pub const fn new(max_attempts: u32, required_consecutive: u32) -> Self {
        Self { max_attempts, required_consecutive, attempts: 0, streak: 0 }
    }

    /// Record the outcome of one attempt
    pub fn record(&mut self, success: bool) -> AdaptOutcome {
        self.attempts += 1;
        if success {
            self.streak += 1;
        } else {
            self.streak = 0;
        }

        if self.streak >= self.required_consecutive {
            AdaptOutcome::Accepted
        } else if self.attempts >= self.max_attempts {
            AdaptOutcome::Exhausted
        } else {
            AdaptOutcome::Continue
        }
    }

    /// Attempts recorded so far
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }
}

// =============================================================================
// Port Driver
// =============================================================================

/// Driver for one 4-lane 100G transceiver port
#[derive(Debug)]
pub struct XcvrPort<B: RegisterBus, D: DelayNs> {
    drp: DrpPort<B>,
    delay: D,
    config: BringUpConfig,
}

impl<B: RegisterBus, D: DelayNs> XcvrPort<B, D> {
    /// Create a port driver over a register window
    pub const fn new(bus: B, delay: D, config: BringUpConfig) -> Self {
        Self { drp: DrpPort::new(bus), delay, config }
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &BringUpConfig {
        &self.config
    }

    /// Access the DRP channel
    pub fn drp_mut(&mut self) -> &mut DrpPort<B> {
        &mut self.drp
    }

    /// Access the underlying register bus
    pub fn bus_mut(&mut self) -> &mut B {
        self.drp.bus_mut()
    }

    /// Consume the driver, returning the bus and delay
    pub fn into_parts(self) -> (B, D) {
        (self.drp.into_inner(), self.delay)
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Assert and deassert transceiver reset, then wait for stable ready.
    ///
    /// The ready field has been seen to glitch after deassert, so a single
    /// ready sample is not trusted: the field must read all-ready for
    /// [`RESET_READY_STREAK`] consecutive samples. In rare cases ready takes
    /// a long time to assert at all, and redoing the reset does not shorten
    /// that, hence the long deassert budget.
    ///
    /// Returns the number of ready samples taken after deassert.
    pub fn reset(&mut self) -> Result<u32> {
        let bus = self.drp.bus_mut();
        bus.modify(xcvr::CSR1, |v| v | xcvr::RESET);

        // Phase A: confirm the lanes actually entered reset
        let mut asserted = false;
        for _ in 0..RESET_ASSERT_POLLS {
            self.delay.delay_us(RESET_ASSERT_POLL_DELAY_US);
            let csr1 = self.drp.bus_mut().read(xcvr::CSR1);
            if csr1 >> xcvr::READY_SHIFT & xcvr::READY_MASK == 0 {
                asserted = true;
                break;
            }
        }
        if !asserted {
            #[cfg(feature = "defmt")]
            defmt::warn!("xcvr: reset not asserted after {} polls", RESET_ASSERT_POLLS);
            return Err(XcvrError::ResetAssertTimeout.into());
        }

        self.drp.bus_mut().modify(xcvr::CSR1, |v| v & !xcvr::RESET);

        // Phase B: debounced wait for all-ready
        let mut streak = 0;
        let mut samples = 0;
        while streak < RESET_READY_STREAK {
            let csr1 = self.drp.bus_mut().read(xcvr::CSR1);
            if csr1 >> xcvr::READY_SHIFT & xcvr::READY_MASK == xcvr::READY_ALL {
                streak += 1;
            } else {
                streak = 0;
                self.delay.delay_us(RESET_RESAMPLE_DELAY_US);
            }
            samples += 1;
            if samples >= RESET_DEASSERT_POLLS {
                #[cfg(feature = "defmt")]
                defmt::warn!("xcvr: ready not stable after {} samples", samples);
                return Err(XcvrError::ResetReadyTimeout.into());
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("xcvr: reset complete after {} samples", samples);
        Ok(samples)
    }

    // =========================================================================
    // Lock and Adaptation Status
    // =========================================================================

    /// Wait for every lane to report RX locked-to-data, debounced.
    ///
    /// All four lanes must be locked in the same sample, and that must hold
    /// for more than [`LOCK_STREAK`] consecutive 1 µs-spaced samples. The
    /// budget is expressed in samples, so it approximates microseconds.
    ///
    /// Returns the number of samples taken.
    pub fn wait_all_lanes_locked(&mut self, timeout_us: u32) -> Result<u32> {
        let mut streak = 0;
        let mut samples = 0;

        while streak <= LOCK_STREAK {
            self.delay.delay_us(LOCK_POLL_DELAY_US);
            samples += 1;

            let mut locked = 0;
            for lane in 0..LANE_COUNT {
                locked +=
                    self.drp.read_or_zero(lane, pma_regs::RX_LOCKED) & pma_regs::RX_LOCKED_BIT;
            }
            if locked == u32::from(LANE_COUNT) {
                streak += 1;
            } else {
                streak = 0;
            }

            if samples >= timeout_us {
                #[cfg(feature = "defmt")]
                defmt::warn!("xcvr: lanes not locked within {} us", timeout_us);
                return Err(XcvrError::LockTimeout.into());
            }
        }

        Ok(samples)
    }

    /// Poll each lane until the adaptation-in-progress flag clears.
    ///
    /// Best effort: a lane that never finishes is logged and skipped so the
    /// remaining lanes still get checked.
    pub fn verify_adaptation(&mut self) {
        for lane in 0..LANE_COUNT {
            let mut polls = 0;
            loop {
                let _ = pma::update_setting(
                    &mut self.drp,
                    &mut self.delay,
                    lane,
                    PmaAttribute::ADAPTATION_STATUS,
                );
                let in_progress =
                    self.drp.read_or_zero(lane, pma_regs::ATTR_RESULT_LO) & 0x1;
                if in_progress == 0 {
                    break;
                }
                if polls >= ADAPT_VERIFY_POLLS {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("xcvr: adaptation still in progress, lane {}", lane);
                    break;
                }
                polls += 1;
            }
        }
    }

    // =========================================================================
    // Bring-Up
    // =========================================================================

    /// Run the full duplex adaptation flow and enable the datapath.
    ///
    /// Never fails: each stage logs its own timeouts and the sequence
    /// continues, leaving the port as far along as the hardware allowed.
    pub fn bring_up(&mut self) {
        // 1. Reset the native PHY
        let _ = self.reset();

        // 2. Clear the attribute-sent flag left over from earlier traffic
        for lane in 0..LANE_COUNT {
            let _ = pma::clear_attribute_sent(&mut self.drp, lane);
        }

        // 3. PMA analog reset
        for lane in 0..LANE_COUNT {
            let _ = pma::load_config_params(&mut self.drp, lane, pma_regs::OP_ANALOG_RESET);
            let _ = self.drp.read_or_zero(lane, pma_regs::ATTR_STATUS);
        }

        // 4. Settle after the analog reset
        self.delay.delay_us(ANALOG_RESET_SETTLE_US);

        // 5. Enable PMA calibration and re-load the initial PMA settings
        for lane in 0..LANE_COUNT {
            let _ = self.drp.rmw(lane, pma_regs::CAL_CONTROL, pma_regs::CAL_ENABLE);
            let _ = self.drp.rmw(lane, pma_regs::SETTINGS_LOAD, pma_regs::SETTINGS_LOAD_BIT);
            let _ = self.drp.read_or_zero(lane, pma_regs::ATTR_STATUS);
        }

        // 6. Internal loopback plus hard PRBS31, so adaptation sees traffic
        for lane in 0..LANE_COUNT {
            let _ = pma::load_config_params(&mut self.drp, lane, pma_regs::OP_PRBS_LOOPBACK_ON);
        }

        // 7. Select the adaptation effort level
        let effort = PmaAttribute::new(
            PmaAttribute::SET_FULL_EFFORT.code,
            self.config.effort.attribute_value(),
        );
        for lane in 0..LANE_COUNT {
            let _ = pma::update_setting(
                &mut self.drp,
                &mut self.delay,
                lane,
                PmaAttribute::READ_INITIAL_EFFORT,
            );
            let _ = pma::update_setting(&mut self.drp, &mut self.delay, lane, effort);
        }

        // 8. Choose the PMA configuration
        let _ = pma::choose_config(&mut self.drp);

        // 9. Load the configuration into each lane
        for lane in 0..LANE_COUNT {
            let _ =
                pma::load_config_params(&mut self.drp, lane, pma_regs::OP_LOAD_CONFIG_INITIAL);
        }

        // 10. Start initial adaptation, then give it time to actually start
        self.start_adaptation(PmaAttribute::START_INITIAL_ADAPTATION);
        self.delay.delay_us(ADAPT_START_SETTLE_US);

        // 11. Wait for it to finish and for the lanes to lock
        self.verify_adaptation();
        let _ = self.wait_all_lanes_locked(self.config.initial_lock_timeout_us);

        // 12. Drop loopback and PRBS: mission mode
        for lane in 0..LANE_COUNT {
            let _ = pma::load_config_params(&mut self.drp, lane, pma_regs::OP_PRBS_LOOPBACK_OFF);
        }
        self.delay.delay_us(MISSION_SETTLE_US);
        let _ = self.wait_all_lanes_locked(self.config.mission_lock_timeout_us);

        // 13-15. Repeat initial adaptation until it succeeds consecutively
        let mut policy = AdaptPolicy::new(
            self.config.adapt_max_attempts,
            self.config.adapt_required_consecutive,
        );
        loop {
            self.start_adaptation(PmaAttribute::START_INITIAL_ADAPTATION);
            self.delay.delay_us(ADAPT_START_SETTLE_US);
            self.verify_adaptation();
            let success = self.wait_all_lanes_locked(self.config.initial_lock_timeout_us).is_ok();

            match policy.record(success) {
                AdaptOutcome::Continue => {}
                AdaptOutcome::Accepted => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("xcvr: adaptation accepted after {} attempts", policy.attempts());
                    break;
                }
                AdaptOutcome::Exhausted => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("xcvr: adaptation failed after {} attempts", policy.attempts());
                    break;
                }
            }
        }

        // 16-17. Choose and load the continuous-adaptation configuration
        let _ = pma::choose_config(&mut self.drp);
        for lane in 0..LANE_COUNT {
            let _ =
                pma::load_config_params(&mut self.drp, lane, pma_regs::OP_LOAD_CONFIG_CONTINUOUS);
        }

        // 18. Start continuous adaptation
        self.start_adaptation(PmaAttribute::START_CONTINUOUS_ADAPTATION);

        // 19-20. Final reset, then confirm the lanes come back locked
        let _ = self.reset();
        let _ = self.wait_all_lanes_locked(self.config.initial_lock_timeout_us);

        // 21. Recalibrate the IOPLLs and enable the datapath
        self.recalibrate_ioplls();

        let bus = self.drp.bus_mut();
        bus.write(pcs::CONTROL, pcs::ENABLE_RX_TX);

        for _ in 0..PCS_STATUS_SAMPLES {
            let _align = bus.read(pcs::VLANE_ALIGN);
            let _lock = bus.read(pcs::AM_LOCK);
            let _deskew = bus.read(pcs::AM_DESKEW);
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "pcs: vlane align {:#x}, am lock {:#x}, am deskew {:#x}",
                _align,
                _lock,
                _deskew
            );
        }

        bus.write(mac::CONTROL, mac::SET_TX_ENABLE);
        bus.write(mac::CONTROL, mac::SET_TX_RX_PROMISC_ENABLE);
    }

    fn start_adaptation(&mut self, attr: PmaAttribute) {
        for lane in 0..LANE_COUNT {
            let _ = pma::update_setting(&mut self.drp, &mut self.delay, lane, attr);
        }
    }

    /// Request recalibration of all four IOPLLs, one at a time.
    ///
    /// Not documented in the wrapper guide; each bit in CSR1 [27:24] being
    /// set is a request to recalibrate the corresponding IOPLL.
    pub fn recalibrate_ioplls(&mut self) {
        let bus = self.drp.bus_mut();
        for bit in xcvr::IOPLL_RECAL {
            bus.modify(xcvr::CSR1, |v| v | bit);
        }
    }

    // =========================================================================
    // Link and Datapath
    // =========================================================================

    /// Current link state, from the deskew status register
    pub fn link_status(&mut self) -> bool {
        self.drp.bus_mut().read(pcs::AM_DESKEW) & pcs::LINK_UP != 0
    }

    /// Poll for link-up after bring-up. Returns whether the link came up.
    pub fn wait_for_link(&mut self) -> bool {
        for _ in 0..self.config.link_polls {
            if self.link_status() {
                return true;
            }
            self.delay.delay_us(LINK_POLL_DELAY_US);
        }
        #[cfg(feature = "defmt")]
        defmt::info!("xcvr: link not detected within poll budget");
        false
    }

    /// Switch a port feature on or off
    pub fn set_feature(&mut self, feature: Feature, enable: bool) {
        features::apply(self.drp.bus_mut(), feature, enable);
    }

    /// Read all statistics counters into `out`, table order
    pub fn read_statistics(&mut self, out: &mut [u64]) {
        stats::read_statistics(self.drp.bus_mut(), out);
    }

    /// Drain all statistics counters
    pub fn clear_statistics(&mut self) {
        stats::clear_statistics(self.drp.bus_mut());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
