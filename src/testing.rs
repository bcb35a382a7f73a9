//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the driver on the
//! host without hardware access: a scriptable register bus, a virtual delay
//! source, a raw DRP mock, and a small transceiver simulator good enough to
//! run the whole bring-up sequence against.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::collections::{HashMap, VecDeque};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::drp::DrpBus;
use crate::error::Result;
use crate::hal::bus::RegisterBus;
use crate::regs::{LANE_COUNT, pcs, pma, xcvr};

// =============================================================================
// Mock Register Bus
// =============================================================================

/// Scriptable register bus
///
/// Reads return per-address scripted values first, then fall back to the
/// stored register map (writes update the map). All accesses are logged.
#[derive(Debug, Default)]
pub struct MockBus {
    registers: HashMap<u32, u32>,
    read_scripts: HashMap<u32, VecDeque<u32>>,
    write_log: Vec<(u32, u32)>,
    reads: usize,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the steady-state value of a register
    pub fn set_register(&mut self, addr: u32, value: u32) {
        self.registers.insert(addr, value);
    }

    /// Queue values returned by the next reads of `addr`, in order
    pub fn script_reads(&mut self, addr: u32, values: &[u32]) {
        self.read_scripts.entry(addr).or_default().extend(values);
    }

    /// Whether `addr` was written at all
    pub fn was_written(&self, addr: u32) -> bool {
        self.write_log.iter().any(|&(a, _)| a == addr)
    }

    /// The last value written to `addr`
    pub fn last_write(&self, addr: u32) -> Option<u32> {
        self.write_log.iter().rev().find(|&&(a, _)| a == addr).map(|&(_, v)| v)
    }

    /// All values written to `addr`, in order
    pub fn writes(&self, addr: u32) -> Vec<u32> {
        self.write_log.iter().filter(|&&(a, _)| a == addr).map(|&(_, v)| v).collect()
    }

    pub fn read_count(&self) -> usize {
        self.reads
    }

    pub fn write_count(&self) -> usize {
        self.write_log.len()
    }
}

impl RegisterBus for MockBus {
    fn read(&mut self, addr: u32) -> u32 {
        self.reads += 1;
        if let Some(value) = self.read_scripts.get_mut(&addr).and_then(VecDeque::pop_front) {
            return value;
        }
        self.registers.get(&addr).copied().unwrap_or(0)
    }

    fn write(&mut self, addr: u32, value: u32) {
        self.write_log.push((addr, value));
        self.registers.insert(addr, value);
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Virtual delay source accumulating requested time instead of sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total virtual time requested, in nanoseconds
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Total virtual time requested, in microseconds
    pub fn total_us(&self) -> u64 {
        self.total_ns / 1000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// =============================================================================
// Mock DRP Bus
// =============================================================================

/// One logged DRP operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrpOp {
    /// Read of (lane, addr)
    Read(u8, u32),
    /// Write of (lane, addr, value)
    Write(u8, u32, u32),
}

/// Raw [`DrpBus`] mock with per-lane sub-registers, scripted reads, and an
/// operation log. No engine behavior is modeled; values are inert.
#[derive(Debug, Default)]
pub struct MockDrp {
    registers: HashMap<(u8, u32), u32>,
    read_scripts: HashMap<(u8, u32), VecDeque<u32>>,
    ops: Vec<DrpOp>,
}

impl MockDrp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, lane: u8, addr: u32, value: u32) {
        self.registers.insert((lane, addr), value);
    }

    pub fn script(&mut self, lane: u8, addr: u32, values: &[u32]) {
        self.read_scripts.entry((lane, addr)).or_default().extend(values);
    }

    pub fn ops(&self) -> Vec<DrpOp> {
        self.ops.clone()
    }
}

impl DrpBus for MockDrp {
    fn read(&mut self, lane: u8, addr: u32) -> Result<u32> {
        self.ops.push(DrpOp::Read(lane, addr));
        if let Some(value) = self.read_scripts.get_mut(&(lane, addr)).and_then(VecDeque::pop_front) {
            return Ok(value);
        }
        Ok(self.registers.get(&(lane, addr)).copied().unwrap_or(0))
    }

    fn write(&mut self, lane: u8, addr: u32, data: u32) -> Result<()> {
        self.ops.push(DrpOp::Write(lane, addr, data));
        self.registers.insert((lane, addr), data);
        Ok(())
    }
}

// =============================================================================
// Transceiver Simulator
// =============================================================================

/// Register-level simulator of an immediately-ready port.
///
/// Models just enough of the hardware for the full bring-up sequence to
/// complete on its fastest path: the DRP engine executes indirect accesses
/// against a per-lane sub-register map and always reports ready, the
/// attribute engine acknowledges a trigger instantly, opcodes complete as
/// soon as their last byte lands, lanes are born locked-to-data, and the
/// CSR1 ready field tracks the reset bit.
#[derive(Debug)]
pub struct SimXcvr {
    direct: HashMap<u32, u32>,
    lanes: HashMap<(u8, u32), u32>,
    staged_addr: u32,
    staged_wdata: u32,
    rdata: u32,
    ops: Vec<(bool, u8, u32)>,
}

impl SimXcvr {
    pub fn new() -> Self {
        let mut sim = Self {
            direct: HashMap::new(),
            lanes: HashMap::new(),
            staged_addr: 0,
            staged_wdata: 0,
            rdata: 0,
            ops: Vec::new(),
        };
        for lane in 0..LANE_COUNT {
            sim.lanes.insert((lane, pma::RX_LOCKED), pma::RX_LOCKED_BIT);
        }
        sim.direct.insert(pcs::AM_DESKEW, pcs::LINK_UP);
        sim
    }

    /// Executed DRP operations as (is_write, lane, addr)
    pub fn drp_ops(&self) -> &[(bool, u8, u32)] {
        &self.ops
    }

    pub fn lane_reg(&self, lane: u8, addr: u32) -> u32 {
        self.lanes.get(&(lane, addr)).copied().unwrap_or(0)
    }

    pub fn set_lane_reg(&mut self, lane: u8, addr: u32, value: u32) {
        self.lanes.insert((lane, addr), value);
    }

    pub fn direct_reg(&self, addr: u32) -> u32 {
        self.direct.get(&addr).copied().unwrap_or(0)
    }

    pub fn write_direct(&mut self, addr: u32, value: u32) {
        self.direct.insert(addr, value);
    }

    fn execute(&mut self, ctrl: u32) {
        let lane = (self.staged_addr >> xcvr::DRP_LANE_SHIFT) as u8;
        let addr = self.staged_addr & ((1 << xcvr::DRP_LANE_SHIFT) - 1);

        if ctrl & xcvr::DRP_WRITE != 0 {
            self.ops.push((true, lane, addr));
            self.lane_write(lane, addr, self.staged_wdata);
        } else {
            self.ops.push((false, lane, addr));
            self.rdata = self.lane_reg(lane, addr);
        }
    }

    fn lane_write(&mut self, lane: u8, addr: u32, value: u32) {
        match addr {
            // attribute-sent is write-1-to-clear
            pma::ATTR_STATUS => {
                let cleared = self.lane_reg(lane, addr) & !(value & pma::ATTR_SENT);
                self.lanes.insert((lane, addr), cleared);
            }
            _ => {
                self.lanes.insert((lane, addr), value);
            }
        }

        match addr {
            // trigger: attribute goes out instantly
            pma::ATTR_REQUEST if value & pma::ATTR_REQUEST_BIT != 0 => {
                let status = self.lane_reg(lane, pma::ATTR_STATUS) | pma::ATTR_SENT;
                self.lanes.insert((lane, pma::ATTR_STATUS), status);
                self.lanes.insert((lane, pma::ATTR_BUSY), 0);
            }
            // last opcode byte completes the operation
            pma::OPCODE_B3 => {
                self.lanes.insert((lane, pma::OPCODE_STATUS), pma::OP_DONE);
            }
            pma::CONFIG_REQUEST if value == pma::CONFIG_LOAD => {
                self.lanes.insert((lane, pma::CONFIG_STATUS), pma::CONFIG_LOADED);
            }
            _ => {}
        }
    }
}

impl Default for SimXcvr {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBus for SimXcvr {
    fn read(&mut self, addr: u32) -> u32 {
        match addr {
            xcvr::DRP_CTRL => xcvr::DRP_READY,
            xcvr::DRP_RDATA => self.rdata,
            xcvr::DRP_ADDR => self.staged_addr,
            xcvr::DRP_WDATA => self.staged_wdata,
            // ready field tracks the reset bit
            xcvr::CSR1 => {
                let raw = self.direct_reg(addr);
                let field = if raw & xcvr::RESET != 0 { 0 } else { xcvr::READY_ALL };
                raw & !(xcvr::READY_MASK << xcvr::READY_SHIFT) | field << xcvr::READY_SHIFT
            }
            _ => self.direct_reg(addr),
        }
    }

    fn write(&mut self, addr: u32, value: u32) {
        match addr {
            xcvr::DRP_ADDR => self.staged_addr = value,
            xcvr::DRP_WDATA => self.staged_wdata = value,
            xcvr::DRP_CTRL => {
                if value & xcvr::DRP_REQ != 0 {
                    self.execute(value);
                }
            }
            _ => {
                self.direct.insert(addr, value);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_bus_scripts_then_steady_state() {
        let mut bus = MockBus::new();
        bus.set_register(0x10, 7);
        bus.script_reads(0x10, &[1, 2]);

        assert_eq!(bus.read(0x10), 1);
        assert_eq!(bus.read(0x10), 2);
        assert_eq!(bus.read(0x10), 7);
    }

    #[test]
    fn mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_us(3);
        delay.delay_ms(1);
        assert_eq!(delay.total_us(), 1003);
    }

    #[test]
    fn sim_ready_field_tracks_reset_bit() {
        let mut sim = SimXcvr::new();
        assert_eq!(sim.read(xcvr::CSR1) >> xcvr::READY_SHIFT & xcvr::READY_MASK, xcvr::READY_ALL);

        sim.write(xcvr::CSR1, xcvr::RESET);
        assert_eq!(sim.read(xcvr::CSR1) >> xcvr::READY_SHIFT & xcvr::READY_MASK, 0);
    }

    #[test]
    fn sim_attribute_trigger_acknowledges() {
        let mut sim = SimXcvr::new();
        sim.set_lane_reg(1, pma::ATTR_BUSY, pma::ATTR_BUSY_BIT);

        // direct lane write through the engine
        sim.write(xcvr::DRP_ADDR, pma::ATTR_REQUEST | 1 << xcvr::DRP_LANE_SHIFT);
        sim.write(xcvr::DRP_WDATA, pma::ATTR_REQUEST_BIT);
        sim.write(xcvr::DRP_CTRL, xcvr::DRP_ENABLE | xcvr::DRP_REQ | xcvr::DRP_WRITE);

        assert_eq!(sim.lane_reg(1, pma::ATTR_STATUS), pma::ATTR_SENT);
        assert_eq!(sim.lane_reg(1, pma::ATTR_BUSY), 0);
    }
}
