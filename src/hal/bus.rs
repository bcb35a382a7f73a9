//! Register bus abstraction
//!
//! One [`RegisterBus`] instance covers one port's register window (MAC,
//! statistics, PCS, and transceiver control blocks). The platform maps and
//! bounds-checks the window; at this layer access is infallible, and a bus
//! fault is indistinguishable from a hardware-reported register value.

/// 32-bit register access to one port's register window
///
/// This trait can be implemented by different backends: memory-mapped I/O
/// on hardware ([`Mmio32`]), or a simulated register file in host tests.
pub trait RegisterBus {
    /// Read a 32-bit register at `addr` (byte offset into the window)
    fn read(&mut self, addr: u32) -> u32;

    /// Write a 32-bit register at `addr` (byte offset into the window)
    fn write(&mut self, addr: u32, value: u32);

    /// Read, apply `f`, and write back
    fn modify<F: FnOnce(u32) -> u32>(&mut self, addr: u32, f: F) {
        let value = self.read(addr);
        self.write(addr, f(value));
    }
}

// =============================================================================
// MMIO Implementation
// =============================================================================

/// Memory-mapped implementation of [`RegisterBus`]
///
/// # Safety
///
/// The base pointer must cover the whole per-port register window, be
/// 32-bit aligned, and remain valid and exclusively owned by this instance
/// for its lifetime.
#[derive(Debug)]
pub struct Mmio32 {
    base: *mut u32,
}

impl Mmio32 {
    /// Create a bus over a mapped register window
    ///
    /// # Safety
    /// See the type-level safety requirements.
    pub const unsafe fn new(base: *mut u32) -> Self {
        Self { base }
    }
}

// The window is exclusively owned; the raw pointer does not alias.
unsafe impl Send for Mmio32 {}

impl RegisterBus for Mmio32 {
    #[inline(always)]
    fn read(&mut self, addr: u32) -> u32 {
        // SAFETY: constructor guarantees the window is mapped and aligned
        unsafe { core::ptr::read_volatile(self.base.byte_add(addr as usize)) }
    }

    #[inline(always)]
    fn write(&mut self, addr: u32, value: u32) {
        // SAFETY: constructor guarantees the window is mapped and aligned
        unsafe { core::ptr::write_volatile(self.base.byte_add(addr as usize), value) }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
