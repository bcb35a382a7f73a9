//! MAC statistics counters
//!
//! The statistics block exposes one 32-bit counter per register; counters
//! are clear-on-read, so draining the table doubles as the reset operation.

use crate::hal::bus::RegisterBus;
use crate::regs::STAT_OFFSET;

/// One statistics counter: register offset and display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatInfo {
    /// Byte offset of the counter within the port window
    pub addr: u32,
    /// Counter name
    pub name: &'static str,
}

const fn stat(addr: u32, name: &'static str) -> StatInfo {
    StatInfo { addr: STAT_OFFSET + addr, name }
}

/// Number of statistics counters on a 100G port
pub const STAT_COUNT: usize = 32;

/// Statistics counter table for the 100G MAC
pub const STATS_100G: [StatInfo; STAT_COUNT] = [
    // tx statistics
    stat(0x04, "tx_good"),
    stat(0x0C, "tx_pause"),
    stat(0x30, "tx_outerr"),
    stat(0x60, "tx_ucast"),
    stat(0x68, "tx_mcast"),
    stat(0x70, "tx_bcast"),
    stat(0x7C, "tx_single_coll"),
    stat(0x80, "tx_multi_coll"),
    stat(0x84, "tx_late_coll"),
    // rx statistics
    stat(0x08, "rx_good"),
    stat(0x10, "rx_pause"),
    stat(0x14, "rx_crcerr"),
    stat(0x18, "rx_ifgerr"),
    stat(0x1C, "rx_alignerr"),
    stat(0x20, "rx_oversize"),
    stat(0x24, "rx_undersize"),
    stat(0x28, "rx_truncated"),
    stat(0x2C, "rx_inerr"),
    stat(0x34, "rx_jabbers"),
    stat(0x38, "rx_vlan"),
    stat(0x3C, "rx_fragment"),
    stat(0x40, "rx_all"),
    stat(0x44, "rx_64b"),
    stat(0x48, "rx_65to127b"),
    stat(0x4C, "rx_128to255b"),
    stat(0x50, "rx_256to511b"),
    stat(0x54, "rx_512to1023b"),
    stat(0x58, "rx_1024to1518b"),
    stat(0x5C, "rx_1519tomaxb"),
    stat(0x64, "rx_ucast"),
    stat(0x6C, "rx_mcast"),
    stat(0x74, "rx_bcast"),
];

/// Read every counter into `out`, table order.
///
/// `out` may be shorter than the table; extra counters are left unread
/// (and therefore not cleared).
pub fn read_statistics<B: RegisterBus>(bus: &mut B, out: &mut [u64]) {
    for (slot, info) in out.iter_mut().zip(STATS_100G.iter()) {
        *slot = u64::from(bus.read(info.addr));
    }
}

/// Drain every counter, zeroing the statistics block
pub fn clear_statistics<B: RegisterBus>(bus: &mut B) {
    for info in &STATS_100G {
        let _ = bus.read(info.addr);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testing::MockBus;

    #[test]
    fn table_addresses_unique_and_in_block() {
        for (i, a) in STATS_100G.iter().enumerate() {
            assert!(a.addr >= STAT_OFFSET && a.addr < STAT_OFFSET + 0x100);
            for b in &STATS_100G[i + 1..] {
                assert_ne!(a.addr, b.addr, "{} and {} share an address", a.name, b.name);
            }
        }
    }

    #[test]
    fn read_statistics_follows_table_order() {
        let mut bus = MockBus::new();
        bus.set_register(STATS_100G[0].addr, 7); // tx_good
        bus.set_register(STATS_100G[9].addr, 9); // rx_good

        let mut out = [0u64; STAT_COUNT];
        read_statistics(&mut bus, &mut out);

        assert_eq!(out[0], 7);
        assert_eq!(out[9], 9);
        assert_eq!(out[1], 0);
    }

    #[test]
    fn clear_statistics_reads_every_counter() {
        let mut bus = MockBus::new();
        clear_statistics(&mut bus);
        assert_eq!(bus.read_count(), STAT_COUNT);
    }

    #[test]
    fn short_output_reads_only_prefix() {
        let mut bus = MockBus::new();
        let mut out = [0u64; 4];
        read_statistics(&mut bus, &mut out);
        assert_eq!(bus.read_count(), 4);
    }
}
