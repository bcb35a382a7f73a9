//! Register map for the N5010 HiTek 100G port
//!
//! Each port exposes one register window split into four blocks: MAC control,
//! statistics counters, PCS, and transceiver (XCVR) control. Direct offsets
//! below are byte offsets into that window; the `pma` module holds indirect
//! per-lane sub-register addresses reached through the DRP engine.

// =============================================================================
// Block Windows
// =============================================================================

/// MAC control block offset
pub const MAC_OFFSET: u32 = 0x000;
/// Statistics counter block offset
pub const STAT_OFFSET: u32 = 0x100;
/// PCS block offset
pub const PCS_OFFSET: u32 = 0x800;
/// Transceiver control block offset
pub const XCVR_OFFSET: u32 = 0x900;

/// Transceiver lanes per port (4 × 25G = 100G)
pub const LANE_COUNT: u8 = 4;

// =============================================================================
// MAC Block
// =============================================================================

/// MAC control register constants
pub mod mac {
    use super::MAC_OFFSET;

    /// MAC control register
    pub const CONTROL: u32 = MAC_OFFSET + 0x4;

    /// Control value enabling the TX MAC only
    pub const SET_TX_ENABLE: u32 = 0x0600_0521;
    /// Control value enabling TX, RX, and promiscuous reception
    pub const SET_TX_RX_PROMISC_ENABLE: u32 = 0x0600_0533;
    /// MAC-level loopback enable bit
    pub const LOOPBACK: u32 = 1 << 12;
}

// =============================================================================
// PCS Block
// =============================================================================

/// PCS register constants
pub mod pcs {
    use super::PCS_OFFSET;

    /// PCS control register
    pub const CONTROL: u32 = PCS_OFFSET + 0x4;
    /// Virtual lane alignment status register
    pub const VLANE_ALIGN: u32 = PCS_OFFSET + 0x8;
    /// Alignment marker lock status register
    pub const AM_LOCK: u32 = PCS_OFFSET + 0xC;
    /// Alignment marker deskew status register; bit 0 doubles as link status
    pub const AM_DESKEW: u32 = PCS_OFFSET + 0x10;

    /// Control value enabling the RX and TX PCS
    pub const ENABLE_RX_TX: u32 = 0x3;
    /// Deskew-complete / link-up bit
    pub const LINK_UP: u32 = 1;
}

// =============================================================================
// XCVR Block
// =============================================================================

/// Transceiver control and DRP engine register constants
pub mod xcvr {
    use super::XCVR_OFFSET;

    /// Transceiver control/status register 1
    pub const CSR1: u32 = XCVR_OFFSET + 0x4;

    /// DRP control/status register
    pub const DRP_CTRL: u32 = XCVR_OFFSET + 0x10;
    /// DRP address register
    pub const DRP_ADDR: u32 = XCVR_OFFSET + 0x14;
    /// DRP write data register
    pub const DRP_WDATA: u32 = XCVR_OFFSET + 0x18;
    /// DRP read data register
    pub const DRP_RDATA: u32 = XCVR_OFFSET + 0x1C;

    /// DRP_REQ: initiate a DRP operation
    pub const DRP_REQ: u32 = 1 << 0;
    /// DRP_WR_RDn: operation direction, 1 = write
    pub const DRP_WRITE: u32 = 1 << 1;
    /// DRP_ENABLE: enable the DRP engine
    pub const DRP_ENABLE: u32 = 1 << 2;
    /// DRP_RDY: previous operation complete, a new one may be issued
    pub const DRP_READY: u32 = 1 << 4;
    /// Lane index position within the DRP address word
    pub const DRP_LANE_SHIFT: u32 = 19;

    /// CSR1: transceiver reset assert bit
    pub const RESET: u32 = 1 << 1;
    /// CSR1: position of the tx/rx ready field
    pub const READY_SHIFT: u32 = 12;
    /// CSR1: width mask of the tx/rx ready field
    pub const READY_MASK: u32 = 0x3;
    /// Ready field value when both tx and rx are out of reset
    pub const READY_ALL: u32 = 0x3;

    /// CSR1 bits [27:24]: setting a bit requests recalibration of the
    /// corresponding IOPLL (undocumented in the wrapper guide)
    pub const IOPLL_RECAL: [u32; 4] = [1 << 24, 1 << 25, 1 << 26, 1 << 27];
}

// =============================================================================
// PMA Indirect Sub-Registers
// =============================================================================

/// PMA sub-register addresses and opcode values, reached through the DRP.
///
/// The attribute interface (0x84-0x9x) follows the E-tile PHY user guide
/// section 7.11 "PMA Attribute Details"; the opcode interface (0x200-0x207)
/// follows UG-20056.
pub mod pma {
    /// Attribute value bits [7:0]
    pub const ATTR_VALUE_LO: u32 = 0x84;
    /// Attribute value bits [15:8]
    pub const ATTR_VALUE_HI: u32 = 0x85;
    /// Attribute code bits [7:0]
    pub const ATTR_CODE_LO: u32 = 0x86;
    /// Attribute code bits [15:8]
    pub const ATTR_CODE_HI: u32 = 0x87;
    /// Attribute return value bits [7:0]
    pub const ATTR_RESULT_LO: u32 = 0x88;
    /// Attribute return value bits [15:8]
    pub const ATTR_RESULT_HI: u32 = 0x89;
    /// Attribute status; bit 7 set when the code has been sent to the PMA
    pub const ATTR_STATUS: u32 = 0x8A;
    /// Attribute busy; bit 0 clear when the PMA is done acting on the code
    pub const ATTR_BUSY: u32 = 0x8B;
    /// Attribute request; bit 0 triggers sending the staged code
    pub const ATTR_REQUEST: u32 = 0x90;
    /// Settings load; bit 0 loads staged PMA settings into the PMA
    pub const SETTINGS_LOAD: u32 = 0x91;
    /// Calibration control; bit 5 enables calibration on settings load
    pub const CAL_CONTROL: u32 = 0x95;

    /// Attribute-sent flag in [`ATTR_STATUS`]
    pub const ATTR_SENT: u32 = 1 << 7;
    /// Busy flag in [`ATTR_BUSY`]
    pub const ATTR_BUSY_BIT: u32 = 1 << 0;
    /// Request trigger in [`ATTR_REQUEST`]
    pub const ATTR_REQUEST_BIT: u32 = 1 << 0;
    /// Settings-load trigger in [`SETTINGS_LOAD`]
    pub const SETTINGS_LOAD_BIT: u32 = 1 << 0;
    /// Calibration-enable in [`CAL_CONTROL`]
    pub const CAL_ENABLE: u32 = 1 << 5;

    /// Opcode byte 0 ([7:0])
    pub const OPCODE_B0: u32 = 0x200;
    /// Opcode byte 1 ([15:8])
    pub const OPCODE_B1: u32 = 0x201;
    /// Opcode byte 2 ([23:16])
    pub const OPCODE_B2: u32 = 0x202;
    /// Opcode byte 3 ([31:24])
    pub const OPCODE_B3: u32 = 0x203;
    /// Opcode operation status; bit 7 = completed, bit 0 = error
    pub const OPCODE_STATUS: u32 = 0x207;

    /// Operation-completed flag in [`OPCODE_STATUS`]
    pub const OP_DONE: u32 = 1 << 7;
    /// Operation-error flag in [`OPCODE_STATUS`]
    pub const OP_ERROR: u32 = 1 << 0;

    /// Configuration load request register (lane 0 only)
    pub const CONFIG_REQUEST: u32 = 0x40143;
    /// Configuration loading status register (lane 0 only)
    pub const CONFIG_STATUS: u32 = 0x40144;
    /// Value requesting a configuration load
    pub const CONFIG_LOAD: u32 = 0x80;
    /// Load-complete flag in [`CONFIG_STATUS`]
    pub const CONFIG_LOADED: u32 = 1 << 0;

    /// RX locked-to-data status, per lane; bit 0 set when locked
    pub const RX_LOCKED: u32 = 0x40080;
    /// Locked flag in [`RX_LOCKED`]
    pub const RX_LOCKED_BIT: u32 = 1 << 0;

    /// Opcode: PMA analog reset (UG-20056 §6.4)
    pub const OP_ANALOG_RESET: u32 = 0x8100_0000;
    /// Opcode: TX/RX PRBS31, hard PRBS generator, internal loopback on
    pub const OP_PRBS_LOOPBACK_ON: u32 = 0x9300_000D;
    /// Opcode: internal loopback and hard PRBS generator off (mission mode)
    pub const OP_PRBS_LOOPBACK_OFF: u32 = 0x9300_001E;
    /// Opcode: load PMA configuration for initial adaptation
    pub const OP_LOAD_CONFIG_INITIAL: u32 = 0x9400_0000;
    /// Opcode: load PMA configuration for continuous adaptation
    pub const OP_LOAD_CONFIG_CONTINUOUS: u32 = 0x9400_0001;
}

// =============================================================================
// Unit Tests
// =============================================================================
