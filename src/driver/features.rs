//! Toggleable port features
//!
//! Each feature is a named variant with its own register recipe; new
//! features are added by extending the enum and the match in [`apply`].

use crate::hal::bus::RegisterBus;
use crate::regs::mac;

/// A port feature that can be switched at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feature {
    /// MAC-level loopback: transmitted frames are reflected back to RX
    Loopback,
}

impl Feature {
    /// Feature name, for diagnostics
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Feature::Loopback => "loopback",
        }
    }
}

/// Apply `feature` in the given state
pub fn apply<B: RegisterBus>(bus: &mut B, feature: Feature, enable: bool) {
    #[cfg(feature = "defmt")]
    defmt::info!("feature {} -> {}", feature.name(), enable);

    match feature {
        Feature::Loopback => {
            let value = if enable {
                mac::SET_TX_RX_PROMISC_ENABLE | mac::LOOPBACK
            } else {
                mac::SET_TX_RX_PROMISC_ENABLE
            };
            bus.write(mac::CONTROL, value);
        }
    }
}
