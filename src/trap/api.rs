// nt_armfw/src/trap/api.rs

//! # Public API for the Trap Subsystem
//!
//! Lifecycle of the trap layer. There is no handler registration: every trap
//! class ends in the diagnostic dump and a halt.

use super::ds::DAIF_ALL;
use super::infrastructure::TrapHardware;

/// Brings the trap layer up.
///
/// Currently inert. The platform enters with its vector table already in
/// place. Extension points, none of which run today:
/// - installing this image's vector table in `VBAR_EL3`,
/// - configuring `HCR_EL2` before dropping to a lower level,
/// - forwarding lower-level vectors to an EL1 payload.
pub fn initialize_with(_hw: &impl TrapHardware) {
    log::debug!("trap layer: vector table left as installed by the platform");
}

/// Masks every trap class (debug, SError, IRQ, FIQ) on the current core.
pub fn shutdown_with(hw: &impl TrapHardware) {
    hw.mask_all();
    log::debug!("trap layer: DAIF <- {:#x}", DAIF_ALL);
}

#[cfg(target_arch = "aarch64")]
pub fn initialize() {
    initialize_with(&super::infrastructure::low_level::Aarch64Cpu);
}

#[cfg(target_arch = "aarch64")]
pub fn shutdown() {
    shutdown_with(&super::infrastructure::low_level::Aarch64Cpu);
}
