// nt_armfw/src/trap/infrastructure/traits.rs

//! # Hardware Seam
//!
//! The few processor operations the trap path needs. The real implementation
//! lives in `low_level`; tests substitute their own.

/// Processor control used by the dispatcher and the trap lifecycle.
pub trait TrapHardware {
    /// Raw `CurrentEL` register value.
    fn current_el(&self) -> u64;

    /// Raw `MPIDR_EL1` value of the core running the trap path.
    fn mpidr(&self) -> u64;

    /// Masks debug, SError, IRQ and FIQ on the current core.
    fn mask_all(&self);

    /// Stops the current core for good. Never yields or sleeps.
    fn halt(&self) -> !;
}
