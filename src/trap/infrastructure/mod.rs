// nt_armfw/src/trap/infrastructure/mod.rs

//! # Trap Infrastructure Module
//!
//! The hardware seam and, on AArch64, the entry points called by the
//! trap-vector stub.

pub mod traits;

#[cfg(target_arch = "aarch64")]
pub mod low_level;

pub use self::traits::TrapHardware;
