// nt_armfw/src/util/mod.rs

//! Board-level helpers: the PL011 byte sink and system register access.

pub mod uart;

#[cfg(target_arch = "aarch64")]
#[macro_use]
pub mod sysreg;
