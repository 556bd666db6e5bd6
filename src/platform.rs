// nt_armfw/src/platform.rs

//! # Platform Constants
//!
//! Memory map and sizing for the QEMU `virt` style board this firmware image
//! targets. Everything here is a build-time constant.

use log::LevelFilter;

/// Size of the static pool served by the early allocator.
pub const HEAP_SIZE: usize = 1 << 22;

/// Boot stack size of the primary core.
pub const STACK_SIZE: usize = 1 << 12;

/// Number of cores on the platform. Only core 0 runs before the general
/// memory manager exists.
pub const CORE_COUNT: usize = 2;

pub const RAM_BASE: usize = 0x4000_0000;
pub const RAM_SIZE: usize = 0x4000_0000;

/// PL011 UART data register.
pub const UART0_BASE: usize = 0x0900_0000;

/// Alignment used by `acquire` when the caller does not ask for one.
pub const DEFAULT_ALIGN: usize = 64;

/// Bytes carved out of the early pool for the general-purpose heap.
pub const FRONT_END_HEAP_SIZE: usize = 256 * 1024;

/// Alignment of the general-purpose heap region.
pub const FRONT_END_HEAP_ALIGN: usize = 4096;

/// Minimum growth step of the general-purpose heap.
pub const FRONT_END_GROW_STEP: usize = 64 * 1024;

/// Maximum level emitted by the console logger.
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;
