// nt_armfw/src/trap/mod.rs

//! # AArch64 EL3 Trap Diagnostics
//!
//! Every trap taken at EL3 is fatal. The entry points classify the captured
//! state, print a register dump on the console and halt the core.

pub mod classify;
pub mod ds;
pub mod infrastructure;
pub mod report;
mod api;

pub use self::api::*;

pub use self::classify::{current_level, exception_class, exception_source, UNKNOWN};

pub use self::ds::{
    core_index, CoreDispatchers, DispatchState, Dispatcher, ExceptionContext, Halted,
    TransitionError, TrapClass, DAIF_ALL, SIZEOF_EXC_INFO,
};

pub use self::infrastructure::TrapHardware;

#[cfg(target_arch = "aarch64")]
pub use self::infrastructure::low_level::{exc_fiq, exc_irq, exc_serr, exc_sync, Aarch64Cpu};
