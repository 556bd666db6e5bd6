// nt_armfw/src/trap/ds/mod.rs

//! # Trap Data Structures Module
//!
//! The exception context shared with the trap-vector stub, trap classes and
//! register wrappers, and the dispatcher state machine.

pub mod types;
pub mod context;
pub mod error;
pub mod handler;

pub use self::types::{
    SavedState, Syndrome, TrapClass,
    DAIF_A, DAIF_ALL, DAIF_D, DAIF_F, DAIF_I,
};

pub use self::context::{ExceptionContext, SIZEOF_EXC_INFO, TRAP_SP_OFFSET};

pub use self::error::TransitionError;

pub use self::handler::{core_index, CoreDispatchers, DispatchState, Dispatcher, Halted};
