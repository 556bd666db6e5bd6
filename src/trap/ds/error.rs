// nt_armfw/src/trap/ds/error.rs

//! # Dispatcher Errors

use core::fmt;

use super::handler::DispatchState;
use super::types::TrapClass;

/// A trap arrived while the dispatcher was not idle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransitionError {
    /// State the dispatcher was in.
    pub from: DispatchState,
    /// Class of the trap that was refused.
    pub class: TrapClass,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} trap refused while {}", self.class, self.from)
    }
}
