// nt_armfw/src/trap/ds/handler.rs

//! # Dispatcher State Machine
//!
//! `Idle -> Handling* -> Halted`. There is no edge out of a handling state
//! other than `Halted`, and none out of `Halted`. Each core owns one
//! dispatcher, picked by `MPIDR_EL1.Aff0`. A trap that finds its core's
//! dispatcher anywhere but `Idle` is refused. A core with no slot still dumps.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use super::context::ExceptionContext;
use super::error::TransitionError;
use super::types::TrapClass;
use crate::platform::CORE_COUNT;
use crate::trap::infrastructure::traits::TrapHardware;
use crate::trap::report;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum DispatchState {
    Idle = 0,
    HandlingSynchronous = 1,
    HandlingIrq = 2,
    HandlingFiq = 3,
    HandlingSError = 4,
    Halted = 5,
}

impl DispatchState {
    pub const fn handling(class: TrapClass) -> Self {
        match class {
            TrapClass::Synchronous => Self::HandlingSynchronous,
            TrapClass::Irq => Self::HandlingIrq,
            TrapClass::Fiq => Self::HandlingFiq,
            TrapClass::SError => Self::HandlingSError,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Idle,
            1 => Self::HandlingSynchronous,
            2 => Self::HandlingIrq,
            3 => Self::HandlingFiq,
            4 => Self::HandlingSError,
            _ => Self::Halted,
        }
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::HandlingSynchronous => "handling SYNC",
            Self::HandlingIrq => "handling IRQ",
            Self::HandlingFiq => "handling FIQ",
            Self::HandlingSError => "handling SError",
            Self::Halted => "halted",
        };
        f.write_str(name)
    }
}

/// Proof that the dispatcher reached `Halted`. The only thing left to do
/// with it is [`Halted::park`].
#[must_use]
pub struct Halted(());

impl Halted {
    pub fn park(self, hw: &impl TrapHardware) -> ! {
        hw.halt()
    }
}

/// # Trap Dispatcher
///
/// State of one core. Every trap class taken on that core goes through
/// [`Dispatcher::take`]; [`CoreDispatchers`] holds one per core.
pub struct Dispatcher {
    state: AtomicU8,
}

impl Dispatcher {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(DispatchState::Idle as u8),
        }
    }

    pub fn state(&self) -> DispatchState {
        DispatchState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Handles one trap: masks further traps, prints the class banner and the
    /// register dump to `out`, and moves to `Halted`.
    ///
    /// Write errors on `out` are ignored; the halt must happen regardless.
    pub fn take<W: fmt::Write>(
        &self,
        class: TrapClass,
        ctx: &ExceptionContext,
        hw: &impl TrapHardware,
        out: &mut W,
    ) -> Result<Halted, TransitionError> {
        let handling = DispatchState::handling(class);
        if let Err(raw) = self.state.compare_exchange(
            DispatchState::Idle as u8,
            handling as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            hw.mask_all();
            return Err(TransitionError {
                from: DispatchState::from_raw(raw),
                class,
            });
        }

        let halted = dump(class, ctx, hw, out);
        self.state.store(DispatchState::Halted as u8, Ordering::Release);
        Ok(halted)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Masks further traps and prints the banner and register dump.
fn dump<W: fmt::Write>(
    class: TrapClass,
    ctx: &ExceptionContext,
    hw: &impl TrapHardware,
    out: &mut W,
) -> Halted {
    hw.mask_all();
    let _ = writeln!(out, "Exception: {}", class);
    let _ = report::render(ctx, hw.current_el(), out);
    Halted(())
}

/// Core index from an `MPIDR_EL1` value (Aff0), as used by `_start`.
pub const fn core_index(mpidr: u64) -> usize {
    (mpidr & 0xff) as usize
}

/// One [`Dispatcher`] per core, selected by the live `MPIDR_EL1`.
///
/// A core halting does not affect the others. A second trap on the same
/// core is refused.
pub struct CoreDispatchers {
    cores: [Dispatcher; CORE_COUNT],
}

impl CoreDispatchers {
    pub const fn new() -> Self {
        const IDLE: Dispatcher = Dispatcher::new();
        Self {
            cores: [IDLE; CORE_COUNT],
        }
    }

    /// Dispatcher of core `index`, if the platform has such a core.
    pub fn core(&self, index: usize) -> Option<&Dispatcher> {
        self.cores.get(index)
    }

    /// Routes a trap to the current core's dispatcher. A core outside
    /// `CORE_COUNT` has no state to track but still gets its dump.
    pub fn take<W: fmt::Write>(
        &self,
        class: TrapClass,
        ctx: &ExceptionContext,
        hw: &impl TrapHardware,
        out: &mut W,
    ) -> Result<Halted, TransitionError> {
        match self.core(core_index(hw.mpidr())) {
            Some(dispatcher) => dispatcher.take(class, ctx, hw, out),
            None => Ok(dump(class, ctx, hw, out)),
        }
    }
}

impl Default for CoreDispatchers {
    fn default() -> Self {
        Self::new()
    }
}
