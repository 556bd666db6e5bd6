// nt_armfw/src/trap/infrastructure/low_level.rs

//! # Low-Level Trap Entry
//!
//! The AArch64 implementation of [`TrapHardware`] and the four `extern "C"`
//! symbols the trap-vector stub branches to with `x0` pointing at a filled
//! [`ExceptionContext`].

use super::traits::TrapHardware;
use crate::console::{self, Stdout};
use crate::trap::ds::{CoreDispatchers, ExceptionContext, TrapClass, DAIF_ALL};
use crate::util::sysreg;

/// The running core.
pub struct Aarch64Cpu;

impl TrapHardware for Aarch64Cpu {
    fn current_el(&self) -> u64 {
        mrs!("CurrentEL")
    }

    fn mpidr(&self) -> u64 {
        mrs!("MPIDR_EL1")
    }

    fn mask_all(&self) {
        msr!("DAIF", DAIF_ALL);
        sysreg::isb();
    }

    fn halt(&self) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}

/// Per-core dispatch state shared by every trap class.
pub static DISPATCHERS: CoreDispatchers = CoreDispatchers::new();

/// Common body of the four entry points.
///
/// # Safety
/// `ctx` must point at a context filled by the trap-vector stub.
unsafe fn enter(class: TrapClass, ctx: *mut ExceptionContext) -> ! {
    let cpu = Aarch64Cpu;
    let mut out = Stdout;

    let ctx = match ctx.as_ref() {
        Some(ctx) => ctx,
        None => {
            cpu.mask_all();
            console::print_str("Exception: null context\n");
            cpu.halt();
        }
    };

    match DISPATCHERS.take(class, ctx, &cpu, &mut out) {
        Ok(halted) => halted.park(&cpu),
        Err(e) => {
            // Second trap on this core: print one line and stop.
            crate::println!("Exception: {}", e);
            cpu.halt()
        }
    }
}

/// Synchronous exception entry.
///
/// # Safety
/// Only the trap-vector stub may call this, with `ctx` pointing at a filled
/// context.
#[no_mangle]
pub unsafe extern "C" fn exc_sync(ctx: *mut ExceptionContext) -> ! {
    enter(TrapClass::Synchronous, ctx)
}

/// IRQ entry.
///
/// # Safety
/// See [`exc_sync`].
#[no_mangle]
pub unsafe extern "C" fn exc_irq(ctx: *mut ExceptionContext) -> ! {
    enter(TrapClass::Irq, ctx)
}

/// FIQ entry.
///
/// # Safety
/// See [`exc_sync`].
#[no_mangle]
pub unsafe extern "C" fn exc_fiq(ctx: *mut ExceptionContext) -> ! {
    enter(TrapClass::Fiq, ctx)
}

/// SError entry.
///
/// # Safety
/// See [`exc_sync`].
#[no_mangle]
pub unsafe extern "C" fn exc_serr(ctx: *mut ExceptionContext) -> ! {
    enter(TrapClass::SError, ctx)
}
