// nt_armfw/src/util/sysreg.rs

//! Thin `mrs`/`msr` wrappers. Register names are passed as string literals so
//! the assembler sees them verbatim (`"CurrentEL"`, `"DAIF"`, ...).

/// Reads a system register.
macro_rules! mrs {
    ($reg:literal) => {{
        let value: u64;
        // Safety: reading a system register has no memory side effects.
        unsafe {
            core::arch::asm!(
                concat!("mrs {}, ", $reg),
                out(reg) value,
                options(nomem, nostack, preserves_flags)
            );
        }
        value
    }};
}

/// Writes a system register.
macro_rules! msr {
    ($reg:literal, $value:expr) => {{
        let value: u64 = $value;
        // Safety: the caller picks registers whose writes are valid at the
        // current exception level.
        unsafe {
            core::arch::asm!(
                concat!("msr ", $reg, ", {}"),
                in(reg) value,
                options(nostack, preserves_flags)
            );
        }
    }};
}

/// Instruction synchronization barrier.
#[inline(always)]
pub fn isb() {
    // Safety: barriers have no operands.
    unsafe { core::arch::asm!("isb sy", options(nostack, preserves_flags)) };
}
