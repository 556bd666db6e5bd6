// nt_armfw/src/trap/report.rs

//! # Register Dump
//!
//! Renders an [`ExceptionContext`] in the fixed multi-line format read by
//! people at a serial console.

use core::fmt::{self, Write};

use super::classify::{current_level, exception_class, exception_source};
use super::ds::context::ExceptionContext;

const REGS_PER_LINE: usize = 4;

/// Writes everything after the `Exception: <CLASS>` banner.
///
/// `current_el` is the raw `CurrentEL` value of the core doing the printing.
/// Every other value comes from `ctx`.
pub fn render<W: Write>(ctx: &ExceptionContext, current_el: u64, out: &mut W) -> fmt::Result {
    writeln!(out, "Exception taken from {}", exception_source(ctx.spsr))?;
    writeln!(out, "Running in EL{}", current_level(current_el))?;
    writeln!(out, "MPIDR: {:#x}", ctx.mpidr)?;
    writeln!(out, "Registers: (@{:#x})", ctx as *const ExceptionContext as usize)?;

    for (line, group) in ctx.regs.chunks(REGS_PER_LINE).enumerate() {
        let first = line * REGS_PER_LINE;
        let label = RegRange(first, first + REGS_PER_LINE - 1);
        write!(out, "{:>7}:", label)?;
        for reg in group {
            write!(out, " {:016x}", reg)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "SP:       {:#x}", ctx.interrupted_sp())?;
    writeln!(out, "ELR_EL3:  {:#x}", ctx.elr)?;
    writeln!(out, "SPSR_EL3: {:#x}", ctx.spsr)?;
    writeln!(out, "FAR_EL3:  {:#x}", ctx.far)?;
    writeln!(out, "ESR_EL3:  {:#x} ({})", ctx.esr, exception_class(ctx.esr))
}

/// `x<first>-x<last>`, padded as a unit.
struct RegRange(usize, usize);

impl fmt::Display for RegRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 8];
        let mut cursor = Cursor { buf: &mut buf, len: 0 };
        write!(cursor, "x{}-x{}", self.0, self.1)?;
        let len = cursor.len;
        // Only ASCII digits and punctuation were written.
        let text = core::str::from_utf8(&buf[..len]).map_err(|_| fmt::Error)?;
        f.pad(text)
    }
}

/// Fixed-size formatting target for short labels.
struct Cursor<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl Write for Cursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let slot = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        slot.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
