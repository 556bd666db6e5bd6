// nt_armfw/src/trap/classify.rs

//! # Trap Classification
//!
//! Pure lookups from raw register fields to short human-readable labels.
//! Both tables are sparse; an empty slot prints as [`UNKNOWN`].

use super::ds::types::{SavedState, Syndrome};

/// Printed for any field value without a label.
pub const UNKNOWN: &str = "?";

/// SPSR.M[3:0] → originating level and stack selector.
pub static SOURCE_TABLE: [Option<&str>; 16] = {
    let mut t = [None; 16];
    t[0x0] = Some("EL0t");
    t[0x4] = Some("EL1t");
    t[0x5] = Some("EL1h");
    t[0x8] = Some("EL2t");
    t[0x9] = Some("EL2h");
    t
};

/// ESR.EC → exception class.
pub static CLASS_TABLE: [Option<&str>; 64] = {
    let mut t = [None; 64];
    t[0x00] = Some("unknown");
    t[0x01] = Some("wf*");
    t[0x03] = Some("c15 mcr/mrc");
    t[0x04] = Some("c15 mcrr/mrrc");
    t[0x05] = Some("c14 mcr/mrc");
    t[0x06] = Some("ldc/stc");
    t[0x07] = Some("FP off");
    t[0x08] = Some("VMRS access");
    t[0x09] = Some("PAC off");
    t[0x0a] = Some("ld/st64b");
    t[0x0c] = Some("c14 mrrc");
    t[0x0d] = Some("branch target");
    t[0x0e] = Some("illegal state");
    t[0x11] = Some("svc in a32");
    t[0x12] = Some("hvc in a32");
    t[0x13] = Some("smc in a32");
    t[0x15] = Some("svc in a64");
    t[0x16] = Some("hvc in a64");
    t[0x17] = Some("smc in a64");
    t[0x18] = Some("other mcr/mrc/sys");
    t[0x19] = Some("SVE off");
    t[0x1a] = Some("eret");
    t[0x1c] = Some("PAC failure");
    t[0x20] = Some("instruction abort (lower)");
    t[0x21] = Some("instruction abort (current)");
    t[0x22] = Some("pc misaligned");
    t[0x24] = Some("data abort (lower)");
    t[0x25] = Some("data abort (current)");
    t[0x26] = Some("sp misaligned");
    t[0x28] = Some("FP exception (a32)");
    t[0x2c] = Some("FP exception (a64)");
    t[0x2f] = Some("SError");
    t[0x30] = Some("BP (lower)");
    t[0x31] = Some("BP (current)");
    t[0x32] = Some("step (lower)");
    t[0x33] = Some("step (current)");
    t[0x34] = Some("watchpoint (lower)");
    t[0x35] = Some("watchpoint (current)");
    t[0x38] = Some("bkpt (a32)");
    t[0x3a] = Some("vector catch (a32)");
    t[0x3c] = Some("brk (a64)");
    t
};

/// Label for an SPSR mode nibble, if the slot is populated.
pub fn source_label(mode: u8) -> Option<&'static str> {
    SOURCE_TABLE.get(usize::from(mode)).copied().flatten()
}

/// Label for an exception class code, if the slot is populated.
pub fn class_label(code: u8) -> Option<&'static str> {
    CLASS_TABLE.get(usize::from(code)).copied().flatten()
}

/// Where the trap came from, from a saved SPSR value.
pub fn exception_source(spsr: u64) -> &'static str {
    source_label(SavedState::from_bits(spsr).mode()).unwrap_or(UNKNOWN)
}

/// What kind of synchronous exception this is, from an ESR value.
pub fn exception_class(esr: u64) -> &'static str {
    class_label(Syndrome::from_bits(esr).class_code()).unwrap_or(UNKNOWN)
}

/// Exception level from a raw `CurrentEL` value (bits 2..=3).
pub fn current_level(current_el: u64) -> u8 {
    ((current_el >> 2) & 0x3) as u8
}
