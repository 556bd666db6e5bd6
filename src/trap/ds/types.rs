// nt_armfw/src/trap/ds/types.rs

//! # Trap Type Definitions
//!
//! Trap classes as seen by the vector table, DAIF mask bits, and thin wrappers
//! over the raw syndrome and saved-state registers.

use core::fmt;

/// The four vector-table slots of one exception level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum TrapClass {
    Synchronous = 0,
    Irq = 1,
    Fiq = 2,
    SError = 3,
}

impl TrapClass {
    pub const ALL: [TrapClass; 4] = [Self::Synchronous, Self::Irq, Self::Fiq, Self::SError];

    /// Label printed in the `Exception: <CLASS>` banner.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Synchronous => "SYNC",
            Self::Irq => "IRQ",
            Self::Fiq => "FIQ",
            Self::SError => "SError",
        }
    }
}

impl fmt::Display for TrapClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// DAIF.D, debug exceptions.
pub const DAIF_D: u64 = 1 << 9;
/// DAIF.A, SError.
pub const DAIF_A: u64 = 1 << 8;
/// DAIF.I, IRQ.
pub const DAIF_I: u64 = 1 << 7;
/// DAIF.F, FIQ.
pub const DAIF_F: u64 = 1 << 6;
/// Every maskable trap class.
pub const DAIF_ALL: u64 = DAIF_D | DAIF_A | DAIF_I | DAIF_F;

/// A wrapper for `ESR_ELx`, providing access to its fields.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Syndrome {
    bits: u64,
}

impl Syndrome {
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Exception class, bits 26..=31.
    pub const fn class_code(&self) -> u8 {
        ((self.bits >> 26) & 0x3f) as u8
    }

    /// Instruction length bit: set for a 32-bit trapped instruction.
    pub const fn il(&self) -> bool {
        (self.bits >> 25) & 1 != 0
    }

    /// Instruction-specific syndrome, bits 0..=24.
    pub const fn iss(&self) -> u32 {
        (self.bits & 0x01ff_ffff) as u32
    }
}

impl fmt::Debug for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Syndrome")
            .field("ec", &format_args!("{:#04x}", self.class_code()))
            .field("il", &self.il())
            .field("iss", &format_args!("{:#x}", self.iss()))
            .finish()
    }
}

/// A wrapper for `SPSR_ELx`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SavedState {
    bits: u64,
}

impl SavedState {
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// M[3:0]: the exception level and stack selector the trap came from.
    pub const fn mode(&self) -> u8 {
        (self.bits & 0xf) as u8
    }

    /// DAIF bits that were in force at the interrupted instruction.
    pub const fn daif(&self) -> u64 {
        self.bits & DAIF_ALL
    }
}

impl fmt::Debug for SavedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedState")
            .field("mode", &format_args!("{:#x}", self.mode()))
            .field("daif", &format_args!("{:#x}", self.daif()))
            .finish()
    }
}
