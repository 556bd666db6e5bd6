// nt_armfw/src/util/uart.rs

//! # PL011 Transmit Path
//!
//! The firmware only ever writes to the UART. The data register is poked
//! directly; a full FIFO on real hardware drops bytes, which is acceptable for
//! a diagnostic channel.

use crate::console::ByteSink;
use crate::platform;

/// Offset of the data register inside the PL011 block.
const UARTDR: usize = 0x000;

/// A PL011 UART identified by its MMIO base address.
#[derive(Debug, Clone, Copy)]
pub struct Pl011 {
    base: usize,
}

impl Pl011 {
    pub const fn new(base: usize) -> Self {
        Self { base }
    }

    pub const fn base(&self) -> usize {
        self.base
    }
}

impl ByteSink for Pl011 {
    fn put_byte(&self, byte: u8) {
        // Safety: `base` names a device register block mapped for the whole
        // lifetime of the firmware image.
        unsafe {
            core::ptr::write_volatile((self.base + UARTDR) as *mut u32, byte as u32);
        }
    }
}

/// The board's console UART.
pub static UART0: Pl011 = Pl011::new(platform::UART0_BASE);
