// nt_armfw/src/trap/ds/context.rs

//! # Exception Context
//!
//! The record filled in by the trap-vector stub before it calls one of the
//! class entry points. The stub computes field offsets on its own, so the
//! layout is pinned here as literal numbers and checked against the compiler's
//! layout at build time.

use core::ffi::c_void;
use core::mem::size_of;

use memoffset::offset_of;

/// Bytes the trap-vector stub reserves for one context.
pub const SIZEOF_EXC_INFO: usize = 64 * 8;

pub const EXC_INFO_REGS: usize = 0;
pub const EXC_INFO_SPSR: usize = 256;
pub const EXC_INFO_ELR: usize = 264;
pub const EXC_INFO_ESR: usize = 272;
pub const EXC_INFO_FAR: usize = 280;
pub const EXC_INFO_AFSR1: usize = 288;
pub const EXC_INFO_SP: usize = 296;
pub const EXC_INFO_CPU_ID: usize = 320;
pub const EXC_INFO_MPIDR: usize = 328;
pub const EXC_INFO_ELR_PHYS: usize = 336;
pub const EXC_INFO_FAR_PHYS: usize = 344;
pub const EXC_INFO_SP_PHYS: usize = 352;
pub const EXC_INFO_EXTRA: usize = 360;

/// Distance between the context address and the interrupted stack pointer.
/// The stub pushes the 32 general registers below the interrupted SP and
/// hands over the resulting address.
pub const TRAP_SP_OFFSET: usize = 32 * 8;

/// # Exception Context
///
/// Machine state of one trap. Field order and widths are shared with the
/// assembly stub and must not change without updating it.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ExceptionContext {
    /// x0-x30 plus one padding slot.
    pub regs: [u64; 32],
    pub spsr: u64,
    pub elr: u64,
    pub esr: u64,
    pub far: u64,
    pub afsr1: u64,
    /// SP_EL0, SP_EL1, SP_EL2.
    pub sp: [u64; 3],
    pub cpu_id: u64,
    pub mpidr: u64,
    pub elr_phys: u64,
    pub far_phys: u64,
    pub sp_phys: u64,
    /// Opaque extension slot. Never dereferenced by this crate.
    pub extra: *mut c_void,
}

const _: () = assert!(size_of::<ExceptionContext>() <= SIZEOF_EXC_INFO);
const _: () = assert!(size_of::<ExceptionContext>() % 16 == 0);

const _: () = assert!(offset_of!(ExceptionContext, regs) == EXC_INFO_REGS);
const _: () = assert!(offset_of!(ExceptionContext, spsr) == EXC_INFO_SPSR);
const _: () = assert!(offset_of!(ExceptionContext, elr) == EXC_INFO_ELR);
const _: () = assert!(offset_of!(ExceptionContext, esr) == EXC_INFO_ESR);
const _: () = assert!(offset_of!(ExceptionContext, far) == EXC_INFO_FAR);
const _: () = assert!(offset_of!(ExceptionContext, afsr1) == EXC_INFO_AFSR1);
const _: () = assert!(offset_of!(ExceptionContext, sp) == EXC_INFO_SP);
const _: () = assert!(offset_of!(ExceptionContext, cpu_id) == EXC_INFO_CPU_ID);
const _: () = assert!(offset_of!(ExceptionContext, mpidr) == EXC_INFO_MPIDR);
const _: () = assert!(offset_of!(ExceptionContext, elr_phys) == EXC_INFO_ELR_PHYS);
const _: () = assert!(offset_of!(ExceptionContext, far_phys) == EXC_INFO_FAR_PHYS);
const _: () = assert!(offset_of!(ExceptionContext, sp_phys) == EXC_INFO_SP_PHYS);
const _: () = assert!(offset_of!(ExceptionContext, extra) == EXC_INFO_EXTRA);

impl ExceptionContext {
    /// Creates a new, zero-initialized context.
    pub const fn zeroed() -> Self {
        Self {
            regs: [0; 32],
            spsr: 0,
            elr: 0,
            esr: 0,
            far: 0,
            afsr1: 0,
            sp: [0; 3],
            cpu_id: 0,
            mpidr: 0,
            elr_phys: 0,
            far_phys: 0,
            sp_phys: 0,
            extra: core::ptr::null_mut(),
        }
    }

    /// Interrupted stack pointer, derived from where the context lives.
    pub fn interrupted_sp(&self) -> usize {
        (self as *const Self as usize).wrapping_add(TRAP_SP_OFFSET)
    }
}

impl Default for ExceptionContext {
    fn default() -> Self {
        Self::zeroed()
    }
}

// Absolute symbols for the trap-vector stub.
#[cfg(all(target_arch = "aarch64", target_os = "none"))]
core::arch::global_asm!(
    ".globl SIZEOF_EXC_INFO",
    ".set SIZEOF_EXC_INFO, {size}",
    ".globl EXC_INFO_REGS",
    ".set EXC_INFO_REGS, {regs}",
    ".globl EXC_INFO_SPSR",
    ".set EXC_INFO_SPSR, {spsr}",
    ".globl EXC_INFO_ELR",
    ".set EXC_INFO_ELR, {elr}",
    ".globl EXC_INFO_ESR",
    ".set EXC_INFO_ESR, {esr}",
    ".globl EXC_INFO_FAR",
    ".set EXC_INFO_FAR, {far}",
    ".globl EXC_INFO_AFSR1",
    ".set EXC_INFO_AFSR1, {afsr1}",
    ".globl EXC_INFO_SP",
    ".set EXC_INFO_SP, {sp}",
    ".globl EXC_INFO_CPU_ID",
    ".set EXC_INFO_CPU_ID, {cpu_id}",
    ".globl EXC_INFO_MPIDR",
    ".set EXC_INFO_MPIDR, {mpidr}",
    ".globl EXC_INFO_ELR_PHYS",
    ".set EXC_INFO_ELR_PHYS, {elr_phys}",
    ".globl EXC_INFO_FAR_PHYS",
    ".set EXC_INFO_FAR_PHYS, {far_phys}",
    ".globl EXC_INFO_SP_PHYS",
    ".set EXC_INFO_SP_PHYS, {sp_phys}",
    ".globl EXC_INFO_EXTRA",
    ".set EXC_INFO_EXTRA, {extra}",
    size = const SIZEOF_EXC_INFO,
    regs = const EXC_INFO_REGS,
    spsr = const EXC_INFO_SPSR,
    elr = const EXC_INFO_ELR,
    esr = const EXC_INFO_ESR,
    far = const EXC_INFO_FAR,
    afsr1 = const EXC_INFO_AFSR1,
    sp = const EXC_INFO_SP,
    cpu_id = const EXC_INFO_CPU_ID,
    mpidr = const EXC_INFO_MPIDR,
    elr_phys = const EXC_INFO_ELR_PHYS,
    far_phys = const EXC_INFO_FAR_PHYS,
    sp_phys = const EXC_INFO_SP_PHYS,
    extra = const EXC_INFO_EXTRA,
);
