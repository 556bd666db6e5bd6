// nt_armfw/tests/diagnostic.rs

use std::cell::Cell;

use nt_armfw::platform::CORE_COUNT;
use nt_armfw::trap::{
    self, CoreDispatchers, DispatchState, Dispatcher, ExceptionContext, TransitionError,
    TrapClass, TrapHardware,
};

/// Host stand-in for the core. Halting unwinds so tests can observe it.
struct MockCpu {
    current_el: u64,
    mpidr: u64,
    masked: Cell<usize>,
}

impl MockCpu {
    fn at_el3() -> Self {
        Self::core(0)
    }

    fn core(index: u64) -> Self {
        Self { current_el: 3 << 2, mpidr: 0x8000_0000 | index, masked: Cell::new(0) }
    }
}

impl TrapHardware for MockCpu {
    fn current_el(&self) -> u64 {
        self.current_el
    }

    fn mpidr(&self) -> u64 {
        self.mpidr
    }

    fn mask_all(&self) {
        self.masked.set(self.masked.get() + 1);
    }

    fn halt(&self) -> ! {
        panic!("core halted");
    }
}

fn data_abort_context() -> Box<ExceptionContext> {
    let mut ctx = Box::new(ExceptionContext::zeroed());
    for (i, reg) in ctx.regs.iter_mut().enumerate() {
        *reg = i as u64;
    }
    ctx.spsr = 0x3c5;
    ctx.elr = 0x4000_2000;
    ctx.esr = 0x9600_0045;
    ctx.far = 0xdead_0000;
    ctx.mpidr = 0x8000_0000;
    ctx
}

#[test]
fn synchronous_trap_dump_matches_golden_text() {
    let ctx = data_abort_context();
    let base = &*ctx as *const ExceptionContext as usize;
    let cpu = MockCpu::at_el3();
    let dispatcher = Dispatcher::new();
    let mut out = String::new();

    let halted = dispatcher.take(TrapClass::Synchronous, &ctx, &cpu, &mut out);
    assert!(halted.is_ok());

    let mut expected = String::new();
    expected.push_str("Exception: SYNC\n");
    expected.push_str("Exception taken from EL1h\n");
    expected.push_str("Running in EL3\n");
    expected.push_str("MPIDR: 0x80000000\n");
    expected.push_str(&format!("Registers: (@{:#x})\n", base));
    let labels = ["  x0-x3", "  x4-x7", " x8-x11", "x12-x15", "x16-x19", "x20-x23", "x24-x27", "x28-x31"];
    for (line, label) in labels.iter().enumerate() {
        expected.push_str(label);
        expected.push(':');
        for reg in line * 4..line * 4 + 4 {
            expected.push_str(&format!(" {:016x}", reg));
        }
        expected.push('\n');
    }
    expected.push_str(&format!("SP:       {:#x}\n", base + 256));
    expected.push_str("ELR_EL3:  0x40002000\n");
    expected.push_str("SPSR_EL3: 0x3c5\n");
    expected.push_str("FAR_EL3:  0xdead0000\n");
    expected.push_str("ESR_EL3:  0x96000045 (data abort (current))\n");

    assert_eq!(out, expected);
}

#[test]
fn each_class_prints_its_banner() {
    for class in TrapClass::ALL {
        let ctx = ExceptionContext::zeroed();
        let dispatcher = Dispatcher::new();
        let mut out = String::new();
        let _halted = dispatcher
            .take(class, &ctx, &MockCpu::at_el3(), &mut out)
            .unwrap_or_else(|e| panic!("{}", e));
        let banner = out.lines().next().unwrap();
        assert_eq!(banner, format!("Exception: {}", class.label()));
    }
}

#[test]
fn unknown_fields_render_as_question_mark() {
    let mut ctx = ExceptionContext::zeroed();
    ctx.spsr = 0x2;
    ctx.esr = 0x3f << 26;
    let mut out = String::new();
    let _halted = Dispatcher::new()
        .take(TrapClass::Irq, &ctx, &MockCpu::at_el3(), &mut out)
        .unwrap_or_else(|e| panic!("{}", e));
    assert!(out.contains("Exception taken from ?\n"));
    assert!(out.ends_with("(?)\n"));
}

#[test]
fn dispatcher_masks_then_halts_exactly_once() {
    let ctx = data_abort_context();
    let cpu = MockCpu::at_el3();
    let dispatcher = Dispatcher::new();
    assert_eq!(dispatcher.state(), DispatchState::Idle);

    let mut out = String::new();
    let first = dispatcher.take(TrapClass::Fiq, &ctx, &cpu, &mut out);
    assert!(first.is_ok());
    assert_eq!(cpu.masked.get(), 1);
    assert_eq!(dispatcher.state(), DispatchState::Halted);

    // No edge leaves Halted.
    let mut second_out = String::new();
    let second = dispatcher.take(TrapClass::SError, &ctx, &cpu, &mut second_out);
    assert_eq!(
        second.err(),
        Some(TransitionError { from: DispatchState::Halted, class: TrapClass::SError })
    );
    assert!(second_out.is_empty());
    assert_eq!(dispatcher.state(), DispatchState::Halted);
}

#[test]
#[should_panic(expected = "core halted")]
fn halted_token_parks_the_core() {
    let ctx = ExceptionContext::zeroed();
    let cpu = MockCpu::at_el3();
    let mut out = String::new();
    if let Ok(halted) = Dispatcher::new().take(TrapClass::Synchronous, &ctx, &cpu, &mut out) {
        halted.park(&cpu);
    }
}

#[test]
fn shutdown_masks_every_trap_class() {
    let cpu = MockCpu::at_el3();
    trap::initialize_with(&cpu);
    assert_eq!(cpu.masked.get(), 0);
    trap::shutdown_with(&cpu);
    assert_eq!(cpu.masked.get(), 1);
    assert_eq!(trap::DAIF_ALL, 0b1111 << 6);
}

fn lower_level_abort_context(core: u64) -> ExceptionContext {
    let mut ctx = ExceptionContext::zeroed();
    ctx.spsr = 0x0;
    ctx.esr = 0x24 << 26;
    ctx.mpidr = 0x8000_0000 | core;
    ctx
}

#[test]
fn data_abort_from_lower_level_is_reported() {
    let ctx = lower_level_abort_context(0);
    let mut out = String::new();
    let _halted = Dispatcher::new()
        .take(TrapClass::Synchronous, &ctx, &MockCpu::at_el3(), &mut out)
        .unwrap_or_else(|e| panic!("{}", e));
    assert!(out.contains("Exception taken from EL0t\n"));
    assert!(out.ends_with("ESR_EL3:  0x90000000 (data abort (lower))\n"));
}

#[test]
fn second_core_dumps_after_first_core_halts() {
    let dispatchers = CoreDispatchers::new();

    let core0 = data_abort_context();
    let mut out0 = String::new();
    assert!(dispatchers.take(TrapClass::Synchronous, &core0, &MockCpu::core(0), &mut out0).is_ok());
    assert_eq!(dispatchers.core(0).map(Dispatcher::state), Some(DispatchState::Halted));

    let core1 = lower_level_abort_context(1);
    let mut out1 = String::new();
    let result = dispatchers.take(TrapClass::Synchronous, &core1, &MockCpu::core(1), &mut out1);
    assert!(result.is_ok());
    assert!(out1.starts_with("Exception: SYNC\nException taken from EL0t\n"));
    assert!(out1.contains("MPIDR: 0x80000001\n"));
    assert!(out1.ends_with("(data abort (lower))\n"));
    assert_eq!(dispatchers.core(1).map(Dispatcher::state), Some(DispatchState::Halted));
}

#[test]
fn second_trap_on_same_core_is_refused() {
    let dispatchers = CoreDispatchers::new();
    let ctx = data_abort_context();
    let cpu = MockCpu::core(1);

    let mut out = String::new();
    assert!(dispatchers.take(TrapClass::Irq, &ctx, &cpu, &mut out).is_ok());

    let mut again = String::new();
    let refused = dispatchers.take(TrapClass::Synchronous, &ctx, &cpu, &mut again);
    assert_eq!(
        refused.err(),
        Some(TransitionError { from: DispatchState::Halted, class: TrapClass::Synchronous })
    );
    assert!(again.is_empty());
    // Core 0 was never touched.
    assert_eq!(dispatchers.core(0).map(Dispatcher::state), Some(DispatchState::Idle));
}

#[test]
fn core_outside_platform_still_dumps() {
    let dispatchers = CoreDispatchers::new();
    let ctx = data_abort_context();
    let cpu = MockCpu::core(CORE_COUNT as u64 + 5);

    for _ in 0..2 {
        let mut out = String::new();
        assert!(dispatchers.take(TrapClass::Fiq, &ctx, &cpu, &mut out).is_ok());
        assert!(out.starts_with("Exception: FIQ\n"));
        assert!(out.contains("x28-x31:"));
    }
    assert_eq!(cpu.masked.get(), 2);
    assert!((0..CORE_COUNT).all(|i| dispatchers.core(i).map(Dispatcher::state) == Some(DispatchState::Idle)));
}

#[test]
fn core_index_uses_affinity_level_zero() {
    assert_eq!(trap::core_index(0x8000_0000), 0);
    assert_eq!(trap::core_index(0x8000_0101), 1);
    assert_eq!(trap::core_index(0xff), 0xff);
}
