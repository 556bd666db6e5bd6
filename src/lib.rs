// nt_armfw/src/lib.rs

#![cfg_attr(not(test), no_std)]

// 导入alloc crate以支持动态数据结构
extern crate alloc;

// 声明固件模块
#[macro_use]
pub mod util;
pub mod console;
pub mod platform;
pub mod init;
pub mod trap;
pub mod test;

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
use core::panic::PanicInfo;

/// Panic处理器 - 当发生panic时调用
#[cfg(all(target_arch = "aarch64", target_os = "none"))]
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    let cpu = trap::Aarch64Cpu;
    trap::TrapHardware::mask_all(&cpu);

    error_print!("FIRMWARE PANIC!");
    if let Some(location) = info.location() {
        error_print!("  Location: {}:{}", location.file(), location.line());
    }
    error_print!("  Message: {}", info.message());

    match init::alloc::usage_summary() {
        Some((total, used, free)) => error_print!(
            "  Early pool: Total: {} KB, Used: {} KB, Free: {} KB",
            total / 1024,
            used / 1024,
            free / 1024
        ),
        None => error_print!("  Early pool state unavailable."),
    }

    error_print!("System halted.");
    trap::TrapHardware::halt(&cpu)
}

/// 系统初始化
///
/// Console, logger, early pool, general-purpose heap and trap lifecycle, in
/// that order. Must run once on the primary core before anything allocates.
pub fn init() {
    console::set_sink(&util::uart::UART0);
    console::init_logger(platform::LOG_LEVEL);
    log::info!("nt_armfw starting on {} cores", platform::CORE_COUNT);

    init::alloc::init();
    if let Err(e) = init::alloc::init_front_end(platform::FRONT_END_HEAP_SIZE) {
        log::error!("front-end heap unavailable: {}", e);
    }
    if let Some((total, used, free)) = init::alloc::usage_summary() {
        log::info!(
            "early pool: {} KB total, {} KB used, {} KB free",
            total / 1024,
            used / 1024,
            free / 1024
        );
    }

    #[cfg(target_arch = "aarch64")]
    trap::initialize();

    log::info!("initialization complete");
}

/// 主循环 - 初始化后的空闲循环
#[cfg(target_arch = "aarch64")]
pub fn main_loop() -> ! {
    #[cfg(feature = "self-test")]
    test::run_all_tests();

    log::info!("idle");
    let cpu = trap::Aarch64Cpu;
    trap::TrapHardware::halt(&cpu)
}
