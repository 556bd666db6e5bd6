// nt_armfw/src/main.rs

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
mod boot {
    use core::arch::naked_asm;

    use nt_armfw::platform::STACK_SIZE;

    #[repr(C, align(16))]
    struct BootStack([u8; STACK_SIZE]);

    // 用于存放栈的内存区域
    #[link_section = ".bss.stack"]
    static mut STACK: BootStack = BootStack([0; STACK_SIZE]);

    /// 程序入口点
    ///
    /// Secondary cores park in `wfe`. The primary core switches to the boot
    /// stack and enters `rust_main`.
    #[unsafe(naked)]
    #[no_mangle]
    #[link_section = ".text.entry"]
    unsafe extern "C" fn _start() -> ! {
        naked_asm!(
            "mrs x0, mpidr_el1",
            "and x0, x0, #0xff",
            "cbz x0, 4f",
            "3:",
            "wfe",
            "b 3b",
            "4:",
            "adrp x1, {stack}",
            "add x1, x1, :lo12:{stack}",
            "mov x2, #{size}",
            "add sp, x1, x2",
            "bl {main}",
            "b 3b",
            stack = sym STACK,
            size = const STACK_SIZE,
            main = sym rust_main,
        )
    }

    /// Rust主函数 - 系统的真正入口点
    extern "C" fn rust_main() -> ! {
        nt_armfw::init();
        nt_armfw::main_loop()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
