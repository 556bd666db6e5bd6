// 早期堆内存分配器模块
// 用于固件启动早期的内存分配，在完整的内存管理系统初始化前使用

pub mod allocator;
pub mod elastic;
pub mod global;

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

use spin::Mutex;

use crate::platform::HEAP_SIZE;

// 从子模块导出类型
pub use self::allocator::{AllocError, EarlyAllocator};
pub use self::elastic::ElasticReservation;
pub use self::global::{EarlyGlobalAllocator, GLOBAL_EARLY_ALLOCATOR};

/// Backing store of the firmware-wide early allocator.
#[repr(C, align(4096))]
struct HeapPool(UnsafeCell<[u8; HEAP_SIZE]>);

// Only reached through EARLY_ALLOCATOR.
unsafe impl Sync for HeapPool {}

#[cfg_attr(target_os = "none", link_section = "heap")]
static HEAP_POOL: HeapPool = HeapPool(UnsafeCell::new([0; HEAP_SIZE]));

// 全局早期分配器实例
static EARLY_ALLOCATOR: Mutex<EarlyAllocator> = Mutex::new(EarlyAllocator::empty());
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Binds the early allocator to the static pool, aligns its base and returns
/// it. Calling it again only re-reports the aligned cursor.
///
/// Boot-phase only: callers are expected to run on the primary core with no
/// other core touching the pool.
pub fn init() -> *mut u8 {
    let mut early = EARLY_ALLOCATOR.lock();
    if !INITIALIZED.swap(true, Ordering::AcqRel) {
        *early = unsafe { EarlyAllocator::from_raw_parts(HEAP_POOL.0.get().cast(), HEAP_SIZE) };
    }
    early.init()
}

/// 检查分配器是否已初始化
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}

/// Runs `f` with exclusive access to the global early allocator.
pub fn with_allocator<R>(f: impl FnOnce(&mut EarlyAllocator) -> R) -> Result<R, AllocError> {
    if !is_initialized() {
        return Err(AllocError::NotInitialized);
    }
    Ok(f(&mut EARLY_ALLOCATOR.lock()))
}

/// `acquire_aligned(size, DEFAULT_ALIGN)` on the global pool.
pub fn acquire(size: usize) -> *mut u8 {
    acquire_aligned(size, crate::platform::DEFAULT_ALIGN)
}

/// Reserves `size` bytes aligned to `align` from the global pool.
///
/// # Panics
/// On a bad alignment, an exhausted pool, or before [`init`].
pub fn acquire_aligned(size: usize, align: usize) -> *mut u8 {
    // The lock is released before panicking so the panic handler can still
    // report pool usage.
    match try_acquire_aligned(size, align) {
        Ok(block) => block,
        Err(e) => panic!("early allocator: {}", e),
    }
}

pub fn try_acquire_aligned(size: usize, align: usize) -> Result<*mut u8, AllocError> {
    with_allocator(|early| early.try_acquire_aligned(size, align))?
}

/// Sets up the general-purpose heap on top of the early pool.
pub fn init_front_end(size: usize) -> Result<(), AllocError> {
    with_allocator(|early| GLOBAL_EARLY_ALLOCATOR.init(early, size))?
}

/// 获取堆使用情况的简单描述: `(total, used, free)`.
///
/// Never blocks, so it is usable from the panic handler even if the panic
/// happened with the allocator locked.
pub fn usage_summary() -> Option<(usize, usize, usize)> {
    if !is_initialized() {
        return None;
    }
    EARLY_ALLOCATOR.try_lock().map(|early| early.usage_summary())
}
