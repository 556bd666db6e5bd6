// 全局分配器实现
// 实现GlobalAlloc trait，为 alloc crate 提供内存分配接口

use core::alloc::{GlobalAlloc, Layout};
use core::ptr::{self, NonNull};

use linked_list_allocator::Heap;
use spin::Mutex;

use super::allocator::{AllocError, EarlyAllocator};
use crate::platform;

/// 全局分配器实例
#[cfg_attr(target_os = "none", global_allocator)]
pub static GLOBAL_EARLY_ALLOCATOR: EarlyGlobalAllocator = EarlyGlobalAllocator::new();

/// General-purpose heap whose backing store is carved out of the early pool.
///
/// Freed blocks are reused through the linked-list heap. When the heap runs
/// dry and nothing else has been acquired from the early pool since the heap
/// was last grown, the heap extends in place.
pub struct EarlyGlobalAllocator {
    heap: Mutex<Heap>,
}

impl EarlyGlobalAllocator {
    pub const fn new() -> Self {
        Self {
            heap: Mutex::new(Heap::empty()),
        }
    }

    /// Acquires `size` page-aligned bytes from `early` and hands them to the
    /// heap. A second call leaves the existing heap in place.
    pub fn init(&self, early: &mut EarlyAllocator, size: usize) -> Result<(), AllocError> {
        let mut heap = self.heap.lock();
        if heap.size() != 0 {
            log::warn!("front-end heap already initialized");
            return Ok(());
        }

        let bottom = early.try_acquire_aligned(size, platform::FRONT_END_HEAP_ALIGN)?;
        unsafe { heap.init(bottom, size) };
        log::info!(
            "front-end heap: {:#x}..{:#x} ({} KB)",
            bottom as usize,
            bottom as usize + size,
            size / 1024
        );
        Ok(())
    }

    /// Allocates `layout`, growing the heap from `early` if needed.
    pub fn alloc_from(&self, layout: Layout, early: &mut EarlyAllocator) -> *mut u8 {
        let mut heap = self.heap.lock();
        if let Ok(block) = heap.allocate_first_fit(layout) {
            return block.as_ptr();
        }

        // Growth is only possible while the heap still ends at the cursor.
        if heap.size() == 0 || heap.top() as usize != early.cursor() {
            return ptr::null_mut();
        }
        let need = match layout.size().checked_add(layout.align()) {
            Some(need) => need,
            None => return ptr::null_mut(),
        };
        let grow = need.max(platform::FRONT_END_GROW_STEP).min(early.remaining());
        if grow < need || early.try_acquire_aligned(grow, 1).is_err() {
            return ptr::null_mut();
        }
        unsafe { heap.extend(grow) };
        log::debug!("front-end heap grown by {} bytes", grow);

        heap.allocate_first_fit(layout)
            .map_or(ptr::null_mut(), |block| block.as_ptr())
    }

    /// Returns a block obtained from [`alloc_from`](Self::alloc_from).
    ///
    /// # Safety
    /// `block` must have been allocated by this heap with `layout`.
    pub unsafe fn release(&self, block: *mut u8, layout: Layout) {
        if let Some(block) = NonNull::new(block) {
            self.heap.lock().deallocate(block, layout);
        }
    }

    /// `(size, used, free)` of the heap in bytes.
    pub fn usage(&self) -> (usize, usize, usize) {
        let heap = self.heap.lock();
        (heap.size(), heap.used(), heap.free())
    }

    pub fn is_initialized(&self) -> bool {
        self.heap.lock().size() != 0
    }
}

unsafe impl GlobalAlloc for EarlyGlobalAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        super::with_allocator(|early| self.alloc_from(layout, early)).unwrap_or(ptr::null_mut())
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.release(ptr, layout);
    }
}
