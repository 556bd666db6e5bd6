// 早期 bump 分配器核心实现
// Monotonic reservation over a fixed pool: no headers, no free list, no free.

use core::fmt;

use super::elastic::ElasticReservation;
use crate::platform;

/// 分配器错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The requested alignment is zero or not a power of two.
    AlignmentNotPowerOfTwo { align: usize },
    /// The request would move the cursor past the end of the pool.
    PoolExhausted { requested: usize, remaining: usize },
    /// Rounding the cursor or adding the size overflowed the address space.
    AddressOverflow,
    /// The global pool has not been initialized yet.
    NotInitialized,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlignmentNotPowerOfTwo { align } => {
                write!(f, "alignment {} is not a power of two", align)
            }
            Self::PoolExhausted { requested, remaining } => write!(
                f,
                "early pool exhausted: {} bytes requested, {} remaining",
                requested, remaining
            ),
            Self::AddressOverflow => write!(f, "address arithmetic overflowed"),
            Self::NotInitialized => write!(f, "early allocator not initialized"),
        }
    }
}

/// A bump allocator over `[start, end)`.
///
/// The cursor only ever moves forward. A zero-size request returns the
/// aligned cursor without moving it, which lets a caller write an unknown
/// amount of data there and commit it afterwards (see
/// [`EarlyAllocator::reserve_elastic`]).
///
/// There is no internal locking. The allocator is meant for the single-core
/// boot phase; any other use must be serialized by the owner.
pub struct EarlyAllocator {
    start: *mut u8,
    end: usize,
    cursor: usize,
    acquisitions: u64,
}

// The raw pointer only carries provenance for the pool; ownership of the pool
// moves together with the allocator.
unsafe impl Send for EarlyAllocator {}

impl EarlyAllocator {
    /// An allocator with an empty pool. Every non-empty request fails.
    pub const fn empty() -> Self {
        Self {
            start: core::ptr::null_mut(),
            end: 0,
            cursor: 0,
            acquisitions: 0,
        }
    }

    /// Creates an allocator that owns `size` bytes starting at `start`.
    ///
    /// # Safety
    /// The region must be valid for reads and writes, initialized, and not
    /// accessed through any other path for as long as the allocator or any
    /// address it hands out is in use.
    pub unsafe fn from_raw_parts(start: *mut u8, size: usize) -> Self {
        let base = start as usize;
        Self {
            start,
            end: base.saturating_add(size),
            cursor: base,
            acquisitions: 0,
        }
    }

    /// Aligns the pool base with a zero-size acquisition and reports it.
    pub fn init(&mut self) -> *mut u8 {
        let base = self.acquire(0);
        log::info!("Heap base: {:#x}", base as usize);
        base
    }

    /// `acquire_aligned(size, DEFAULT_ALIGN)`.
    pub fn acquire(&mut self, size: usize) -> *mut u8 {
        self.acquire_aligned(size, platform::DEFAULT_ALIGN)
    }

    /// Reserves `size` bytes aligned to `align`.
    ///
    /// # Panics
    /// On a non-power-of-two alignment or when the pool would overflow.
    pub fn acquire_aligned(&mut self, size: usize, align: usize) -> *mut u8 {
        match self.try_acquire_aligned(size, align) {
            Ok(block) => block,
            Err(e) => panic!("early allocator: {}", e),
        }
    }

    /// Fallible form of [`acquire_aligned`](Self::acquire_aligned). On error
    /// the cursor is left untouched.
    pub fn try_acquire_aligned(&mut self, size: usize, align: usize) -> Result<*mut u8, AllocError> {
        if !align.is_power_of_two() {
            return Err(AllocError::AlignmentNotPowerOfTwo { align });
        }

        let block = align_up(self.cursor, align).ok_or(AllocError::AddressOverflow)?;
        let next = block.checked_add(size).ok_or(AllocError::AddressOverflow)?;
        if next > self.end {
            return Err(AllocError::PoolExhausted {
                requested: size,
                remaining: self.remaining(),
            });
        }

        self.cursor = next;
        if size != 0 {
            self.acquisitions += 1;
        }
        Ok(self.pointer_to(block))
    }

    /// Starts an elastic reservation at the default alignment.
    pub fn reserve_elastic(&mut self) -> ElasticReservation<'_> {
        self.reserve_elastic_aligned(platform::DEFAULT_ALIGN)
    }

    /// Starts an elastic reservation. The handle borrows the allocator, so no
    /// other acquisition can run until it is committed or dropped.
    pub fn reserve_elastic_aligned(&mut self, align: usize) -> ElasticReservation<'_> {
        let start = self.acquire_aligned(0, align);
        ElasticReservation::new(self, start)
    }

    pub fn pool_start(&self) -> usize {
        self.start as usize
    }

    pub fn pool_end(&self) -> usize {
        self.end
    }

    pub fn pool_size(&self) -> usize {
        self.end - self.pool_start()
    }

    /// Current free offset, as an address.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn used(&self) -> usize {
        self.cursor - self.pool_start()
    }

    pub fn remaining(&self) -> usize {
        self.end - self.cursor
    }

    /// Number of non-empty acquisitions served so far.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions
    }

    /// `(total, used, free)` in bytes.
    pub fn usage_summary(&self) -> (usize, usize, usize) {
        (self.pool_size(), self.used(), self.remaining())
    }

    /// Re-derives a pointer for `addr` from the pool pointer so the result
    /// keeps the pool's provenance.
    fn pointer_to(&self, addr: usize) -> *mut u8 {
        self.start.wrapping_add(addr - self.pool_start())
    }
}

/// Rounds `value` up to `align`, which must be a power of two.
#[inline]
pub(crate) fn align_up(value: usize, align: usize) -> Option<usize> {
    value.checked_add(align - 1).map(|v| v & !(align - 1))
}
