// 弹性预留：先写入数据，再按实际长度提交
// Used for payloads whose size is only known after they are produced, such as
// a decompressed image.

use core::slice;

use super::allocator::{AllocError, EarlyAllocator};

/// An uncommitted reservation at the allocator's aligned cursor.
///
/// The handle holds the allocator mutably, so nothing else can be acquired
/// until [`commit`](Self::commit) runs or the handle is dropped. Dropping it
/// without committing reserves nothing.
pub struct ElasticReservation<'a> {
    allocator: &'a mut EarlyAllocator,
    start: *mut u8,
}

impl<'a> ElasticReservation<'a> {
    pub(super) fn new(allocator: &'a mut EarlyAllocator, start: *mut u8) -> Self {
        Self { allocator, start }
    }

    pub fn start(&self) -> *mut u8 {
        self.start
    }

    /// Bytes available between the reservation start and the pool end.
    pub fn capacity(&self) -> usize {
        self.allocator.pool_end() - self.start as usize
    }

    /// The whole writable area up to the pool end.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        let capacity = self.capacity();
        if capacity == 0 {
            return &mut [];
        }
        // The bytes past the cursor belong to the allocator, which this
        // handle borrows exclusively.
        unsafe { slice::from_raw_parts_mut(self.start, capacity) }
    }

    /// Commits the first `len` bytes.
    ///
    /// # Panics
    /// If `len` exceeds [`capacity`](Self::capacity).
    pub fn commit(self, len: usize) -> &'a mut [u8] {
        match self.try_commit(len) {
            Ok(block) => block,
            Err(e) => panic!("early allocator: {}", e),
        }
    }

    pub fn try_commit(self, len: usize) -> Result<&'a mut [u8], AllocError> {
        // The cursor already sits on the aligned start, so byte alignment
        // returns the same block.
        let block = self.allocator.try_acquire_aligned(len, 1)?;
        debug_assert_eq!(block, self.start);
        if len == 0 {
            return Ok(&mut []);
        }
        Ok(unsafe { slice::from_raw_parts_mut(block, len) })
    }
}
