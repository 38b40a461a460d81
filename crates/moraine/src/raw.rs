//! Low-level primitives for arena memory operations.
//!
//! This module owns the crate's raw-memory handling: [`Block`] wraps one
//! heap buffer obtained from the system allocator and releases it exactly
//! once on drop, and [`advance`] is the pointer arithmetic behind the bump
//! cursor. Every `unsafe` block carries a `// SAFETY:` comment; everything
//! above this layer works with the invariants these primitives establish.

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::ptr::NonNull;

/// Alignment of every block start.
///
/// At least 8, or the platform pointer size if that is larger. Because every
/// block is requested from the system allocator at this alignment, a pointer
/// to the start of any block satisfies the arena's aligned-allocation
/// guarantee with no further arithmetic.
pub(crate) const BLOCK_ALIGN: usize = {
    let ptr = std::mem::size_of::<*const u8>();
    if ptr > 8 {
        ptr
    } else {
        8
    }
};

// Alignment arithmetic masks with `BLOCK_ALIGN - 1`, which is only valid for
// powers of two. A property of the platform, checked once at compile time.
const _: () = assert!(BLOCK_ALIGN.is_power_of_two());

/// One heap buffer owned by an arena.
///
/// Fixed length once allocated: never resized, never individually freed,
/// released exactly once when the owning arena drops. Both standard blocks
/// (backing the bump cursor) and dedicated blocks (returned whole to the
/// caller) are `Block`s; the distinction lives in the arena, not here.
pub(crate) struct Block {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl Block {
    /// Allocate a block of exactly `size` bytes, aligned to [`BLOCK_ALIGN`].
    ///
    /// Out of memory aborts via [`handle_alloc_error`]: a failed block
    /// allocation leaves the arena no consistent state to fall back to.
    pub(crate) fn new(size: usize) -> Self {
        debug_assert!(size > 0, "zero-sized blocks are never allocated");
        let layout = Layout::from_size_align(size, BLOCK_ALIGN)
            .expect("block size fits the address space");
        // SAFETY: `layout` has non-zero size; `size > 0` is asserted above.
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            handle_alloc_error(layout)
        };
        Self { ptr, layout }
    }

    /// Pointer to the first byte of the block.
    pub(crate) fn base(&self) -> NonNull<u8> {
        self.ptr
    }

    /// Block length in bytes.
    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `alloc` with exactly this layout, and
        // `Block` is neither `Clone` nor `Copy`, so this runs once per
        // allocation.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

/// Shared sentinel for zero-byte requests.
///
/// Non-null, aligned to [`BLOCK_ALIGN`], and never valid for reads or
/// writes. An empty range at this address cannot overlap any live
/// allocation's requested range.
pub(crate) fn dangling() -> NonNull<u8> {
    // SAFETY: `BLOCK_ALIGN` is a non-zero constant.
    unsafe { NonNull::new_unchecked(BLOCK_ALIGN as *mut u8) }
}

/// Advance a pointer `count` bytes within its block.
///
/// # Safety
///
/// `ptr` must point into a live block, and `ptr + count` must stay within
/// the same block (one past the end is allowed).
pub(crate) unsafe fn advance(ptr: NonNull<u8>, count: usize) -> NonNull<u8> {
    // SAFETY: the caller guarantees the result stays within the same
    // allocated block, so the offset cannot wrap and the result is non-null.
    unsafe { NonNull::new_unchecked(ptr.as_ptr().add(count)) }
}
