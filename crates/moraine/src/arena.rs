//! The arena: a bump-pointer fast path over a block-manager slow path.
//!
//! [`Arena::alloc`] advances a cursor through the current standard block and
//! only falls into the block-manager fallback when the block is exhausted.
//! The fallback either installs a fresh standard block (small requests) or
//! hands out a dedicated block sized exactly for the request (large
//! requests), so a single oversized allocation never strands the tail of
//! the current block.

use std::ptr::NonNull;

use smallvec::SmallVec;

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::raw::{self, Block};
use crate::usage::UsageCounter;

/// Bookkeeping bytes charged to [`Arena::memory_usage`] per block: the
/// pointer-sized entry that tracks the block for release at teardown.
pub const BLOCK_OVERHEAD: usize = std::mem::size_of::<usize>();

/// Blocks tracked inline before the block list itself touches the heap.
/// A 4096-byte arena that stays under ~16KB never allocates bookkeeping.
const INLINE_BLOCKS: usize = 4;

/// A bump-pointer memory arena.
///
/// Hands out raw memory in O(1) by advancing a cursor through fixed-size
/// blocks, and frees everything at once on drop. There is no per-object
/// deallocation, no reuse before teardown, and no compaction.
///
/// All allocation goes through `&mut self`: the cursor and block list have
/// a single owner, enforced at compile time. The memory-usage counter is
/// the one exception — clone a [`UsageCounter`] via
/// [`Arena::usage_counter`] and any thread can sample it.
///
/// Returned pointers are valid until the arena is dropped. Using one after
/// that is undefined behavior; this is a documented precondition, not a
/// runtime check.
///
/// # Example
///
/// ```
/// use moraine::{Arena, BLOCK_OVERHEAD};
///
/// let mut arena = Arena::new();
/// let ptr = arena.alloc(64);
/// // One standard block was reserved to back the request.
/// assert_eq!(arena.memory_usage(), 4096 + BLOCK_OVERHEAD);
/// // The memory is uninitialised; writing to it is the caller's unsafe.
/// unsafe { ptr.as_ptr().write_bytes(0xAB, 64) };
/// ```
pub struct Arena {
    /// Bump cursor into the current standard block. Dangling until the
    /// first standard block is installed; never read while `remaining == 0`.
    cursor: NonNull<u8>,
    /// Bytes left between `cursor` and the end of the current standard
    /// block. Invariant: `remaining > 0` implies
    /// `remaining == block_end - cursor` for the active block.
    remaining: usize,
    /// Every block this arena has allocated, standard and dedicated.
    /// Freed together when the arena drops; order is immaterial.
    blocks: SmallVec<[Block; INLINE_BLOCKS]>,
    /// Total bytes reserved, shared with [`UsageCounter`] clones.
    usage: UsageCounter,
    config: ArenaConfig,
}

// SAFETY: the blocks are exclusively owned and the raw cursor is only read
// through `&mut self`, so moving the arena moves sole ownership with it.
// `Arena` is deliberately not `Sync` — the cursor and block list require a
// single owner, and only `UsageCounter` crosses threads.
unsafe impl Send for Arena {}

impl Arena {
    /// Alignment guaranteed by [`Arena::alloc_aligned`]: at least 8, or the
    /// platform pointer size if that is larger. A power of two, checked at
    /// compile time.
    pub const ALIGN: usize = raw::BLOCK_ALIGN;

    /// Create an empty arena with the default config: no blocks, zero
    /// capacity, zero usage. The first allocation reserves the first block.
    pub fn new() -> Self {
        Self::from_config(ArenaConfig::default())
    }

    /// Create an empty arena with a custom config.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidBlockSize`] if the config's block size
    /// is not a power of two or is below [`ArenaConfig::MIN_BLOCK_SIZE`].
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: ArenaConfig) -> Self {
        Self {
            cursor: NonNull::dangling(),
            remaining: 0,
            blocks: SmallVec::new(),
            usage: UsageCounter::new(),
            config,
        }
    }

    /// Allocate `bytes` of uninitialised memory with no alignment guarantee
    /// beyond whatever the cursor happens to have.
    ///
    /// The returned pointer is valid for reads and writes of `bytes` bytes
    /// until the arena is dropped. Zero-byte requests return a shared,
    /// well-aligned sentinel that must not be dereferenced; they reserve
    /// nothing and do not move the cursor.
    pub fn alloc(&mut self, bytes: usize) -> NonNull<u8> {
        if bytes == 0 {
            return raw::dangling();
        }
        if bytes <= self.remaining {
            let result = self.cursor;
            // SAFETY: `bytes <= remaining`, so the advanced cursor stays
            // within the current standard block (at most one past the end).
            self.cursor = unsafe { raw::advance(self.cursor, bytes) };
            self.remaining -= bytes;
            return result;
        }
        self.alloc_fallback(bytes)
    }

    /// Allocate `bytes` of uninitialised memory whose address is a multiple
    /// of [`Arena::ALIGN`].
    ///
    /// Skips up to `ALIGN - 1` slop bytes to align the cursor; the slop is
    /// charged against the current block and never reclaimed. Validity and
    /// zero-byte behavior match [`Arena::alloc`].
    pub fn alloc_aligned(&mut self, bytes: usize) -> NonNull<u8> {
        if bytes == 0 {
            return raw::dangling();
        }
        let current_mod = self.cursor.as_ptr() as usize & (Self::ALIGN - 1);
        let slop = if current_mod == 0 {
            0
        } else {
            Self::ALIGN - current_mod
        };
        let needed = bytes + slop;
        let result = if needed <= self.remaining {
            // SAFETY: `slop + bytes <= remaining`, so both the slop skip
            // and the advanced cursor stay within the current block.
            let result = unsafe { raw::advance(self.cursor, slop) };
            self.cursor = unsafe { raw::advance(self.cursor, needed) };
            self.remaining -= needed;
            result
        } else {
            // Every block starts at an address aligned to at least `ALIGN`,
            // so the fallback result needs no slop.
            self.alloc_fallback(bytes)
        };
        debug_assert_eq!(result.as_ptr() as usize & (Self::ALIGN - 1), 0);
        result
    }

    /// Slow path: the current block cannot satisfy `bytes`.
    ///
    /// Performs no alignment arithmetic — callers that need alignment rely
    /// on every block base being [`Arena::ALIGN`]-aligned.
    #[cold]
    fn alloc_fallback(&mut self, bytes: usize) -> NonNull<u8> {
        if bytes > self.config.large_threshold() {
            // More than a quarter of a standard block: dedicated block,
            // cursor untouched, so the current block's tail stays usable
            // for later small requests.
            return self.new_block(bytes);
        }

        // Abandon the tail of the current block and refill. The abandoned
        // tail is smaller than the request, so at most
        // `large_threshold() - 1` bytes per transition.
        let base = self.new_block(self.config.block_size);
        self.cursor = base;
        self.remaining = self.config.block_size;

        let result = self.cursor;
        // SAFETY: `bytes <= large_threshold() < block_size == remaining`,
        // so the cursor stays within the freshly installed block.
        self.cursor = unsafe { raw::advance(self.cursor, bytes) };
        self.remaining -= bytes;
        result
    }

    /// Allocate a block of exactly `block_bytes`, track it for teardown,
    /// and charge it plus [`BLOCK_OVERHEAD`] to the usage counter.
    fn new_block(&mut self, block_bytes: usize) -> NonNull<u8> {
        let block = Block::new(block_bytes);
        let base = block.base();
        self.usage.record(block.len() + BLOCK_OVERHEAD);
        self.blocks.push(block);
        base
    }

    /// Total bytes reserved from the system allocator, including per-block
    /// bookkeeping overhead and waste — not bytes handed to callers.
    /// Monotonic non-decreasing.
    pub fn memory_usage(&self) -> usize {
        self.usage.bytes()
    }

    /// A cloneable, thread-safe handle onto the usage counter.
    ///
    /// The handle stays readable from any thread while the owning thread
    /// allocates, and keeps working after the arena itself is dropped
    /// (reporting the final total).
    pub fn usage_counter(&self) -> UsageCounter {
        self.usage.clone()
    }

    /// Number of blocks allocated so far, standard and dedicated.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Bytes still available in the current standard block.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// The config this arena was built with.
    pub fn config(&self) -> ArenaConfig {
        self.config
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
