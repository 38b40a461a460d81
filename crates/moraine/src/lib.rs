//! Bump-pointer arena allocation for short-lived, batch-freed memory.
//!
//! An [`Arena`] hands out raw, appropriately aligned memory and frees every
//! allocation at once when it is dropped. It is built for the
//! many-small-allocations, one-owner pattern: a database memtable, a parser,
//! any unit of work whose allocations live and die together.
//!
//! # Architecture
//!
//! ```text
//! Arena (single owner, all allocation through &mut self)
//! ├── cursor + remaining    bump fast path into the current standard block
//! ├── SmallVec<Block>       every block ever allocated, freed together on drop
//! │   └── Block             raw heap buffer (NonNull<u8> + Layout)
//! └── UsageCounter          Arc<AtomicUsize>, cloneable, readable anywhere
//! ```
//!
//! Requests up to a quarter of the standard block size advance the bump
//! cursor; anything larger gets a dedicated block so the current block's
//! tail stays usable for later small requests. Out of memory is fatal
//! ([`std::alloc::handle_alloc_error`]); the only recoverable error is
//! config validation at construction.
//!
//! # Safety
//!
//! `unsafe` is confined to `raw.rs` (block allocation and release) and the
//! cursor-advance call sites in `arena.rs`, each with a `// SAFETY:`
//! comment. Pointers returned by the arena are valid until the arena is
//! dropped; using one after that is undefined behavior. This precondition
//! is documented rather than checked — the fast path carries no liveness
//! bookkeeping.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod arena;
pub mod config;
pub mod error;
mod raw;
pub mod usage;

// Public re-exports for the primary API surface.
pub use arena::{Arena, BLOCK_OVERHEAD};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use usage::UsageCounter;
