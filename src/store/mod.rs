//! Store Module
//!
//! Bounded, byte-addressable read/write surfaces.
//!
//! ## Responsibilities
//! - Positioned reads and writes within `0..size()`
//! - Zero-copy splitting into two disjoint views
//! - Composition: fallback pairs and concatenated lists
//! - Resizing, for stores that implement [`DynamicStore`]
//!
//! ## Addressing
//! ```text
//!   offset 0                       at                        size()
//!   ├──────────────────────────────┼──────────────────────────┤
//!   │            left              │          right           │
//!   └──────────────────────────────┴──────────────────────────┘
//!   split(at) → (left: 0..at, right: at..size)
//! ```
//!
//! Offsets at or past `size()` transfer nothing, and a request crossing the
//! end is clamped. Callers must check the returned count.

mod array;
mod fallback;
mod file;
mod heap;
mod list;
mod logged;
mod memory;

pub use array::{ArrayPair, ArrayStore};
pub use fallback::FallbackStore;
pub use file::FileStore;
pub use heap::HeapStore;
pub use list::ListStore;
pub use logged::LoggedStore;
pub use memory::MemoryStore;

pub(crate) use heap::resize_block;

use crate::error::{Result, SaltError};

/// A pair of views produced by [`Store::split`]
pub type SplitPair<'a> = (Box<dyn Store + 'a>, Box<dyn Store + 'a>);

/// Something bytes can be read from and written to at an offset.
///
/// # Object Safety
///
/// This trait is object-safe: composites hold `Box<dyn Store>` members.
pub trait Store {
    /// Read up to `buffer.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes read, which is zero when `offset` is out
    /// of bounds and may be short when the range crosses the end.
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize>;

    /// Write up to `buffer.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes written, clamped like [`Store::read`].
    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize>;

    /// Logical length in bytes.
    fn size(&self) -> usize;

    /// Divide the store into `0..at` and `at..size()`.
    ///
    /// `at` is clamped to `size()`, so the halves always cover the store
    /// exactly once. Both views borrow `self` and cannot outlive it.
    fn split(&mut self, at: usize) -> Result<SplitPair<'_>>;

    /// Whether the store can currently serve reads and writes.
    fn valid(&self) -> bool {
        true
    }
}

/// A store whose length can change.
pub trait DynamicStore: Store {
    /// Try to change the length to `new_size` bytes.
    ///
    /// Returns the size afterwards, which is the old size when the change
    /// could not be made.
    fn resize(&mut self, new_size: usize) -> usize;
}

/// Clamp a request of `len` bytes at `offset` against `size`.
pub(crate) fn clamp(offset: usize, len: usize, size: usize) -> usize {
    size.saturating_sub(offset).min(len)
}

// =============================================================================
// Blanket Implementations
// =============================================================================

impl<T: Store + ?Sized> Store for &mut T {
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        (**self).read(buffer, offset)
    }

    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize> {
        (**self).write(buffer, offset)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn split(&mut self, at: usize) -> Result<SplitPair<'_>> {
        (**self).split(at)
    }

    fn valid(&self) -> bool {
        (**self).valid()
    }
}

impl<T: Store + ?Sized> Store for Box<T> {
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        (**self).read(buffer, offset)
    }

    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize> {
        (**self).write(buffer, offset)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn split(&mut self, at: usize) -> Result<SplitPair<'_>> {
        (**self).split(at)
    }

    fn valid(&self) -> bool {
        (**self).valid()
    }
}

impl<T: DynamicStore + ?Sized> DynamicStore for &mut T {
    fn resize(&mut self, new_size: usize) -> usize {
        (**self).resize(new_size)
    }
}

impl<T: DynamicStore + ?Sized> DynamicStore for Box<T> {
    fn resize(&mut self, new_size: usize) -> usize {
        (**self).resize(new_size)
    }
}

/// An absent store behaves like [`NullStore`].
///
/// Replacing `None` with `Some(store)` is how a fallback's primary "comes
/// back" after being unavailable.
impl<S: Store> Store for Option<S> {
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        match self {
            Some(store) => store.read(buffer, offset),
            None => NullStore.read(buffer, offset),
        }
    }

    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize> {
        match self {
            Some(store) => store.write(buffer, offset),
            None => NullStore.write(buffer, offset),
        }
    }

    fn size(&self) -> usize {
        self.as_ref().map_or(0, |store| store.size())
    }

    fn split(&mut self, at: usize) -> Result<SplitPair<'_>> {
        match self {
            Some(store) => store.split(at),
            None => Ok((Box::new(NullStore), Box::new(NullStore))),
        }
    }

    fn valid(&self) -> bool {
        self.as_ref().is_some_and(|store| store.valid())
    }
}

impl<S: DynamicStore> DynamicStore for Option<S> {
    fn resize(&mut self, new_size: usize) -> usize {
        self.as_mut().map_or(0, |store| store.resize(new_size))
    }
}

// =============================================================================
// Null Store
// =============================================================================

/// A store with no backing medium.
///
/// Always invalid: reads and writes are rejected, size is zero, and splits
/// produce two more null stores.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl Store for NullStore {
    fn read(&mut self, _buffer: &mut [u8], _offset: usize) -> Result<usize> {
        Err(SaltError::UsageOnInvalid("read from null store".to_string()))
    }

    fn write(&mut self, _buffer: &[u8], _offset: usize) -> Result<usize> {
        Err(SaltError::UsageOnInvalid("write to null store".to_string()))
    }

    fn size(&self) -> usize {
        0
    }

    fn split(&mut self, _at: usize) -> Result<SplitPair<'_>> {
        Ok((Box::new(NullStore), Box::new(NullStore)))
    }

    fn valid(&self) -> bool {
        false
    }
}
