//! Array Store
//!
//! Decorator addressing a store as a sequence of fixed-size objects.
//!
//! ## Addressing
//! ```text
//!   index:   0          1          2
//!   bytes: ├──────────┼──────────┼──────────┼──┤
//!          0          n          2n         3n  (tail shorter than n is unused)
//! ```
//!
//! Offsets, sizes and returned counts are in objects, not bytes, so an
//! array store is not itself a [`Store`]: byte-level callers such as
//! `transfer` use [`ArrayStore::inner_mut`].

use crate::error::Result;

use super::{DynamicStore, Store};

/// Halves produced by [`ArrayStore::split`]
pub type ArrayPair<'a> = (ArrayStore<Box<dyn Store + 'a>>, ArrayStore<Box<dyn Store + 'a>>);

/// Object-indexed view of a byte store
#[derive(Debug)]
pub struct ArrayStore<S> {
    inner: S,
    object_size: usize,
}

impl<S: Store> ArrayStore<S> {
    /// Wrap `inner` as an array of `object_size`-byte objects
    ///
    /// An object size of zero is treated as one.
    pub fn new(inner: S, object_size: usize) -> Self {
        Self {
            inner,
            object_size: object_size.max(1),
        }
    }

    /// Size of one object in bytes
    pub fn object_size(&self) -> usize {
        self.object_size
    }

    /// Get the wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Get the wrapped store mutably
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwrap the decorator
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Number of whole objects the store holds
    pub fn len(&self) -> usize {
        self.inner.size() / self.object_size
    }

    /// Check if not even one object fits
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn byte_offset(&self, index: usize) -> Option<usize> {
        index.checked_mul(self.object_size)
    }

    /// Read whole objects starting at object `index` into `buffer`
    ///
    /// Reads at most `buffer.len() / object_size` objects and returns how
    /// many objects were read completely.
    pub fn read(&mut self, buffer: &mut [u8], index: usize) -> Result<usize> {
        let Some(offset) = self.byte_offset(index) else {
            return Ok(0);
        };
        let whole = buffer.len() / self.object_size * self.object_size;
        let read = self.inner.read(&mut buffer[..whole], offset)?;
        Ok(read / self.object_size)
    }

    /// Write whole objects from `buffer` starting at object `index`
    ///
    /// Returns how many objects were written completely.
    pub fn write(&mut self, buffer: &[u8], index: usize) -> Result<usize> {
        let Some(offset) = self.byte_offset(index) else {
            return Ok(0);
        };
        let whole = buffer.len() / self.object_size * self.object_size;
        let written = self.inner.write(&buffer[..whole], offset)?;
        Ok(written / self.object_size)
    }

    /// Divide into objects `0..at` and `at..len()`
    pub fn split(&mut self, at: usize) -> Result<ArrayPair<'_>> {
        let at = at.min(self.len()) * self.object_size;
        let object_size = self.object_size;
        let (left, right) = self.inner.split(at)?;
        Ok((ArrayStore::new(left, object_size), ArrayStore::new(right, object_size)))
    }

    /// Read the object at `index` into the front of `buffer`
    ///
    /// Returns `false` when `buffer` is shorter than one object or the
    /// object lies (partly) past the end.
    pub fn get(&mut self, index: usize, buffer: &mut [u8]) -> Result<bool> {
        let size = self.object_size;
        if buffer.len() < size || index >= self.len() {
            return Ok(false);
        }
        let offset = index * size;

        // Objects may straddle members of a composite store
        let mut done = 0;
        while done < size {
            let n = self.inner.read(&mut buffer[done..size], offset + done)?;
            if n == 0 {
                return Ok(false);
            }
            done += n;
        }
        Ok(true)
    }

    /// Write the object at the front of `buffer` to `index`
    ///
    /// Returns `false` when `buffer` is shorter than one object or the
    /// object lies (partly) past the end. Nothing is written in that case.
    pub fn set(&mut self, index: usize, buffer: &[u8]) -> Result<bool> {
        let size = self.object_size;
        if buffer.len() < size || index >= self.len() {
            return Ok(false);
        }
        let offset = index * size;

        let mut done = 0;
        while done < size {
            let n = self.inner.write(&buffer[done..size], offset + done)?;
            if n == 0 {
                return Ok(false);
            }
            done += n;
        }
        Ok(true)
    }
}

impl<S: DynamicStore> ArrayStore<S> {
    /// Resize to `len` objects, returning the object count afterwards
    pub fn resize(&mut self, len: usize) -> usize {
        let bytes = len.saturating_mul(self.object_size);
        self.inner.resize(bytes) / self.object_size
    }
}
