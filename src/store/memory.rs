//! Memory Store
//!
//! A store over a borrowed, contiguous byte region.

use crate::error::Result;

use super::{clamp, SplitPair, Store};

/// Store backed directly by a mutable byte slice
///
/// Reads and writes are bounds-checked copies. `split` hands out two
/// non-overlapping views of the same region without copying.
#[derive(Debug)]
pub struct MemoryStore<'a> {
    bytes: &'a mut [u8],
}

impl<'a> MemoryStore<'a> {
    /// Wrap a byte region
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    /// Borrow the underlying bytes
    pub fn raw(&self) -> &[u8] {
        &*self.bytes
    }

    /// Mutably borrow the underlying bytes
    pub fn raw_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }

    /// Give back the wrapped region with its original lifetime
    pub fn into_raw(self) -> &'a mut [u8] {
        self.bytes
    }
}

impl Store for MemoryStore<'_> {
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let amount = clamp(offset, buffer.len(), self.bytes.len());
        if amount == 0 {
            return Ok(0);
        }
        buffer[..amount].copy_from_slice(&self.bytes[offset..offset + amount]);
        Ok(amount)
    }

    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize> {
        let amount = clamp(offset, buffer.len(), self.bytes.len());
        if amount == 0 {
            return Ok(0);
        }
        self.bytes[offset..offset + amount].copy_from_slice(&buffer[..amount]);
        Ok(amount)
    }

    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn split(&mut self, at: usize) -> Result<SplitPair<'_>> {
        let at = at.min(self.bytes.len());
        let (left, right) = self.bytes.split_at_mut(at);
        Ok((Box::new(MemoryStore::new(left)), Box::new(MemoryStore::new(right))))
    }
}
