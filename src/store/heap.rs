//! Heap Store
//!
//! A memory store over an owned, growable block. Unlike [`MemoryStore`],
//! it can change its length with [`DynamicStore::resize`].

use crate::error::Result;

use super::{clamp, DynamicStore, MemoryStore, SplitPair, Store};

/// Grow or shrink `block` to `new_size` zero-filled bytes
///
/// Growth that cannot be reserved leaves the block untouched. Returns the
/// length afterwards.
pub(crate) fn resize_block(block: &mut Vec<u8>, new_size: usize) -> usize {
    if new_size > block.len() {
        if let Err(e) = block.try_reserve_exact(new_size - block.len()) {
            tracing::warn!("Heap resize to {} bytes failed: {}", new_size, e);
            return block.len();
        }
    }
    block.resize(new_size, 0);
    block.shrink_to_fit();
    block.len()
}

/// Resizable view over a heap block
#[derive(Debug)]
pub struct HeapStore<'a> {
    block: &'a mut Vec<u8>,
}

impl<'a> HeapStore<'a> {
    /// Create a store over `block`
    pub fn new(block: &'a mut Vec<u8>) -> Self {
        Self { block }
    }

    /// Get the underlying bytes
    pub fn raw(&self) -> &[u8] {
        self.block.as_slice()
    }
}

impl Store for HeapStore<'_> {
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let amount = clamp(offset, buffer.len(), self.block.len());
        if amount == 0 {
            return Ok(0);
        }
        buffer[..amount].copy_from_slice(&self.block[offset..offset + amount]);
        Ok(amount)
    }

    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize> {
        let amount = clamp(offset, buffer.len(), self.block.len());
        if amount == 0 {
            return Ok(0);
        }
        self.block[offset..offset + amount].copy_from_slice(&buffer[..amount]);
        Ok(amount)
    }

    fn size(&self) -> usize {
        self.block.len()
    }

    fn split(&mut self, at: usize) -> Result<SplitPair<'_>> {
        let at = at.min(self.block.len());
        let (left, right) = self.block.split_at_mut(at);
        Ok((Box::new(MemoryStore::new(left)), Box::new(MemoryStore::new(right))))
    }
}

impl DynamicStore for HeapStore<'_> {
    fn resize(&mut self, new_size: usize) -> usize {
        resize_block(&mut *self.block, new_size)
    }
}
