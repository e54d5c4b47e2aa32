//! Heap Resources
//!
//! Heap blocks exposed as memory stores.
//!
//! - [`HeapResource`] allocates in `init` and can be resized
//! - [`LazyHeapResource`] defers allocation to the first `store()`, so a
//!   resource that is set up but never used (such as the losing side of a
//!   fallback) never allocates

use crate::error::{Result, SaltError};
use crate::store::{resize_block, HeapStore, MemoryStore, Store};

use super::{ensure_initialized, noop_deinit, noop_init, Lifecycle, Resource};

/// Allocate a zeroed block, reporting failure instead of aborting
fn allocate(size: usize) -> Result<Vec<u8>> {
    let mut block = Vec::new();
    block.try_reserve_exact(size).map_err(|e| {
        SaltError::Acquisition(format!("cannot allocate {} bytes: {}", size, e))
    })?;
    block.resize(size, 0);
    Ok(block)
}

// =============================================================================
// Eager Heap
// =============================================================================

/// Heap block allocated on `init` and freed on `deinit`
#[derive(Debug)]
pub struct HeapResource {
    size: usize,
    block: Option<Vec<u8>>,
    state: Lifecycle,
}

impl HeapResource {
    /// Describe a block of `size` bytes; nothing is allocated yet
    pub fn new(size: usize) -> Self {
        Self {
            size,
            block: None,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Grow or shrink the block, returning the size afterwards
    ///
    /// If growing fails the block keeps its previous size, which is
    /// returned instead. Before `init` this only changes the requested size.
    pub fn resize(&mut self, new_size: usize) -> usize {
        self.size = match self.block.as_mut() {
            Some(block) => resize_block(block, new_size),
            None => new_size,
        };
        self.size
    }

    /// Resizable store over the block
    ///
    /// Resizing through the store also changes [`Resource::bounds`].
    pub fn heap_store(&mut self) -> Result<HeapStore<'_>> {
        ensure_initialized(self.state, "heap resource")?;
        self.block
            .as_mut()
            .map(HeapStore::new)
            .ok_or_else(|| SaltError::UsageOnInvalid("heap block missing".to_string()))
    }
}

impl Resource for HeapResource {
    fn init(&mut self) -> Result<()> {
        if self.state == Lifecycle::Initialized {
            return Ok(());
        }

        match allocate(self.size) {
            Ok(block) => {
                self.block = Some(block);
                self.state = Lifecycle::Initialized;
                tracing::debug!("Heap resource allocated {} bytes", self.size);
                Ok(())
            }
            Err(e) => {
                self.state = Lifecycle::Invalid;
                tracing::warn!("Heap resource init failed: {}", e);
                Err(e)
            }
        }
    }

    fn deinit(&mut self) {
        if self.state == Lifecycle::Initialized {
            // Keep any size change made through the store for the next init
            if let Some(block) = self.block.take() {
                self.size = block.len();
            }
            self.state = Lifecycle::Uninitialized;
        }
    }

    fn state(&self) -> Lifecycle {
        self.state
    }

    fn store(&mut self) -> Result<Box<dyn Store + '_>> {
        Ok(Box::new(self.heap_store()?))
    }

    fn bounds(&self) -> usize {
        self.block.as_ref().map_or(self.size, Vec::len)
    }
}

// =============================================================================
// Lazy Heap
// =============================================================================

/// Heap block allocated on first use
///
/// `init` only records that the resource is ready. The first `store()`
/// allocates; later calls reuse the same block until `deinit`.
#[derive(Debug)]
pub struct LazyHeapResource {
    size: usize,
    block: Option<Vec<u8>>,
    state: Lifecycle,
}

impl LazyHeapResource {
    /// Describe a block of `size` bytes
    pub fn new(size: usize) -> Self {
        Self {
            size,
            block: None,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Check if the block has been allocated yet
    pub fn is_allocated(&self) -> bool {
        self.block.is_some()
    }
}

impl Resource for LazyHeapResource {
    fn init(&mut self) -> Result<()> {
        noop_init(&mut self.state)
    }

    fn deinit(&mut self) {
        self.block = None;
        noop_deinit(&mut self.state);
    }

    fn state(&self) -> Lifecycle {
        self.state
    }

    fn store(&mut self) -> Result<Box<dyn Store + '_>> {
        ensure_initialized(self.state, "lazy heap resource")?;

        if self.block.is_none() {
            match allocate(self.size) {
                Ok(block) => {
                    tracing::debug!("Lazy heap allocated {} bytes on first use", self.size);
                    self.block = Some(block);
                }
                Err(e) => {
                    self.state = Lifecycle::Invalid;
                    tracing::warn!("Lazy heap allocation failed: {}", e);
                    return Err(e);
                }
            }
        }

        let block = self
            .block
            .as_mut()
            .ok_or_else(|| SaltError::UsageOnInvalid("heap block missing".to_string()))?;
        Ok(Box::new(MemoryStore::new(block)))
    }

    fn bounds(&self) -> usize {
        self.size
    }
}
