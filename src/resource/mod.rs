//! Resource Module
//!
//! Things with an acquire/release lifecycle guarding a backing handle.
//!
//! ## Lifecycle
//! ```text
//!                    init() ok
//!   ┌───────────────┐ ───────────▶ ┌─────────────┐
//!   │ Uninitialized │              │ Initialized │ ── store() ──▶ Store view
//!   └───────────────┘ ◀─────────── └─────────────┘
//!          │            deinit()
//!          │ init() fails
//!          ▼
//!   ┌───────────────┐
//!   │    Invalid    │  (init may be retried)
//!   └───────────────┘
//! ```
//!
//! ## Responsibilities
//! - Acquire the handle in `init`, all-or-nothing
//! - Release it exactly once in `deinit`
//! - Hand out store views only while initialized
//!
//! Prefer [`acquire`] over calling `init`/`deinit` by hand: the returned
//! guard releases the resource on every exit path.

mod fallback;
mod file;
mod first;
mod heap;
mod list;

pub use fallback::{Active, FallbackResource};
pub use file::{FileMode, FileResource};
pub use first::FirstResource;
pub use heap::{HeapResource, LazyHeapResource};
pub use list::ListResource;

use std::ops::{Deref, DerefMut};

use crate::error::{Result, SaltError};
use crate::store::{NullStore, Store};

/// Lifecycle state of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Constructed or released; no handle held
    #[default]
    Uninitialized,

    /// Handle acquired; store views may be taken
    Initialized,

    /// The last `init` failed; no handle held
    Invalid,
}

/// Something acquired with `init` and released with `deinit`.
///
/// # Object Safety
///
/// This trait is object-safe: list composites hold `Box<dyn Resource>`.
pub trait Resource {
    /// Acquire the backing handle.
    ///
    /// On failure the resource becomes [`Lifecycle::Invalid`] and holds
    /// nothing. Calling `init` on an initialized resource does nothing.
    fn init(&mut self) -> Result<()>;

    /// Release the backing handle. Does nothing unless initialized.
    fn deinit(&mut self);

    /// Current lifecycle state.
    fn state(&self) -> Lifecycle;

    /// Check if the resource is initialized.
    fn valid(&self) -> bool {
        self.state() == Lifecycle::Initialized
    }

    /// Store view over the backing medium (the resource's `use`).
    ///
    /// Fails with [`SaltError::UsageOnInvalid`] unless initialized.
    fn store(&mut self) -> Result<Box<dyn Store + '_>>;

    /// Logical size of the backing medium in bytes.
    fn bounds(&self) -> usize;

    /// Run `block` against the resource's store view.
    fn use_store<T, F>(&mut self, block: F) -> Result<T>
    where
        F: FnOnce(&mut dyn Store) -> Result<T>,
        Self: Sized,
    {
        let mut store = self.store()?;
        block(&mut *store)
    }
}

impl<R: Resource + ?Sized> Resource for Box<R> {
    fn init(&mut self) -> Result<()> {
        (**self).init()
    }

    fn deinit(&mut self) {
        (**self).deinit()
    }

    fn state(&self) -> Lifecycle {
        (**self).state()
    }

    fn store(&mut self) -> Result<Box<dyn Store + '_>> {
        (**self).store()
    }

    fn bounds(&self) -> usize {
        (**self).bounds()
    }
}

/// Reject use of a resource that is not initialized
pub(crate) fn ensure_initialized(state: Lifecycle, what: &str) -> Result<()> {
    match state {
        Lifecycle::Initialized => Ok(()),
        other => Err(SaltError::UsageOnInvalid(format!("{} is {:?}", what, other))),
    }
}

// =============================================================================
// Scoped Acquisition
// =============================================================================

/// Guard holding an initialized resource; deinitializes it on drop
pub struct Acquired<'r, R: Resource + ?Sized> {
    resource: &'r mut R,
}

/// Initialize `resource` and return a guard that releases it when dropped
///
/// ```
/// use saltio::resource::{acquire, HeapResource, Resource};
/// use saltio::store::Store;
///
/// let mut heap = HeapResource::new(16);
/// {
///     let mut guard = acquire(&mut heap).unwrap();
///     let mut store = guard.store().unwrap();
///     assert_eq!(store.write(b"hi", 0).unwrap(), 2);
/// }
/// assert!(!heap.valid());
/// ```
pub fn acquire<R: Resource + ?Sized>(resource: &mut R) -> Result<Acquired<'_, R>> {
    resource.init()?;
    Ok(Acquired { resource })
}

impl<R: Resource + ?Sized> Deref for Acquired<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        &*self.resource
    }
}

impl<R: Resource + ?Sized> DerefMut for Acquired<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut *self.resource
    }
}

impl<R: Resource + ?Sized> Drop for Acquired<'_, R> {
    fn drop(&mut self) {
        self.resource.deinit();
    }
}

// =============================================================================
// No-op Lifecycle Primitives
// =============================================================================

/// `init` for resources with nothing to acquire
pub fn noop_init(state: &mut Lifecycle) -> Result<()> {
    *state = Lifecycle::Initialized;
    Ok(())
}

/// `deinit` for resources with nothing to release
pub fn noop_deinit(state: &mut Lifecycle) {
    if *state == Lifecycle::Initialized {
        *state = Lifecycle::Uninitialized;
    }
}

/// `valid` for resources whose validity is just their lifecycle state
pub fn noop_valid(state: Lifecycle) -> bool {
    state == Lifecycle::Initialized
}

/// Resource with nothing behind it
///
/// Always initializes successfully and exposes a [`NullStore`].
#[derive(Debug, Default)]
pub struct Noop {
    state: Lifecycle,
}

impl Noop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Resource for Noop {
    fn init(&mut self) -> Result<()> {
        noop_init(&mut self.state)
    }

    fn deinit(&mut self) {
        noop_deinit(&mut self.state)
    }

    fn state(&self) -> Lifecycle {
        self.state
    }

    fn valid(&self) -> bool {
        noop_valid(self.state)
    }

    fn store(&mut self) -> Result<Box<dyn Store + '_>> {
        ensure_initialized(self.state, "noop resource")?;
        Ok(Box::new(NullStore))
    }

    fn bounds(&self) -> usize {
        0
    }
}
