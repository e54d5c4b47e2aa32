//! List Resource
//!
//! All-or-nothing acquisition of an ordered set of resources.
//!
//! ## Rollback
//! ```text
//!   init:   m0 ✓ ─▶ m1 ✓ ─▶ m2 ✗
//!   undo:   m0 ◀─── m1 ◀───┘        (reverse order, list becomes Invalid)
//! ```

use crate::error::{Result, SaltError};
use crate::store::{ListStore, Store};

use super::{ensure_initialized, Lifecycle, Resource};

/// Ordered resources initialized together and released in reverse
///
/// Members keep their own address spaces: `bounds()` reports the first
/// member only, and [`ListResource::member_bounds`] reaches the others.
/// The store view concatenates every member's store into a [`ListStore`].
pub struct ListResource {
    members: Vec<Box<dyn Resource>>,
    state: Lifecycle,
}

impl ListResource {
    /// Create from members in initialization order
    pub fn new(members: Vec<Box<dyn Resource>>) -> Self {
        Self {
            members,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the list has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Get the member at `index`
    pub fn get(&self, index: usize) -> Option<&dyn Resource> {
        self.members.get(index).map(|member| &**member)
    }

    /// Get the member at `index` mutably
    pub fn get_mut(&mut self, index: usize) -> Option<&mut dyn Resource> {
        match self.members.get_mut(index) {
            Some(member) => Some(&mut **member),
            None => None,
        }
    }

    /// Bounds of the member at `index`
    pub fn member_bounds(&self, index: usize) -> Option<usize> {
        self.members.get(index).map(|member| member.bounds())
    }
}

impl Resource for ListResource {
    fn init(&mut self) -> Result<()> {
        if self.state == Lifecycle::Initialized {
            return Ok(());
        }

        for index in 0..self.members.len() {
            if let Err(e) = self.members[index].init() {
                for member in self.members[..index].iter_mut().rev() {
                    member.deinit();
                }
                self.state = Lifecycle::Invalid;
                tracing::warn!(
                    "List member {} failed to initialize, rolled back {} members: {}",
                    index,
                    index,
                    e
                );
                return Err(SaltError::Member {
                    index,
                    source: Box::new(e),
                });
            }
        }

        self.state = Lifecycle::Initialized;
        Ok(())
    }

    fn deinit(&mut self) {
        if self.state != Lifecycle::Initialized {
            return;
        }
        for member in self.members.iter_mut().rev() {
            member.deinit();
        }
        self.state = Lifecycle::Uninitialized;
    }

    fn state(&self) -> Lifecycle {
        self.state
    }

    fn valid(&self) -> bool {
        self.state == Lifecycle::Initialized && self.members.iter().all(|member| member.valid())
    }

    fn store(&mut self) -> Result<Box<dyn Store + '_>> {
        ensure_initialized(self.state, "list resource")?;
        let stores = self
            .members
            .iter_mut()
            .map(|member| member.store())
            .collect::<Result<Vec<_>>>()?;
        Ok(Box::new(ListStore::new(stores)))
    }

    fn bounds(&self) -> usize {
        self.member_bounds(0).unwrap_or(0)
    }
}
