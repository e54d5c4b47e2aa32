//! Fallback Store
//!
//! Pairs a preferred `primary` with a `secondary` that absorbs traffic while
//! the primary is unavailable.
//!
//! ## Routing
//! ```text
//!   primary valid, nothing pending   → primary
//!   primary invalid                  → secondary (writes recorded as pending)
//!   primary valid, writes pending    → secondary, until flush()
//! ```
//!
//! `flush()` copies the pending byte range from secondary into primary with
//! `transfer` and, once everything is copied, routes back to the primary.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::Result;
use crate::transfer::transfer;

use super::{DynamicStore, SplitPair, Store};

/// Two-member store preferring `primary`
pub struct FallbackStore<P, S> {
    primary: P,
    secondary: S,
    pending: Pending,
}

impl<P: Store, S: Store> FallbackStore<P, S> {
    /// Create a fallback over two stores
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary,
            pending: Pending::root(),
        }
    }

    /// Get the primary store
    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// Get the primary store mutably (e.g. to reattach it)
    pub fn primary_mut(&mut self) -> &mut P {
        &mut self.primary
    }

    /// Get the secondary store
    pub fn secondary(&self) -> &S {
        &self.secondary
    }

    /// Get the secondary store mutably
    pub fn secondary_mut(&mut self) -> &mut S {
        &mut self.secondary
    }

    /// Take both members back
    pub fn into_parts(self) -> (P, S) {
        (self.primary, self.secondary)
    }

    /// Check if the secondary holds writes not yet flushed to the primary
    pub fn has_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Check if reads and writes currently go to the secondary
    pub fn routes_to_secondary(&self) -> bool {
        !self.primary.valid() || self.has_pending()
    }

    /// Copy writes accumulated in the secondary back into the primary
    ///
    /// Returns the number of bytes moved. Nothing happens (`Ok(0)`) while
    /// the primary is still invalid or when no writes are pending. Pending
    /// bytes past the primary's end have nowhere to go and are dropped, so
    /// once everything that fits is copied, traffic returns to the primary.
    /// A transfer that stops early leaves the unflushed remainder pending.
    pub fn flush(&mut self) -> Result<usize> {
        if !self.primary.valid() {
            tracing::debug!("Fallback flush skipped: primary still invalid");
            return Ok(0);
        }

        let Some((start, end)) = self.pending.local_range(self.secondary.size()) else {
            return Ok(0);
        };

        let fit = end.min(self.primary.size());
        if fit < end {
            tracing::warn!(
                "Fallback flush dropping {} pending bytes past primary end {}",
                end - fit.max(start),
                fit
            );
        }

        let moved = if start < fit {
            let (_, mut source) = self.secondary.split(start)?;
            let (_, mut destination) = self.primary.split(start)?;
            transfer(&mut *destination, &mut *source, fit - start)?
        } else {
            0
        };

        if start + moved >= fit {
            self.pending.complete(start, end - start);
        } else {
            self.pending.complete(start, moved);
        }
        tracing::debug!(
            "Fallback flush moved {} of {} pending bytes at offset {}",
            moved,
            end - start,
            start
        );

        Ok(moved)
    }

    fn routed(&mut self) -> &mut dyn Store {
        if self.routes_to_secondary() {
            &mut self.secondary
        } else {
            &mut self.primary
        }
    }
}

impl<P: Store, S: Store> Store for FallbackStore<P, S> {
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        self.routed().read(buffer, offset)
    }

    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize> {
        if !self.routes_to_secondary() {
            return self.primary.write(buffer, offset);
        }

        let written = self.secondary.write(buffer, offset)?;
        self.pending.record(offset, written);
        tracing::trace!("Fallback write of {} bytes routed to secondary", written);
        Ok(written)
    }

    fn size(&self) -> usize {
        if self.routes_to_secondary() {
            self.secondary.size()
        } else {
            self.primary.size()
        }
    }

    fn split(&mut self, at: usize) -> Result<SplitPair<'_>> {
        let shift = at.min(self.secondary.size());
        let left_pending = self.pending.view(0);
        let right_pending = self.pending.view(shift);

        let (primary_left, primary_right) = self.primary.split(at)?;
        let (secondary_left, secondary_right) = self.secondary.split(at)?;

        Ok((
            Box::new(FallbackStore {
                primary: primary_left,
                secondary: secondary_left,
                pending: left_pending,
            }),
            Box::new(FallbackStore {
                primary: primary_right,
                secondary: secondary_right,
                pending: right_pending,
            }),
        ))
    }

    fn valid(&self) -> bool {
        self.primary.valid() || self.secondary.valid()
    }
}

/// Resizes every valid member; the result is the smallest new size
impl<P: DynamicStore, S: DynamicStore> DynamicStore for FallbackStore<P, S> {
    fn resize(&mut self, new_size: usize) -> usize {
        let primary = self.primary.valid().then(|| self.primary.resize(new_size));
        let secondary = self.secondary.valid().then(|| self.secondary.resize(new_size));
        primary.into_iter().chain(secondary).min().unwrap_or(0)
    }
}

// =============================================================================
// Pending Range Tracking
// =============================================================================

/// Byte range of the secondary written since the last complete flush
///
/// Shared between a fallback and every view split from it, so writes made
/// through a view are flushed by the parent. Ranges are stored in the root
/// secondary's coordinates; `base` is where this view starts.
#[derive(Debug, Clone)]
struct Pending {
    range: Rc<Cell<Option<(usize, usize)>>>,
    base: usize,
}

impl Pending {
    fn root() -> Self {
        Self {
            range: Rc::new(Cell::new(None)),
            base: 0,
        }
    }

    fn view(&self, shift: usize) -> Self {
        Self {
            range: Rc::clone(&self.range),
            base: self.base + shift,
        }
    }

    fn get(&self) -> Option<(usize, usize)> {
        self.range.get()
    }

    /// Widen the pending range to include `len` bytes at local `offset`
    fn record(&self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        let lo = self.base + offset;
        let hi = lo + len;
        let widened = match self.get() {
            Some((start, end)) => (start.min(lo), end.max(hi)),
            None => (lo, hi),
        };
        self.range.set(Some(widened));
    }

    /// Pending range intersected with this view, in local offsets
    fn local_range(&self, size: usize) -> Option<(usize, usize)> {
        let (lo, hi) = self.get()?;
        let start = lo.max(self.base);
        let end = hi.min(self.base + size);
        (start < end).then(|| (start - self.base, end - self.base))
    }

    /// Shrink the pending range after `moved` bytes at local `start` were flushed
    fn complete(&self, start: usize, moved: usize) {
        let Some((lo, hi)) = self.get() else {
            return;
        };
        let flushed_lo = self.base + start;
        let flushed_hi = flushed_lo + moved;

        let remaining = if flushed_lo <= lo && flushed_hi >= hi {
            None
        } else if flushed_lo <= lo && flushed_hi > lo {
            Some((flushed_hi, hi))
        } else if flushed_hi >= hi && flushed_lo < hi {
            Some((lo, flushed_lo))
        } else {
            // Flushed a hole in the middle; keep the whole range pending
            Some((lo, hi))
        };
        self.range.set(remaining);
    }
}
