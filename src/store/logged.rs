//! Logged Store
//!
//! Decorator that reports the outcome of every read and write through
//! `tracing`.
//!
//! ## Outcome Levels
//! - full transfer → `debug`
//! - short transfer → `warn`
//! - error → `error`

use crate::error::Result;

use super::{DynamicStore, SplitPair, Store};

/// Store wrapper emitting one tracing event per read or write
pub struct LoggedStore<S> {
    label: String,
    inner: S,
}

impl<S: Store> LoggedStore<S> {
    /// Wrap `inner`, tagging its events with `label`
    pub fn new(label: impl Into<String>, inner: S) -> Self {
        Self {
            label: label.into(),
            inner,
        }
    }

    /// Get the wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the decorator
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn report(&self, operation: &str, requested: usize, offset: usize, result: &Result<usize>) {
        match result {
            Ok(n) if *n == requested => tracing::debug!(
                store = %self.label,
                "{}({} @ {}) -> {}",
                operation,
                requested,
                offset,
                n
            ),
            Ok(n) => tracing::warn!(
                store = %self.label,
                "partial {}({} @ {}) -> {}",
                operation,
                requested,
                offset,
                n
            ),
            Err(e) => tracing::error!(
                store = %self.label,
                "{}({} @ {}) failed: {}",
                operation,
                requested,
                offset,
                e
            ),
        }
    }
}

impl<S: Store> Store for LoggedStore<S> {
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let result = self.inner.read(buffer, offset);
        self.report("read", buffer.len(), offset, &result);
        result
    }

    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize> {
        let result = self.inner.write(buffer, offset);
        self.report("write", buffer.len(), offset, &result);
        result
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn split(&mut self, at: usize) -> Result<SplitPair<'_>> {
        let (left, right) = self.inner.split(at)?;
        Ok((
            Box::new(LoggedStore::new(format!("{}[..{}]", self.label, at), left)),
            Box::new(LoggedStore::new(format!("{}[{}..]", self.label, at), right)),
        ))
    }

    fn valid(&self) -> bool {
        self.inner.valid()
    }
}

impl<S: DynamicStore> DynamicStore for LoggedStore<S> {
    fn resize(&mut self, new_size: usize) -> usize {
        let size = self.inner.resize(new_size);
        if size == new_size {
            tracing::debug!(store = %self.label, "resize({}) -> {}", new_size, size);
        } else {
            tracing::warn!(store = %self.label, "partial resize({}) -> {}", new_size, size);
        }
        size
    }
}
