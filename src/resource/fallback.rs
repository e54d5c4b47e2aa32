//! Fallback Resource
//!
//! Prefer one resource, fall back to another when it cannot be acquired.

use crate::error::{Result, SaltError};
use crate::store::Store;

use super::{ensure_initialized, Lifecycle, Resource};

/// Which member of a fallback holds the acquired handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Active {
    Primary,
    Secondary,
}

/// Two-member resource initialized over whichever member succeeds first
///
/// `init` tries `primary`, then `secondary`. Everything afterwards is
/// delegated to the member that succeeded.
#[derive(Debug)]
pub struct FallbackResource<P, S> {
    primary: P,
    secondary: S,
    active: Option<Active>,
    state: Lifecycle,
}

impl<P: Resource, S: Resource> FallbackResource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary,
            active: None,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Member currently holding the handle, if initialized
    pub fn active(&self) -> Option<Active> {
        self.active
    }

    /// Get the primary member
    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// Get the secondary member
    pub fn secondary(&self) -> &S {
        &self.secondary
    }
}

impl<P: Resource, S: Resource> Resource for FallbackResource<P, S> {
    fn init(&mut self) -> Result<()> {
        if self.state == Lifecycle::Initialized {
            return Ok(());
        }

        let primary_error = match self.primary.init() {
            Ok(()) => {
                self.active = Some(Active::Primary);
                self.state = Lifecycle::Initialized;
                return Ok(());
            }
            Err(e) => e,
        };
        tracing::debug!("Fallback primary failed ({}), trying secondary", primary_error);

        match self.secondary.init() {
            Ok(()) => {
                self.active = Some(Active::Secondary);
                self.state = Lifecycle::Initialized;
                Ok(())
            }
            Err(secondary_error) => {
                self.state = Lifecycle::Invalid;
                tracing::warn!("Fallback resource invalid: both members failed");
                Err(SaltError::Acquisition(format!(
                    "primary: {}; secondary: {}",
                    primary_error, secondary_error
                )))
            }
        }
    }

    fn deinit(&mut self) {
        match self.active.take() {
            Some(Active::Primary) => self.primary.deinit(),
            Some(Active::Secondary) => self.secondary.deinit(),
            None => return,
        }
        self.state = Lifecycle::Uninitialized;
    }

    fn state(&self) -> Lifecycle {
        self.state
    }

    fn valid(&self) -> bool {
        match self.active {
            Some(Active::Primary) => self.primary.valid(),
            Some(Active::Secondary) => self.secondary.valid(),
            None => false,
        }
    }

    fn store(&mut self) -> Result<Box<dyn Store + '_>> {
        ensure_initialized(self.state, "fallback resource")?;
        match self.active {
            Some(Active::Primary) => self.primary.store(),
            Some(Active::Secondary) => self.secondary.store(),
            None => Err(SaltError::UsageOnInvalid("fallback has no active member".to_string())),
        }
    }

    /// Bounds of the active member; the primary's before `init`
    fn bounds(&self) -> usize {
        match self.active {
            Some(Active::Secondary) => self.secondary.bounds(),
            _ => self.primary.bounds(),
        }
    }
}
