//! First Resource
//!
//! N-way fallback: the first member that initializes wins.

use crate::error::{Result, SaltError};
use crate::store::Store;

use super::{ensure_initialized, Lifecycle, Resource};

/// Resource over the first member (in order) whose `init` succeeds
pub struct FirstResource {
    members: Vec<Box<dyn Resource>>,
    active: Option<usize>,
    state: Lifecycle,
}

impl FirstResource {
    /// Create from candidates in order of preference
    pub fn new(members: Vec<Box<dyn Resource>>) -> Self {
        Self {
            members,
            active: None,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Index of the member that was initialized
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Get the candidate at `index`
    pub fn get(&self, index: usize) -> Option<&dyn Resource> {
        self.members.get(index).map(|member| &**member)
    }
}

impl Resource for FirstResource {
    fn init(&mut self) -> Result<()> {
        if self.state == Lifecycle::Initialized {
            return Ok(());
        }

        for (index, member) in self.members.iter_mut().enumerate() {
            match member.init() {
                Ok(()) => {
                    self.active = Some(index);
                    self.state = Lifecycle::Initialized;
                    tracing::debug!("First resource settled on member {}", index);
                    return Ok(());
                }
                Err(e) => tracing::debug!("First resource member {} failed: {}", index, e),
            }
        }

        self.state = Lifecycle::Invalid;
        Err(SaltError::Acquisition(format!(
            "none of {} candidates could be initialized",
            self.members.len()
        )))
    }

    fn deinit(&mut self) {
        if let Some(index) = self.active.take() {
            self.members[index].deinit();
            self.state = Lifecycle::Uninitialized;
        }
    }

    fn state(&self) -> Lifecycle {
        self.state
    }

    fn valid(&self) -> bool {
        self.active.is_some_and(|index| self.members[index].valid())
    }

    fn store(&mut self) -> Result<Box<dyn Store + '_>> {
        ensure_initialized(self.state, "first resource")?;
        match self.active {
            Some(index) => self.members[index].store(),
            None => Err(SaltError::UsageOnInvalid("no active member".to_string())),
        }
    }

    /// Bounds of the active member, or of the first candidate before `init`
    fn bounds(&self) -> usize {
        let index = self.active.unwrap_or(0);
        self.members.get(index).map_or(0, |member| member.bounds())
    }
}
