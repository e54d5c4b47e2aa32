//! File Resource
//!
//! Opens a file on `init`, closes it on `deinit`, and exposes its contents
//! as a [`FileStore`].

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{Result, SaltError};
use crate::store::{FileStore, Store};

use super::{ensure_initialized, Lifecycle, Resource};

/// How a file resource opens its path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Existing file, read-only
    Read,

    /// Existing file, read and write
    ReadWrite,

    /// Read and write, creating the file if missing (contents kept)
    Create,

    /// Read and write, creating the file if missing and emptying it
    Truncate,
}

impl FileMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(true);
        match self {
            FileMode::Read => {}
            FileMode::ReadWrite => {
                options.write(true);
            }
            FileMode::Create => {
                options.write(true).create(true);
            }
            FileMode::Truncate => {
                options.write(true).create(true).truncate(true);
            }
        }
        options
    }
}

/// A file handle with an acquire/release lifecycle
///
/// Bounds are the file length observed at `init` (after applying
/// [`FileResource::with_size`], if set).
#[derive(Debug)]
pub struct FileResource {
    path: PathBuf,
    mode: FileMode,
    /// Length to set on the file during init
    requested_size: Option<u64>,
    file: Option<File>,
    len: u64,
    state: Lifecycle,
}

impl FileResource {
    /// Describe a file to open with `mode`; nothing is opened yet
    pub fn create(path: impl Into<PathBuf>, mode: FileMode) -> Self {
        Self {
            path: path.into(),
            mode,
            requested_size: None,
            file: None,
            len: 0,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Set the file to exactly `size` bytes when it is opened
    ///
    /// Gives freshly created or truncated files a writable extent.
    pub fn with_size(mut self, size: u64) -> Self {
        self.requested_size = Some(size);
        self
    }

    /// Path this resource opens
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open mode
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    fn open(&self) -> std::io::Result<(File, u64)> {
        let file = self.mode.options().open(&self.path)?;
        if let Some(size) = self.requested_size {
            file.set_len(size)?;
        }
        let len = file.metadata()?.len();
        Ok((file, len))
    }
}

impl Resource for FileResource {
    fn init(&mut self) -> Result<()> {
        if self.state == Lifecycle::Initialized {
            return Ok(());
        }

        match self.open() {
            Ok((file, len)) => {
                self.file = Some(file);
                self.len = len;
                self.state = Lifecycle::Initialized;
                tracing::debug!("Opened {} ({} bytes)", self.path.display(), len);
                Ok(())
            }
            Err(e) => {
                self.state = Lifecycle::Invalid;
                tracing::warn!("Failed to open {}: {}", self.path.display(), e);
                Err(SaltError::Acquisition(format!(
                    "cannot open {}: {}",
                    self.path.display(),
                    e
                )))
            }
        }
    }

    fn deinit(&mut self) {
        if self.state == Lifecycle::Initialized {
            // Dropping the handle closes the descriptor
            self.file = None;
            self.state = Lifecycle::Uninitialized;
            tracing::debug!("Closed {}", self.path.display());
        }
    }

    fn state(&self) -> Lifecycle {
        self.state
    }

    fn store(&mut self) -> Result<Box<dyn Store + '_>> {
        ensure_initialized(self.state, "file resource")?;
        let file = self
            .file
            .as_ref()
            .ok_or_else(|| SaltError::UsageOnInvalid("file handle missing".to_string()))?;
        Ok(Box::new(FileStore::new(file, 0, self.len)))
    }

    fn bounds(&self) -> usize {
        match self.state {
            Lifecycle::Initialized => self.len as usize,
            _ => self.requested_size.unwrap_or(0) as usize,
        }
    }
}
