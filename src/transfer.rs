//! Transfer
//!
//! Streaming byte copy between any two stores through a bounded bounce
//! buffer.
//!
//! ## Loop
//! ```text
//!   ┌──────────┐  read(chunk @ done)  ┌────────┐  write(n @ done)  ┌─────────────┐
//!   │  source  │ ───────────────────▶ │ buffer │ ────────────────▶ │ destination │
//!   └──────────┘                      └────────┘                   └─────────────┘
//!   repeat until `total` bytes moved, or either side moves zero bytes
//! ```
//!
//! Both stores are addressed from offset 0: byte `i` of the source lands at
//! byte `i` of the destination. Short reads and writes (e.g. at a list
//! member boundary) simply continue at the next offset.

use bytes::BytesMut;

use crate::config::Config;
use crate::error::Result;
use crate::store::Store;

/// Progress of a (possibly resumed) transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    total: usize,
    completed: usize,
}

impl Progress {
    /// Start tracking a transfer of `total` bytes
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
        }
    }

    /// Bytes requested overall
    pub fn total(&self) -> usize {
        self.total
    }

    /// Bytes moved so far
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Bytes left to move
    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }

    /// Check if every requested byte was moved
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// Copy up to `length` bytes from `source` into `destination`
///
/// Returns the number of bytes actually transferred, which is smaller than
/// `length` when either store is shorter.
pub fn transfer(destination: &mut dyn Store, source: &mut dyn Store, length: usize) -> Result<usize> {
    let mut progress = Progress::new(length);
    transfer_with(&mut progress, destination, source, &Config::default())
}

/// Continue a transfer from `progress.completed()`
///
/// Stops when the transfer completes, when the source returns no bytes, or
/// when the destination accepts no bytes at all. Short reads and writes are
/// re-issued at the next offset. Returns the total completed so far; calling
/// again after the stores have grown resumes where the previous call stopped.
pub fn transfer_with(
    progress: &mut Progress,
    destination: &mut dyn Store,
    source: &mut dyn Store,
    config: &Config,
) -> Result<usize> {
    let capacity = config.effective_buffer_size().min(progress.remaining().max(1));
    let mut buffer = BytesMut::zeroed(capacity);

    while !progress.is_complete() {
        let chunk = progress.remaining().min(buffer.len());
        let offset = progress.completed;

        let read = source.read(&mut buffer[..chunk], offset)?;
        if read == 0 {
            tracing::trace!("Transfer source exhausted at offset {}", offset);
            break;
        }

        // The destination may accept the chunk in pieces (e.g. one list
        // member at a time); only a zero-byte write means it is full.
        let mut written = 0;
        while written < read {
            match destination.write(&buffer[written..read], offset + written) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) => {
                    progress.completed += written;
                    return Err(e);
                }
            }
        }
        progress.completed += written;

        if written < read {
            tracing::trace!(
                "Transfer destination full at offset {} ({} of {} bytes written)",
                offset + written,
                written,
                read
            );
            break;
        }
    }

    Ok(progress.completed)
}
