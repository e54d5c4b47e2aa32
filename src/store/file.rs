//! File Store
//!
//! Positioned reads and writes against a window of an open file.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use crate::error::Result;

use super::{clamp, SplitPair, Store};

/// View of the byte range `begin..end` of an open file
///
/// Store offsets are translated into file offsets by adding `begin`. Every
/// view shares the same handle, so each call seeks before transferring.
#[derive(Debug, Clone, Copy)]
pub struct FileStore<'f> {
    /// Shared handle owned by the file resource
    file: &'f File,
    /// First file offset covered by this view
    begin: u64,
    /// One past the last file offset covered by this view
    end: u64,
}

impl<'f> FileStore<'f> {
    /// Create a view over `begin..end` of `file`
    pub fn new(file: &'f File, begin: u64, end: u64) -> Self {
        Self {
            file,
            begin,
            end: end.max(begin),
        }
    }

    /// File offset where this view starts
    pub fn begin(&self) -> u64 {
        self.begin
    }

    /// Flush written bytes to disk
    pub fn sync(&self) -> Result<()> {
        self.file.sync_data()?;
        Ok(())
    }

    fn position(&self, offset: usize) -> SeekFrom {
        SeekFrom::Start(self.begin + offset as u64)
    }
}

impl Store for FileStore<'_> {
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let amount = clamp(offset, buffer.len(), self.size());
        if amount == 0 {
            return Ok(0);
        }

        let mut file = self.file;
        file.seek(self.position(offset))?;

        // Keep reading until the window is filled or the file runs out
        let mut done = 0;
        while done < amount {
            match file.read(&mut buffer[done..amount]) {
                Ok(0) => break,
                Ok(n) => done += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(done)
    }

    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize> {
        let amount = clamp(offset, buffer.len(), self.size());
        if amount == 0 {
            return Ok(0);
        }

        let mut file = self.file;
        file.seek(self.position(offset))?;

        let mut done = 0;
        while done < amount {
            match file.write(&buffer[done..amount]) {
                Ok(0) => break,
                Ok(n) => done += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(done)
    }

    fn size(&self) -> usize {
        (self.end - self.begin) as usize
    }

    fn split(&mut self, at: usize) -> Result<SplitPair<'_>> {
        let middle = self.begin + at.min(self.size()) as u64;
        Ok((
            Box::new(FileStore::new(self.file, self.begin, middle)),
            Box::new(FileStore::new(self.file, middle, self.end)),
        ))
    }
}
