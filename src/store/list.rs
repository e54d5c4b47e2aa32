//! List Store
//!
//! Logical concatenation of an ordered sequence of member stores.
//!
//! ## Addressing
//! ```text
//!   member:   ┌── 0 ──┬────── 1 ──────┬─ 2 ─┐
//!   global:   0       4               12    14
//!   read(3 bytes @ 3) → member 0, local 3, clamped to 1 byte
//! ```
//!
//! A single read or write never crosses a member boundary. Callers continue
//! at the returned offset (as `transfer` does) to move past it.

use crate::error::Result;

use super::{SplitPair, Store};

/// Ordered, concatenated list of stores
pub struct ListStore<'a> {
    members: Vec<Box<dyn Store + 'a>>,
}

impl<'a> ListStore<'a> {
    /// Create a list from members in addressing order
    pub fn new(members: Vec<Box<dyn Store + 'a>>) -> Self {
        Self { members }
    }

    /// Append a member at the end of the address space
    pub fn push(&mut self, member: Box<dyn Store + 'a>) {
        self.members.push(member);
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
    pub fn get(&self, index: usize) -> Option<&(dyn Store + 'a)> {
        self.members.get(index).map(|member| &**member)
    }

    /// Get the member at `index` mutably
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Store + 'a)> {
        match self.members.get_mut(index) {
            Some(member) => Some(&mut **member),
            None => None,
        }
    }

    /// Resolve a global offset to (member index, local offset, member size)
    ///
    /// Cumulative-sum lookup; empty members never cover an offset.
    fn locate(&self, offset: usize) -> Option<(usize, usize, usize)> {
        let mut start = 0;
        for (index, member) in self.members.iter().enumerate() {
            let len = member.size();
            if offset < start + len {
                return Some((index, offset - start, len));
            }
            start += len;
        }
        None
    }
}

impl Store for ListStore<'_> {
    fn read(&mut self, buffer: &mut [u8], offset: usize) -> Result<usize> {
        let Some((index, local, len)) = self.locate(offset) else {
            return Ok(0);
        };
        let amount = buffer.len().min(len - local);
        self.members[index].read(&mut buffer[..amount], local)
    }

    fn write(&mut self, buffer: &[u8], offset: usize) -> Result<usize> {
        let Some((index, local, len)) = self.locate(offset) else {
            return Ok(0);
        };
        let amount = buffer.len().min(len - local);
        self.members[index].write(&buffer[..amount], local)
    }

    fn size(&self) -> usize {
        self.members.iter().map(|member| member.size()).sum()
    }

    fn split(&mut self, at: usize) -> Result<SplitPair<'_>> {
        let mut left: Vec<Box<dyn Store + '_>> = Vec::new();
        let mut right: Vec<Box<dyn Store + '_>> = Vec::new();

        let mut start = 0;
        for member in self.members.iter_mut() {
            let len = member.size();
            let end = start + len;

            if end <= at {
                left.push(Box::new(&mut **member));
            } else if start >= at {
                right.push(Box::new(&mut **member));
            } else {
                // The member straddling `at` is divided between both halves
                let (head, tail) = member.split(at - start)?;
                left.push(head);
                right.push(tail);
            }

            start = end;
        }

        Ok((Box::new(ListStore::new(left)), Box::new(ListStore::new(right))))
    }

    fn valid(&self) -> bool {
        self.members.iter().all(|member| member.valid())
    }
}
