//! Tests for MemoryStore
//!
//! These tests verify:
//! - Write/read round trips within bounds
//! - Clamping at and past the end of the region
//! - Zero-copy split into disjoint halves
//! - Raw accessors

use saltio::store::{MemoryStore, NullStore, Store};
use saltio::SaltError;

// =============================================================================
// Read/Write Tests
// =============================================================================

#[test]
fn test_write_then_read_round_trip() {
    let mut bytes = [0u8; 16];
    let mut store = MemoryStore::new(&mut bytes);

    assert_eq!(store.write(b"hello", 3).unwrap(), 5);

    let mut buf = [0u8; 5];
    assert_eq!(store.read(&mut buf, 3).unwrap(), 5);
    assert_eq!(&buf, b"hello");
}

#[test]
fn test_size_is_region_length() {
    let mut bytes = [0u8; 42];
    let store = MemoryStore::new(&mut bytes);
    assert_eq!(store.size(), 42);
    assert!(store.valid());
}

#[test]
fn test_read_crossing_end_is_partial() {
    let mut bytes = *b"abcdef";
    let mut store = MemoryStore::new(&mut bytes);

    let mut buf = [0u8; 4];
    assert_eq!(store.read(&mut buf, 4).unwrap(), 2);
    assert_eq!(&buf[..2], b"ef");
}

#[test]
fn test_write_crossing_end_is_partial() {
    let mut bytes = [0u8; 4];
    let mut store = MemoryStore::new(&mut bytes);

    assert_eq!(store.write(b"xyz", 2).unwrap(), 2);
    assert_eq!(store.raw(), b"\0\0xy");
}

#[test]
fn test_out_of_bounds_offset_transfers_nothing() {
    let mut bytes = [7u8; 4];
    let mut store = MemoryStore::new(&mut bytes);
    let mut buf = [0u8; 2];

    assert_eq!(store.read(&mut buf, 4).unwrap(), 0);
    assert_eq!(store.read(&mut buf, 100).unwrap(), 0);
    assert_eq!(store.write(b"zz", 100).unwrap(), 0);
    assert_eq!(buf, [0, 0]);
    assert_eq!(store.raw(), &[7, 7, 7, 7]);
}

// =============================================================================
// Split Tests
// =============================================================================

#[test]
fn test_split_sizes_sum_to_original() {
    let mut bytes = [0u8; 10];
    let mut store = MemoryStore::new(&mut bytes);

    let (left, right) = store.split(3).unwrap();
    assert_eq!(left.size(), 3);
    assert_eq!(right.size(), 7);
}

#[test]
fn test_split_halves_are_disjoint() {
    let mut bytes = [0u8; 8];
    {
        let mut store = MemoryStore::new(&mut bytes);
        let (mut left, mut right) = store.split(4).unwrap();

        // Writes past the left half's end must not leak into the right half
        assert_eq!(left.write(b"LLLLLL", 0).unwrap(), 4);
        assert_eq!(right.write(b"RR", 0).unwrap(), 2);
    }
    assert_eq!(&bytes, b"LLLLRR\0\0");
}

#[test]
fn test_split_past_end_is_clamped() {
    let mut bytes = [0u8; 5];
    let mut store = MemoryStore::new(&mut bytes);

    let (left, right) = store.split(99).unwrap();
    assert_eq!(left.size(), 5);
    assert_eq!(right.size(), 0);
}

#[test]
fn test_nested_split() {
    let mut bytes = *b"0123456789";
    let mut store = MemoryStore::new(&mut bytes);

    let (_, mut right) = store.split(2).unwrap();
    let (mut middle, _) = right.split(3).unwrap();

    let mut buf = [0u8; 8];
    assert_eq!(middle.read(&mut buf, 0).unwrap(), 3);
    assert_eq!(&buf[..3], b"234");
}

// =============================================================================
// Raw Access Tests
// =============================================================================

#[test]
fn test_raw_accessors() {
    let mut bytes = [1u8, 2, 3];
    let mut store = MemoryStore::new(&mut bytes);

    store.raw_mut()[0] = 9;
    assert_eq!(store.raw(), &[9, 2, 3]);

    let raw = store.into_raw();
    raw[2] = 8;
    assert_eq!(bytes, [9, 2, 8]);
}

// =============================================================================
// Null Store Tests
// =============================================================================

#[test]
fn test_null_store_rejects_usage() {
    let mut store = NullStore;
    let mut buf = [0u8; 1];

    assert!(!store.valid());
    assert_eq!(store.size(), 0);
    assert!(matches!(store.read(&mut buf, 0), Err(SaltError::UsageOnInvalid(_))));
    assert!(matches!(store.write(b"x", 0), Err(SaltError::UsageOnInvalid(_))));
}
