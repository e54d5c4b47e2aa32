//! Tests for FileResource and FileStore
//!
//! These tests verify:
//! - Each open mode (read, read-write, create, truncate)
//! - Sizing a file on open with `with_size`
//! - Failure to open is reported and leaves the resource invalid
//! - Positioned reads and writes, clamped to the file length
//! - Split views over the same handle
//! - A file secondary catching writes for a missing memory primary

use std::path::PathBuf;

use saltio::resource::{acquire, FileMode, FileResource, Lifecycle, Resource};
use saltio::store::{FallbackStore, MemoryStore, Store};
use saltio::SaltError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// Open Mode Tests
// =============================================================================

#[test]
fn test_read_mode_exposes_file_contents() {
    let dir = setup_temp_dir();
    let path = write_file(&dir, "data.bin", b"hello file");

    let mut file = FileResource::create(&path, FileMode::Read);
    assert_eq!(file.path(), path.as_path());
    assert_eq!(file.mode(), FileMode::Read);

    file.init().unwrap();
    assert!(file.valid());
    assert_eq!(file.bounds(), 10);

    let mut store = file.store().unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(store.read(&mut buf, 6).unwrap(), 4);
    assert_eq!(&buf, b"file");
}

#[test]
fn test_read_mode_rejects_writes() {
    let dir = setup_temp_dir();
    let path = write_file(&dir, "ro.bin", b"locked");

    let mut file = FileResource::create(&path, FileMode::Read);
    file.init().unwrap();

    let result = file.store().unwrap().write(b"x", 0);
    assert!(matches!(result, Err(SaltError::Io(_))));
    assert_eq!(std::fs::read(&path).unwrap(), b"locked");
}

#[test]
fn test_missing_file_is_invalid() {
    let dir = setup_temp_dir();
    let mut file = FileResource::create(dir.path().join("absent.bin"), FileMode::Read);

    let err = file.init().unwrap_err();
    assert!(err.is_acquisition());
    assert_eq!(file.state(), Lifecycle::Invalid);
    assert!(!file.valid());
    assert!(matches!(file.store(), Err(SaltError::UsageOnInvalid(_))));
}

#[test]
fn test_read_write_mode_requires_existing_file() {
    let dir = setup_temp_dir();
    let mut file = FileResource::create(dir.path().join("absent.bin"), FileMode::ReadWrite);

    assert!(file.init().is_err());
    assert!(!dir.path().join("absent.bin").exists());
}

#[test]
fn test_read_write_mode_updates_in_place() {
    let dir = setup_temp_dir();
    let path = write_file(&dir, "rw.bin", b"abcdef");

    let mut file = FileResource::create(&path, FileMode::ReadWrite);
    file.init().unwrap();
    assert_eq!(file.store().unwrap().write(b"XY", 2).unwrap(), 2);
    file.deinit();

    assert_eq!(std::fs::read(&path).unwrap(), b"abXYef");
}

#[test]
fn test_create_mode_keeps_existing_contents() {
    let dir = setup_temp_dir();
    let path = write_file(&dir, "keep.bin", b"kept");

    let mut file = FileResource::create(&path, FileMode::Create);
    file.init().unwrap();

    assert_eq!(file.bounds(), 4);
}

#[test]
fn test_create_mode_makes_missing_file() {
    let dir = setup_temp_dir();
    let path = dir.path().join("new.bin");

    let mut file = FileResource::create(&path, FileMode::Create);
    file.init().unwrap();

    assert!(path.exists());
    assert_eq!(file.bounds(), 0);
}

#[test]
fn test_truncate_mode_empties_file() {
    let dir = setup_temp_dir();
    let path = write_file(&dir, "trunc.bin", b"old contents");

    let mut file = FileResource::create(&path, FileMode::Truncate);
    file.init().unwrap();

    assert_eq!(file.bounds(), 0);
    assert_eq!(file.store().unwrap().size(), 0);
}

// =============================================================================
// Sizing Tests
// =============================================================================

#[test]
fn test_with_size_extends_new_file() {
    let dir = setup_temp_dir();
    let path = dir.path().join("sized.bin");

    let mut file = FileResource::create(&path, FileMode::Truncate).with_size(16);
    assert_eq!(file.bounds(), 16);

    file.init().unwrap();
    assert_eq!(file.bounds(), 16);
    assert_eq!(file.store().unwrap().write(b"end", 13).unwrap(), 3);
    file.deinit();

    let contents = std::fs::read(&path).unwrap();
    assert_eq!(contents.len(), 16);
    assert_eq!(&contents[13..], b"end");
}

#[test]
fn test_writes_clamped_to_file_length() {
    let dir = setup_temp_dir();
    let path = dir.path().join("short.bin");

    let mut file = FileResource::create(&path, FileMode::Create).with_size(4);
    file.init().unwrap();

    let mut store = file.store().unwrap();
    assert_eq!(store.write(b"abcdef", 2).unwrap(), 2);
    assert_eq!(store.write(b"z", 4).unwrap(), 0);
    drop(store);
    file.deinit();

    assert_eq!(std::fs::read(&path).unwrap(), b"\0\0ab");
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_deinit_closes_and_allows_reopen() {
    let dir = setup_temp_dir();
    let path = write_file(&dir, "again.bin", b"0123");

    let mut file = FileResource::create(&path, FileMode::ReadWrite);
    file.init().unwrap();
    file.deinit();
    assert_eq!(file.state(), Lifecycle::Uninitialized);
    assert!(file.store().is_err());

    file.init().unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(file.store().unwrap().read(&mut buf, 0).unwrap(), 4);
    assert_eq!(&buf, b"0123");
}

#[test]
fn test_acquire_closes_file_on_scope_exit() {
    let dir = setup_temp_dir();
    let path = write_file(&dir, "scoped.bin", b"....");

    let mut file = FileResource::create(&path, FileMode::ReadWrite);
    {
        let mut guard = acquire(&mut file).unwrap();
        guard.store().unwrap().write(b"ok", 1).unwrap();
    }

    assert_eq!(file.state(), Lifecycle::Uninitialized);
    assert_eq!(std::fs::read(&path).unwrap(), b".ok.");
}

// =============================================================================
// File Store Tests
// =============================================================================

#[test]
fn test_split_views_address_their_own_window() {
    let dir = setup_temp_dir();
    let path = write_file(&dir, "split.bin", b"leftright");

    let mut file = FileResource::create(&path, FileMode::ReadWrite);
    file.init().unwrap();

    let mut store = file.store().unwrap();
    let (mut left, mut right) = store.split(4).unwrap();
    assert_eq!(left.size(), 4);
    assert_eq!(right.size(), 5);

    let mut buf = [0u8; 5];
    assert_eq!(right.read(&mut buf, 0).unwrap(), 5);
    assert_eq!(&buf, b"right");

    assert_eq!(left.write(b"LE", 0).unwrap(), 2);
    assert_eq!(left.read(&mut buf, 2).unwrap(), 2);
    assert_eq!(&buf[..2], b"ft");

    // Left view never spills into the right window
    assert_eq!(left.write(b"xyz", 3).unwrap(), 1);
}

#[test]
fn test_split_past_end_is_clamped() {
    let dir = setup_temp_dir();
    let path = write_file(&dir, "clamp.bin", b"abc");

    let mut file = FileResource::create(&path, FileMode::Read);
    file.init().unwrap();

    let mut store = file.store().unwrap();
    let (left, right) = store.split(100).unwrap();
    assert_eq!(left.size(), 3);
    assert_eq!(right.size(), 0);
}

#[test]
fn test_file_secondary_flushes_into_memory_primary() {
    let dir = setup_temp_dir();
    let path = dir.path().join("spill.bin");

    let mut file = FileResource::create(&path, FileMode::Truncate).with_size(8);
    file.init().unwrap();

    let mut primary = [0u8; 8];
    {
        let mut spill = file.store().unwrap();
        let mut store = FallbackStore::new(None, &mut spill);

        assert_eq!(store.write(b"spill", 1).unwrap(), 5);
        *store.primary_mut() = Some(MemoryStore::new(&mut primary));
        assert_eq!(store.flush().unwrap(), 5);
    }

    assert_eq!(&primary[1..6], b"spill");
    file.deinit();
    assert_eq!(&std::fs::read(&path).unwrap()[1..6], b"spill");
}
