//! # saltio
//!
//! Composable resources and byte stores:
//! - Resources with an acquire/release lifecycle (heap, lazy heap, file)
//! - Stores exposing bounded, byte-addressable reads and writes
//! - Fallback and list composites of both
//! - An object-indexed array view over any store
//! - Transfer between any two stores through a bounded buffer
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Resources                              │
//! │   Heap · LazyHeap · File · Fallback · First · List · Noop    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ init() / store() / deinit()
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Stores                                │
//! │  Memory · Heap · File · Fallback · List · Logged · Null      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ read / write / size / split
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Store A    │◀─────────│  Store B    │
//!   └─────────────┘ transfer └─────────────┘
//! ```
//!
//! Everything is single-threaded and synchronous: each call runs to
//! completion on the calling thread.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod resource;
pub mod transfer;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SaltError, Result};
pub use config::Config;
pub use resource::{acquire, Lifecycle, Resource};
pub use store::{DynamicStore, Store};
pub use transfer::{transfer, transfer_with, Progress};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of saltio
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
