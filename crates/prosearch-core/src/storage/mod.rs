//! Storage layer
//!
//! Handles the append-only CSV record file and id allocation.
//!
//! ## Architecture
//!
//! - **CsvStore**: the record file, source of truth for all documents
//! - **IdAllocator**: chooses the id of each appended document
//!
//! There is no index; every query reads the whole file.

pub mod allocator;
pub mod error;
pub mod persistence;

pub use allocator::{CountAllocator, IdAllocation, IdAllocator, FIRST_ID};
pub use error::{StorageError, StorageResult};
pub use persistence::{CsvStore, StoreStats, HEADER, STORE_FILE_NAME, TAG_SEPARATOR};
