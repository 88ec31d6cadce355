//! Document id allocation
//!
//! Ids are decimal strings. The default `CountAllocator` derives the next id
//! from the number of stored records, so ids are only unique while there is
//! a single writer and no record is ever removed from the file. The trait
//! lets a durable counter replace it without changing `CsvStore`.

use super::error::StorageError;
use super::persistence::CsvStore;

/// Id handed out when the record count cannot be determined
pub const FIRST_ID: &str = "1";

/// Strategy for choosing the id of the next appended document
pub trait IdAllocator: Send + Sync {
    fn allocate(&self, store: &CsvStore) -> IdAllocation;
}

/// Outcome of an id allocation
#[derive(Debug)]
pub enum IdAllocation {
    /// Counted `records` existing documents
    Counted { records: usize },
    /// The store could not be read; the first id is used instead
    Fallback { cause: StorageError },
}

impl IdAllocation {
    /// The allocated id
    pub fn id(&self) -> String {
        match self {
            IdAllocation::Counted { records } => (records + 1).to_string(),
            IdAllocation::Fallback { .. } => FIRST_ID.to_string(),
        }
    }

    /// Check if the id came from the fallback path
    pub fn is_fallback(&self) -> bool {
        matches!(self, IdAllocation::Fallback { .. })
    }
}

/// Next id is `record count + 1`
#[derive(Debug, Clone, Copy, Default)]
pub struct CountAllocator;

impl IdAllocator for CountAllocator {
    fn allocate(&self, store: &CsvStore) -> IdAllocation {
        match store.read_all() {
            Ok(documents) => IdAllocation::Counted {
                records: documents.len(),
            },
            Err(cause) => IdAllocation::Fallback { cause },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewDocument;
    use crate::storage::persistence::STORE_FILE_NAME;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[test]
    fn test_uninitialized_store_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvStore::new(temp_dir.path().join(STORE_FILE_NAME));

        let allocation = store.allocate_id();
        assert!(allocation.is_fallback());
        assert!(matches!(
            allocation,
            IdAllocation::Fallback {
                cause: StorageError::NotFound { .. }
            }
        ));
        assert_eq!(store.next_id(), "1");
    }

    #[test]
    fn test_initialized_empty_store_counts_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvStore::new(temp_dir.path().join(STORE_FILE_NAME));
        store.ensure_initialized().unwrap();

        let allocation = store.allocate_id();
        assert!(matches!(allocation, IdAllocation::Counted { records: 0 }));
        assert_eq!(allocation.id(), "1");
    }

    #[test]
    fn test_count_after_three_appends() {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvStore::new(temp_dir.path().join(STORE_FILE_NAME));

        for i in 0..3 {
            store
                .append(NewDocument::new(format!("Doc {}", i), "body"))
                .unwrap();
        }

        assert!(matches!(
            store.allocate_id(),
            IdAllocation::Counted { records: 3 }
        ));
        assert_eq!(store.next_id(), "4");
    }

    #[test]
    fn test_corrupt_store_falls_back_with_cause() {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvStore::new(temp_dir.path().join(STORE_FILE_NAME));
        fs::write(
            store.path(),
            "id,title,content,tags,date_added\r\n1,a,b,,x\r\n2,only-two\r\n",
        )
        .unwrap();

        let allocation = store.allocate_id();
        match &allocation {
            IdAllocation::Fallback { cause } => assert!(cause.is_corrupt()),
            other => panic!("expected fallback, got {:?}", other),
        }
        assert_eq!(allocation.id(), "1");
    }

    struct SequenceAllocator {
        next: AtomicUsize,
    }

    impl IdAllocator for SequenceAllocator {
        fn allocate(&self, _store: &CsvStore) -> IdAllocation {
            let records = self.next.fetch_add(10, Ordering::SeqCst);
            IdAllocation::Counted { records }
        }
    }

    #[test]
    fn test_custom_allocator() {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvStore::with_allocator(
            temp_dir.path().join(STORE_FILE_NAME),
            Box::new(SequenceAllocator {
                next: AtomicUsize::new(99),
            }),
        );

        let first = store.append(NewDocument::new("a", "b")).unwrap();
        let second = store.append(NewDocument::new("c", "d")).unwrap();
        assert_eq!(first.id, "100");
        assert_eq!(second.id, "110");
    }
}
