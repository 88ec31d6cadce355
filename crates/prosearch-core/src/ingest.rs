//! Document ingestion
//!
//! Validates a submitted document and appends it to the store. Empty titles
//! and empty content are accepted; the only rejected input is a tag that
//! would not survive the record format.

use thiserror::Error;
use tracing::info;

use crate::models::{Document, NewDocument};
use crate::storage::{CsvStore, StorageError, TAG_SEPARATOR};

/// Errors that can occur while ingesting a document
#[derive(Error, Debug)]
pub enum IngestError {
    /// A tag contains the separator used to join tags on disk
    #[error("Tag '{tag}' contains '{separator}', which separates tags in the store")]
    TagContainsSeparator { tag: String, separator: char },

    /// The store rejected the append
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Check a document before it is written
pub fn validate(new: &NewDocument) -> Result<(), IngestError> {
    if let Some(tag) = new.tags.iter().find(|tag| tag.contains(TAG_SEPARATOR)) {
        return Err(IngestError::TagContainsSeparator {
            tag: tag.clone(),
            separator: TAG_SEPARATOR,
        });
    }
    Ok(())
}

/// Validate and append a document, returning it with id and date assigned
pub fn ingest(store: &CsvStore, new: NewDocument) -> Result<Document, IngestError> {
    validate(&new)?;
    let document = store.append(new)?;
    info!(id = %document.id, title = %document.title, "document added");
    Ok(document)
}
