//! CSV record file persistence
//!
//! Documents live in a single append-only CSV file. The first record is a
//! fixed header; every following record is one document in insertion order.
//!
//! Storage location: `~/.local/share/prosearch/search_db.csv` (configurable
//! via `Config`)
//!
//! Tags are joined with `,` into a single field. A tag containing `,` would
//! split into two tags on the next read, so ingestion rejects such tags.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, info, warn};

use super::allocator::{CountAllocator, IdAllocation, IdAllocator};
use super::error::{StorageError, StorageResult};
use crate::models::{Document, NewDocument};

/// File name of the store inside the data directory
pub const STORE_FILE_NAME: &str = "search_db.csv";

/// Field order of every record
pub const HEADER: [&str; 5] = ["id", "title", "content", "tags", "date_added"];

/// Separator joining tags inside the tags field
pub const TAG_SEPARATOR: char = ',';

/// Size and contents summary of a store file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: u64,
    /// Number of documents, or `None` if the file could not be read
    pub documents: Option<usize>,
}

impl StoreStats {
    /// Human-readable file size
    pub fn size_human(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        match self.size_bytes {
            n if n >= MB => format!("{:.1} MB", n as f64 / MB as f64),
            n if n >= KB => format!("{:.1} KB", n as f64 / KB as f64),
            n => format!("{} B", n),
        }
    }
}

/// Append-only document store backed by a CSV file
pub struct CsvStore {
    path: PathBuf,
    allocator: Box<dyn IdAllocator>,
}

impl CsvStore {
    /// Create a store at `path` with count-based id allocation
    ///
    /// Nothing is touched on disk until `ensure_initialized` or `append`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_allocator(path, Box::new(CountAllocator))
    }

    /// Create a store with a custom id allocator
    pub fn with_allocator(path: impl Into<PathBuf>, allocator: Box<dyn IdAllocator>) -> Self {
        Self {
            path: path.into(),
            allocator,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the backing file with its header if absent or empty
    ///
    /// Calling this on an initialized store does nothing.
    pub fn ensure_initialized(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(StorageError::from_io(e, self.path.clone())),
        };
        if !needs_header {
            return Ok(());
        }

        let file = self.open_for_append()?;
        self.write_record(&file, HEADER)?;
        info!(path = ?self.path, "initialized document store");
        Ok(())
    }

    /// Append a document, assigning its id and timestamp
    ///
    /// The record is synced to disk before this returns.
    pub fn append(&self, new: NewDocument) -> StorageResult<Document> {
        self.ensure_initialized()?;

        let document = Document::from_new(self.next_id(), new);
        let tags = document.tags.join(&TAG_SEPARATOR.to_string());

        let file = self.open_for_append()?;
        self.write_record(
            &file,
            [
                document.id.as_str(),
                document.title.as_str(),
                document.content.as_str(),
                tags.as_str(),
                document.date_added.as_str(),
            ],
        )?;

        debug!(id = %document.id, path = ?self.path, "appended document");
        Ok(document)
    }

    /// Read every document in insertion order
    ///
    /// A record that does not have exactly five fields fails the whole read
    /// with `StorageError::Corrupt`; no record is skipped.
    pub fn read_all(&self) -> StorageResult<Vec<Document>> {
        let file = File::open(&self.path)
            .map_err(|e| StorageError::from_read_io(e, self.path.clone()))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| self.read_error(e, 0))?
            .clone();
        if headers.is_empty() {
            // Empty file: created but never initialized
            return Ok(Vec::new());
        }
        if !headers.iter().eq(HEADER) {
            return Err(self.corrupt(
                0,
                format!(
                    "unexpected header '{}'",
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            ));
        }

        let mut documents = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record_no = index as u64 + 1;
            let record = result.map_err(|e| self.read_error(e, record_no))?;
            let document =
                decode_record(&record).map_err(|details| self.corrupt(record_no, details))?;
            documents.push(document);
        }

        debug!(count = documents.len(), path = ?self.path, "read documents");
        Ok(documents)
    }

    /// Allocate the id the next append would receive, with its provenance
    pub fn allocate_id(&self) -> IdAllocation {
        let allocation = self.allocator.allocate(self);
        if let IdAllocation::Fallback { cause } = &allocation {
            warn!(path = ?self.path, error = %cause, "could not count records, falling back to first id");
        }
        allocation
    }

    /// The id the next append would receive
    ///
    /// Falls back to `"1"` when the store cannot be read.
    pub fn next_id(&self) -> String {
        self.allocate_id().id()
    }

    /// File size and document count
    pub fn stats(&self) -> StoreStats {
        let size_bytes = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        StoreStats {
            path: self.path.clone(),
            exists: self.exists(),
            size_bytes,
            documents: self.read_all().ok().map(|docs| docs.len()),
        }
    }

    fn open_for_append(&self) -> StorageResult<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::from_io(e, self.path.clone()))
    }

    fn write_record<I, T>(&self, file: &File, record: I) -> StorageResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .from_writer(file);

        writer
            .write_record(record)
            .map_err(|e| StorageError::from_csv(e, self.path.clone(), false))?;
        writer
            .flush()
            .map_err(|e| StorageError::from_io(e, self.path.clone()))?;
        drop(writer);

        file.sync_all()
            .map_err(|e| StorageError::from_io(e, self.path.clone()))
    }

    fn read_error(&self, error: csv::Error, record: u64) -> StorageError {
        if error.is_io_error() {
            StorageError::from_csv(error, self.path.clone(), true)
        } else {
            self.corrupt(record, error.to_string())
        }
    }

    fn corrupt(&self, record: u64, details: String) -> StorageError {
        warn!(path = ?self.path, record, %details, "corrupt record in store");
        StorageError::Corrupt {
            path: self.path.clone(),
            record,
            details,
        }
    }
}

/// Parse one data record into a document
fn decode_record(record: &StringRecord) -> Result<Document, String> {
    if record.len() != HEADER.len() {
        return Err(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            record.len()
        ));
    }

    let tags_field = &record[3];
    let tags = if tags_field.is_empty() {
        Vec::new()
    } else {
        tags_field.split(TAG_SEPARATOR).map(String::from).collect()
    };

    Ok(Document {
        id: record[0].to_string(),
        title: record[1].to_string(),
        content: record[2].to_string(),
        tags,
        date_added: record[4].to_string(),
    })
}
