//! Unified storage interface
//!
//! The `Store` ties the record file, ingestion and ranking together behind
//! the two operations callers need: add a document, and search.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::open()?;  // Creates the store file if missing
//!
//! store.add_document("Recipe", "Bake bread for 40 minutes", vec!["bread".into()])?;
//!
//! for hit in store.search("bread")? {
//!     println!("{} ({:.2})", hit.title, hit.relevance);
//! }
//! ```

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::ingest;
use crate::models::{Document, NewDocument, QueryResult};
use crate::ranker::{GestaltRanker, Ranker};
use crate::storage::{CsvStore, IdAllocation, StoreStats};

/// Unified storage interface for ProSearch
pub struct Store {
    /// The record file
    records: CsvStore,
    /// Ranking strategy
    ranker: Box<dyn Ranker>,
    /// Configuration
    config: Config,
}

impl Store {
    /// Open the store, creating the record file if none exists
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        Self::open_with_ranker(config, Box::new(GestaltRanker))
    }

    /// Open the store with a custom ranking strategy
    pub fn open_with_ranker(config: Config, ranker: Box<dyn Ranker>) -> Result<Self> {
        let records = CsvStore::new(config.store_path());
        records
            .ensure_initialized()
            .context("Failed to initialize document store")?;

        Ok(Self {
            records,
            ranker,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the underlying record file
    pub fn records(&self) -> &CsvStore {
        &self.records
    }

    // ==================== Documents ====================

    /// Add a new document
    ///
    /// Returns the stored document with its id and date assigned.
    pub fn add_document(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Result<Document> {
        let new = NewDocument::new(title, content).with_tags(tags);
        ingest::ingest(&self.records, new).context("Failed to add document")
    }

    /// Get all documents in insertion order
    pub fn get_all_documents(&self) -> Result<Vec<Document>> {
        self.records
            .read_all()
            .context("Failed to read documents")
    }

    /// Get a document by id
    pub fn get_document(&self, id: &str) -> Result<Option<Document>> {
        Ok(self
            .get_all_documents()?
            .into_iter()
            .find(|doc| doc.id == id))
    }

    /// Get count of documents
    pub fn document_count(&self) -> Result<usize> {
        Ok(self.get_all_documents()?.len())
    }

    /// The id the next document will receive
    pub fn next_id(&self) -> String {
        self.records.next_id()
    }

    /// The next id along with how it was obtained
    pub fn allocate_id(&self) -> IdAllocation {
        self.records.allocate_id()
    }

    // ==================== Search ====================

    /// Search using the configured default threshold
    pub fn search(&self, query: &str) -> Result<Vec<QueryResult>> {
        self.search_with_threshold(query, self.config.default_threshold)
    }

    /// Search, keeping results with relevance at or above `threshold`
    ///
    /// An empty result means nothing matched; storage problems are errors.
    pub fn search_with_threshold(&self, query: &str, threshold: f64) -> Result<Vec<QueryResult>> {
        let documents = self
            .records
            .read_all()
            .context("Failed to search documents")?;
        let results = self.ranker.rank(query, &documents, threshold);
        debug!(
            query,
            threshold,
            scanned = documents.len(),
            matched = results.len(),
            "search complete"
        );
        Ok(results)
    }

    // ==================== Stats ====================

    /// Size and document count of the store file
    pub fn stats(&self) -> StoreStats {
        self.records.stats()
    }
}
