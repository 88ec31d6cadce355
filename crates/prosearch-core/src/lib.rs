//! ProSearch Core Library
//!
//! This crate provides the core functionality for ProSearch, a minimal
//! personal document index. Documents (title, content, tags) are appended to
//! a flat CSV file and retrieved by gestalt string similarity rather than
//! exact keyword match.
//!
//! # Architecture
//!
//! - **Similarity**: Ratcliff/Obershelp ratio between two strings
//! - **Storage**: append-only record file with count-based id allocation
//! - **Ranker**: scores every field of every document against a query
//! - **Ingest**: validates new documents before they reach storage
//!
//! # Quick Start
//!
//! ```text
//! let store = Store::open()?;
//!
//! // Add a document
//! store.add_document("Recipe", "Bake bread for 40 minutes", vec!["cooking".into()])?;
//!
//! // Query documents
//! let results = store.search("bread")?;
//! ```
//!
//! # Modules
//!
//! - `store`: Unified storage interface (main entry point)
//! - `models`: Documents and query results
//! - `similarity`: Gestalt pattern matching
//! - `ranker`: Query ranking over stored documents
//! - `ingest`: Document validation and append
//! - `storage`: CSV persistence and id allocation
//! - `config`: Application configuration

pub mod config;
pub mod ingest;
pub mod models;
pub mod ranker;
pub mod similarity;
pub mod storage;
pub mod store;

pub use config::Config;
pub use ingest::IngestError;
pub use models::{Document, FieldScores, NewDocument, QueryResult};
pub use ranker::{GestaltRanker, Ranker, DEFAULT_THRESHOLD};
pub use similarity::similarity;
pub use storage::{CountAllocator, CsvStore, IdAllocation, IdAllocator, StorageError, StoreStats};
pub use store::Store;
