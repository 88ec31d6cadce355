//! Data models for ProSearch
//!
//! Defines the stored `Document`, the `NewDocument` accepted by ingestion,
//! and the transient `QueryResult` returned by a search.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Number of content characters shown in a result preview
pub const PREVIEW_CHARS: usize = 100;

/// Marker appended to every preview
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Format used for `date_added` when a document is created
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A stored document
///
/// Documents are immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Decimal identifier assigned at append time
    pub id: String,
    /// Document title
    pub title: String,
    /// Document body
    pub content: String,
    /// Labels in the order given; duplicates are kept
    pub tags: Vec<String>,
    /// Creation time, stored verbatim and never re-parsed
    pub date_added: String,
}

impl Document {
    /// Populate a document from ingestion input, stamping the current time
    pub fn from_new(id: impl Into<String>, new: NewDocument) -> Self {
        Self {
            id: id.into(),
            title: new.title,
            content: new.content,
            tags: new.tags,
            date_added: Local::now().format(DATE_FORMAT).to_string(),
        }
    }

    /// First `PREVIEW_CHARS` characters of the content plus the ellipsis
    ///
    /// The ellipsis is appended even when nothing was cut off.
    pub fn preview(&self) -> String {
        let mut preview: String = self.content.chars().take(PREVIEW_CHARS).collect();
        preview.push_str(PREVIEW_ELLIPSIS);
        preview
    }
}

/// A document as submitted, before id and date are assigned
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewDocument {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    /// Append a tag (duplicates are kept)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set all tags (replacing existing)
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Similarity of a query against each field of one document
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldScores {
    pub title: f64,
    pub content: f64,
    /// Best score over all tags; `0.0` when there are none
    pub tags: f64,
}

impl FieldScores {
    /// The document's relevance: its best field score
    pub fn relevance(&self) -> f64 {
        self.title.max(self.content).max(self.tags)
    }
}

/// One ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub id: String,
    pub title: String,
    pub preview: String,
    /// Relevance in `[0.0, 1.0]`
    pub relevance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with_content(content: &str) -> Document {
        Document::from_new("1", NewDocument::new("Title", content))
    }

    #[test]
    fn test_from_new() {
        let new = NewDocument::new("Recipe", "Bake bread").with_tags(["cooking", "bread"]);
        let doc = Document::from_new("7", new);
        assert_eq!(doc.id, "7");
        assert_eq!(doc.title, "Recipe");
        assert_eq!(doc.content, "Bake bread");
        assert_eq!(doc.tags, vec!["cooking", "bread"]);
        assert!(!doc.date_added.is_empty());
    }

    #[test]
    fn test_tags_keep_duplicates_and_order() {
        let new = NewDocument::new("t", "c")
            .with_tag("b")
            .with_tag("a")
            .with_tag("b");
        assert_eq!(new.tags, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let content = "x".repeat(100) + &"y".repeat(50);
        let preview = document_with_content(&content).preview();
        assert_eq!(preview, format!("{}...", "x".repeat(100)));
        assert_eq!(preview.chars().count(), 103);
    }

    #[test]
    fn test_preview_short_content_still_gets_ellipsis() {
        let preview = document_with_content("0123456789").preview();
        assert_eq!(preview, "0123456789...");
    }

    #[test]
    fn test_preview_counts_characters() {
        let content = "é".repeat(120);
        let preview = document_with_content(&content).preview();
        assert_eq!(preview.chars().count(), 103);
    }

    #[test]
    fn test_relevance_is_best_field() {
        let scores = FieldScores {
            title: 0.2,
            content: 0.7,
            tags: 0.0,
        };
        assert_eq!(scores.relevance(), 0.7);
    }

    #[test]
    fn test_document_serialization() {
        let doc = Document::from_new("1", NewDocument::new("Note", "Body").with_tag("test"));
        let json = serde_json::to_string(&doc).unwrap();
        let deserialized: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, deserialized);
    }
}
