//! Document command handlers

use anyhow::{anyhow, Context, Result};

use prosearch_core::Store;

use crate::editor::{edit_text, strip_comment_lines};
use crate::output::Output;

/// Add a new document
///
/// Opens the editor for the content when none was given.
pub fn add(
    store: &Store,
    title: String,
    content: Option<String>,
    tags: Vec<String>,
    output: &Output,
) -> Result<()> {
    let content = match content {
        Some(c) => c,
        None => {
            let initial = format!("<!-- Content for: {} -->\n\n", title);
            let edited = edit_text(&initial).context("Failed to edit content")?;
            strip_comment_lines(&edited)
        }
    };

    let doc = store.add_document(title, content, tags)?;

    output.success(&format!("Document '{}' added with id {}", doc.title, doc.id));
    if output.is_quiet() {
        println!("{}", doc.id);
    }
    Ok(())
}

/// Search documents
pub fn search(store: &Store, query: String, threshold: Option<f64>, output: &Output) -> Result<()> {
    let threshold = threshold.unwrap_or(store.config().default_threshold);
    let results = store.search_with_threshold(&query, threshold)?;
    output.print_results(&results);
    Ok(())
}

/// List all documents in the order they were added
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let docs = store.get_all_documents()?;
    output.print_documents(&docs);
    Ok(())
}

/// Show a single document
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let doc = store
        .get_document(&id)?
        .ok_or_else(|| anyhow!("Document not found: {}", id))?;

    output.print_document(&doc);
    Ok(())
}
