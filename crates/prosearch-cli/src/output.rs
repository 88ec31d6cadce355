//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use prosearch_core::{Document, QueryResult};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single document
    pub fn print_document(&self, doc: &Document) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", doc.id);
                println!("Title:   {}", doc.title);
                if !doc.tags.is_empty() {
                    println!("Tags:    {}", doc.tags.join(", "));
                }
                println!("Added:   {}", doc.date_added);
                println!();
                println!("{}", doc.content);
            }
            OutputFormat::Json => println!("{}", to_json(doc)),
            OutputFormat::Quiet => println!("{}", doc.id),
        }
    }

    /// Print a list of documents
    pub fn print_documents(&self, docs: &[Document]) {
        match self.format {
            OutputFormat::Human => {
                if docs.is_empty() {
                    println!("No documents found.");
                    return;
                }
                for doc in docs {
                    println!(
                        "{:>4} | {} | {}",
                        doc.id,
                        truncate(&doc.title, 35),
                        truncate(&doc.tags.join(", "), 30)
                    );
                }
                println!("\n{} document(s)", docs.len());
            }
            OutputFormat::Json => println!("{}", to_json(&docs)),
            OutputFormat::Quiet => {
                for doc in docs {
                    println!("{}", doc.id);
                }
            }
        }
    }

    /// Print ranked search results
    pub fn print_results(&self, results: &[QueryResult]) {
        match self.format {
            OutputFormat::Human => print!("{}", render_results(results)),
            OutputFormat::Json => println!("{}", to_json(&results)),
            OutputFormat::Quiet => {
                for result in results {
                    println!("{}", result.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Human-readable search results, numbered from 1
pub fn render_results(results: &[QueryResult]) -> String {
    if results.is_empty() {
        return "\nNo results found.\n".to_string();
    }

    let mut out = String::from("\nSearch Results:\n");
    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} (Relevance: {:.2})\n",
            i + 1,
            result.title,
            result.relevance
        ));
        out.push_str(&format!("Preview: {}\n", result.preview));
    }
    out
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, title: &str, relevance: f64) -> QueryResult {
        QueryResult {
            id: id.to_string(),
            title: title.to_string(),
            preview: "Bake bread for 40 minutes...".to_string(),
            relevance,
        }
    }

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("ééééééééééééé", 5), "éé...");
    }

    #[test]
    fn test_render_results() {
        let rendered = render_results(&[result("1", "Recipe", 1.0), result("2", "Bread", 0.6667)]);

        assert!(rendered.contains("Search Results:"));
        assert!(rendered.contains("1. Recipe (Relevance: 1.00)"));
        assert!(rendered.contains("2. Bread (Relevance: 0.67)"));
        assert!(rendered.contains("Preview: Bake bread for 40 minutes..."));
    }

    #[test]
    fn test_render_no_results() {
        assert_eq!(render_results(&[]), "\nNo results found.\n");
    }

    #[test]
    fn test_results_json() {
        let json = to_json(&[result("3", "Recipe", 0.75)]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["id"], "3");
        assert_eq!(parsed[0]["relevance"], 0.75);
    }
}
