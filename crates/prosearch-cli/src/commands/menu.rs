//! Interactive menu
//!
//! A prompt loop for adding and searching documents without remembering
//! subcommands. Storage errors are reported and the loop keeps going.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use prosearch_core::Store;

use crate::editor::{parse_tag_list, prompt_line};
use crate::output::render_results;

/// Run the menu on stdin/stdout
pub fn run(store: &Store) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    run_with(store, &mut input, &mut out)
}

/// Run the menu over arbitrary input and output streams
///
/// Ends on the exit option or at end of input.
pub fn run_with<R: BufRead, W: Write>(store: &Store, input: &mut R, out: &mut W) -> Result<()> {
    loop {
        writeln!(out, "\n=== Pro Search Engine ===")?;
        writeln!(out, "1. Add new document")?;
        writeln!(out, "2. Search documents")?;
        writeln!(out, "3. Exit")?;

        let Some(choice) = prompt_line(input, out, "Choose an option (1-3): ")? else {
            break;
        };

        match choice.trim() {
            "1" => {
                if !add_document(store, input, out)? {
                    break;
                }
            }
            "2" => {
                if !search_documents(store, input, out)? {
                    break;
                }
            }
            "3" => {
                writeln!(out, "Thank you for using Pro Search!")?;
                break;
            }
            _ => writeln!(out, "Invalid choice. Enter 1, 2 or 3.")?,
        }
    }

    Ok(())
}

/// Returns `false` when input ran out mid-prompt
fn add_document<R: BufRead, W: Write>(store: &Store, input: &mut R, out: &mut W) -> Result<bool> {
    let Some(title) = prompt_line(input, out, "Enter document title: ")? else {
        return Ok(false);
    };
    let Some(content) = prompt_line(input, out, "Enter document content: ")? else {
        return Ok(false);
    };
    let Some(tags) = prompt_line(input, out, "Enter tags (comma-separated): ")? else {
        return Ok(false);
    };

    match store.add_document(title, content, parse_tag_list(&tags)) {
        Ok(doc) => writeln!(out, "Document '{}' added successfully!", doc.title)?,
        Err(e) => writeln!(out, "Error: {:#}", e)?,
    }
    Ok(true)
}

/// Returns `false` when input ran out mid-prompt
fn search_documents<R: BufRead, W: Write>(
    store: &Store,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let Some(query) = prompt_line(input, out, "Enter search query: ")? else {
        return Ok(false);
    };

    match store.search(&query) {
        Ok(results) => write!(out, "{}", render_results(&results))?,
        Err(e) => writeln!(out, "Error: {:#}", e)?,
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prosearch_core::Config;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> Store {
        Store::open_with_config(Config {
            data_dir: temp_dir.path().to_path_buf(),
            default_threshold: 0.6,
            log_file: None,
        })
        .unwrap()
    }

    fn run_script(store: &Store, script: &str) -> String {
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        run_with(store, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_then_search() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let transcript = run_script(
            &store,
            "1\nRecipe\nBake bread for 40 minutes\ncooking,bread\n2\nbread\n3\n",
        );

        assert!(transcript.contains("Document 'Recipe' added successfully!"));
        assert!(transcript.contains("1. Recipe (Relevance: 1.00)"));
        assert!(transcript.contains("Preview: Bake bread for 40 minutes..."));
        assert!(transcript.contains("Thank you for using Pro Search!"));

        let docs = store.get_all_documents().unwrap();
        assert_eq!(docs[0].tags, vec!["cooking", "bread"]);
    }

    #[test]
    fn test_search_without_matches() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let transcript = run_script(&store, "2\nanything\n3\n");
        assert!(transcript.contains("No results found."));
    }

    #[test]
    fn test_invalid_choice_and_end_of_input() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let transcript = run_script(&store, "9\n");
        assert!(transcript.contains("Invalid choice"));
        assert!(!transcript.contains("Thank you"));
    }

    #[test]
    fn test_input_ends_mid_add() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        run_script(&store, "1\nOnly a title\n");
        assert_eq!(store.document_count().unwrap(), 0);
    }
}
