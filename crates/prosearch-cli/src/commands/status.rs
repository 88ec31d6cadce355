//! Status command handler

use anyhow::Result;

use prosearch_core::Store;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let stats = store.stats();
    let config = store.config();
    let allocation = store.allocate_id();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "store": {
                        "path": stats.path,
                        "exists": stats.exists,
                        "size": stats.size_bytes,
                        "documents": stats.documents,
                    },
                    "next_id": allocation.id(),
                    "next_id_fallback": allocation.is_fallback(),
                    "default_threshold": config.default_threshold,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", stats.path.display());
        }
        OutputFormat::Human => {
            println!("ProSearch Status");
            println!("================");
            println!();
            println!("Store:");
            println!("  Location: {}", stats.path.display());
            println!("  Size:     {}", stats.size_human());
            match stats.documents {
                Some(count) => println!("  Documents: {}", count),
                None => println!("  Documents: (store could not be read)"),
            }
            println!();
            println!("Search:");
            println!("  Default threshold: {:.2}", config.default_threshold);
            println!("  Next id:           {}", allocation.id());
        }
    }

    Ok(())
}
