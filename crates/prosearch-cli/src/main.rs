//! ProSearch CLI
//!
//! Command-line interface for ProSearch - fuzzy search over personal documents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use prosearch_core::{Config, Store};

mod commands;
mod editor;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "prosearch")]
#[command(about = "ProSearch - fuzzy search over your personal documents")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default when no command is given)
    Menu,
    /// Add a new document
    #[command(alias = "new")]
    Add {
        /// Document title
        title: String,
        /// Document content (opens editor if not provided)
        #[arg(short, long)]
        content: Option<String>,
        /// Tags to add (repeat the flag or separate with commas)
        #[arg(short, long, alias = "tags", value_delimiter = ',')]
        tag: Vec<String>,
    },
    /// Search documents by similarity
    #[command(alias = "find")]
    Search {
        /// Search query
        query: String,
        /// Minimum relevance between 0 and 1 (defaults to the configured threshold)
        #[arg(long, value_parser = parse_threshold)]
        threshold: Option<f64>,
    },
    /// List all documents
    #[command(alias = "ls")]
    List,
    /// Show a document
    Show {
        /// Document ID
        id: String,
    },
    /// Show store status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, default_threshold, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands must work even when the store cannot be opened
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config);

    let store = Store::open_with_config(config)?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => commands::menu::run(&store),
        Commands::Add {
            title,
            content,
            tag,
        } => commands::document::add(&store, title, content, tag, &output),
        Commands::Search { query, threshold } => {
            commands::document::search(&store, query, threshold, &output)
        }
        Commands::List => commands::document::list(&store, &output),
        Commands::Show { id } => commands::document::show(&store, id, &output),
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(format!("threshold must be between 0 and 1, got {}", threshold))
    }
}
