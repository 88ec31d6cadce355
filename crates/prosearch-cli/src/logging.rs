//! Logging setup
//!
//! Logging is off unless PROSEARCH_LOG is set to a level (error, warn, info,
//! debug, trace). Output goes to `config.log_file` when set, stderr
//! otherwise.

use std::fs::File;
use std::sync::Mutex;

use prosearch_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log level
const LOG_ENV: &str = "PROSEARCH_LOG";

/// Initialize logging if PROSEARCH_LOG is set
pub fn init(config: &Config) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let env_filter = EnvFilter::new(filter_directives(&log_level));

    match &config.log_file {
        Some(log_path) => {
            let log_file = match File::create(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
                    return;
                }
            };

            // Ignore error if already initialized
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();

            info!("logging to {:?}", log_path);
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

fn filter_directives(level: &str) -> String {
    format!("prosearch_core={0},prosearch_cli={0}", level.trim())
}
