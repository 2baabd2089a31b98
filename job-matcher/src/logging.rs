//! Tracing setup
//!
//! The terminal UI owns stdout, so interactive sessions log to a file.
//! Headless commands log to stderr.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// `job-matcher.log` in the platform data directory
pub fn default_log_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "job-matcher", "job-matcher") {
        proj_dirs.data_dir().join("job-matcher.log")
    } else {
        PathBuf::from(".job-matcher.log")
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(target: &LogTarget) -> Result<()> {
    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Failed to initialise logging"),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))
                .context("Failed to initialise logging")
        }
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
