use crate::error::BacktestError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Sentinel written by the quote provider for days without a close
pub const NULL_SENTINEL: &str = "null";

/// Order in which a price file lists its observations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum InputOrder {
    /// Newest observation first (what the quote provider stores)
    #[default]
    MostRecentFirst,
    OldestFirst,
}

/// Drop `"null"` sentinels and blank lines, keeping everything else verbatim
pub fn clean_price_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let trimmed = line.as_ref().trim();
            if trimmed.is_empty() || trimmed == NULL_SENTINEL {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

/// Load a price file as cleaned lines in oldest-first iteration order
pub fn load_price_file(path: &Path, order: InputOrder) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|source| BacktestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = clean_price_lines(contents.lines());
    if order == InputOrder::MostRecentFirst {
        lines.reverse();
    }

    tracing::debug!("Loaded {} prices from {}", lines.len(), path.display());
    Ok(lines)
}

/// List `*.txt` price files in a directory as `(ticker, path)`, sorted by ticker
pub fn discover_price_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|source| BacktestError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BacktestError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
            continue;
        }
        if let Some(ticker) = path.file_stem().and_then(|stem| stem.to_str()) {
            files.push((ticker.to_string(), path.clone()));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}
