//! High-score file: up to five newline-separated integers, highest first.
//! Every save reads the whole file, merges, truncates and rewrites it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::LEDGER_SIZE;
use crate::error::LedgerError;

#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stored scores in file order. A missing file is an empty ledger and
    /// non-integer lines are skipped.
    pub fn load(&self) -> Result<Vec<u32>, LedgerError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(LedgerError::Io { path: self.path.clone(), source }),
        };
        Ok(parse(&text, &self.path))
    }

    /// Adds `score`, keeps the best five and rewrites the file. Returns the
    /// ledger as saved.
    pub fn record(&self, score: u32) -> Result<Vec<u32>, LedgerError> {
        let scores = merge(self.load()?, score);
        let body: String = scores.iter().map(|s| format!("{s}\n")).collect();
        fs::write(&self.path, body).map_err(|source| LedgerError::Io { path: self.path.clone(), source })?;
        debug!(path = %self.path.display(), ?scores, "high scores saved");
        Ok(scores)
    }
}

fn parse(text: &str, path: &Path) -> Vec<u32> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| match line.trim().parse::<u32>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(path = %path.display(), line = n + 1, content = line, "skipping malformed high score: {e}");
                None
            }
        })
        .collect()
}

/// Appends `score`, sorts descending and keeps the top entries.
pub fn merge(mut scores: Vec<u32>, score: u32) -> Vec<u32> {
    scores.push(score);
    scores.sort_unstable_by(|a, b| b.cmp(a));
    scores.truncate(LEDGER_SIZE);
    scores
}
