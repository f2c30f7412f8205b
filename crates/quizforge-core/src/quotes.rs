//! Motivational quotes kept in a flat text file, one per line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Line-oriented quote store. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    path: PathBuf,
}

impl QuoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All non-blank quotes, in file order.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read quotes: {}", self.path.display()))?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    /// A uniformly chosen quote, or `None` if the store is empty.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<String>> {
        Ok(self.list()?.choose(rng).cloned())
    }

    /// Append a quote as a new line.
    pub fn append(&self, quote: &str) -> Result<()> {
        let quote = quote.trim();
        if quote.is_empty() || quote.contains('\n') {
            anyhow::bail!("a quote must be a single non-empty line");
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open quotes: {}", self.path.display()))?;
        writeln!(file, "{quote}")
            .with_context(|| format!("failed to write quotes: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuoteStore::new(dir.path().join("quotes.txt"));
        assert!(store.list().unwrap().is_empty());
        assert!(store
            .random(&mut StdRng::seed_from_u64(1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn append_list_random() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuoteStore::new(dir.path().join("quotes.txt"));
        store.append("Keep going.").unwrap();
        store.append("  Practice makes progress.  ").unwrap();

        let quotes = store.list().unwrap();
        assert_eq!(quotes, vec!["Keep going.", "Practice makes progress."]);

        let picked = store
            .random(&mut StdRng::seed_from_u64(3))
            .unwrap()
            .unwrap();
        assert!(quotes.contains(&picked));
    }

    #[test]
    fn rejects_blank_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let store = QuoteStore::new(dir.path().join("quotes.txt"));
        assert!(store.append("   ").is_err());
        assert!(store.append("two\nlines").is_err());
    }
}
