use color_eyre::Result;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const LOG_FILE: &str = "plotpick.log";
/// History id of the dataset path prompt.
pub const DATASET_HISTORY: &str = "dataset";

/// Registry of known cache files
const CACHE_FILES: &[&str] = &[LOG_FILE, "dataset_history.txt"];

/// Manages cache directory and cache file operations
#[derive(Clone)]
pub struct CacheManager {
    pub(crate) cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(app_name: &str) -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine cache directory"))?
            .join(app_name);

        Ok(Self { cache_dir })
    }

    /// Create a CacheManager rooted at a custom directory (primarily for testing)
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn cache_file(&self, filename: &str) -> PathBuf {
        self.cache_dir.join(filename)
    }

    pub fn ensure_cache_dir(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    pub fn clear_file(&self, filename: &str) -> Result<()> {
        let file_path = self.cache_file(filename);
        if file_path.exists() {
            fs::remove_file(&file_path)?;
        }
        Ok(())
    }

    /// Remove every registered cache file; returns how many were removed.
    pub fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;
        for filename in CACHE_FILES {
            let file_path = self.cache_file(filename);
            if !file_path.exists() {
                continue;
            }
            match fs::remove_file(&file_path) {
                Ok(()) => removed += 1,
                Err(e) => warn!(file = filename, error = %e, "could not remove cache file"),
            }
        }
        Ok(removed)
    }

    /// Load `{history_id}_history.txt`, oldest entry first
    pub fn load_history_file(&self, history_id: &str) -> Result<Vec<String>> {
        let history_file = self.cache_file(&format!("{}_history.txt", history_id));

        if !history_file.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(fs::File::open(&history_file)?);
        let mut history = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                history.push(line);
            }
        }

        Ok(history)
    }

    pub fn save_history_file(&self, history_id: &str, history: &[String]) -> Result<()> {
        self.ensure_cache_dir()?;
        let history_file = self.cache_file(&format!("{}_history.txt", history_id));

        let mut file = fs::File::create(&history_file)?;
        for entry in history {
            writeln!(file, "{}", entry)?;
        }

        Ok(())
    }

    /// Move `entry` to the end of a history file, keeping at most `limit` entries.
    pub fn push_history(&self, history_id: &str, entry: &str, limit: usize) -> Result<()> {
        let mut history = self.load_history_file(history_id)?;
        history.retain(|h| h != entry);
        history.push(entry.to_string());
        let excess = history.len().saturating_sub(limit);
        history.drain(..excess);
        self.save_history_file(history_id, &history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_history_dedups_and_caps() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::with_dir(dir.path().join("plotpick"));
        cache.push_history(DATASET_HISTORY, "a.csv", 2).unwrap();
        cache.push_history(DATASET_HISTORY, "b.csv", 2).unwrap();
        cache.push_history(DATASET_HISTORY, "a.csv", 2).unwrap();
        cache.push_history(DATASET_HISTORY, "c.csv", 2).unwrap();
        assert_eq!(
            cache.load_history_file(DATASET_HISTORY).unwrap(),
            vec!["a.csv".to_string(), "c.csv".to_string()]
        );
    }

    #[test]
    fn test_clear_all_removes_registered_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::with_dir(dir.path().to_path_buf());
        cache
            .save_history_file(DATASET_HISTORY, &["x.csv".to_string()])
            .unwrap();
        fs::write(cache.cache_file(LOG_FILE), "log").unwrap();
        fs::write(cache.cache_file("unrelated.txt"), "keep").unwrap();
        assert_eq!(cache.clear_all().unwrap(), 2);
        assert!(cache.cache_file("unrelated.txt").exists());
        let history = cache.load_history_file(DATASET_HISTORY).unwrap();
        assert!(history.is_empty());
    }
}
