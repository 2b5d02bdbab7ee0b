//! Saved query results, one JSON file per identifier
//!
//! Files live directly under the storage directory as `<id>.json` and are
//! exposed to clients as `file://` resources.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ResultStore {
    root: PathBuf,
}

impl ResultStore {
    /// Open the store, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create result storage at {:?}", root))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `id`; path separators in the id become `_`
    pub fn path_for(&self, id: &str) -> PathBuf {
        let safe_id = id.replace(['/', '\\'], "_");
        self.root.join(format!("{}.json", safe_id))
    }

    pub fn uri_for(&self, id: &str) -> String {
        format!("file://{}", self.path_for(id).display())
    }

    /// Identifier behind a `file://` URI, if it points into this store
    pub fn id_from_uri(&self, uri: &str) -> Option<String> {
        let path = Path::new(uri.strip_prefix("file://")?);
        if path.parent()? != self.root.as_path() || path.extension()? != "json" {
            return None;
        }
        path.file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
    }

    /// Identifiers of all stored results, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list results in {:?}", self.root))?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        tracing::debug!(count = ids.len(), "listed stored results");
        Ok(ids)
    }

    /// Write `payload` as pretty JSON under `id`, replacing any previous file
    pub fn store(&self, id: &str, payload: &serde_json::Value) -> Result<PathBuf> {
        if id.trim().is_empty() {
            bail!("Result identifier must not be empty");
        }
        let path = self.path_for(id.trim());
        let json = serde_json::to_string_pretty(payload)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write result to {:?}", path))?;
        tracing::info!(path = %path.display(), "stored query result");
        Ok(path)
    }

    pub fn read(&self, id: &str) -> Result<String> {
        let path = self.path_for(id);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read result {:?}", path))
    }
}
