use serde::{Deserialize, Serialize};

/// A commit as seen by the lane layout: its hash and its ordered parents.
///
/// Parents that are not part of the laid out window are allowed; they simply
/// produce no edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash, unique within the window
    pub hash: String,
    /// Parent hashes, first parent first
    #[serde(alias = "parents", default)]
    pub parent_hashes: Vec<String>,
}

impl Commit {
    pub fn new(hash: impl Into<String>, parent_hashes: Vec<String>) -> Self {
        Self {
            hash: hash.into(),
            parent_hashes,
        }
    }

    /// Convenience constructor for commits whose parents are plain strings
    pub fn with_parents(hash: impl Into<String>, parents: &[&str]) -> Self {
        Self::new(hash, parents.iter().map(|p| p.to_string()).collect())
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parent_hashes.is_empty()
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parent_hashes.len() > 1
    }

    /// First eight characters of the hash
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.hash.len());
        &self.hash[..end]
    }
}
