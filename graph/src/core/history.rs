use super::{commit::Commit, edge::RowIdx};
use crate::error::{LayoutError, Result};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Lookup tables over an ordered window of commits.
///
/// Built once before any row is laid out. Parent references are resolved to
/// row indices; references leaving the window are dropped and counted.
#[derive(Debug, Clone)]
pub struct HistoryIndex {
    /// Commit hash -> row
    row_of: HashMap<String, RowIdx>,
    /// Row -> resolved parent rows, in parent order
    parents: Vec<SmallVec<[RowIdx; 2]>>,
    /// Row -> rows of the commits naming it as a parent
    children: HashMap<RowIdx, Vec<RowIdx>>,
    stats: HistoryStats,
}

impl HistoryIndex {
    pub fn new(commits: &[Commit]) -> Result<Self> {
        if commits.is_empty() {
            return Err(LayoutError::invalid("commit list is empty"));
        }

        let mut row_of = HashMap::with_capacity(commits.len());
        for (row, commit) in commits.iter().enumerate() {
            if let Some(first) = row_of.insert(commit.hash.clone(), row) {
                return Err(LayoutError::invalid(format!(
                    "commit {} appears at rows {} and {}",
                    commit.hash, first, row
                )));
            }
        }

        let mut stats = HistoryStats {
            commits: commits.len(),
            ..HistoryStats::default()
        };
        let mut parents = Vec::with_capacity(commits.len());
        let mut children: HashMap<RowIdx, Vec<RowIdx>> = HashMap::new();

        for (row, commit) in commits.iter().enumerate() {
            if commit.is_root() {
                stats.roots += 1;
            }
            if commit.is_merge() {
                stats.merges += 1;
            }

            let mut resolved: SmallVec<[RowIdx; 2]> = SmallVec::new();
            for parent_hash in &commit.parent_hashes {
                let Some(&parent) = row_of.get(parent_hash) else {
                    stats.truncated_parents += 1;
                    continue;
                };
                if parent <= row {
                    return Err(LayoutError::invalid(format!(
                        "commit {} at row {} has parent {} at row {}; parents must follow their children",
                        commit.hash, row, parent_hash, parent
                    )));
                }
                if resolved.contains(&parent) {
                    continue;
                }
                resolved.push(parent);
                children.entry(parent).or_default().push(row);
                stats.edges += 1;
            }
            parents.push(resolved);
        }

        Ok(Self {
            row_of,
            parents,
            children,
            stats,
        })
    }

    /// Number of commits in the window, never zero
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn row_of(&self, hash: &str) -> Option<RowIdx> {
        self.row_of.get(hash).copied()
    }

    /// Parent rows of the commit at `row` that fall inside the window
    pub fn parents_of(&self, row: RowIdx) -> &[RowIdx] {
        self.parents.get(row).map(|p| p.as_slice()).unwrap_or(&[])
    }

    /// Rows of all commits that list `row` as a parent, in row order
    pub fn children_of(&self, row: RowIdx) -> &[RowIdx] {
        self.children.get(&row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn stats(&self) -> HistoryStats {
        self.stats.clone()
    }
}

/// Shape of a history window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub commits: usize,
    /// Parent links resolved inside the window
    pub edges: usize,
    pub merges: usize,
    pub roots: usize,
    /// Parent links pointing outside the window
    pub truncated_parents: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge_history() -> Vec<Commit> {
        vec![
            Commit::with_parents("m", &["a", "f"]),
            Commit::with_parents("a", &["base"]),
            Commit::with_parents("f", &["base"]),
            Commit::with_parents("base", &["outside"]),
        ]
    }

    #[test]
    fn resolves_parents_and_children() {
        let index = HistoryIndex::new(&merge_history()).unwrap();

        assert_eq!(index.len(), 4);
        assert_eq!(index.row_of("f"), Some(2));
        assert_eq!(index.row_of("outside"), None);
        assert_eq!(index.parents_of(0), &[1, 2]);
        assert_eq!(index.parents_of(3), &[] as &[RowIdx]);
        assert_eq!(index.children_of(3), &[1, 2]);
        assert_eq!(index.children_of(0), &[] as &[RowIdx]);
    }

    #[test]
    fn collects_stats() {
        let index = HistoryIndex::new(&merge_history()).unwrap();
        let stats = index.stats();

        assert_eq!(stats.commits, 4);
        assert_eq!(stats.edges, 4);
        assert_eq!(stats.merges, 1);
        assert_eq!(stats.roots, 0);
        assert_eq!(stats.truncated_parents, 1);
    }

    #[test]
    fn repeated_parent_is_resolved_once() {
        let commits = vec![
            Commit::with_parents("b", &["a", "a"]),
            Commit::with_parents("a", &[]),
        ];
        let index = HistoryIndex::new(&commits).unwrap();

        assert_eq!(index.parents_of(0), &[1]);
        assert_eq!(index.children_of(1), &[0]);
    }

    #[test]
    fn rejects_empty_duplicate_and_misordered_input() {
        assert!(HistoryIndex::new(&[]).unwrap_err().is_invalid_argument());

        let duplicated = vec![
            Commit::with_parents("a", &[]),
            Commit::with_parents("a", &[]),
        ];
        assert!(HistoryIndex::new(&duplicated)
            .unwrap_err()
            .is_invalid_argument());

        let misordered = vec![
            Commit::with_parents("a", &[]),
            Commit::with_parents("b", &["a"]),
        ];
        assert!(HistoryIndex::new(&misordered)
            .unwrap_err()
            .is_invalid_argument());

        let self_parent = vec![Commit::with_parents("a", &["a"])];
        assert!(HistoryIndex::new(&self_parent)
            .unwrap_err()
            .is_invalid_argument());
    }
}
