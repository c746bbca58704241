use anyhow::{Context, Result};
use git2::{Repository, Sort};
use std::path::Path;
use tracing::debug;

use crate::core::Commit;

/// Reads commit windows out of a git repository
pub struct GitWalker {
    repo: Repository,
}

impl GitWalker {
    pub fn new(repo_path: Option<&Path>) -> Result<Self> {
        let repo = match repo_path {
            Some(path) => Repository::open(path),
            None => Repository::open_from_env(),
        }
        .context("Failed to open repository")?;

        Ok(Self { repo })
    }

    /// Walk HEAD and every local branch, children before parents, newest
    /// first, stopping after `limit` commits. Parents beyond the limit stay in
    /// `parent_hashes` and are left for the layout to drop.
    pub fn commits(&self, limit: Option<usize>) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;

        if self.repo.head().is_ok() {
            revwalk.push_head()?;
        }
        for branch in self.repo.branches(None)? {
            let (branch, _) = branch?;
            if let Some(target) = branch.get().target() {
                revwalk.push(target)?;
            }
        }
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            if limit.is_some_and(|limit| commits.len() >= limit) {
                break;
            }
            let commit = self.repo.find_commit(oid?)?;
            let parents = commit.parent_ids().map(|oid| oid.to_string()).collect();
            commits.push(Commit::new(commit.id().to_string(), parents));
        }

        debug!(count = commits.len(), "walked commits");
        Ok(commits)
    }

    /// Get HEAD target
    pub fn head(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) => Ok(head.target().map(|oid| oid.to_string())),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HistoryIndex;
    use crate::layout::compute_lanes;
    use git2::{Commit as GitCommit, Oid, Signature};
    use tempfile::TempDir;

    fn create_test_repo() -> Result<(TempDir, Repository)> {
        let dir = TempDir::new()?;
        let repo = Repository::init(dir.path())?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        Ok((dir, repo))
    }

    fn commit_to_repo(
        repo: &Repository,
        message: &str,
        parents: &[&GitCommit],
        update_ref: Option<&str>,
    ) -> Result<Oid> {
        let sig = Signature::now("Test User", "test@example.com")?;
        let tree_id = {
            let mut index = repo.index()?;
            index.write_tree()?
        };
        let tree = repo.find_tree(tree_id)?;

        Ok(repo.commit(update_ref, &sig, &sig, message, &tree, parents)?)
    }

    #[test]
    fn test_linear_history() -> Result<()> {
        let (dir, repo) = create_test_repo()?;

        let oid1 = commit_to_repo(&repo, "First commit", &[], Some("HEAD"))?;
        let commit1 = repo.find_commit(oid1)?;
        let oid2 = commit_to_repo(&repo, "Second commit", &[&commit1], Some("HEAD"))?;
        let commit2 = repo.find_commit(oid2)?;
        let oid3 = commit_to_repo(&repo, "Third commit", &[&commit2], Some("HEAD"))?;

        let walker = GitWalker::new(Some(dir.path()))?;
        let commits = walker.commits(None)?;

        let hashes: Vec<_> = commits.iter().map(|c| c.hash.clone()).collect();
        assert_eq!(hashes, vec![oid3.to_string(), oid2.to_string(), oid1.to_string()]);
        assert_eq!(walker.head()?, Some(oid3.to_string()));

        let rows = compute_lanes(&commits, 1)?;
        assert!(rows.iter().all(|row| row.lane_count() == 1));

        Ok(())
    }

    #[test]
    fn test_limit_truncates_parents() -> Result<()> {
        let (dir, repo) = create_test_repo()?;

        let oid1 = commit_to_repo(&repo, "First commit", &[], Some("HEAD"))?;
        let commit1 = repo.find_commit(oid1)?;
        let oid2 = commit_to_repo(&repo, "Second commit", &[&commit1], Some("HEAD"))?;
        let commit2 = repo.find_commit(oid2)?;
        commit_to_repo(&repo, "Third commit", &[&commit2], Some("HEAD"))?;

        let walker = GitWalker::new(Some(dir.path()))?;
        let commits = walker.commits(Some(2))?;
        assert_eq!(commits.len(), 2);

        let stats = HistoryIndex::new(&commits)?.stats();
        assert_eq!(stats.edges, 1);
        assert_eq!(stats.truncated_parents, 1);

        Ok(())
    }

    #[test]
    fn test_merge_commit() -> Result<()> {
        let (dir, repo) = create_test_repo()?;

        let base_oid = commit_to_repo(&repo, "Base commit", &[], Some("HEAD"))?;
        let base_commit = repo.find_commit(base_oid)?;
        let branch1_oid = commit_to_repo(&repo, "Branch 1", &[&base_commit], Some("HEAD"))?;
        let branch1_commit = repo.find_commit(branch1_oid)?;
        // not on HEAD until merged
        let branch2_oid = commit_to_repo(&repo, "Branch 2", &[&base_commit], None)?;
        let branch2_commit = repo.find_commit(branch2_oid)?;
        let merge_oid = commit_to_repo(
            &repo,
            "Merge",
            &[&branch1_commit, &branch2_commit],
            Some("HEAD"),
        )?;

        let walker = GitWalker::new(Some(dir.path()))?;
        let commits = walker.commits(None)?;

        assert_eq!(commits.len(), 4);
        assert_eq!(commits[0].hash, merge_oid.to_string());
        assert_eq!(commits[3].hash, base_oid.to_string());

        let stats = HistoryIndex::new(&commits)?.stats();
        assert_eq!(stats.merges, 1);
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.edges, 4);

        let rows = compute_lanes(&commits, 2)?;
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.open_count() <= 2));

        Ok(())
    }
}
