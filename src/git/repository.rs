//! Git repository operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{Repository, Sort};
use tracing::debug;

use crate::git::Commit;

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
    path: PathBuf,
}

impl GitRepository {
    /// Open repository at specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path)
            .with_context(|| format!("Failed to open git repository at {}", path.display()))?;

        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Walk the history reachable from HEAD, newest first.
    ///
    /// Fails if HEAD cannot be resolved (e.g. an unborn branch) or if any
    /// commit along the walk cannot be read.
    pub fn head_commits(&self) -> Result<Vec<Commit>> {
        let head = self.repo.head().context("Failed to get HEAD reference")?;
        let head_commit = head
            .peel_to_commit()
            .context("Failed to peel HEAD to commit")?;

        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .context("Failed to set revwalk sorting")?;
        walker
            .push(head_commit.id())
            .context("Failed to push HEAD commit")?;

        let mut commits = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .with_context(|| format!("Failed to find commit {oid}"))?;
            commits.push(Commit::from_git_commit(&commit)?);
        }

        debug!(
            repository = %self.path.display(),
            count = commits.len(),
            "Read commits from HEAD"
        );

        Ok(commits)
    }
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
