//! Changed files from a local git repository
//!
//! Produces the same descriptors a review service would, for runs outside
//! of a hosted pull request.

use anyhow::{Context, Result};
use git2::{Delta, DiffOptions, Repository};
use std::path::Path;

use super::{ChangeStatus, ChangedFile};

/// Lists files changed between two refs of a repository
pub struct GitChanges {
    repo: Repository,
}

impl GitChanges {
    /// Open the repository containing `repo_path`
    pub fn new(repo_path: &Path) -> Result<Self> {
        let repo = Repository::discover(repo_path).context("Failed to open git repository")?;
        Ok(Self { repo })
    }

    /// Files changed from `base` to `head` (HEAD when `None`)
    pub fn changed_files(&self, base: &str, head: Option<&str>) -> Result<Vec<ChangedFile>> {
        let base_tree = self.resolve_tree(base)?;
        let head_tree = self.resolve_tree(head.unwrap_or("HEAD"))?;

        let mut opts = DiffOptions::new();
        opts.ignore_whitespace(false);

        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))
            .context("Failed to diff trees")?;
        diff.find_similar(None)?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            // Deleted files only carry the old path
            let path = match delta.new_file().path().or_else(|| delta.old_file().path()) {
                Some(p) => p,
                None => continue,
            };

            let status = match delta.status() {
                Delta::Added => ChangeStatus::Added,
                Delta::Deleted => ChangeStatus::Removed,
                Delta::Renamed => ChangeStatus::Renamed,
                Delta::Copied => ChangeStatus::Copied,
                Delta::Unmodified => ChangeStatus::Unchanged,
                _ => ChangeStatus::Modified,
            };

            files.push(ChangedFile {
                filename: path.to_string_lossy().replace('\\', "/"),
                status,
                ..Default::default()
            });
        }

        Ok(files)
    }

    fn resolve_tree(&self, spec: &str) -> Result<git2::Tree<'_>> {
        let obj = self
            .repo
            .revparse_single(spec)
            .with_context(|| format!("Failed to resolve ref '{}'", spec))?;
        let commit = obj.peel_to_commit()?;
        Ok(commit.tree()?)
    }
}
