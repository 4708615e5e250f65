use anyhow::Result;
use std::path::{Path, PathBuf};

pub trait GitProvider {
    fn is_installed(&self) -> bool;
    /// Top-level directory of the work tree containing `dir`.
    fn repository_root(&self, dir: &Path) -> Result<PathBuf>;
    fn current_branch(&self, repo_path: &Path) -> Option<String>;
    fn list_branches(&self, repo_path: &Path) -> Result<Vec<String>>;
    /// Remote branches with the `<remote>/` prefix stripped.
    fn list_remote_branches(&self, repo_path: &Path) -> Result<Vec<String>>;
    fn list_remotes(&self, repo_path: &Path) -> Result<Vec<String>>;
    fn prune_remote(&self, repo_path: &Path, remote: &str) -> Result<()>;
    fn checkout(&self, repo_path: &Path, branch: &str) -> Result<()>;
}
