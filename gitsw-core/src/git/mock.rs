use super::provider::GitProvider;
use anyhow::Result;
use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

#[derive(Default)]
pub struct MockGitProvider {
    pub installed: bool,
    pub root: Option<PathBuf>,
    pub current_branch: Option<String>,
    pub branches: Vec<String>,
    pub remote_branches: Vec<String>,
    pub remotes: Vec<String>,
    pub checkout_result: Mutex<Option<Result<()>>>,
    pub checkout_calls: Mutex<Vec<String>>,
    pub prune_calls: Mutex<Vec<String>>,
}

impl GitProvider for MockGitProvider {
    fn is_installed(&self) -> bool {
        self.installed
    }

    fn repository_root(&self, dir: &Path) -> Result<PathBuf> {
        self.root
            .clone()
            .ok_or_else(|| anyhow::anyhow!("{} is not inside a git repository", dir.display()))
    }

    fn current_branch(&self, _repo_path: &Path) -> Option<String> {
        self.current_branch.clone()
    }

    fn list_branches(&self, _repo_path: &Path) -> Result<Vec<String>> {
        Ok(self.branches.clone())
    }

    fn list_remote_branches(&self, _repo_path: &Path) -> Result<Vec<String>> {
        Ok(self.remote_branches.clone())
    }

    fn list_remotes(&self, _repo_path: &Path) -> Result<Vec<String>> {
        Ok(self.remotes.clone())
    }

    fn prune_remote(&self, _repo_path: &Path, remote: &str) -> Result<()> {
        self.prune_calls.lock().unwrap().push(remote.to_string());
        Ok(())
    }

    fn checkout(&self, _repo_path: &Path, branch: &str) -> Result<()> {
        self.checkout_calls.lock().unwrap().push(branch.to_string());
        self.checkout_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(()))
    }
}
