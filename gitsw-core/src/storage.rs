use crate::{paths, pins::PinStore};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const STATE_FILE_NAME: &str = "state.toml";
const STATE_VERSION: u32 = 1;

/// Pins and history for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    pub path: PathBuf,
    #[serde(default)]
    pub pinned_branches: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_branch: Option<String>,
}

impl RepositoryState {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            pinned_branches: Vec::new(),
            last_branch: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    version: u32,
    #[serde(default)]
    repositories: Vec<RepositoryState>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            repositories: Vec::new(),
        }
    }
}

fn same_repository(a: &Path, b: &Path) -> bool {
    if cfg!(windows) {
        a.to_string_lossy()
            .eq_ignore_ascii_case(&b.to_string_lossy())
    } else {
        a == b
    }
}

/// Per-repository state persisted as TOML.
#[derive(Debug)]
pub struct Storage {
    path: PathBuf,
    file: StateFile,
}

impl Storage {
    pub fn default_path() -> PathBuf {
        paths::state_dir().join(STATE_FILE_NAME)
    }

    /// Read the state file at `path`. A missing file is an empty state; a file
    /// written by an unknown version is rejected rather than overwritten.
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = match fs::read_to_string(&path) {
            Ok(contents) => {
                let parsed: StateFile = toml::from_str(&contents)
                    .with_context(|| format!("corrupt state file {}", path.display()))?;
                if parsed.version != STATE_VERSION {
                    anyhow::bail!(
                        "unsupported state file version {} in {}",
                        parsed.version,
                        path.display()
                    );
                }
                parsed
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StateFile::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the state to a sibling temp file, then rename it into place.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let serialized = toml::to_string(&self.file)?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, serialized)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        log::debug!("saved state to {}", self.path.display());
        Ok(())
    }

    pub fn repository(&self, repo: &Path) -> Option<&RepositoryState> {
        self.file
            .repositories
            .iter()
            .find(|r| same_repository(&r.path, repo))
    }

    fn repository_mut(&mut self, repo: &Path) -> &mut RepositoryState {
        let idx = if let Some(idx) = self
            .file
            .repositories
            .iter()
            .position(|r| same_repository(&r.path, repo))
        {
            idx
        } else {
            self.file.repositories.push(RepositoryState::new(repo));
            self.file.repositories.len() - 1
        };
        &mut self.file.repositories[idx]
    }

    pub fn pinned(&self, repo: &Path) -> &[String] {
        self.repository(repo)
            .map(|r| r.pinned_branches.as_slice())
            .unwrap_or_default()
    }

    /// Pin `branch`. Returns false if it was already pinned.
    pub fn pin(&mut self, repo: &Path, branch: &str) -> bool {
        let branch = branch.trim();
        let state = self.repository_mut(repo);
        if state.pinned_branches.iter().any(|b| b == branch) {
            return false;
        }
        state.pinned_branches.push(branch.to_string());
        true
    }

    pub fn unpin(&mut self, repo: &Path, branch: &str) -> Result<()> {
        let branch = branch.trim();
        let Some(idx) = self
            .repository(repo)
            .and_then(|r| r.pinned_branches.iter().position(|b| b == branch))
        else {
            anyhow::bail!("branch not pinned: {branch}");
        };
        self.repository_mut(repo).pinned_branches.remove(idx);
        Ok(())
    }

    /// Remove every pin for `repo`, returning how many were removed.
    pub fn clear_pins(&mut self, repo: &Path) -> usize {
        match self
            .file
            .repositories
            .iter_mut()
            .find(|r| same_repository(&r.path, repo))
        {
            Some(state) => std::mem::take(&mut state.pinned_branches).len(),
            None => 0,
        }
    }

    pub fn last_branch(&self, repo: &Path) -> Option<&str> {
        self.repository(repo)?.last_branch.as_deref()
    }

    pub fn set_last_branch(&mut self, repo: &Path, branch: &str) {
        self.repository_mut(repo).last_branch = Some(branch.trim().to_string());
    }
}

/// `PinStore` that writes every change straight to the state file, reloading
/// it first so concurrent edits from other invocations are kept.
pub struct FilePinStore {
    path: PathBuf,
    repo: PathBuf,
}

impl FilePinStore {
    pub fn new(path: PathBuf, repo: PathBuf) -> Self {
        Self { path, repo }
    }
}

impl PinStore for FilePinStore {
    fn persist_pin(&self, label: &str) -> Result<()> {
        let mut storage = Storage::open(self.path.clone())?;
        if storage.pin(&self.repo, label) {
            storage.save()?;
        }
        Ok(())
    }

    /// A pin already removed by another invocation counts as unpinned.
    fn persist_unpin(&self, label: &str) -> Result<()> {
        let mut storage = Storage::open(self.path.clone())?;
        if !storage.pinned(&self.repo).iter().any(|b| b == label.trim()) {
            log::debug!("{label} already unpinned in {}", self.path.display());
            return Ok(());
        }
        storage.unpin(&self.repo, label)?;
        storage.save()
    }
}
