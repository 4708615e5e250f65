use anyhow::Context;
use gitsw_core::{
    config::Config,
    git::GitProvider,
    matcher,
    pins::PinStore,
    state::{SelectionOutcome, SelectionRequest, SelectionResult},
    storage::{FilePinStore, Storage},
};
use gitsw_tui::PickerOptions;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: i32,
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::system(format!("{value:#}"))
    }
}

/// The repository a command runs against, plus where its state lives.
pub struct RepoContext<'a> {
    pub config: &'a Config,
    pub git: &'a dyn GitProvider,
    pub repo: PathBuf,
    pub state_file: PathBuf,
}

impl<'a> RepoContext<'a> {
    /// Resolve the repository containing `cwd`.
    pub fn resolve(
        config: &'a Config,
        git: &'a dyn GitProvider,
        cwd: &Path,
        state_file: PathBuf,
    ) -> CliResult<Self> {
        if !git.is_installed() {
            return Err(CliError::user("git is not installed or not on PATH"));
        }
        let root = git
            .repository_root(cwd)
            .map_err(|e| CliError::user(format!("{e:#}")))?;
        let repo = dunce::canonicalize(&root).unwrap_or(root);
        log::debug!("using repository {}", repo.display());
        Ok(Self {
            config,
            git,
            repo,
            state_file,
        })
    }

    fn storage(&self) -> CliResult<Storage> {
        Ok(Storage::open(self.state_file.clone())?)
    }

    fn pin_store(&self) -> FilePinStore {
        FilePinStore::new(self.state_file.clone(), self.repo.clone())
    }

    /// Branch names to choose from, local or remote.
    fn candidates(&self, remote: bool) -> CliResult<Vec<String>> {
        if !remote {
            return Ok(self.git.list_branches(&self.repo)?);
        }
        if self.config.prune_remote_branches {
            for name in self.git.list_remotes(&self.repo)? {
                log::info!("pruning remote {name}");
                self.git.prune_remote(&self.repo, &name)?;
            }
        }
        Ok(self.git.list_remote_branches(&self.repo)?)
    }
}

/// Show the picker and check out the chosen branch.
pub fn cmd_pick<F>(ctx: &RepoContext<'_>, remote: bool, picker: F) -> CliResult<()>
where
    F: FnOnce(SelectionRequest, &PickerOptions, &dyn PinStore) -> anyhow::Result<SelectionResult>,
{
    let candidates = ctx.candidates(remote)?;
    if candidates.is_empty() {
        let kind = if remote { "remote" } else { "local" };
        return Err(CliError::user(format!("no {kind} branches to choose from")));
    }

    let storage = ctx.storage()?;
    let current = ctx.git.current_branch(&ctx.repo);
    let request = SelectionRequest {
        candidates,
        pinned: storage.pinned(&ctx.repo).to_vec(),
        current: current.clone(),
        window_size: ctx.config.window_size,
    };
    let options = PickerOptions::from_config(ctx.config);
    let store = ctx.pin_store();

    let result = picker(request, &options, &store)?;
    log::info!(
        "picker finished with {:?} after {} pin change(s)",
        result.outcome,
        result.changes.len()
    );

    match result.outcome {
        SelectionOutcome::Cancelled => Ok(()),
        SelectionOutcome::Selected(branch) => switch_to(ctx, &branch, current.as_deref()),
    }
}

/// Check out `branch`, remembering `previous` for `gitsw last`.
fn switch_to(ctx: &RepoContext<'_>, branch: &str, previous: Option<&str>) -> CliResult<()> {
    if let Some(previous) = previous
        && previous != branch
    {
        let mut storage = ctx.storage()?;
        storage.set_last_branch(&ctx.repo, previous);
        storage.save()?;
    }
    ctx.git
        .checkout(&ctx.repo, branch)
        .map_err(|e| CliError::system(format!("{e:#}")))
}

pub fn cmd_last(ctx: &RepoContext<'_>) -> CliResult<()> {
    let storage = ctx.storage()?;
    let Some(last) = storage.last_branch(&ctx.repo).map(str::to_string) else {
        return Err(CliError::user(
            "no previous branch recorded for this repository",
        ));
    };
    let current = ctx.git.current_branch(&ctx.repo);
    switch_to(ctx, &last, current.as_deref())
}

pub fn cmd_pin(ctx: &RepoContext<'_>, branch: &str) -> CliResult<()> {
    let branch = branch.trim();
    if branch.is_empty() {
        return Err(CliError::user("branch name cannot be empty"));
    }
    let mut storage = ctx.storage()?;
    if storage.pin(&ctx.repo, branch) {
        storage.save()?;
        println!("Pinned {branch}");
    } else {
        println!("{branch} is already pinned");
    }
    Ok(())
}

pub fn cmd_unpin(ctx: &RepoContext<'_>, branch: &str) -> CliResult<()> {
    let mut storage = ctx.storage()?;
    storage
        .unpin(&ctx.repo, branch)
        .map_err(|e| CliError::user(e.to_string()))?;
    storage.save()?;
    println!("Unpinned {}", branch.trim());
    Ok(())
}

pub fn cmd_pins(ctx: &RepoContext<'_>, json: bool) -> CliResult<()> {
    let storage = ctx.storage()?;
    let pinned = storage.pinned(&ctx.repo);
    if json {
        print_json(&pinned)?;
    } else {
        for branch in pinned {
            println!("{branch}");
        }
    }
    Ok(())
}

pub fn cmd_clear_pins(ctx: &RepoContext<'_>) -> CliResult<()> {
    let mut storage = ctx.storage()?;
    let removed = storage.clear_pins(&ctx.repo);
    if removed > 0 {
        storage.save()?;
    }
    println!("Removed {removed} pin(s)");
    Ok(())
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct BranchOutput {
    name: String,
    pinned: bool,
    current: bool,
}

/// Branches in picker order, pinned first.
fn branch_rows(ctx: &RepoContext<'_>, remote: bool) -> CliResult<Vec<BranchOutput>> {
    let candidates = ctx.candidates(remote)?;
    let storage = ctx.storage()?;
    let pinned = storage.pinned(&ctx.repo);
    let current = ctx.git.current_branch(&ctx.repo);

    Ok(matcher::filter(&candidates, pinned, "")
        .into_iter()
        .map(|name| BranchOutput {
            pinned: pinned.contains(&name),
            current: current.as_deref() == Some(name.as_str()),
            name,
        })
        .collect())
}

pub fn cmd_list(ctx: &RepoContext<'_>, remote: bool, json: bool) -> CliResult<()> {
    let rows = branch_rows(ctx, remote)?;
    if json {
        print_json(&rows)?;
    } else {
        print!("{}", format_branch_list(&rows, &ctx.config.pinned_prefix));
    }
    Ok(())
}

fn format_branch_list(rows: &[BranchOutput], pinned_prefix: &str) -> String {
    let marker_width = pinned_prefix.chars().count().max(1);
    let mut out = String::new();
    for row in rows {
        let marker = if row.pinned {
            pinned_prefix.to_string()
        } else if row.current {
            format!("{:<marker_width$}", "*")
        } else {
            " ".repeat(marker_width)
        };
        out.push_str(&marker);
        out.push(' ');
        out.push_str(&row.name);
        out.push('\n');
    }
    out
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string(value)
            .context("failed to serialise output")
            .map_err(CliError::from)?
    );
    Ok(())
}

pub fn print_error(error: &CliError, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": error.message() });
        eprintln!("{payload}");
    } else {
        eprintln!("error: {}", error.message());
    }
}
