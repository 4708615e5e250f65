use super::{parse_local_branches, parse_remote_branches, provider::GitProvider};
use anyhow::{Context, Result};
use std::{
    path::{Path, PathBuf},
    process::Command,
};

pub struct CliGitProvider;

/// Run git in `dir` and return its stdout, failing with stderr on a non-zero exit.
fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    log::debug!("executing git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .context("failed to run git")?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    log::debug!("git {} output: {stdout}", args.join(" "));

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
    }
    Ok(stdout)
}

impl GitProvider for CliGitProvider {
    fn is_installed(&self) -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    fn repository_root(&self, dir: &Path) -> Result<PathBuf> {
        let out = run_git(dir, &["rev-parse", "--show-toplevel"])
            .with_context(|| format!("{} is not inside a git repository", dir.display()))?;
        let root = out.trim();
        if root.is_empty() {
            anyhow::bail!("{} is not inside a git work tree", dir.display());
        }
        Ok(PathBuf::from(root))
    }

    fn current_branch(&self, repo_path: &Path) -> Option<String> {
        run_git(repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != "HEAD")
    }

    fn list_branches(&self, repo_path: &Path) -> Result<Vec<String>> {
        let out = run_git(repo_path, &["branch", "--format=%(refname:short)"])?;
        Ok(parse_local_branches(&out))
    }

    fn list_remote_branches(&self, repo_path: &Path) -> Result<Vec<String>> {
        let out = run_git(repo_path, &["branch", "-r", "--format=%(refname:short)"])?;
        Ok(parse_remote_branches(&out))
    }

    fn list_remotes(&self, repo_path: &Path) -> Result<Vec<String>> {
        let out = run_git(repo_path, &["remote"])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    fn prune_remote(&self, repo_path: &Path, remote: &str) -> Result<()> {
        run_git(repo_path, &["remote", "prune", remote])?;
        Ok(())
    }

    fn checkout(&self, repo_path: &Path, branch: &str) -> Result<()> {
        log::debug!("executing git checkout {branch}");
        // Inherit stdio so git's own progress and messages reach the user
        let status = Command::new("git")
            .args(["checkout", branch])
            .current_dir(repo_path)
            .status()
            .context("failed to run git")?;
        log::debug!("git checkout {branch} finished: {status}");

        if !status.success() {
            anyhow::bail!("git checkout {branch} failed ({status})");
        }
        Ok(())
    }
}
