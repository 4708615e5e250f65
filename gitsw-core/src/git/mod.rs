pub mod cli;
pub mod mock;
pub mod provider;

pub use cli::CliGitProvider;
pub use provider::GitProvider;

/// Parse `git branch -r --format=%(refname:short)` output into branch names
/// without their remote prefix, in first-seen order.
pub fn parse_remote_branches(output: &str) -> Vec<String> {
    let mut branches: Vec<String> = Vec::new();
    for line in output.lines() {
        let line = line.trim();
        // Skip HEAD pointer (e.g. "origin/HEAD -> origin/main")
        if line.contains("->") {
            continue;
        }
        // Strip the remote prefix (e.g. "origin/feature" -> "feature")
        let Some((_, branch)) = line.split_once('/') else {
            continue;
        };
        if branch.is_empty() || branch == "HEAD" {
            continue;
        }
        if !branches.iter().any(|b| b == branch) {
            branches.push(branch.to_string());
        }
    }
    branches
}

/// Parse `git branch --format=%(refname:short)` output.
pub fn parse_local_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('('))
        .map(String::from)
        .collect()
}
