//! Git queries shared by the informational hooks
//!
//! Every helper returns `None` (or an empty list) when git is missing, times
//! out, or the directory is not a repository.

use std::path::Path;
use std::time::Duration;

use crate::quality::runner::CommandRunner;

/// Recent commits listed by [`recent_commits`]
pub const RECENT_COMMITS: usize = 3;

/// Trimmed stdout of `git -C <dir> <args>`, or `None` if git failed
pub fn git_output(runner: &dyn CommandRunner, dir: &Path, args: &[&str], timeout: Duration) -> Option<String> {
    let dir = dir.to_str()?;
    let mut full = vec!["-C", dir];
    full.extend_from_slice(args);

    match runner.run("git", &full, timeout) {
        Ok(output) if output.success => Some(output.stdout.trim_end().to_string()),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, command = ?args, "git unavailable");
            None
        }
    }
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|l| !l.trim().is_empty())
}

/// Count of `git status --short` lines
pub fn uncommitted_count(runner: &dyn CommandRunner, dir: &Path, timeout: Duration) -> Option<usize> {
    git_output(runner, dir, &["status", "--short"], timeout).map(|out| non_empty_lines(&out).count())
}

/// Files changed against `HEAD`, relative to the repository root
pub fn changed_files(runner: &dyn CommandRunner, dir: &Path, timeout: Duration) -> Vec<String> {
    git_output(runner, dir, &["diff", "--name-only", "HEAD"], timeout)
        .map(|out| non_empty_lines(&out).map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn current_branch(runner: &dyn CommandRunner, dir: &Path, timeout: Duration) -> Option<String> {
    git_output(runner, dir, &["rev-parse", "--abbrev-ref", "HEAD"], timeout).filter(|b| !b.is_empty())
}

/// Last [`RECENT_COMMITS`] commits in `--oneline` form
pub fn recent_commits(runner: &dyn CommandRunner, dir: &Path, timeout: Duration) -> Vec<String> {
    let count = format!("-{}", RECENT_COMMITS);
    git_output(runner, dir, &["log", &count, "--oneline"], timeout)
        .map(|out| non_empty_lines(&out).take(RECENT_COMMITS).map(str::to_string).collect())
        .unwrap_or_default()
}

/// Commits on the current branch not yet on its upstream; `None` without one
pub fn unpushed_count(runner: &dyn CommandRunner, dir: &Path, timeout: Duration) -> Option<usize> {
    git_output(runner, dir, &["log", "@{u}..", "--oneline"], timeout).map(|out| non_empty_lines(&out).count())
}
