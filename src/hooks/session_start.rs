//! `session-start`: project and git context for a new session

use std::path::Path;

use crate::config::QualityConfig;
use crate::git;
use crate::output::HookOutcome;
use crate::quality::runner::CommandRunner;

/// Describe the project. Always exits 0.
pub fn run(raw: &str, runner: &dyn CommandRunner, config: &QualityConfig, dir: &Path) -> HookOutcome {
    // The host may send an empty body here
    if !raw.trim().is_empty() {
        if let Err(e) = serde_json::from_str::<serde_json::Value>(raw) {
            tracing::debug!(error = %e, "malformed session-start input, skipping");
            return HookOutcome::allow();
        }
    }

    HookOutcome::message(summarize(runner, config, dir).join("\n"))
}

/// Context lines for `dir`
pub fn summarize(runner: &dyn CommandRunner, config: &QualityConfig, dir: &Path) -> Vec<String> {
    let timeout = config.helper_timeout();
    let project = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());

    let mut lines = vec![format!("Project: {}", project)];

    let Some(branch) = git::current_branch(runner, dir, timeout) else {
        lines.push("Git: not a repository".to_string());
        return lines;
    };
    lines.push(format!("Branch: {}", branch));

    if let Some(count) = git::uncommitted_count(runner, dir, timeout) {
        lines.push(format!("Uncommitted files: {}", count));
    }
    if let Some(count) = git::unpushed_count(runner, dir, timeout) {
        lines.push(format!("Unpushed commits: {}", count));
    }

    let commits = git::recent_commits(runner, dir, timeout);
    if !commits.is_empty() {
        lines.push("Recent commits:".to_string());
        lines.extend(commits.iter().map(|c| format!("  - {}", c)));
    }

    lines
}
