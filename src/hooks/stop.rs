//! `stop`: end-of-task summary of loose ends

use std::path::Path;

use crate::config::QualityConfig;
use crate::git;
use crate::output::HookOutcome;
use crate::quality::runner::CommandRunner;
use crate::quality::todos::{self, TodoItem};

/// Changed files scanned for markers
pub const TODO_SCAN_LIMIT: usize = 10;

/// Markers listed individually before "... and N more"
pub const TODO_SHOWN: usize = 3;

/// Files whose presence means the project has a test setup
pub const TEST_MARKERS: &[&str] = &["package.json", "pytest.ini", "setup.py", "Cargo.toml", "go.mod"];

/// Summarize the working tree. Always exits 0.
pub fn run(raw: &str, runner: &dyn CommandRunner, config: &QualityConfig, dir: &Path) -> HookOutcome {
    if let Err(e) = serde_json::from_str::<serde_json::Value>(raw) {
        tracing::debug!(error = %e, "malformed stop input, skipping summary");
        return HookOutcome::allow();
    }

    let summary = summarize(runner, config, dir);
    if summary.is_empty() {
        HookOutcome::allow()
    } else {
        HookOutcome::message(summary.join("\n"))
    }
}

/// Summary lines for `dir`; empty when there is nothing to report
pub fn summarize(runner: &dyn CommandRunner, config: &QualityConfig, dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let timeout = config.helper_timeout();

    if let Some(count) = git::uncommitted_count(runner, dir, timeout).filter(|&n| n > 0) {
        lines.push(format!("{} uncommitted file(s)", count));
        lines.push("Consider committing your changes".to_string());
    }

    let todos = todos::scan_files(dir, &git::changed_files(runner, dir, timeout), TODO_SCAN_LIMIT);
    if !todos.is_empty() {
        lines.push(render_todos(&todos));
    }

    if let Some(marker) = test_marker(dir) {
        tracing::debug!(marker, "test setup detected");
        lines.push("Remember to run tests".to_string());
    }

    lines
}

fn render_todos(todos: &[TodoItem]) -> String {
    let mut text = format!("Found {} TODO/FIXME comment(s) in changed files:", todos.len());
    for item in todos.iter().take(TODO_SHOWN) {
        text.push_str(&format!("\n  - {}: {}: {}", item.file, item.kind, item.comment));
    }
    if todos.len() > TODO_SHOWN {
        text.push_str(&format!("\n  ... and {} more", todos.len() - TODO_SHOWN));
    }
    text
}

fn test_marker(dir: &Path) -> Option<&'static str> {
    TEST_MARKERS.iter().copied().find(|m| dir.join(m).exists())
}
