//! `post-tool-use`: format and lint files the assistant just wrote

use std::path::Path;

use crate::config::QualityConfig;
use crate::input::{HookInput, ToolKind};
use crate::output::HookOutcome;
use crate::quality::{self, runner::CommandRunner, runner::ToolCache};

/// Run quality checks for a Write/Edit request. Never blocks.
pub fn run(raw: &str, runner: &dyn CommandRunner, config: &QualityConfig) -> HookOutcome {
    let input = match HookInput::from_json(raw) {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!(error = %e, "malformed hook input, skipping quality checks");
            return HookOutcome::allow();
        }
    };

    let request = input.request();
    if !matches!(request.kind(), ToolKind::Write | ToolKind::Edit) {
        return HookOutcome::allow();
    }

    let Some(file_path) = request.file_path().filter(|p| !p.is_empty()) else {
        return HookOutcome::allow();
    };
    let path = Path::new(file_path);
    if !path.exists() {
        return HookOutcome::allow();
    }

    let mut cache = ToolCache::new(runner);
    let report = quality::check_file(path, &mut cache, config);
    tracing::info!(
        file = file_path,
        formatted_with = report.formatted_with,
        lint_tool = report.lint.as_ref().map(|l| l.tool),
        "quality checks finished"
    );

    if report.is_empty() {
        HookOutcome::allow()
    } else {
        HookOutcome::message(report.render())
    }
}
