//! Post-write quality checks: formatting and linting
//!
//! Tools are optional. A missing, failing, or timed-out tool is skipped;
//! nothing here can block the host.

pub mod runner;
pub mod todos;
pub mod tools;

use std::path::Path;
use std::time::Duration;

use crate::config::QualityConfig;
use runner::ToolCache;
use tools::ToolSpec;

/// Linter complaint for a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    pub tool: &'static str,
    pub output: String,
}

/// What the quality checks did to one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityReport {
    /// Formatter that rewrote the file
    pub formatted_with: Option<&'static str>,

    /// First linter that reported problems
    pub lint: Option<LintIssue>,
}

impl QualityReport {
    pub fn is_empty(&self) -> bool {
        self.formatted_with.is_none() && self.lint.is_none()
    }

    /// Human-readable summary for the transcript
    pub fn render(&self) -> String {
        let mut sections = Vec::new();
        if let Some(tool) = self.formatted_with {
            sections.push(format!("Formatted with {}", tool));
        }
        if let Some(issue) = &self.lint {
            sections.push(format!("Linting issues found ({}):\n{}", issue.tool, issue.output));
        }

        let rule = "=".repeat(60);
        format!(
            "\n{rule}\nAutomated Quality Checks\n{rule}\n{}\n{rule}",
            sections.join("\n\n")
        )
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Run the first available formatter that succeeds
pub fn format_file(path: &Path, cache: &mut ToolCache<'_>, timeout: Duration) -> Option<&'static str> {
    let file = path.to_str()?;
    let candidates = tools::formatters_for(extension(path)?);

    for spec in candidates {
        if !cache.is_available(spec.program) {
            continue;
        }
        match run_tool(spec, file, cache, timeout) {
            Some(output) if output.success => return Some(spec.name),
            Some(_) => tracing::debug!(tool = spec.name, "formatter failed, trying next"),
            None => {}
        }
    }

    None
}

/// Run linters in order, reporting the first one that fails with output
pub fn lint_file(
    path: &Path,
    cache: &mut ToolCache<'_>,
    timeout: Duration,
    max_output: usize,
) -> Option<LintIssue> {
    let file = path.to_str()?;
    let candidates = tools::linters_for(extension(path)?);

    for spec in candidates {
        if !cache.is_available(spec.program) {
            continue;
        }
        let Some(output) = run_tool(spec, file, cache, timeout) else {
            continue;
        };
        let text = output.combined();
        if !output.success && !text.is_empty() {
            return Some(LintIssue {
                tool: spec.name,
                output: text.chars().take(max_output).collect(),
            });
        }
    }

    None
}

fn run_tool(
    spec: &ToolSpec,
    file: &str,
    cache: &ToolCache<'_>,
    timeout: Duration,
) -> Option<runner::CommandOutput> {
    match cache.runner().run(spec.program, &spec.args_for(file), timeout) {
        Ok(output) => Some(output),
        Err(e) => {
            tracing::warn!(tool = spec.name, error = %e, "quality tool did not complete");
            None
        }
    }
}

/// Format then lint a file, as configured
pub fn check_file(path: &Path, cache: &mut ToolCache<'_>, config: &QualityConfig) -> QualityReport {
    let formatted_with = if config.format {
        format_file(path, cache, config.format_timeout())
    } else {
        None
    };

    let lint = if config.lint {
        lint_file(path, cache, config.lint_timeout(), config.max_lint_output)
    } else {
        None
    };

    QualityReport {
        formatted_with,
        lint,
    }
}
