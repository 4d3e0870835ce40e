//! Guard engine for hookguard
//!
//! Routes each tool request to the command or path checker.

pub mod command;
pub mod path;

use once_cell::sync::Lazy;
use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::ConfigError;
use crate::input::{HookInput, ToolRequest};
use crate::output::Decision;
use crate::rules::allowlist::CompiledAllowlist;
use crate::rules::commands::COMMAND_RULES;
use crate::rules::paths::{SENSITIVE_DIRS, SENSITIVE_FILE_RULES};
use crate::rules::RuleSet;

/// Environment variable that disables all checks
pub const DISABLED_ENV: &str = "HOOKGUARD_DISABLED";

/// The command/path guard
#[derive(Debug, Clone)]
pub struct GuardEngine {
    command_rules: RuleSet,
    file_rules: RuleSet,
    sensitive_dirs: Vec<PathBuf>,
    allowlist: CompiledAllowlist,
    disabled: bool,
}

impl Default for GuardEngine {
    /// Built-in rules only, no allowlist
    fn default() -> Self {
        Self {
            command_rules: RuleSet::with_extras(COMMAND_RULES, &[])
                .unwrap_or_else(|_| RuleSet::empty()),
            file_rules: RuleSet::with_extras(SENSITIVE_FILE_RULES, &[])
                .unwrap_or_else(|_| RuleSet::empty()),
            sensitive_dirs: SENSITIVE_DIRS.iter().map(PathBuf::from).collect(),
            allowlist: CompiledAllowlist::empty(),
            disabled: false,
        }
    }
}

impl GuardEngine {
    /// Create a guard from configuration.
    ///
    /// Fails if a user-supplied rule or the allowlist does not compile; the
    /// caller decides whether to fall back to [`GuardEngine::default`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let command_rules = RuleSet::with_extras(COMMAND_RULES, &config.guard.command_rules)?;
        let file_rules = RuleSet::with_extras(SENSITIVE_FILE_RULES, &config.guard.file_rules)?;

        let sensitive_dirs = SENSITIVE_DIRS
            .iter()
            .map(PathBuf::from)
            .chain(config.guard.sensitive_dirs.iter().map(|d| Config::expand_path(d)))
            .collect();

        let allowlist = match config.allowlist_path() {
            Some(path) if path.exists() => {
                let allowlist = CompiledAllowlist::from_file(&path)?;
                if allowlist.is_empty() {
                    tracing::debug!(path = %path.display(), "allowlist has no entries");
                }
                allowlist
            }
            _ => CompiledAllowlist::empty(),
        };

        Ok(Self {
            command_rules,
            file_rules,
            sensitive_dirs,
            allowlist,
            disabled: config.general.disabled,
        })
    }

    /// Replace the allowlist
    pub fn with_allowlist(mut self, allowlist: CompiledAllowlist) -> Self {
        self.allowlist = allowlist;
        self
    }

    /// Check if the guard is disabled via config or environment
    pub fn is_disabled(&self) -> bool {
        self.disabled || env::var_os(DISABLED_ENV).is_some_and(|v| env_flag_enabled(&v))
    }

    /// Main entry point: check a parsed hook input
    pub fn check(&self, input: &HookInput) -> Decision {
        self.evaluate(&input.request())
    }

    /// Route a request to the matching checker
    pub fn evaluate(&self, request: &ToolRequest) -> Decision {
        if self.is_disabled() {
            tracing::debug!("guard disabled, allowing");
            return Decision::Allow;
        }

        let subject = match request {
            ToolRequest::Bash { command } => command.as_str(),
            ToolRequest::Write { file_path } | ToolRequest::Edit { file_path, .. } => {
                file_path.as_str()
            }
            ToolRequest::Other { tool_name } => {
                tracing::trace!(tool = %tool_name, "tool not guarded");
                return Decision::Allow;
            }
        };

        if let Some(reason) = self.allowlist.matches(request.kind(), subject) {
            tracing::info!(tool = request.tool_name(), subject, reason, "allowlisted");
            return Decision::Allow;
        }

        match request {
            ToolRequest::Bash { command } => self.evaluate_command(command),
            _ => self.evaluate_file_operation(subject),
        }
    }

    /// Check a shell command
    pub fn evaluate_command(&self, command: &str) -> Decision {
        command::check_command(command, &self.command_rules)
    }

    /// Check a write/edit target
    pub fn evaluate_file_operation(&self, target_path: &str) -> Decision {
        path::check_path(target_path, &self.file_rules, &self.sensitive_dirs)
    }
}

/// `1`, `true`, `yes` and other non-empty values turn a flag on; empty,
/// `0` and `false` (any case) leave it off
fn env_flag_enabled(value: &OsStr) -> bool {
    let value = value.to_string_lossy().trim().to_ascii_lowercase();
    !matches!(value.as_str(), "" | "0" | "false")
}

static BUILTIN: Lazy<GuardEngine> = Lazy::new(GuardEngine::default);

/// Check a shell command against the built-in rules
pub fn evaluate_command(command: &str) -> Decision {
    BUILTIN.evaluate_command(command)
}

/// Check a write/edit target against the built-in rules
pub fn evaluate_file_operation(target_path: &str) -> Decision {
    BUILTIN.evaluate_file_operation(target_path)
}
