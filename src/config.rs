//! Configuration loading for hookguard
//!
//! Supports TOML configuration with embedded defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::rules::RuleSpec;

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Skip all guard checks (blocked events are no longer possible)
    pub disabled: bool,

    /// Enable audit logging of blocked operations
    pub audit_log: bool,

    /// Path to audit log file (relative paths are relative to the project)
    pub audit_path: Option<String>,

    /// Default tracing filter when `HOOKGUARD_LOG` is unset
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            audit_log: true,
            audit_path: Some(".claude/logs/security.log".to_string()),
            log_level: "warn".to_string(),
        }
    }
}

/// Override configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverrideConfig {
    /// Path to allowlist file
    pub allowlist_file: Option<String>,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            allowlist_file: Some("~/.claude/hookguard/allow.toml".to_string()),
        }
    }
}

/// Guard rule extensions, appended after the built-in tables
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GuardConfig {
    /// Extra dangerous command rules
    pub command_rules: Vec<RuleSpec>,

    /// Extra sensitive file rules
    pub file_rules: Vec<RuleSpec>,

    /// Extra protected directories (absolute, `~/` expanded)
    pub sensitive_dirs: Vec<String>,
}

/// Post-tool-use quality check configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Run formatters on written files
    pub format: bool,

    /// Run linters on written files
    pub lint: bool,

    /// Timeout for a single formatter run, in seconds
    pub format_timeout_secs: u64,

    /// Timeout for a single linter run, in seconds
    pub lint_timeout_secs: u64,

    /// Timeout for git and other helper commands, in seconds
    pub helper_timeout_secs: u64,

    /// Maximum characters of linter output to report
    pub max_lint_output: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            format: true,
            lint: true,
            format_timeout_secs: 10,
            lint_timeout_secs: 15,
            helper_timeout_secs: 5,
            max_lint_output: 500,
        }
    }
}

impl QualityConfig {
    pub fn format_timeout(&self) -> Duration {
        Duration::from_secs(self.format_timeout_secs)
    }

    pub fn lint_timeout(&self) -> Duration {
        Duration::from_secs(self.lint_timeout_secs)
    }

    pub fn helper_timeout(&self) -> Duration {
        Duration::from_secs(self.helper_timeout_secs)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub overrides: OverrideConfig,
    pub guard: GuardConfig,
    pub quality: QualityConfig,
}

impl Config {
    /// Standard config locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        [
            // Project config
            Some(PathBuf::from(".claude/hookguard.toml")),
            // User-specific config
            dirs::home_dir().map(|p| p.join(".claude/hookguard/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/hookguard/config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load configuration from the first standard location that exists, or
    /// use defaults when none does
    pub fn load() -> Result<Self, ConfigError> {
        match Self::search_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded), if audit logging is on
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_deref().map(Self::expand_path)
    }

    /// Get the allowlist file path (expanded)
    pub fn allowlist_path(&self) -> Option<PathBuf> {
        self.overrides.allowlist_file.as_deref().map(Self::expand_path)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
disabled = false
audit_log = true
audit_path = ".claude/logs/security.log"
log_level = "warn"

[overrides]
allowlist_file = "~/.claude/hookguard/allow.toml"

[guard]
command_rules = []
file_rules = []
sensitive_dirs = []

[quality]
format = true
lint = true
format_timeout_secs = 10
lint_timeout_secs = 15
helper_timeout_secs = 5
max_lint_output = 500
"#;
