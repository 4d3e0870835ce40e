//! Allowlist handling for bypassing guard rules
//!
//! Supports user-defined patterns that should bypass the command and path
//! guards. Entries can be scoped to one tool or apply to all of them.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::input::ToolKind;

/// An allowlist entry
#[derive(Debug, Clone, Deserialize)]
pub struct AllowEntry {
    /// Regex pattern to match against the command or file path
    pub pattern: String,

    /// Human-readable reason for allowing
    pub reason: String,

    /// Optional tool restriction: "bash", "write", "edit", or "file"
    /// (write and edit). Unset applies to all tools.
    #[serde(default)]
    pub tool: Option<String>,
}

/// The allowlist file structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AllowlistConfig {
    /// List of allowed patterns
    #[serde(default)]
    pub allow: Vec<AllowEntry>,
}

/// Compiled allowlist for efficient matching
#[derive(Debug, Clone, Default)]
pub struct CompiledAllowlist {
    /// General patterns (apply to all tools)
    general: Vec<(Regex, String)>,

    /// Shell command patterns
    bash: Vec<(Regex, String)>,

    /// Write-specific patterns
    write: Vec<(Regex, String)>,

    /// Edit-specific patterns
    edit: Vec<(Regex, String)>,
}

impl CompiledAllowlist {
    /// Create an empty allowlist
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and compile allowlist from file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AllowlistConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_config(&config)
    }

    /// Compile from config
    pub fn from_config(config: &AllowlistConfig) -> Result<Self, ConfigError> {
        let mut allowlist = Self::empty();

        for entry in &config.allow {
            let regex = Regex::new(&entry.pattern).map_err(|source| ConfigError::AllowPattern {
                pattern: entry.pattern.clone(),
                source,
            })?;
            let item = (regex, entry.reason.clone());

            match entry.tool.as_deref().map(str::to_ascii_lowercase).as_deref() {
                Some("bash") => allowlist.bash.push(item),
                Some("write") => allowlist.write.push(item),
                Some("edit") => allowlist.edit.push(item),
                Some("file") => {
                    allowlist.write.push(item.clone());
                    allowlist.edit.push(item);
                }
                _ => allowlist.general.push(item),
            }
        }

        Ok(allowlist)
    }

    /// Check if a subject is allowlisted for a tool, returning the reason
    pub fn matches(&self, tool: ToolKind, subject: &str) -> Option<&str> {
        let specific: &[(Regex, String)] = match tool {
            ToolKind::Bash => &self.bash,
            ToolKind::Write => &self.write,
            ToolKind::Edit => &self.edit,
            ToolKind::Other => &[],
        };

        specific
            .iter()
            .chain(self.general.iter())
            .find(|(regex, _)| regex.is_match(subject))
            .map(|(_, reason)| reason.as_str())
    }

    /// Check if the allowlist has no entries
    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.bash.is_empty() && self.write.is_empty() && self.edit.is_empty()
    }
}
