//! Error types for hookguard
//!
//! None of these ever turn into a blocking exit code; the binary logs them
//! and falls back to defaults.

use std::path::PathBuf;

use thiserror::Error;

/// A rule table could not be compiled
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid pattern in rule '{id}': {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },
}

/// A configuration or allowlist file could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("invalid allowlist pattern '{pattern}': {source}")]
    AllowPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// An external helper command failed to produce a result
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {}s", .timeout.as_secs_f32())]
    Timeout {
        program: String,
        timeout: std::time::Duration,
    },

    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
