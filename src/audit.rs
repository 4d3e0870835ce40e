//! JSONL audit logging for blocked operations
//!
//! Each blocked request becomes one line:
//! `{"timestamp":...,"event_type":"bash_blocked"|"file_blocked","details":{...}}`.
//! The line is written with a single append so concurrent hook processes
//! sharing a log file never interleave.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::input::ToolRequest;
use crate::output::Decision;
use crate::rules::redact::redact_secrets;

/// Kind of blocked event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    BashBlocked,
    FileBlocked,
}

/// Event-specific payload
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AuditDetails {
    Command {
        command: String,
        rule_id: String,
        reason: String,
    },
    File {
        tool: String,
        file: String,
        rule_id: String,
        reason: String,
    },
}

/// An audit log entry
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    /// Timestamp of the decision
    pub timestamp: DateTime<Utc>,

    pub event_type: EventType,

    pub details: AuditDetails,
}

impl AuditRecord {
    /// Build the record for a blocked request; allowed requests are not
    /// audited
    pub fn for_block(request: &ToolRequest, decision: &Decision) -> Option<Self> {
        let Decision::Block { rule_id, reason } = decision else {
            return None;
        };

        let (event_type, details) = match request {
            ToolRequest::Bash { command } => (
                EventType::BashBlocked,
                AuditDetails::Command {
                    command: redact_secrets(command),
                    rule_id: rule_id.clone(),
                    reason: redact_secrets(reason),
                },
            ),
            ToolRequest::Write { file_path } | ToolRequest::Edit { file_path, .. } => (
                EventType::FileBlocked,
                AuditDetails::File {
                    tool: request.tool_name().to_string(),
                    file: file_path.clone(),
                    rule_id: rule_id.clone(),
                    reason: reason.clone(),
                },
            ),
            ToolRequest::Other { .. } => return None,
        };

        Some(Self {
            timestamp: Utc::now(),
            event_type,
            details,
        })
    }

    /// Serialize as one newline-terminated line
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// Append-only audit logger
#[derive(Debug, Clone, Default)]
pub struct AuditLogger {
    path: Option<PathBuf>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` disables logging
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }

    /// Append an audit record.
    ///
    /// The file is opened per call so that a process that never blocks never
    /// creates the log directory.
    pub fn log(&self, record: &AuditRecord) -> Result<(), std::io::Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let line = record.to_line()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        // One write call per record; O_APPEND keeps concurrent lines whole
        file.write_all(line.as_bytes())
    }

    /// Log a decision if it is a block
    pub fn log_decision(
        &self,
        request: &ToolRequest,
        decision: &Decision,
    ) -> Result<(), std::io::Error> {
        match AuditRecord::for_block(request, decision) {
            Some(record) => self.log(&record),
            None => Ok(()),
        }
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }
}
