//! Output formatting for hook responses
//!
//! A blocking hook prints `{"decision":"block","reason":...}` and exits with
//! status 2. Anything else exits 0.

use serde::Serialize;

/// Exit code that tells the host to block the operation
pub const EXIT_BLOCK: i32 = 2;

/// Exit code for everything else, including internal errors
pub const EXIT_ALLOW: i32 = 0;

/// Verdict of the guard for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Allow the operation
    Allow,

    /// Block the operation
    Block { rule_id: String, reason: String },
}

impl Decision {
    /// Create a block decision
    pub fn block(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Decision::Block {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is an allow decision
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Check if this is a block decision
    pub fn is_block(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }

    /// Get the rule ID if applicable
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Block { rule_id, .. } => Some(rule_id),
        }
    }

    /// Get the reason if applicable
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Block { reason, .. } => Some(reason),
        }
    }
}

/// JSON body printed on a block
#[derive(Debug, Serialize)]
pub struct BlockOutput {
    /// Always "block"
    pub decision: &'static str,

    /// Human-readable explanation shown to the assistant
    pub reason: String,
}

impl BlockOutput {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            decision: "block",
            reason: reason.into(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"decision":"block"}"#.to_string())
    }
}

/// What a hook run produced: an exit code and optional stdout text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutcome {
    pub exit_code: i32,
    pub stdout: Option<String>,
}

impl HookOutcome {
    /// Allow with nothing to say
    pub fn allow() -> Self {
        Self {
            exit_code: EXIT_ALLOW,
            stdout: None,
        }
    }

    /// Allow, printing advisory text
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            exit_code: EXIT_ALLOW,
            stdout: Some(text.into()),
        }
    }

    /// Block with a reason
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            exit_code: EXIT_BLOCK,
            stdout: Some(BlockOutput::new(reason).to_json()),
        }
    }

    /// Create outcome from a guard Decision
    pub fn from_decision(decision: &Decision) -> Self {
        match decision {
            Decision::Allow => Self::allow(),
            Decision::Block { reason, .. } => Self::block(reason.as_str()),
        }
    }

    pub fn is_block(&self) -> bool {
        self.exit_code == EXIT_BLOCK
    }
}
