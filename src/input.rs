//! Input parsing for the hook JSON format
//!
//! Parses the JSON object the host writes to the hook's stdin. Both the
//! camelCase form (`toolName` / `parameters`) and the snake_case form
//! (`tool_name` / `tool_input`) are accepted.

use serde::Deserialize;
use serde_json::Value;

/// Tool-use request as sent to `pre-tool-use` and `post-tool-use`
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Edit", "Write")
    #[serde(alias = "toolName", default)]
    pub tool_name: String,

    /// Tool-specific input parameters
    #[serde(alias = "parameters", default)]
    pub tool_input: Value,
}

/// Coarse tool category, used for allowlist scoping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Bash,
    Write,
    Edit,
    Other,
}

/// A tool-use request, reduced to what the guards need
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    /// Shell command execution
    Bash { command: String },

    /// Whole-file write
    Write { file_path: String },

    /// In-place edit (Edit, MultiEdit, NotebookEdit)
    Edit { tool_name: String, file_path: String },

    /// Any other tool - passes through unchecked
    Other { tool_name: String },
}

impl ToolRequest {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolRequest::Bash { .. } => ToolKind::Bash,
            ToolRequest::Write { .. } => ToolKind::Write,
            ToolRequest::Edit { .. } => ToolKind::Edit,
            ToolRequest::Other { .. } => ToolKind::Other,
        }
    }

    /// Target file of a write/edit request
    pub fn file_path(&self) -> Option<&str> {
        match self {
            ToolRequest::Write { file_path } | ToolRequest::Edit { file_path, .. } => {
                Some(file_path)
            }
            _ => None,
        }
    }

    pub fn tool_name(&self) -> &str {
        match self {
            ToolRequest::Bash { .. } => "Bash",
            ToolRequest::Write { .. } => "Write",
            ToolRequest::Edit { tool_name, .. } | ToolRequest::Other { tool_name } => tool_name,
        }
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn param(&self, key: &str) -> String {
        self.tool_input
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Classify the request by tool name
    pub fn request(&self) -> ToolRequest {
        match self.tool_name.as_str() {
            "Bash" => ToolRequest::Bash {
                command: self.param("command"),
            },
            "Write" => ToolRequest::Write {
                file_path: self.param("file_path"),
            },
            "Edit" | "MultiEdit" => ToolRequest::Edit {
                tool_name: self.tool_name.clone(),
                file_path: self.param("file_path"),
            },
            "NotebookEdit" => {
                let mut file_path = self.param("notebook_path");
                if file_path.is_empty() {
                    file_path = self.param("file_path");
                }
                ToolRequest::Edit {
                    tool_name: self.tool_name.clone(),
                    file_path,
                }
            }
            _ => ToolRequest::Other {
                tool_name: self.tool_name.clone(),
            },
        }
    }

    /// Get a summary of the input for logging
    pub fn summary(&self) -> String {
        match self.request() {
            ToolRequest::Bash { command } => {
                let truncated: String = command.chars().take(100).collect();
                if truncated.len() < command.len() {
                    format!("Bash: {}...", truncated)
                } else {
                    format!("Bash: {}", command)
                }
            }
            ToolRequest::Write { file_path } => format!("Write: {}", file_path),
            ToolRequest::Edit {
                tool_name,
                file_path,
            } => format!("{}: {}", tool_name, file_path),
            ToolRequest::Other { tool_name } => format!("Unchecked tool: {}", tool_name),
        }
    }
}

/// Prompt submission as sent to `user-prompt-submit`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PromptInput {
    #[serde(alias = "userPrompt", default)]
    pub prompt: String,
}

impl PromptInput {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
