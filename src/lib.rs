//! hookguard - lifecycle hooks for AI coding assistants
//!
//! The host runs one hook per event, passing a JSON request on stdin. The
//! exit code is the verdict: 2 blocks the action, anything else lets it
//! proceed.
//!
//! # Features
//!
//! - **Command guard**: blocks destructive shell commands (`rm -rf /`, `mkfs`, fork bombs, `curl | sh`)
//! - **Path guard**: blocks writes to secrets, keys, and system directories, symlinks and `..` resolved
//! - **Quality checks**: formats and lints files after they are written
//! - **Prompt checks**: blocks destructive requests and adds context hints
//! - **Stop summary**: reports uncommitted work and new TODOs
//! - **Audit logging**: NDJSON record of every block
//!
//! # Example
//!
//! ```
//! use hookguard::{GuardEngine, HookInput};
//!
//! let engine = GuardEngine::default();
//!
//! let input = r#"{"toolName":"Bash","parameters":{"command":"rm -rf /"}}"#;
//! let hook_input = HookInput::from_json(input).unwrap();
//!
//! let decision = engine.check(&hook_input);
//! assert!(decision.is_block());
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod git;
pub mod hooks;
pub mod input;
pub mod output;
pub mod quality;
pub mod rules;

// Re-exports for convenience
pub use config::Config;
pub use engine::{evaluate_command, evaluate_file_operation, GuardEngine};
pub use input::{HookInput, ToolKind, ToolRequest};
pub use output::{Decision, HookOutcome};
