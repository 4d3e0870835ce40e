//! Dangerous phrases in submitted prompts

use crate::rules::Rule;

/// Phrases that block a prompt outright
pub const PROMPT_RULES: &[Rule] = &[
    Rule::new("delete-everything", r"delete everything", "Requesting deletion of all files"),
    Rule::new("remove-all", r"remove all", "Requesting bulk deletion"),
    Rule::new("drop-database", r"drop database", "Requesting database deletion"),
    Rule::new("format-disk", r"format disk", "Requesting disk formatting"),
];

/// Words that, in a short prompt, suggest an underspecified request
pub const VAGUE_WORDS: &[&str] = &["fix", "improve", "make better", "optimize", "enhance"];

/// Words that suggest the user is chasing a failure
pub const ERROR_WORDS: &[&str] = &["error", "fail", "bug", "broken"];

/// Words that suggest new code is about to be written
pub const IMPLEMENTATION_WORDS: &[&str] = &["add", "create", "implement", "build", "write"];

/// Words that suggest version-control work
pub const GIT_WORDS: &[&str] = &["commit", "push", "pr", "pull request"];

/// Prompts with fewer words than this are candidates for the vague hint
pub const VAGUE_WORD_LIMIT: usize = 10;
