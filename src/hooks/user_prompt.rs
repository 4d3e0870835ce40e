//! `user-prompt-submit`: block destructive requests, add context hints

use once_cell::sync::Lazy;
use std::path::Path;
use std::time::Duration;

use crate::git::uncommitted_count;
use crate::input::PromptInput;
use crate::output::HookOutcome;
use crate::quality::runner::CommandRunner;
use crate::rules::prompts::{
    ERROR_WORDS, GIT_WORDS, IMPLEMENTATION_WORDS, PROMPT_RULES, VAGUE_WORDS, VAGUE_WORD_LIMIT,
};
use crate::rules::RuleSet;

static PROMPT_SET: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::with_extras(PROMPT_RULES, &[]).unwrap_or_else(|_| RuleSet::empty()));

/// Log files whose tail is offered when the user mentions a failure
pub const ERROR_LOGS: &[&str] = &[
    "error.log",
    "npm-debug.log",
    "yarn-error.log",
    ".pytest_cache/v/cache/lastfailed",
];

const ERROR_TAIL_LINES: usize = 5;

/// Check a submitted prompt. `dir` is the project directory used for log
/// files and git.
pub fn run(raw: &str, runner: &dyn CommandRunner, dir: &Path, timeout: Duration) -> HookOutcome {
    let input = match PromptInput::from_json(raw) {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!(error = %e, "malformed prompt input, skipping");
            return HookOutcome::allow();
        }
    };

    let prompt = input.prompt.trim();
    if prompt.is_empty() {
        return HookOutcome::allow();
    }

    if let Some(rule) = PROMPT_SET.first_match(prompt) {
        tracing::warn!(rule_id = %rule.id, "blocked prompt");
        return HookOutcome::block(format!(
            "Dangerous request detected: {}\nPlease be more specific and cautious.",
            rule.reason
        ));
    }

    let hints = hints(prompt, runner, dir, timeout);
    if hints.is_empty() {
        HookOutcome::allow()
    } else {
        HookOutcome::message(hints.join("\n"))
    }
}

/// Advisory context for a prompt that was not blocked
pub fn hints(prompt: &str, runner: &dyn CommandRunner, dir: &Path, timeout: Duration) -> Vec<String> {
    let mut hints = Vec::new();

    if mentions(prompt, VAGUE_WORDS) && prompt.split_whitespace().count() < VAGUE_WORD_LIMIT {
        hints.push(
            "Vague request detected. Consider being more specific:\n  \
             - What specific functionality needs fixing?\n  \
             - What are the expected vs actual behaviors?\n  \
             - Are there error messages or symptoms?\n"
                .to_string(),
        );
    }

    if mentions(prompt, ERROR_WORDS) {
        if let Some(errors) = recent_errors(dir) {
            hints.push(format!("Recent error context:\n{}\n", errors));
        }
    }

    if mentions(prompt, IMPLEMENTATION_WORDS) {
        hints.push("Reminder: run the test suite after implementation\n".to_string());
    }

    if mentions(prompt, GIT_WORDS) {
        if let Some(count) = uncommitted_count(runner, dir, timeout).filter(|&n| n > 0) {
            hints.push(format!("Git status: {} uncommitted file(s)\n", count));
        }
    }

    hints
}

/// Whether the prompt mentions any of the words.
///
/// Phrases match as substrings; short words must be whole tokens; other
/// words match as token prefixes ("fail" matches "failing").
pub fn mentions(prompt: &str, words: &[&str]) -> bool {
    let lower = prompt.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    words.iter().any(|word| {
        if word.contains(' ') {
            lower.contains(word)
        } else if word.len() < 3 {
            tokens.contains(word)
        } else {
            tokens.iter().any(|t| t.starts_with(word))
        }
    })
}

fn recent_errors(dir: &Path) -> Option<String> {
    let sections: Vec<String> = ERROR_LOGS
        .iter()
        .filter_map(|name| {
            let bytes = std::fs::read(dir.join(name)).ok()?;
            let text = String::from_utf8_lossy(&bytes);
            let lines: Vec<&str> = text.lines().collect();
            let tail = lines[lines.len().saturating_sub(ERROR_TAIL_LINES)..].join("\n");
            (!tail.trim().is_empty()).then(|| format!("Recent errors from {}:\n{}", name, tail))
        })
        .collect();

    (!sections.is_empty()).then(|| sections.join("\n\n"))
}
