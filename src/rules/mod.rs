//! Rule tables for hookguard
//!
//! Defines dangerous command patterns, sensitive file patterns, dangerous
//! prompt phrases, and the user allowlist.

pub mod allowlist;
pub mod commands;
pub mod paths;
pub mod prompts;
pub mod redact;

use regex::{RegexSet, RegexSetBuilder};
use serde::Deserialize;

use crate::error::RuleError;

/// A built-in rule definition
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// Regex pattern to match (case-insensitive)
    pub pattern: &'static str,

    /// Human-readable reason for blocking
    pub reason: &'static str,
}

impl Rule {
    /// Create a new rule
    pub const fn new(id: &'static str, pattern: &'static str, reason: &'static str) -> Self {
        Self {
            id,
            pattern,
            reason,
        }
    }
}

/// A user-supplied rule, as read from the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSpec {
    pub id: String,
    pub pattern: String,
    pub reason: String,
}

impl From<&Rule> for RuleSpec {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.to_string(),
            pattern: rule.pattern.to_string(),
            reason: rule.reason.to_string(),
        }
    }
}

/// An ordered table of rules compiled into a single `RegexSet`.
///
/// Order is significant: when several rules match a subject, the one that
/// appears first in the table is reported.
#[derive(Debug, Clone)]
pub struct RuleSet {
    set: RegexSet,
    rules: Vec<RuleSpec>,
}

impl RuleSet {
    /// Compile an ordered list of rules
    pub fn new(rules: Vec<RuleSpec>) -> Result<Self, RuleError> {
        let set = RegexSetBuilder::new(rules.iter().map(|r| r.pattern.as_str()))
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleError::InvalidPattern {
                // RegexSet doesn't say which pattern failed, so find it
                id: rules
                    .iter()
                    .find(|r| regex::Regex::new(&r.pattern).is_err())
                    .map(|r| r.id.clone())
                    .unwrap_or_default(),
                source,
            })?;

        Ok(Self { set, rules })
    }

    /// Compile a built-in table followed by user extras
    pub fn with_extras(builtin: &[Rule], extras: &[RuleSpec]) -> Result<Self, RuleError> {
        let rules = builtin
            .iter()
            .map(RuleSpec::from)
            .chain(extras.iter().cloned())
            .collect();
        Self::new(rules)
    }

    /// An empty table that never matches
    pub fn empty() -> Self {
        Self {
            set: RegexSet::empty(),
            rules: Vec::new(),
        }
    }

    /// Return the first rule (in table order) matching the subject
    pub fn first_match(&self, subject: &str) -> Option<&RuleSpec> {
        self.set
            .matches(subject)
            .iter()
            .next()
            .and_then(|idx| self.rules.get(idx))
    }
}
