//! Secret redaction for audit records
//!
//! Each rule captures the credential value in a `secret` group. Only that
//! group is replaced, so `API_KEY=...` keeps its key name and becomes
//! `API_KEY=[REDACTED:api-key]`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::rules::Rule;

/// Credential patterns, applied in order
pub const SECRET_RULES: &[Rule] = &[
    Rule::new(
        "api-key",
        r#"(?i)\bapi[_-]?key\s*[=:]\s*['"]?(?P<secret>[a-z0-9_\-]{16,})"#,
        "API key assignment",
    ),
    Rule::new(
        "secret-key",
        r#"(?i)\bsecret[_-]?key\s*[=:]\s*['"]?(?P<secret>[a-z0-9_\-]{16,})"#,
        "Secret key assignment",
    ),
    Rule::new(
        "access-token",
        r#"(?i)\baccess[_-]?token\s*[=:]\s*['"]?(?P<secret>[a-z0-9_\-.]{16,})"#,
        "Access token assignment",
    ),
    Rule::new("aws-access-key", r"\b(?P<secret>AKIA[0-9A-Z]{16})\b", "AWS access key id"),
    Rule::new(
        "aws-secret-key",
        r#"(?i)\baws[_-]?secret[_-]?access[_-]?key\s*[=:]\s*['"]?(?P<secret>[0-9a-z/+]{20,})"#,
        "AWS secret access key",
    ),
    Rule::new("github-token", r"\b(?P<secret>gh[pousr]_[A-Za-z0-9_]{36,})", "GitHub token"),
    Rule::new("github-pat", r"\b(?P<secret>github_pat_[A-Za-z0-9_]{22,})", "GitHub fine-grained token"),
    Rule::new(
        "bearer-token",
        r"(?i)\bauthorization:\s*bearer\s+(?P<secret>[a-z0-9._~+/=\-]{16,})",
        "Bearer authorization header",
    ),
    Rule::new("sk-key", r"\b(?P<secret>sk-[A-Za-z0-9_\-]{20,})", "Provider API key"),
    Rule::new(
        "password",
        r#"(?i)\b(?:password|passwd|pwd)\s*[=:]\s*(?P<secret>'[^']*'|"[^"]*"|[^\s'"]+)"#,
        "Password assignment",
    ),
];

static COMPILED: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SECRET_RULES
        .iter()
        .map(|rule| (rule.id, Regex::new(rule.pattern).unwrap()))
        .collect()
});

/// Replace every credential value in `text` with `[REDACTED:<rule id>]`
pub fn redact_secrets(text: &str) -> String {
    let mut redacted = text.to_string();

    for (id, pattern) in COMPILED.iter() {
        if !pattern.is_match(&redacted) {
            continue;
        }
        redacted = pattern
            .replace_all(&redacted, |caps: &Captures<'_>| mask(caps, id))
            .into_owned();
    }

    redacted
}

/// The whole match with its `secret` group swapped for a marker
fn mask(caps: &Captures<'_>, id: &str) -> String {
    let marker = format!("[REDACTED:{}]", id);
    let (Some(whole), Some(secret)) = (caps.get(0), caps.name("secret")) else {
        return marker;
    };
    let text = whole.as_str();
    let start = secret.start() - whole.start();
    let end = secret.end() - whole.start();
    format!("{}{}{}", &text[..start], marker, &text[end..])
}
