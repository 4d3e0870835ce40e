//! Sensitive file and directory rules for write/edit tool calls

use crate::rules::Rule;

/// Filenames that commonly hold credentials, keys, or secrets.
///
/// Matched case-insensitively against the raw path as given by the tool.
pub const SENSITIVE_FILE_RULES: &[Rule] = &[
    Rule::new("env-file", r"\.env$", "Environment file may contain secrets"),
    Rule::new("env-variant", r"\.env\.", "Environment file variant may contain secrets"),
    Rule::new("pem-file", r"\.pem$", "PEM certificate/key file"),
    Rule::new("key-file", r"\.key$", "Private key file"),
    Rule::new("credentials-file", r"credentials", "Credentials file"),
    Rule::new("secrets-file", r"secrets", "Secrets file"),
    Rule::new("ssh-rsa-key", r"id_rsa", "SSH private key file"),
    Rule::new("ssh-dsa-key", r"id_dsa", "SSH private key file"),
    Rule::new("p12-file", r"\.p12$", "PKCS#12 certificate file"),
    Rule::new("pfx-file", r"\.pfx$", "PKCS#12 certificate file"),
    Rule::new("config-json", r"config\.json", "Configuration file may contain credentials"),
];

/// System directories that must never be written by the assistant
pub const SENSITIVE_DIRS: &[&str] = &[
    "/etc",
    "/bin",
    "/sbin",
    "/usr/bin",
    "/usr/sbin",
    "/var",
    "/boot",
    "/sys",
    "/proc",
];
