//! Dangerous command rules for shell tool calls
//!
//! Patterns are matched case-insensitively against the raw command text.
//! This is a best-effort denylist: anything textually matching is blocked,
//! including harmless commands that happen to contain a dangerous fragment.

use crate::rules::Rule;

/// `rm` with both recursive and force flags, followed by the given target.
///
/// Other options may sit before, between or after the two flags (`-v`,
/// `--no-preserve-root`, `--`), and the target may be quoted.
macro_rules! rm_recursive_force {
    ($target:literal) => {
        concat!(
            r"\brm\s+(?:-\S+\s+)*",
            r"(?:-[a-z]*(?:r[a-z]*f|f[a-z]*r)[a-z]*",
            r"|(?:-[a-z]*r[a-z]*|--recursive)\s+(?:-\S+\s+)*(?:-[a-z]*f[a-z]*|--force)",
            r"|(?:-[a-z]*f[a-z]*|--force)\s+(?:-\S+\s+)*(?:-[a-z]*r[a-z]*|--recursive))",
            r#"(?:\s+-\S*)*\s+['"]?"#,
            $target
        )
    };
}

/// Built-in command rules, in reporting order
pub const COMMAND_RULES: &[Rule] = &[
    // Privileged deletion
    Rule::new(
        "sudo-rm",
        r"\bsudo\s+(?:-\S+\s+)*rm\b",
        "Privileged deletion (sudo rm)",
    ),
    // Filesystem destruction
    Rule::new(
        "rm-rf-root",
        rm_recursive_force!("/"),
        "Recursive deletion from the root directory",
    ),
    Rule::new(
        "rm-rf-home",
        rm_recursive_force!(r"(?:~|\$home\b|\$\{home\})"),
        "Recursive deletion of the home directory",
    ),
    Rule::new(
        "rm-rf-wildcard",
        rm_recursive_force!(r"(?:\./)?\*"),
        "Recursive deletion of all files (wildcard)",
    ),
    // Permissions
    Rule::new(
        "chmod-recursive-777",
        r"\bchmod\s+(?:-\S+\s+)*-[a-z]*r[a-z]*\s+(?:-\S+\s+)*0?777\b",
        "Recursively setting world-writable permissions",
    ),
    Rule::new(
        "chmod-777",
        r"\bchmod\s+(?:-\S+\s+)*(?:0?777\b|(?:a|ugo)\+rwx\b)",
        "Setting world-writable permissions",
    ),
    // Disk destruction
    Rule::new(
        "dd-device",
        r"\bdd\s+.*\bof=/dev/(?:sd|hd|vd|xvd|nvme|mmcblk|disk|rdisk|mapper|md|loop)",
        "Raw write to a device file",
    ),
    Rule::new(
        "redirect-device",
        r">\s*/dev/(?:sd|hd|vd|xvd|nvme|mmcblk|disk|rdisk)[a-z0-9]*",
        "Shell redirection into a device file",
    ),
    Rule::new(
        "mkfs",
        r"\b(?:mkfs(?:\.[a-z0-9]+)?|mke2fs|mkswap|newfs(?:_[a-z]+)?)\b",
        "Formatting a filesystem",
    ),
    // Resource exhaustion
    Rule::new(
        "fork-bomb",
        r":\s*\(\s*\)\s*\{.*:\s*\|\s*:.*&",
        "Fork bomb detected",
    ),
    // Remote code execution
    Rule::new(
        "curl-pipe-shell",
        r"\bcurl\b.*\|\s*(?:sudo\s+)?(?:ba|z|da|k|fi)?sh\b",
        "Piping a remote script directly to a shell",
    ),
    Rule::new(
        "wget-pipe-shell",
        r"\bwget\b.*\|\s*(?:sudo\s+)?(?:ba|z|da|k|fi)?sh\b",
        "Piping a remote script directly to a shell",
    ),
];
