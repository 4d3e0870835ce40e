//! Shell command checking
//!
//! Matches the raw command text against the dangerous command table. No
//! shell parsing: quoting and obfuscation tricks will get past it.

use crate::output::Decision;
use crate::rules::RuleSet;

/// Check a shell command against the rule table
pub fn check_command(command: &str, rules: &RuleSet) -> Decision {
    match rules.first_match(command) {
        Some(rule) => Decision::block(
            rule.id.as_str(),
            format!(
                "SECURITY BLOCK: {}\nCommand: {}\n\n\
                 This operation has been blocked for safety.\n\
                 If you need to perform this action, please do it manually.",
                rule.reason, command
            ),
        ),
        None => Decision::Allow,
    }
}
