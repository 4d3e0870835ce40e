//! `pre-tool-use`: the command/path guard

use crate::audit::AuditLogger;
use crate::engine::GuardEngine;
use crate::input::HookInput;
use crate::output::HookOutcome;

/// Evaluate one raw hook request.
///
/// Only a positive rule match blocks. Empty or malformed input, and audit
/// log failures, all end in an allow.
pub fn run(raw: &str, engine: &GuardEngine, logger: &AuditLogger) -> HookOutcome {
    if raw.trim().is_empty() {
        return HookOutcome::allow();
    }

    let input = match HookInput::from_json(raw) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(error = %e, "malformed hook input, allowing");
            return HookOutcome::allow();
        }
    };

    let request = input.request();
    let decision = engine.evaluate(&request);

    if let Some(rule_id) = decision.rule_id() {
        tracing::warn!(rule_id, request = %input.summary(), "blocked");
        if let Err(e) = logger.log_decision(&request, &decision) {
            tracing::warn!(error = %e, "failed to write audit log");
        }
    } else {
        tracing::debug!(request = %input.summary(), "allowed");
    }

    HookOutcome::from_decision(&decision)
}
