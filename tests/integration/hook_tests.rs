//! End-to-end tests of the hookguard binary: stdin in, exit code out

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Project {
    dir: TempDir,
    config: PathBuf,
}

impl Project {
    fn new() -> Self {
        Self::with_config("")
    }

    /// A project whose config logs to `audit.log` and appends `extra`
    fn with_config(extra: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("hookguard.toml");
        std::fs::write(
            &config,
            format!(
                "[general]\naudit_path = '{}'\n{}",
                dir.path().join("audit.log").display(),
                extra
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn audit_lines(&self) -> Vec<serde_json::Value> {
        std::fs::read_to_string(self.path().join("audit.log"))
            .unwrap_or_default()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[allow(deprecated)]
    fn hook(&self, args: &[&str], stdin: &str) -> assert_cmd::assert::Assert {
        Command::cargo_bin("hookguard")
            .unwrap()
            .current_dir(self.path())
            .env_remove("HOOKGUARD_DISABLED")
            .env_remove("HOOKGUARD_LOG")
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .write_stdin(stdin.to_string())
            .assert()
    }
}

fn bash(command: &str) -> String {
    serde_json::json!({"toolName": "Bash", "parameters": {"command": command}}).to_string()
}

// ============================================================================
// pre-tool-use
// ============================================================================

#[test]
fn test_dangerous_command_exits_2() {
    let project = Project::new();
    project
        .hook(&["pre-tool-use"], &bash("rm -rf /"))
        .code(2)
        .stdout(predicate::str::contains(r#""decision":"block""#));

    let lines = project.audit_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["event_type"], "bash_blocked");
    assert_eq!(lines[0]["details"]["rule_id"], "rm-rf-root");
}

#[test]
fn test_safe_command_exits_0_silently() {
    let project = Project::new();
    project
        .hook(&["pre-tool-use"], &bash("git status"))
        .code(0)
        .stdout(predicate::str::is_empty());
    assert!(project.audit_lines().is_empty());
}

#[test]
fn test_subcommand_defaults_to_pre_tool_use() {
    let project = Project::new();
    project.hook(&[], &bash(":(){ :|:& };:")).code(2);
}

#[test]
fn test_sensitive_write_blocked_and_audited() {
    let project = Project::new();
    let input = serde_json::json!({
        "tool_name": "Write",
        "tool_input": {"file_path": "/project/.env", "content": "KEY=1"}
    });
    project.hook(&["pre-tool-use"], &input.to_string()).code(2);

    let lines = project.audit_lines();
    assert_eq!(lines[0]["event_type"], "file_blocked");
    assert_eq!(lines[0]["details"]["file"], "/project/.env");
    assert_eq!(lines[0]["details"]["tool"], "Write");
}

#[test]
fn test_malformed_input_fails_open() {
    let project = Project::new();
    for raw in ["", "not json", r#"{"toolName": "Bash", "parameters": "#] {
        project.hook(&["pre-tool-use"], raw).code(0);
    }
}

#[allow(deprecated)]
#[test]
fn test_disabled_env_allows_everything() {
    let project = Project::new();
    Command::cargo_bin("hookguard")
        .unwrap()
        .current_dir(project.path())
        .env("HOOKGUARD_DISABLED", "1")
        .arg("--config")
        .arg(&project.config)
        .write_stdin(bash("rm -rf /"))
        .assert()
        .code(0);
}

#[allow(deprecated)]
#[test]
fn test_disabled_env_off_values_still_block() {
    let project = Project::new();
    for value in ["0", "false", ""] {
        Command::cargo_bin("hookguard")
            .unwrap()
            .current_dir(project.path())
            .env("HOOKGUARD_DISABLED", value)
            .arg("--config")
            .arg(&project.config)
            .write_stdin(bash("rm -rf /"))
            .assert()
            .code(2);
    }
}

#[test]
fn test_allowlisted_command_passes() {
    let dir = TempDir::new().unwrap();
    let allow = dir.path().join("allow.toml");
    std::fs::write(
        &allow,
        "[[allow]]\npattern = '^rm -rf /tmp/scratch$'\nreason = 'scratch space'\ntool = 'bash'\n",
    )
    .unwrap();

    let project = Project::with_config(&format!("\n[overrides]\nallowlist_file = '{}'\n", allow.display()));
    project.hook(&["pre-tool-use"], &bash("rm -rf /tmp/scratch")).code(0);
    project.hook(&["pre-tool-use"], &bash("rm -rf /")).code(2);
}

#[test]
fn test_extra_command_rule_from_config() {
    let project = Project::with_config(
        "\n[[guard.command_rules]]\nid = 'terraform-destroy'\npattern = 'terraform\\s+destroy'\nreason = 'Destroying infrastructure'\n",
    );
    project
        .hook(&["pre-tool-use"], &bash("terraform destroy -auto-approve"))
        .code(2)
        .stdout(predicate::str::contains("Destroying infrastructure"));
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let project = Project::new();
    std::fs::write(&project.config, "[general\nbroken").unwrap();
    project
        .hook(&["pre-tool-use"], &bash("rm -rf ~"))
        .code(2)
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn test_unknown_flag_does_not_block() {
    let project = Project::new();
    project.hook(&["--no-such-flag"], &bash("rm -rf /")).code(0);
}

// ============================================================================
// Other hooks
// ============================================================================

#[test]
fn test_post_tool_use_never_blocks() {
    let project = Project::new();
    let file = project.path().join("notes.txt");
    std::fs::write(&file, "hello\n").unwrap();

    let input = serde_json::json!({"toolName": "Write", "parameters": {"file_path": file}});
    project.hook(&["post-tool-use"], &input.to_string()).code(0);

    let missing = serde_json::json!({"toolName": "Edit", "parameters": {"file_path": "/nonexistent/x.py"}});
    project.hook(&["post-tool-use"], &missing.to_string()).code(0);
    project.hook(&["post-tool-use"], "garbage").code(0);
}

#[test]
fn test_dangerous_prompt_exits_2() {
    let project = Project::new();
    let input = serde_json::json!({"prompt": "please DROP DATABASE production"});
    project
        .hook(&["user-prompt-submit"], &input.to_string())
        .code(2)
        .stdout(predicate::str::contains("Requesting database deletion"));
}

#[test]
fn test_ordinary_prompt_allowed() {
    let project = Project::new();
    let input = serde_json::json!({"prompt": "explain how the parser handles quoting"});
    project.hook(&["user-prompt-submit"], &input.to_string()).code(0);
}

#[test]
fn test_stop_reports_test_reminder() {
    let project = Project::new();
    std::fs::write(project.path().join("package.json"), "{}").unwrap();
    project
        .hook(&["stop"], "{}")
        .code(0)
        .stdout(predicate::str::contains("Remember to run tests"));
}

#[test]
fn test_session_start_reports_project() {
    let project = Project::new();
    let name = project.path().file_name().unwrap().to_string_lossy().into_owned();
    project
        .hook(&["session-start"], "{}")
        .code(0)
        .stdout(predicate::str::contains(format!("Project: {}", name)));
    project.hook(&["session-start"], "").code(0);
}

#[test]
fn test_default_config_is_valid_toml() {
    let project = Project::new();
    let output = project.hook(&["default-config"], "").code(0).get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    let config: hookguard::Config = toml::from_str(&text).unwrap();
    assert!(config.general.audit_log);
}
