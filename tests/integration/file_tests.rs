//! Integration tests for write/edit path checks

use hookguard::{GuardEngine, HookInput};

fn check_file(tool: &str, path: &str) -> hookguard::Decision {
    let params = match tool {
        "NotebookEdit" => serde_json::json!({ "notebook_path": path, "new_source": "" }),
        "MultiEdit" => serde_json::json!({ "file_path": path, "edits": [] }),
        _ => serde_json::json!({ "file_path": path, "content": "" }),
    };
    let json = serde_json::json!({ "toolName": tool, "parameters": params }).to_string();
    let input = HookInput::from_json(&json).unwrap();
    GuardEngine::default().check(&input)
}

fn is_blocked(path: &str) -> bool {
    check_file("Write", path).is_block()
}

// ============================================================================
// Sensitive files
// ============================================================================

#[test]
fn test_env_files_blocked() {
    assert!(is_blocked("/project/.env"));
    assert!(is_blocked("/project/.env.local"));
    assert!(is_blocked(".env"));
}

#[test]
fn test_key_material_blocked() {
    assert!(is_blocked("/home/dev/.ssh/id_rsa"));
    assert!(is_blocked("/project/certs/server.pem"));
    assert!(is_blocked("/project/certs/server.key"));
    assert!(is_blocked("/project/aws/credentials"));
    assert!(is_blocked("/project/config/secrets.yml"));
}

#[test]
fn test_ordinary_files_allowed() {
    assert!(!is_blocked("/project/src/app.py"));
    assert!(!is_blocked("/project/README.md"));
    assert!(!is_blocked("/project/src/environment.ts"));
    assert!(!is_blocked("/project/src/keyboard.rs"));
}

// ============================================================================
// System directories
// ============================================================================

#[test]
fn test_system_dirs_blocked() {
    assert_eq!(check_file("Write", "/etc/passwd").rule_id(), Some("system-dir"));
    assert!(is_blocked("/usr/bin/python3"));
    assert!(is_blocked("/boot/grub/grub.cfg"));
}

#[test]
fn test_nonexistent_system_path_blocked() {
    assert!(is_blocked("/etc/hookguard-test-does-not-exist/new.conf"));
}

#[test]
fn test_traversal_blocked() {
    assert!(is_blocked("/project/../etc/shadow"));
    assert!(is_blocked("/tmp/a/b/../../../etc/hosts"));
}

#[test]
fn test_prefix_is_not_containment() {
    assert!(!is_blocked("/etcetera/notes.txt"));
    assert!(!is_blocked("/variable/data.txt"));
}

#[cfg(unix)]
#[test]
fn test_symlink_into_system_dir_blocked() {
    let dir = tempfile::TempDir::new().unwrap();
    let link = dir.path().join("sneaky");
    std::os::unix::fs::symlink("/etc", &link).unwrap();

    let target = link.join("motd");
    assert!(is_blocked(target.to_str().unwrap()));
}

// ============================================================================
// Tool routing
// ============================================================================

#[test]
fn test_all_write_tools_checked() {
    for tool in ["Write", "Edit", "MultiEdit", "NotebookEdit"] {
        assert!(check_file(tool, "/project/.env").is_block(), "{} not checked", tool);
        assert!(check_file(tool, "/project/src/app.py").is_allow(), "{} over-blocked", tool);
    }
}

#[test]
fn test_read_is_not_guarded() {
    assert!(check_file("Read", "/etc/passwd").is_allow());
}

#[test]
fn test_path_decisions_are_idempotent() {
    for path in ["/etc/passwd", "/project/.env", "/project/src/app.py"] {
        assert_eq!(check_file("Edit", path), check_file("Edit", path));
    }
    assert_eq!(
        hookguard::evaluate_file_operation("/etc/passwd"),
        check_file("Write", "/etc/passwd")
    );
}

#[cfg(unix)]
#[test]
fn test_parent_dir_after_symlink_follows_link_target() {
    let dir = tempfile::TempDir::new().unwrap();
    let protected = dir.path().join("prod");
    std::fs::create_dir_all(protected.join("releases")).unwrap();
    std::fs::create_dir_all(dir.path().join("work")).unwrap();
    let link = dir.path().join("work").join("current");
    std::os::unix::fs::symlink(protected.join("releases"), &link).unwrap();

    let mut config = hookguard::Config::default();
    config.overrides.allowlist_file = None;
    config
        .guard
        .sensitive_dirs
        .push(protected.canonicalize().unwrap().display().to_string());
    let engine = GuardEngine::new(&config).unwrap();

    let target = link.join("..").join("deploy.yaml");
    let json = serde_json::json!({
        "toolName": "Write",
        "parameters": { "file_path": target, "content": "" }
    })
    .to_string();
    let decision = engine.check(&HookInput::from_json(&json).unwrap());
    assert_eq!(decision.rule_id(), Some("system-dir"));

    // The same name outside the link stays writable
    let sibling = dir.path().join("work").join("deploy.yaml");
    let json = serde_json::json!({
        "toolName": "Write",
        "parameters": { "file_path": sibling, "content": "" }
    })
    .to_string();
    assert!(engine.check(&HookInput::from_json(&json).unwrap()).is_allow());
}
