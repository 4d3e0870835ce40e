//! hookguard - lifecycle hooks for AI coding assistants
//!
//! # Usage
//!
//! ```bash
//! # Guard a tool call (reads JSON from stdin, exit 2 blocks)
//! echo '{"toolName":"Bash","parameters":{"command":"rm -rf /"}}' | hookguard pre-tool-use
//!
//! # Print the default configuration
//! hookguard default-config > ~/.claude/hookguard/config.toml
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use hookguard::{
    audit::AuditLogger,
    config::{Config, DEFAULT_CONFIG_TOML},
    engine::GuardEngine,
    error::ConfigError,
    hooks,
    output::{HookOutcome, EXIT_ALLOW},
    quality::runner::SystemRunner,
};

/// Environment variable holding a tracing filter
const LOG_ENV: &str = "HOOKGUARD_LOG";

#[derive(Parser, Debug)]
#[command(name = "hookguard", version, about = "Lifecycle hooks for AI coding assistants")]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level for stderr diagnostics (overrides config)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Emit diagnostics as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    hook: Option<Hook>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Hook {
    /// Report project and git context for a new session
    SessionStart,
    /// Block dangerous commands and protected file writes
    PreToolUse,
    /// Format and lint files that were just written
    PostToolUse,
    /// Block destructive prompts and add context hints
    UserPromptSubmit,
    /// Summarize uncommitted work and new TODOs
    Stop,
    /// Print the default configuration
    DefaultConfig,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // clap exits 2 on usage errors, which the host reads as a block
            eprint!("{}", e);
            process::exit(EXIT_ALLOW);
        }
    };

    let hook = cli.hook.unwrap_or(Hook::PreToolUse);
    if hook == Hook::DefaultConfig {
        print!("{}", DEFAULT_CONFIG_TOML);
        return;
    }

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config_error = loaded.as_ref().err().map(ConfigError::to_string);
    let config = loaded.unwrap_or_default();

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.general.log_level), cli.log_json);
    if let Some(error) = config_error {
        tracing::warn!(%error, "invalid configuration, using defaults");
    }

    let mut raw = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut raw) {
        tracing::warn!(error = %e, "failed to read hook input");
        finish(HookOutcome::allow());
    }

    let outcome = match hook {
        Hook::PreToolUse => {
            let engine = GuardEngine::new(&config).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid guard configuration, using built-in rules");
                GuardEngine::default()
            });
            let logger = AuditLogger::new(config.audit_path().as_deref());
            if !logger.is_enabled() {
                tracing::debug!("audit log disabled");
            }
            hooks::pre_tool_use::run(&raw, &engine, &logger)
        }
        Hook::PostToolUse => hooks::post_tool_use::run(&raw, &SystemRunner, &config.quality),
        Hook::UserPromptSubmit => hooks::user_prompt::run(
            &raw,
            &SystemRunner,
            &project_dir(),
            config.quality.helper_timeout(),
        ),
        Hook::SessionStart => hooks::session_start::run(&raw, &SystemRunner, &config.quality, &project_dir()),
        Hook::Stop => hooks::stop::run(&raw, &SystemRunner, &config.quality, &project_dir()),
        Hook::DefaultConfig => HookOutcome::allow(),
    };

    finish(outcome)
}

fn project_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn finish(outcome: HookOutcome) -> ! {
    if let Some(text) = &outcome.stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let _ = writeln!(handle, "{}", text);
        let _ = handle.flush();
    }
    process::exit(outcome.exit_code)
}

fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
