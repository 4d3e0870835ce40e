//! External command execution with timeouts
//!
//! Every helper the hooks shell out to (formatters, linters, git) goes
//! through [`CommandRunner`] so tests can substitute a fake.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::RunError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout followed by stderr, trimmed
    pub fn combined(&self) -> String {
        let mut text = self.stdout.trim_end().to_string();
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr);
        }
        text
    }
}

/// Runs external programs
pub trait CommandRunner {
    /// Run `program` with `args`, killing it once `timeout` elapses
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<CommandOutput, RunError>;

    /// Whether `program` can be found and executed
    fn is_available(&self, program: &str) -> bool;
}

/// Runs real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<CommandOutput, RunError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Drain pipes on their own threads so a chatty child can't fill the
        // pipe buffer and stall until the deadline
        let (tx, rx) = mpsc::channel();
        spawn_reader(Pipe::Stdout, child.stdout.take(), tx.clone());
        spawn_reader(Pipe::Stderr, child.stderr.take(), tx);

        let deadline = Instant::now() + timeout;
        let timed_out = || RunError::Timeout {
            program: program.to_string(),
            timeout,
        };
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(timed_out());
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    let _ = child.kill();
                    return Err(RunError::Wait {
                        program: program.to_string(),
                        source,
                    });
                }
            }
        };

        // A background grandchild can inherit the pipes and keep them open
        // after the child exits, so the readers share the same deadline
        let mut output = CommandOutput {
            success: status.success(),
            ..Default::default()
        };
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((Pipe::Stdout, text)) => output.stdout = text,
                Ok((Pipe::Stderr, text)) => output.stderr = text,
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    tracing::debug!(program, "output pipes still open at deadline");
                    return Err(timed_out());
                }
            }
        }

        Ok(output)
    }

    fn is_available(&self, program: &str) -> bool {
        find_in_path(program).is_some()
    }
}

#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

/// Read `pipe` to the end on a detached thread and send the text on `tx`
fn spawn_reader<R: Read + Send + 'static>(which: Pipe, pipe: Option<R>, tx: Sender<(Pipe, String)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send((which, String::from_utf8_lossy(&buf).into_owned()));
    });
}

/// Locate an executable on `PATH`
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    if program.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Memo of which external tools are installed.
///
/// Created fresh for each hook dispatch and passed to the helpers that need
/// it, so each binary is looked up at most once per invocation.
pub struct ToolCache<'a> {
    runner: &'a dyn CommandRunner,
    known: HashMap<String, bool>,
}

impl<'a> ToolCache<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            known: HashMap::new(),
        }
    }

    /// Check (and remember) whether a program is installed
    pub fn is_available(&mut self, program: &str) -> bool {
        if let Some(&available) = self.known.get(program) {
            return available;
        }
        let available = self.runner.is_available(program);
        tracing::debug!(program, available, "tool lookup");
        self.known.insert(program.to_string(), available);
        available
    }

    pub fn runner(&self) -> &'a dyn CommandRunner {
        self.runner
    }
}
