//! File operation checking
//!
//! Checks Write/Edit targets against sensitive filename patterns and
//! protected system directories.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::config::Config;
use crate::output::Decision;
use crate::rules::RuleSet;

/// Rule id reported when a path lands inside a protected directory
pub const SYSTEM_DIR_RULE: &str = "system-dir";

/// A target path made absolute, in lexical and symlink-resolved form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Absolute path with `.` and `..` removed, symlinks untouched
    pub lexical: PathBuf,

    /// Symlink-free form; `None` when no ancestor could be canonicalized
    pub canonical: Option<PathBuf>,
}

/// Check a file path for security issues
pub fn check_path(file_path: &str, rules: &RuleSet, sensitive_dirs: &[PathBuf]) -> Decision {
    if file_path.is_empty() {
        return Decision::Allow;
    }

    if let Some(rule) = rules.first_match(file_path) {
        return Decision::block(
            rule.id.as_str(),
            format!(
                "SECURITY BLOCK: Attempting to modify sensitive file\nFile: {}\n\n\
                 {}. Credentials, keys, and .env files should be modified manually\n\
                 to prevent accidental exposure.\nPattern matched: {}",
                file_path, rule.reason, rule.pattern
            ),
        );
    }

    let resolved = match resolve(file_path) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::warn!(path = file_path, error = %e, "cannot resolve path, skipping directory check");
            return Decision::Allow;
        }
    };

    let candidates = resolved.canonical.iter().chain(std::iter::once(&resolved.lexical));
    for candidate in candidates {
        if let Some(dir) = protected_parent(candidate, sensitive_dirs) {
            return Decision::block(
                SYSTEM_DIR_RULE,
                format!(
                    "SECURITY BLOCK: Attempting to modify system directory\nPath: {}\n\
                     Protected directory: {}\n\n\
                     System directories should not be modified by AI.\n\
                     Please perform this operation manually if necessary.",
                    candidate.display(),
                    dir.display()
                ),
            );
        }
    }

    Decision::Allow
}

/// Return the protected directory containing `path`, if any
pub fn protected_parent<'a>(path: &Path, sensitive_dirs: &'a [PathBuf]) -> Option<&'a Path> {
    sensitive_dirs
        .iter()
        .find(|dir| path.starts_with(dir))
        .map(PathBuf::as_path)
}

/// Make a path absolute and resolve symlinks as far as the filesystem allows.
///
/// Paths that don't exist yet are resolved through their deepest existing
/// ancestor, so `/etc/new.conf` still resolves under `/etc`. Symlinks are
/// resolved before any `..` that follows them is applied.
pub fn resolve(file_path: &str) -> io::Result<ResolvedPath> {
    let expanded = Config::expand_path(file_path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };

    let lexical = normalize_lexically(&absolute);
    let canonical = match canonicalize_existing_prefix(&absolute) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(path = %absolute.display(), error = %e, "canonicalization failed, using lexical path");
            None
        }
    };

    Ok(ResolvedPath { lexical, canonical })
}

/// Drop `.` components and apply `..` without touching the filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Canonicalize the longest prefix of `path` that exists, then apply the
/// remaining components on top of the resolved prefix.
///
/// `path` must not be lexically normalised first: in `link/../x` the `..`
/// belongs to the symlink target, not to the directory holding `link`.
fn canonicalize_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let components: Vec<Component<'_>> = path.components().collect();
    let mut last_err = None;

    for split in (1..=components.len()).rev() {
        let prefix: PathBuf = components[..split].iter().collect();
        match prefix.canonicalize() {
            Ok(mut resolved) => {
                for component in &components[split..] {
                    match component {
                        Component::ParentDir => {
                            resolved.pop();
                        }
                        Component::Normal(part) => resolved.push(part),
                        Component::CurDir | Component::Prefix(_) | Component::RootDir => {}
                    }
                }
                return Ok(resolved);
            }
            Err(err) => last_err = Some(err),
        }
    }

    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "empty path")))
}
