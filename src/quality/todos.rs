//! TODO/FIXME marker scanning for the completion summary

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?://|#|/\*|\*)\s*(TODO|FIXME|HACK|XXX):?\s*(.+)").unwrap());

/// Longest comment text kept per marker
pub const MAX_COMMENT_CHARS: usize = 100;

/// A marker comment found in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub file: String,
    /// TODO, FIXME, HACK or XXX
    pub kind: String,
    pub comment: String,
}

/// Find marker comments in file contents
pub fn scan_text(file: &str, content: &str) -> Vec<TodoItem> {
    MARKER
        .captures_iter(content)
        .map(|caps| TodoItem {
            file: file.to_string(),
            kind: caps[1].to_ascii_uppercase(),
            comment: caps[2].trim().chars().take(MAX_COMMENT_CHARS).collect(),
        })
        .collect()
}

/// Scan up to `limit` files, relative to `base`. Unreadable and missing
/// files are skipped.
pub fn scan_files(base: &Path, files: &[String], limit: usize) -> Vec<TodoItem> {
    files
        .iter()
        .filter(|f| !f.is_empty())
        .take(limit)
        .filter_map(|file| {
            let bytes = std::fs::read(base.join(file)).ok()?;
            Some(scan_text(file, &String::from_utf8_lossy(&bytes)))
        })
        .flatten()
        .collect()
}
