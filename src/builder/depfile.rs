//! Makefile-style depfile parsing.
//!
//! `cc -MMD -MF <file>` emits `obj.o: src.c header.h ...` with backslash
//! line continuations. The prerequisite list after the colon is the source
//! file followed by every header it transitively included.

use std::path::{Path, PathBuf};

/// Parse depfile content into the header list for a unit.
///
/// The unit's own source path is excluded; only headers are recorded.
pub fn parse_depfile(content: &str, source: &Path) -> Vec<PathBuf> {
    // Join continuation lines before tokenizing.
    let flat = content.replace("\\\r\n", " ").replace("\\\n", " ");

    let Some((_, prerequisites)) = flat.split_once(':') else {
        return Vec::new();
    };

    tokenize(prerequisites)
        .into_iter()
        .map(PathBuf::from)
        .filter(|p| p != source)
        .collect()
}

/// Split a prerequisite list on whitespace, honoring make's escapes:
/// `\ ` is a literal space inside a path and `$$` is a literal `$`.
fn tokenize(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&' ') => {
                chars.next();
                current.push(' ');
            }
            '$' if chars.peek() == Some(&'$') => {
                chars.next();
                current.push('$');
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
