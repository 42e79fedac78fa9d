//! Brewfile line classification and per-directive tokenizers.
//!
//! A Brewfile is a declarative package list. Each line is one directive:
//!
//! ```text
//! # comment
//! tap "homebrew/cask-fonts"
//! brew "wget"
//! cask_args appdir: "/Applications"
//! cask "firefox" {--no-quarantine}
//! ```
//!
//! Classification only looks at the leading keyword. The payload of each
//! directive is parsed separately by the matching `parse_*` function, so a
//! caller can decide whether a line is worth parsing before it can fail.

use crate::error::{BundleError, Result};
use std::path::Path;
use thiserror::Error;

/// Why a directive payload could not be tokenized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing quoted name")]
    MissingQuotedName,

    #[error("empty name")]
    EmptyName,

    #[error("expected `key: value`")]
    MissingArgumentSeparator,
}

/// One classified Brewfile line
///
/// Keyword variants borrow the payload that follows the keyword, already
/// trimmed. `Unknown` borrows the whole trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    Blank,
    Comment,
    Tap(&'a str),
    Brew(&'a str),
    Cask(&'a str),
    CaskArgs(&'a str),
    Unknown(&'a str),
}

/// A parsed `cask` directive: `cask "name" {opt opt}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCask<'a> {
    pub name: &'a str,
    pub options: Vec<&'a str>,
}

/// One `key: value` pair from a `cask_args` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaskArg<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Classify a single line by its leading keyword
pub fn classify(line: &str) -> Directive<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Directive::Blank;
    }
    if line.starts_with('#') {
        return Directive::Comment;
    }

    let end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    let (keyword, payload) = line.split_at(end);

    // The keyword must end at whitespace, a quote, or end of line
    if !(payload.is_empty() || payload.starts_with(|c: char| c.is_whitespace() || c == '"')) {
        return Directive::Unknown(line);
    }
    let payload = payload.trim();

    match keyword {
        "tap" => Directive::Tap(payload),
        "brew" => Directive::Brew(payload),
        "cask" => Directive::Cask(payload),
        "cask_args" => Directive::CaskArgs(payload),
        _ => Directive::Unknown(line),
    }
}

/// Split off the first `"..."` group, returning the name and the text after it
fn split_quoted(s: &str) -> std::result::Result<(&str, &str), ParseError> {
    let open = s.find('"').ok_or(ParseError::MissingQuotedName)?;
    let after_open = &s[open + 1..];
    let close = after_open.find('"').ok_or(ParseError::MissingQuotedName)?;

    let name = &after_open[..close];
    if name.is_empty() {
        return Err(ParseError::EmptyName);
    }

    Ok((name, &after_open[close + 1..]))
}

/// Text strictly between the first and second `"` in `s`
pub fn quoted_name(s: &str) -> std::result::Result<&str, ParseError> {
    split_quoted(s).map(|(name, _)| name)
}

/// Parse the payload of `tap "user/repo"`
pub fn parse_tap(payload: &str) -> std::result::Result<&str, ParseError> {
    quoted_name(payload)
}

/// Parse the payload of `brew "formula"`
pub fn parse_brew(payload: &str) -> std::result::Result<&str, ParseError> {
    quoted_name(payload)
}

/// Parse the payload of `cask "token" {opt ...}`
///
/// Options are the whitespace-separated tokens inside the first `{...}`
/// group following the name. Without both braces there are no options.
pub fn parse_cask(payload: &str) -> std::result::Result<ParsedCask<'_>, ParseError> {
    let (name, rest) = split_quoted(payload)?;

    let options = rest
        .find('{')
        .map(|open| &rest[open + 1..])
        .and_then(|inner| inner.find('}').map(|close| &inner[..close]))
        .map(|group| group.split_whitespace().collect())
        .unwrap_or_default();

    Ok(ParsedCask { name, options })
}

/// Split on commas that are not inside `"..."` or `'...'`
fn split_unquoted_commas(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote = None;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, ',') => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);

    parts
}

/// Parse the payload of `cask_args key: "value", key: value`
pub fn parse_cask_args(payload: &str) -> std::result::Result<Vec<CaskArg<'_>>, ParseError> {
    let mut args = Vec::new();

    for pair in split_unquoted_commas(payload) {
        if pair.trim().is_empty() {
            continue;
        }
        let (key, value) = pair
            .split_once(':')
            .ok_or(ParseError::MissingArgumentSeparator)?;
        args.push(CaskArg {
            key: key.trim(),
            value: value.trim().trim_matches(|c| c == '"' || c == '\''),
        });
    }

    if args.is_empty() {
        return Err(ParseError::MissingArgumentSeparator);
    }

    Ok(args)
}

/// Read a Brewfile from disk
pub fn read_brewfile(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            BundleError::FileNotFound(path.to_path_buf())
        } else {
            BundleError::ReadFailure {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
