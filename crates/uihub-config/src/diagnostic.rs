// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config diagnostics rendered with miette.
//!
//! Figment reports deserialization failures with a key path; they are mapped
//! onto [`ConfigError`] here, with a source span and a "did you mean?" hint
//! for misspelled keys.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a valid key must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key no config section accepts (typo or removed option).
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(uihub::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a recognized key here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong type, or a string outside an enumerated set
    /// such as `store.backend`.
    #[error("invalid value for `{key}`: {detail}")]
    #[diagnostic(code(uihub::config::invalid_value))]
    InvalidValue { key: String, detail: String },

    /// A field with no default is absent. Only catalog entries have these.
    #[error("missing required key `{key}`")]
    #[diagnostic(code(uihub::config::missing_key))]
    MissingKey { key: String },

    /// The config parsed but a semantic check failed.
    #[error("validation error: {message}")]
    #[diagnostic(code(uihub::config::validation))]
    Validation { message: String },

    /// Unreadable file, TOML syntax error, or anything else figment reports.
    #[error("configuration error: {0}")]
    #[diagnostic(code(uihub::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? accepted here: {valid_keys}"),
        None => format!("accepted here: {valid_keys}"),
    }
}

/// Dotted key path, e.g. `server.port` or `catalog.0.services.1`.
fn dotted(path: &[String], leaf: Option<&str>) -> String {
    path.iter()
        .map(String::as_str)
        .chain(leaf)
        .collect::<Vec<_>>()
        .join(".")
}

/// Maps one figment failure chain onto config errors, one per failure.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate_key(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: dotted(&error.path, Some(field)),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidValue {
                key: dotted(&error.path, None),
                detail: format!("found {actual}, expected {expected}"),
            },
            Kind::UnknownVariant(variant, expected) => ConfigError::InvalidValue {
                key: dotted(&error.path, None),
                detail: format!("`{variant}` is not one of: {}", expected.join(", ")),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Finds the span of `field` in whichever TOML source produced `error`.
fn locate_key(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings have no file path; a lone source is the only candidate.
    let matched = match file {
        Some(file) => toml_sources.iter().find(|(p, _)| *p == file),
        None => None,
    };
    let Some((name, content)) = matched.or(match toml_sources {
        [only] => Some(only),
        _ => None,
    }) else {
        return (None, None);
    };

    match find_key_offset(content, &error.path, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` inside the table named by `path`.
///
/// Array indices in `path` are dropped, so `["catalog", "0", "services"]`
/// searches below the first `[[catalog.services]]` header. An empty path
/// searches from the top of the file.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let table: Vec<&str> = path
        .iter()
        .map(String::as_str)
        .filter(|segment| segment.parse::<usize>().is_err())
        .collect();

    let start = if table.is_empty() {
        0
    } else {
        // `[catalog]` also matches inside `[[catalog]]`.
        let header = format!("[{}]", table.join("."));
        content.find(&header)? + header.len()
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let key = line.trim_start();
        let indent = line.len() - key.len();
        if key
            .strip_prefix(field)
            .is_some_and(|rest| rest.trim_start().starts_with('='))
        {
            return Some(offset + indent);
        }
        offset += line.len();
    }

    None
}

/// Closest accepted key to `unknown`, if any is similar enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Prints each error to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn suggests_backend_for_backnd() {
        let valid = &["backend", "api_url", "token_file", "ca_file"];
        assert_eq!(suggest_key("backnd", valid).as_deref(), Some("backend"));
    }

    #[test]
    fn suggests_closest_of_several_candidates() {
        let valid = &["host", "port", "log_level", "request_timeout_secs"];
        assert_eq!(suggest_key("log_levl", valid).as_deref(), Some("log_level"));
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn finds_key_below_its_table() {
        let content = "[server]\nport = 1\n[store]\nbacknd = \"memory\"\n";
        let o = find_key_offset(content, &path(&["store"]), "backnd").unwrap();
        assert_eq!(&content[o..o + 6], "backnd");
    }

    #[test]
    fn finds_key_in_array_of_tables() {
        let content = "[[catalog]]\nname = \"a\"\n[[catalog.services]]\nalias = \"x\"\nnamspace = \"y\"\n";
        let o = find_key_offset(content, &path(&["catalog", "0", "services", "0"]), "namspace")
            .unwrap();
        assert_eq!(&content[o..o + 8], "namspace");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let content = "[store]\r\nbackend = \"memory\"\r\napi_urll = \"x\"\r\n";
        let o = find_key_offset(content, &path(&["store"]), "api_urll").unwrap();
        assert_eq!(&content[o..o + 8], "api_urll");
    }

    #[test]
    fn key_prefix_does_not_match_longer_key() {
        let content = "[store]\nca_file_extra = 1\nca_file = 2\n";
        let o = find_key_offset(content, &path(&["store"]), "ca_file").unwrap();
        assert_eq!(&content[o..], "ca_file = 2\n");
    }

    #[test]
    fn missing_table_is_none() {
        let content = "[server]\nport = 1\n";
        assert_eq!(find_key_offset(content, &path(&["store"]), "port"), None);
    }

    #[test]
    fn dotted_path_appends_leaf() {
        assert_eq!(dotted(&path(&["catalog", "0"]), Some("name")), "catalog.0.name");
        assert_eq!(dotted(&path(&["server", "port"]), None), "server.port");
    }
}
