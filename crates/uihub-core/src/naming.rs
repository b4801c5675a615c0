// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DNS label validation for plugin names.
//!
//! Plugin resources are cluster objects, so their names must be RFC 1123
//! labels: lowercase alphanumerics and hyphens, at most 63 characters, not
//! starting or ending with a hyphen.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::HubError;

/// Maximum length of a DNS label.
pub const MAX_LABEL_LEN: usize = 63;

static DNS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

/// Returns true if `value` is a syntactically valid DNS label.
pub fn is_dns_label(value: &str) -> bool {
    !value.is_empty() && value.len() <= MAX_LABEL_LEN && DNS_LABEL.is_match(value)
}

/// Validates a plugin name taken from a request path.
pub fn validate_plugin_name(name: &str) -> Result<(), HubError> {
    if is_dns_label(name) {
        Ok(())
    } else {
        Err(HubError::InvalidName(format!("`{name}` is not a valid DNS label")))
    }
}
