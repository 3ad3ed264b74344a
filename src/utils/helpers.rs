//! General utility helper functions
//!
//! Slug handling for plugin identifiers: prefix derivation for persisted
//! option names and validation for host-facing tools.

use regex::Regex;

/// Convert a kebab-case identifier to snake case.
pub fn kebab_to_snake(name: &str) -> String {
    name.replace('-', "_")
}

/// Derive the option-name prefix for a plugin slug.
///
/// `my-plugin` becomes `my_plugin_`.
pub fn option_prefix(slug: &str) -> String {
    format!("{}_", kebab_to_snake(slug))
}

/// Check if a string is a well-formed plugin slug: lowercase alphanumeric
/// segments separated by single hyphens.
pub fn is_valid_plugin_slug(slug: &str) -> bool {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$")
        .map(|re| re.is_match(slug))
        .unwrap_or(false)
}
