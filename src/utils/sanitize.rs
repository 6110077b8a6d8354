//! Input validation for names passed to package managers
//!
//! Package names given on the command line end up as arguments to privileged
//! tools, so they are checked against a conservative character set first.

use crate::error::{Result, SnapwizError};
use regex::Regex;
use std::sync::LazyLock;

/// Characters accepted in deb and rpm package names
/// (alphanumeric, dash, underscore, dot, plus, colon for multiarch, tilde)
static SAFE_PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._+:~-]*$").expect("Invalid regex pattern")
});

static SHELL_DANGEROUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[;`$(){}|&<>\\'"\n\r\t ]"#).expect("Invalid regex pattern"));

const MAX_NAME_LEN: usize = 256;

/// Validate a package name before it reaches a removal command.
///
/// Rejects shell metacharacters, option-looking names (`-y`) and path
/// fragments, so `foo; rm -rf /` never gets near `apt remove`.
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SnapwizError::ConfigError(
            "Package name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_NAME_LEN {
        let preview: String = name.chars().take(50).collect();
        return Err(SnapwizError::ConfigError(format!(
            "Package name too long (max {} chars): {}...",
            MAX_NAME_LEN, preview
        )));
    }

    if SHELL_DANGEROUS.is_match(name) {
        return Err(SnapwizError::ConfigError(format!(
            "Package name contains unsafe characters: {}",
            name
        )));
    }

    if !SAFE_PACKAGE_NAME.is_match(name) || name.contains("..") {
        return Err(SnapwizError::ConfigError(format!(
            "Package name contains invalid characters: {}",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests;
